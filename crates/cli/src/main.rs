fn main() {
    if let Err(e) = blueprint_cli::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
