pub mod adapter;
pub mod error;
pub mod models;
pub mod utils;

pub use adapter::GrammarAdapter;
pub use error::ParseError;
pub use models::*;
