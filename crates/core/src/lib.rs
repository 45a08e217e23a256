pub mod completion;
pub mod config;
pub mod cursor;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod logging;
pub mod path;
pub mod recovery;
pub mod syntax;
pub mod util;

pub use completion::{CompletionContext, CompletionContextEngine, CompletionContextKind};
pub use config::CoreConfig;
pub use cursor::CursorContext;
pub use document::{DocumentContext, DocumentStatus, ParseSnapshot, ResolutionSource};
pub use duplicates::DuplicateKey;
pub use error::{CoreError, Result};
pub use path::StructuredPath;
