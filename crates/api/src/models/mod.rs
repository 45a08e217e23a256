pub mod format;
pub mod position;
pub mod schema;
pub mod tree;

pub use format::*;
pub use position::*;
pub use schema::*;
pub use tree::*;
