//! Node kinds emitted by the tree-sitter JSON grammar.

pub const DOCUMENT: &str = "document";
pub const OBJECT: &str = "object";
pub const PAIR: &str = "pair";
pub const ARRAY: &str = "array";
pub const STRING: &str = "string";
pub const NUMBER: &str = "number";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const NULL: &str = "null";
pub const COMMENT: &str = "comment";
pub const ERROR: &str = "ERROR";

pub const COLON: &str = ":";

pub fn is_value(kind: &str) -> bool {
    matches!(kind, OBJECT | ARRAY | STRING | NUMBER | TRUE | FALSE | NULL)
}
