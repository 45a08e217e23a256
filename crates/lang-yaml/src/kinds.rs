//! Node kinds emitted by the tree-sitter YAML grammar.

pub const STREAM: &str = "stream";
pub const DOCUMENT: &str = "document";
pub const BLOCK_NODE: &str = "block_node";
pub const FLOW_NODE: &str = "flow_node";
pub const BLOCK_MAPPING: &str = "block_mapping";
pub const BLOCK_MAPPING_PAIR: &str = "block_mapping_pair";
pub const BLOCK_SEQUENCE: &str = "block_sequence";
pub const BLOCK_SEQUENCE_ITEM: &str = "block_sequence_item";
pub const FLOW_MAPPING: &str = "flow_mapping";
pub const FLOW_PAIR: &str = "flow_pair";
pub const FLOW_SEQUENCE: &str = "flow_sequence";
pub const PLAIN_SCALAR: &str = "plain_scalar";
pub const DOUBLE_QUOTE_SCALAR: &str = "double_quote_scalar";
pub const SINGLE_QUOTE_SCALAR: &str = "single_quote_scalar";
pub const BLOCK_SCALAR: &str = "block_scalar";
pub const ALIAS: &str = "alias";
pub const ANCHOR: &str = "anchor";
pub const TAG: &str = "tag";
pub const COMMENT: &str = "comment";

pub const STRING_SCALAR: &str = "string_scalar";
pub const INTEGER_SCALAR: &str = "integer_scalar";
pub const FLOAT_SCALAR: &str = "float_scalar";
pub const BOOLEAN_SCALAR: &str = "boolean_scalar";
pub const NULL_SCALAR: &str = "null_scalar";

pub const ERROR: &str = "ERROR";
