//! Text patterns matched against the cursor line when the tree alone cannot
//! tell what is being typed.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid completion pattern")
}

/// `type: aws/lam` on the cursor line.
pub static TYPE_FIELD: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*(?:-\s+)?["']?type["']?\s*:\s*["']?[\w/.:\-]*$"#));

pub static FILTER_FIELD: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*(?:-\s+)?["']?field["']?\s*:\s*["']?[\w.\-]*$"#));

pub static FILTER_OPERATOR: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*(?:-\s+)?["']?operator["']?\s*:\s*["']?[^"',]*$"#));

pub static ALIAS_FOR: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*["']?aliasFor["']?\s*:\s*["']?[\w.\-\[\]]*$"#));

/// Captures what has been typed as the value of an export's `field`.
pub static EXPORT_FIELD_VALUE: Lazy<Regex> = Lazy::new(|| {
    compile(r#"^\s*["']?field["']?\s*:\s*["']?(?P<value>[^"'\s,]*)$"#)
});

pub static VERSION_VALUE: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*["']?version["']?\s*:\s*["']?[\w.\-]*$"#));

pub static TRANSFORM_VALUE: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*["']?transform["']?\s*:\s*(?:\[\s*)?["']?[\w.\-]*$"#));

pub static DEFAULT_VALUE: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*["']?default["']?\s*:\s*.*$"#));

pub static EXCLUDE_LIST: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*["']?exclude["']?\s*:\s*\[.*$"#));

pub static DEPENDS_ON_LIST: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*["']?dependsOn["']?\s*:\s*\[.*$"#));

/// `<namespace>.<name>` with the name possibly still empty.
pub static NAMESPACE_REF: Lazy<Regex> = Lazy::new(|| {
    compile(r#"^(?P<ns>variables|resources|datasources|values|children|elem)\.(?P<name>[A-Za-z0-9_\-]*)$"#)
});

/// `<namespace>.<name>` followed by at least one accessor.
pub static NAMESPACE_PROPERTY: Lazy<Regex> = Lazy::new(|| {
    compile(r#"^(?P<ns>variables|resources|datasources|values|children|elem)\.(?P<name>[A-Za-z_][A-Za-z0-9_\-]*)(?P<tail>(?:\.[A-Za-z0-9_\-]*|\[\d*\]?|\["[^"]*"?\]?)+)$"#)
});

/// `<name>` followed by at least one accessor, no namespace.
pub static BARE_PROPERTY: Lazy<Regex> = Lazy::new(|| {
    compile(r#"^(?P<name>[A-Za-z_][A-Za-z0-9_\-]*)(?P<tail>(?:\.[A-Za-z0-9_\-]*|\[\d*\]?|\["[^"]*"?\]?)+)$"#)
});

/// Words that open a reference and can never name a resource.
pub const RESERVED_NAMES: &[&str] = &[
    "variables",
    "resources",
    "datasources",
    "values",
    "children",
    "elem",
];

/// The expression typed so far inside an unclosed `${`, if the cursor is in one.
pub fn open_substitution(text_before: &str) -> Option<&str> {
    let opens = text_before.matches("${").count();
    let closes = text_before.matches('}').count();
    if opens <= closes {
        return None;
    }
    text_before.rfind("${").map(|i| &text_before[i + 2..])
}

/// Trailing reference token of an expression, e.g. `resources.x` in `join(values.a, resources.x`.
pub fn trailing_reference(expr: &str) -> &str {
    let mut depth = 0usize;
    let mut start = expr.len();
    for (i, c) in expr.char_indices().rev() {
        match c {
            ']' => depth += 1,
            '[' if depth > 0 => depth -= 1,
            c if depth == 0
                && !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '[' | '"')) =>
            {
                break;
            }
            _ => {}
        }
        start = i;
    }
    &expr[start..]
}
