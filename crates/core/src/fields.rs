//! Field classification: which class-body lines survive into the log entity.
//!
//! The classifier has no type resolution. A field whose declared type starts
//! with an uppercase letter is assumed to reference another entity class and
//! is dropped; everything it cannot recognize is kept.

use regex::Regex;
use std::sync::OnceLock;

/// Relation decorators whose lines are dropped outright.
const RELATION_DECORATORS: &[&str] = &["@ManyToOne", "@OneToMany", "@OneToOne", "@JoinColumn"];

/// Name of the audit timestamp field the log entity never carries.
pub const AUDIT_TIMESTAMP_FIELD: &str = "updatedAt";

static FIELD_DECL_RE: OnceLock<Regex> = OnceLock::new();

fn field_decl_re() -> &'static Regex {
    FIELD_DECL_RE.get_or_init(|| Regex::new(r"^(\w+):\s*(\w+(\[\])?);?\s*$").unwrap())
}

/// A bare field declaration recognized on a single trimmed line.
/// Derived per line and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    pub name: &'a str,
    pub declared_type: &'a str,
    pub uppercase_leading_type: bool,
}

/// Parse `name: Type;` / `name: Type[];` from a trimmed line.
///
/// Decorated lines, union types, initializers, and optional markers all fail
/// the pattern and are left for the verbatim-copy path.
pub fn classify_field(trimmed: &str) -> Option<FieldDecl<'_>> {
    let caps = field_decl_re().captures(trimmed)?;
    let name = caps.get(1).unwrap().as_str();
    let declared_type = caps.get(2).unwrap().as_str();
    Some(FieldDecl {
        name,
        declared_type,
        uppercase_leading_type: declared_type.starts_with(|c: char| c.is_ascii_uppercase()),
    })
}

/// True for lines starting with one of the four relation decorators.
pub fn is_relation_decorator(trimmed: &str) -> bool {
    RELATION_DECORATORS.iter().any(|d| trimmed.starts_with(d))
}

/// True for a field whose declared type names another entity class
/// (uppercase-leading, optionally an array).
pub fn is_relation_field(trimmed: &str) -> bool {
    classify_field(trimmed).is_some_and(|f| f.uppercase_leading_type)
}

/// The `updatedAt` discard rule, one line of lookahead included: the current
/// line is dropped when it mentions the timestamp, or when the next line
/// does. The lookahead targets the decorator written above the field; it is
/// kept positionally as-is even though it also drops the line before any
/// later mention.
pub fn drops_audit_timestamp(trimmed: &str, next_line: Option<&str>) -> bool {
    trimmed.contains(AUDIT_TIMESTAMP_FIELD)
        || next_line.is_some_and(|next| next.contains(AUDIT_TIMESTAMP_FIELD))
}
