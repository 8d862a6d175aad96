//! Decorator rewrites applied while deriving the log entity.
//!
//! Each rewrite touches the narrowest span that needs to change (the first
//! quoted string, or the parenthesized argument list) and leaves the rest of
//! the line, indentation included, byte-for-byte intact.

use crate::types::{ENTITY_NAME_SUFFIX, UNIQUE_NAME_SUFFIX};
use regex::Regex;
use std::sync::OnceLock;

static QUOTED_ARG_RE: OnceLock<Regex> = OnceLock::new();
static PRIMARY_GENERATED_RE: OnceLock<Regex> = OnceLock::new();

fn quoted_arg_re() -> &'static Regex {
    QUOTED_ARG_RE.get_or_init(|| Regex::new(r"'([^']+)'").unwrap())
}

fn primary_generated_re() -> &'static Regex {
    PRIMARY_GENERATED_RE.get_or_init(|| Regex::new(r"@PrimaryGeneratedColumn\([^)]*\)").unwrap())
}

/// `@Entity('orders')` becomes `@Entity('orders_logs')`.
///
/// Only the first quoted string on the line changes; a line with no quoted
/// argument passes through unchanged.
pub fn rename_entity(line: &str) -> String {
    suffix_first_quoted(line, ENTITY_NAME_SUFFIX)
}

/// `@Unique('uq_name', [...])` becomes `@Unique('uq_name_log', [...])`.
pub fn rename_unique(line: &str) -> String {
    suffix_first_quoted(line, UNIQUE_NAME_SUFFIX)
}

/// `@PrimaryGeneratedColumn(...)` becomes `@PrimaryColumn()`.
///
/// The log entity carries the primary key of the record it mirrors, so the
/// generated-key decorator and all of its arguments are dropped.
pub fn rewrite_primary_key(line: &str) -> String {
    primary_generated_re().replace(line, "@PrimaryColumn()").into_owned()
}

fn suffix_first_quoted(line: &str, suffix: &str) -> String {
    quoted_arg_re()
        .replace(line, |caps: &regex::Captures| format!("'{}{}'", &caps[1], suffix))
        .into_owned()
}
