//! Line-scan state machine: rewrites an entity source into a log-entity source.
//!
//! Single pass over the input lines with one line of lookahead (used only by
//! the `updatedAt` rule). Structure is recognized with string patterns and a
//! brace-depth counter; this is a deliberate heuristic tuned to the entity
//! file convention, not a parser.

use crate::decorators;
use crate::fields;
use crate::types::{ScanContext, ScanState, AUDIT_BASE_CLASS, CLASS_NAME_SUFFIX};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Fixed preamble of every generated log entity: the audit base import plus
/// the decorator imports the rewritten body can reference. Injected
/// unconditionally, independent of what the input imported.
const PREAMBLE: &[&str] = &[
    "import { BaseLogEntity } from 'src/common/entities/base-log.entity';",
    "import {",
    "  Column,",
    "  Entity,",
    "  PrimaryColumn,",
    "  Unique,",
    "} from 'typeorm';",
    "",
];

static EXPORT_CLASS_RE: OnceLock<Regex> = OnceLock::new();

fn export_class_re() -> &'static Regex {
    EXPORT_CLASS_RE.get_or_init(|| Regex::new(r"export class (\w+)").unwrap())
}

/// First exported class name in `text`, if any. Works on a single line or on
/// a whole file.
pub fn find_export_class(text: &str) -> Option<&str> {
    export_class_re().captures(text).map(|caps| caps.get(1).unwrap().as_str())
}

/// Net `{` minus `}` balance across a line.
pub fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    for ch in line.chars() {
        match ch {
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}

/// A line "looks like a method signature": a call-style `()` pair together
/// with a brace. Named heuristic; it conflates signatures with other
/// parenthesized expressions and that is accepted.
pub fn looks_like_method(trimmed: &str) -> bool {
    trimmed.contains("()") && (trimmed.contains('{') || trimmed.contains('}'))
}

/// Lifecycle hook decorators always start a block to skip.
pub fn is_lifecycle_hook(trimmed: &str) -> bool {
    trimmed.contains("@BeforeInsert") || trimmed.contains("@BeforeUpdate")
}

/// Import statements end on a line closing the binding list or on a
/// terminated single-line form.
fn ends_import(trimmed: &str) -> bool {
    trimmed.contains("} from '") || trimmed.ends_with("';")
}

// ---------------------------------------------------------------------------
// The state machine
// ---------------------------------------------------------------------------

/// Advance the scanner by one line.
///
/// Pure in `(state, line, next_line)` apart from the lines it appends to
/// `ctx.output` and the depth/name bookkeeping, so each transition can be
/// exercised in isolation.
pub fn step(
    state: ScanState,
    ctx: &mut ScanContext,
    line: &str,
    next_line: Option<&str>,
) -> ScanState {
    let trimmed = line.trim();

    match state {
        ScanState::Preamble => {
            if trimmed.starts_with("import") {
                return ScanState::SkippingImportBlock;
            }
            if trimmed.is_empty() {
                return ScanState::Preamble;
            }
            if trimmed.contains("@Entity(") {
                ctx.push(decorators::rename_entity(line));
                return ScanState::Preamble;
            }
            if trimmed.contains("@Unique(") {
                ctx.push(decorators::rename_unique(line));
                return ScanState::Preamble;
            }
            if let Some(name) = find_export_class(line) {
                debug!(class = name, "entity class found");
                ctx.push(format!(
                    "export class {name}{CLASS_NAME_SUFFIX} extends {AUDIT_BASE_CLASS} {{"
                ));
                ctx.class_name = Some(name.to_string());
                return ScanState::InClassBody;
            }
            // Anything else ahead of the class (stray decorators, comments)
            // is carried over untouched.
            ctx.push(line);
            ScanState::Preamble
        }

        ScanState::SkippingImportBlock => {
            // A fresh import statement keeps the skip going; only a line that
            // textually ends an import hands control back.
            if trimmed.starts_with("import") {
                return ScanState::SkippingImportBlock;
            }
            if ends_import(trimmed) {
                return ScanState::Preamble;
            }
            ScanState::SkippingImportBlock
        }

        ScanState::InClassBody => {
            if is_lifecycle_hook(trimmed) || looks_like_method(trimmed) {
                ctx.brace_depth = brace_delta(line);
                if ctx.brace_depth <= 0 {
                    // One-liner: the block opens and closes on this line.
                    ctx.brace_depth = 0;
                    return ScanState::InClassBody;
                }
                return ScanState::SkippingBlock;
            }
            if fields::is_relation_decorator(trimmed) {
                return ScanState::InClassBody;
            }
            if fields::is_relation_field(trimmed) {
                debug!(line = trimmed, "relation-shaped field dropped");
                return ScanState::InClassBody;
            }
            if fields::drops_audit_timestamp(trimmed, next_line) {
                return ScanState::InClassBody;
            }
            if trimmed.contains("@PrimaryGeneratedColumn") {
                ctx.push(decorators::rewrite_primary_key(line));
                return ScanState::InClassBody;
            }
            if trimmed == "}" {
                ctx.push(line);
                return ScanState::Done;
            }
            ctx.push_collapsed(line);
            ScanState::InClassBody
        }

        ScanState::SkippingBlock => {
            ctx.brace_depth += brace_delta(line);
            if ctx.brace_depth <= 0 {
                ctx.brace_depth = 0;
                return ScanState::InClassBody;
            }
            ScanState::SkippingBlock
        }

        ScanState::Done => ScanState::Done,
    }
}

/// Output of one [`transform`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The log-entity source text.
    pub text: String,
    /// Class name captured at the declaration line, if one was seen.
    pub class_name: Option<String>,
}

/// Derive the log-entity source from an entity source.
///
/// Pure function of the input text: the same input always yields the same
/// output. An input with no class declaration yields a preamble-only result
/// and `class_name: None`; deciding whether that is fatal is the caller's
/// business.
pub fn transform(source: &str) -> TransformOutput {
    let mut ctx = ScanContext::default();
    for line in PREAMBLE {
        ctx.push(*line);
    }

    let lines: Vec<&str> = source.lines().collect();
    let mut state = ScanState::Preamble;
    for (i, line) in lines.iter().enumerate() {
        if state == ScanState::Done {
            break;
        }
        state = step(state, &mut ctx, line, lines.get(i + 1).copied());
    }

    TransformOutput {
        text: ctx.output.join("\n"),
        class_name: ctx.class_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> TransformOutput {
        transform(&lines.join("\n"))
    }

    fn body(out: &TransformOutput) -> Vec<String> {
        // Everything after the injected preamble.
        out.text.lines().skip(PREAMBLE.len()).map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_brace_delta() {
        assert_eq!(brace_delta("foo() {"), 1);
        assert_eq!(brace_delta("}"), -1);
        assert_eq!(brace_delta("if (x) { y(); }"), 0);
        assert_eq!(brace_delta("plain line"), 0);
    }

    #[test]
    fn test_looks_like_method() {
        assert!(looks_like_method("sync() {"));
        assert!(looks_like_method("async refresh() { await load(); }"));
        assert!(!looks_like_method("@Column()"));
        assert!(!looks_like_method("@PrimaryGeneratedColumn()"));
        assert!(!looks_like_method("name: string;"));
    }

    #[test]
    fn test_find_export_class() {
        assert_eq!(find_export_class("export class Order {"), Some("Order"));
        assert_eq!(find_export_class("export class User extends Base {"), Some("User"));
        assert_eq!(find_export_class("class Order {"), None);
    }

    #[test]
    fn test_preamble_is_injected_unconditionally() {
        let out = transform("");
        assert_eq!(out.text, PREAMBLE.join("\n"));
        assert_eq!(out.class_name, None);
    }

    #[test]
    fn test_class_declaration_is_reparented() {
        let out = run(&["export class Order {", "}"]);
        assert_eq!(out.class_name.as_deref(), Some("Order"));
        assert_eq!(
            body(&out),
            vec!["export class OrderLog extends BaseLogEntity {", "}"]
        );
    }

    #[test]
    fn test_import_lines_never_survive() {
        let out = run(&[
            "import { Customer } from './customer.entity';",
            "import {",
            "  Column,",
            "  Entity,",
            "} from 'typeorm';",
            "",
            "export class Order {",
            "}",
        ]);
        assert_eq!(
            body(&out),
            vec!["export class OrderLog extends BaseLogEntity {", "}"]
        );
    }

    #[test]
    fn test_entity_and_unique_markers_renamed() {
        let out = run(&[
            "@Entity('orders')",
            "@Unique('uq_order_ref', ['reference'])",
            "export class Order {",
            "}",
        ]);
        let body = body(&out);
        assert_eq!(body[0], "@Entity('orders_logs')");
        assert_eq!(body[1], "@Unique('uq_order_ref_log', ['reference'])");
    }

    #[test]
    fn test_multi_line_method_is_skipped_to_depth_zero() {
        let out = run(&[
            "export class Order {",
            "  recalculate() {",
            "    if (this.items) {",
            "      this.total = sum(this.items);",
            "    }",
            "  }",
            "",
            "  @Column()",
            "  total: number;",
            "}",
        ]);
        let text = out.text;
        assert!(!text.contains("recalculate"));
        assert!(!text.contains("this.total"));
        assert!(text.contains("total: number;"));
    }

    #[test]
    fn test_single_line_method_is_dropped_without_state_leak() {
        let out = run(&[
            "export class Order {",
            "  touch() { this.version += 1; }",
            "  @Column()",
            "  version: number;",
            "}",
        ]);
        assert!(!out.text.contains("touch"));
        assert!(out.text.contains("version: number;"));
    }

    #[test]
    fn test_lifecycle_hook_and_body_are_dropped() {
        let out = run(&[
            "export class User {",
            "  @BeforeInsert()",
            "  hashPassword() {",
            "    this.password = hash(this.password);",
            "  }",
            "}",
        ]);
        assert!(!out.text.contains("BeforeInsert"));
        assert!(!out.text.contains("hashPassword"));
        assert!(out.text.ends_with("}"));
    }

    #[test]
    fn test_scan_stops_at_class_close() {
        let out = run(&[
            "export class Order {",
            "}",
            "",
            "export class Leftover {",
            "}",
        ]);
        assert!(!out.text.contains("Leftover"));
        assert_eq!(out.class_name.as_deref(), Some("Order"));
    }

    #[test]
    fn test_consecutive_blanks_collapse() {
        let out = run(&[
            "export class Order {",
            "  @Column()",
            "  reference: string;",
            "",
            "",
            "  @Column()",
            "  total: number;",
            "}",
        ]);
        let body = body(&out);
        assert_eq!(
            body,
            vec![
                "export class OrderLog extends BaseLogEntity {",
                "  @Column()",
                "  reference: string;",
                "",
                "  @Column()",
                "  total: number;",
                "}",
            ]
        );
    }

    #[test]
    fn test_transform_is_deterministic() {
        let source = "@Entity('orders')\nexport class Order {\n  @Column()\n  reference: string;\n}\n";
        assert_eq!(transform(source), transform(source));
    }

    // The full scenario from the product contract: relations, hooks, and the
    // audit timestamp disappear; identity and scalar columns survive.
    #[test]
    fn test_full_entity_scenario() {
        let out = run(&[
            "import { Customer } from './customer.entity';",
            "import {",
            "  BeforeInsert,",
            "  Column,",
            "  Entity,",
            "  ManyToOne,",
            "  PrimaryGeneratedColumn,",
            "  Unique,",
            "  UpdateDateColumn,",
            "} from 'typeorm';",
            "",
            "@Entity('orders')",
            "@Unique('uq_order_reference', ['reference'])",
            "export class Order {",
            "  @PrimaryGeneratedColumn()",
            "  id: number;",
            "",
            "  @Column()",
            "  reference: string;",
            "",
            "  @ManyToOne(() => Customer, (customer) => customer.orders)",
            "  customer: Customer;",
            "",
            "  @UpdateDateColumn()",
            "  updatedAt: Date;",
            "",
            "  @BeforeInsert()",
            "  normalize() {",
            "    this.reference = this.reference.trim();",
            "  }",
            "}",
        ]);

        let text = &out.text;
        assert_eq!(out.class_name.as_deref(), Some("Order"));
        assert!(text.contains("export class OrderLog extends BaseLogEntity {"));
        assert!(text.contains("@Entity('orders_logs')"));
        assert!(text.contains("@Unique('uq_order_reference_log', ['reference'])"));
        assert!(text.contains("  @PrimaryColumn()\n  id: number;"));
        assert!(!text.contains("PrimaryGeneratedColumn"));
        assert!(!text.contains("customer"));
        assert!(!text.contains("ManyToOne"));
        assert!(!text.contains("updatedAt"));
        assert!(!text.contains("UpdateDateColumn"));
        assert!(!text.contains("normalize"));
        assert!(!text.contains("BeforeInsert"));
    }

    // Classless input degrades to a preamble-only output; the caller decides
    // whether that is fatal.
    #[test]
    fn test_no_class_is_not_fatal_here() {
        let out = run(&["const helper = 1;", ""]);
        assert_eq!(out.class_name, None);
        assert!(out.text.contains("const helper = 1;"));
    }
}
