//! Entlog: derives TypeORM "log" entity sources from entity sources.
//!
//! Given a `*.entity.ts` file, the engine produces a sibling `*.log.entity.ts`
//! declaring a `<Class>Log` entity that extends `BaseLogEntity`, with all
//! relations, lifecycle hooks, and methods stripped and the identity/uniqueness
//! decorators rewritten. A companion `.ext.d.ts` module augmentation is emitted
//! alongside it.
//!
//! The scanner works line by line with string heuristics and brace-depth
//! tracking, not a TypeScript parser. It is tuned to one entity-file
//! convention; unrecognized shapes fall through to verbatim copy.
//!
//! # Modules
//!
//! - [`transform`]: the line-scan state machine and block-skip logic
//! - [`decorators`]: `@Entity`/`@Unique`/`@PrimaryGeneratedColumn` rewrites
//! - [`fields`]: relation-shaped field and audit-timestamp classification
//! - [`paths`]: artifact path derivation from the input file name
//! - [`declaration`]: the `.ext.d.ts` augmentation template
//! - [`generate`]: the read-transform-write pipeline
//! - [`types`]: scan state, scan context, and the generation summary

pub mod declaration;
pub mod decorators;
pub mod fields;
pub mod generate;
pub mod paths;
pub mod transform;
pub mod types;

pub use generate::{generate, GenerateError};
pub use transform::transform;
pub use types::{GenerateSummary, ScanContext, ScanState};
