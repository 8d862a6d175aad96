//! The generation pipeline: read one entity file, write two artifacts.

use crate::declaration::declaration_source;
use crate::paths;
use crate::transform::{find_export_class, transform};
use crate::types::{GenerateSummary, CLASS_NAME_SUFFIX};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// The two fatal conditions of a run. Heuristic misses are not errors; they
/// degrade the output instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input has no `export class` declaration anywhere, so the log
    /// entity and the declaration file cannot be named.
    #[error("no exported class found in {}", path.display())]
    ClassNotFound { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_error(path: &Path, source: io::Error) -> GenerateError {
    GenerateError::Io { path: path.to_path_buf(), source }
}

/// Transform `input` and write the log entity plus its declaration file.
///
/// The class name is checked up front: when the input has none, this fails
/// before anything is written. Output files are overwritten if present; the
/// sibling `types/` directory is created on demand.
pub fn generate(input: &Path) -> Result<GenerateSummary, GenerateError> {
    let content = fs::read_to_string(input).map_err(|e| io_error(input, e))?;

    let class_name = match find_export_class(&content) {
        Some(name) => name.to_string(),
        None => return Err(GenerateError::ClassNotFound { path: input.to_path_buf() }),
    };
    debug!(class = %class_name, input = %input.display(), "generating log entity");

    let out = transform(&content);

    let log_path = paths::log_entity_path(input);
    fs::write(&log_path, &out.text).map_err(|e| io_error(&log_path, e))?;
    info!(path = %log_path.display(), "log entity written");

    let base_name = paths::entity_base_name(input);
    let decl_path = paths::declaration_path(input);
    if let Some(types_dir) = decl_path.parent() {
        fs::create_dir_all(types_dir).map_err(|e| io_error(types_dir, e))?;
    }
    fs::write(&decl_path, declaration_source(&class_name, &base_name))
        .map_err(|e| io_error(&decl_path, e))?;
    info!(path = %decl_path.display(), "extension declaration written");

    Ok(GenerateSummary {
        log_class_name: format!("{class_name}{CLASS_NAME_SUFFIX}"),
        class_name,
        log_entity_path: log_path,
        declaration_path: decl_path,
        input_lines: content.lines().count(),
        output_lines: out.text.lines().count(),
    })
}
