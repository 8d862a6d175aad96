//! Artifact path derivation from the input entity file name.

use std::path::{Path, PathBuf};

/// Recognized suffix of an entity definition file.
pub const ENTITY_SUFFIX: &str = ".entity.ts";

/// Suffix of the generated log entity file.
pub const LOG_ENTITY_SUFFIX: &str = ".log.entity.ts";

/// Suffix of the generated type-augmentation declaration file.
pub const DECLARATION_SUFFIX: &str = ".ext.d.ts";

/// Sibling directory the declaration file is written under.
pub const TYPES_DIR: &str = "types";

/// File name with the entity suffix stripped. Lenient: a name without the
/// suffix is used whole, so the derived outputs still land somewhere sane.
pub fn entity_base_name(input: &Path) -> String {
    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.strip_suffix(ENTITY_SUFFIX).unwrap_or(name).to_string()
}

/// `<dir>/<base>.entity.ts` -> `<dir>/<base>.log.entity.ts`
pub fn log_entity_path(input: &Path) -> PathBuf {
    input.with_file_name(format!("{}{}", entity_base_name(input), LOG_ENTITY_SUFFIX))
}

/// `<dir>/<base>.entity.ts` -> `<dir>/../types/<base>.ext.d.ts`
pub fn declaration_path(input: &Path) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join("..")
        .join(TYPES_DIR)
        .join(format!("{}{}", entity_base_name(input), DECLARATION_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_base_name() {
        assert_eq!(entity_base_name(Path::new("/app/entities/user.entity.ts")), "user");
        assert_eq!(entity_base_name(Path::new("order.entity.ts")), "order");
    }

    #[test]
    fn test_entity_base_name_without_suffix_is_lenient() {
        assert_eq!(entity_base_name(Path::new("/app/user.ts")), "user.ts");
    }

    #[test]
    fn test_log_entity_path_is_a_sibling() {
        assert_eq!(
            log_entity_path(Path::new("/app/entities/user.entity.ts")),
            PathBuf::from("/app/entities/user.log.entity.ts")
        );
    }

    #[test]
    fn test_declaration_path_lands_in_sibling_types_dir() {
        assert_eq!(
            declaration_path(Path::new("/app/entities/user.entity.ts")),
            PathBuf::from("/app/entities/../types/user.ext.d.ts")
        );
    }
}
