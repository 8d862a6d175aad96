//! The `.ext.d.ts` companion file: a module augmentation giving the original
//! entity interface the optional `removedBy` actor id carried by log rows.

/// Render the declaration source for `class_name` defined in
/// `<base_name>.entity.ts`. Pure templating; the import and module paths are
/// relative to the `types/` directory the file is written into.
pub fn declaration_source(class_name: &str, base_name: &str) -> String {
    format!(
        r#"import {{ {class_name} }} from "../entities/{base_name}.entity";

declare module "../entities/{base_name}.entity" {{
  interface {class_name} {{
    removedBy?: number;
  }}
}}
"#
    )
}
