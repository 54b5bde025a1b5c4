//! Names of generated types and files.

use glassworks_core::shape::View;

/// Convert a PascalCase entity name to the snake_case stem of its files.
///
/// ```
/// use glassworks_codegen::naming::file_stem;
///
/// assert_eq!(file_stem("CatalogItem"), "catalog_item");
/// assert_eq!(file_stem("Inlay"), "inlay");
/// ```
pub fn file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Prefix of the generated type for a view. A canonical reference is
/// rendered as the read shape, which carries the same fields.
pub fn view_prefix(view: View) -> &'static str {
    match view {
        View::Canonical | View::Get => "Get",
        View::Post => "Post",
        View::Patch => "Patch",
        View::Put => "Put",
    }
}

/// Name of the generated type, e.g. `PatchCatalogItem`.
pub fn type_name(entity: &str, view: View) -> String {
    format!("{}{entity}", view_prefix(view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_split_on_capitals() {
        assert_eq!(file_stem("ProofMessage"), "proof_message");
        assert_eq!(file_stem("PriceGroup"), "price_group");
    }

    #[test]
    fn canonical_references_use_the_read_type() {
        assert_eq!(type_name("Inlay", View::Canonical), "GetInlay");
        assert_eq!(type_name("Inlay", View::Put), "PutInlay");
    }
}
