//! Item extraction over a parsed module.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApirefError, Result};
use crate::parser;
use crate::signature;

/// One documented top-level declaration.
///
/// `source` is `<parent-dir>/<file-name>` of the module file, never the
/// module's declared name. `docstring` is omitted from serialized output
/// when the declaration has no leading string literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub signature: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
}

/// Extract the requested top-level declarations from a module file.
///
/// Matching is case-sensitive and exact; names with no match are silently
/// omitted. Items come back in declaration order, not allow-list order, and
/// a name declared twice yields two items.
pub fn extract_items(module_path: &Path, names: &[&str]) -> Result<Vec<Item>> {
    let source = fs::read_to_string(module_path).map_err(|e| {
        ApirefError::io(format!("failed to read {}", module_path.display())).with_source(e)
    })?;

    let declarations = parser::parse_module(&source)
        .map_err(|e| ApirefError::new(e.kind, format!("{}: {}", module_path.display(), e.message)))?;

    let origin = module_origin(module_path);
    let items: Vec<Item> = declarations
        .iter()
        .filter(|decl| names.contains(&decl.name()))
        .map(|decl| Item {
            name: decl.name().to_string(),
            signature: signature::render(decl),
            source: origin.clone(),
            docstring: decl.docstring().map(str::to_string),
        })
        .collect();

    debug!(
        module = %module_path.display(),
        requested = names.len(),
        extracted = items.len(),
        "extracted items"
    );
    Ok(items)
}

/// `<parent-dir>/<file-name>`, derived purely from the path.
fn module_origin(module_path: &Path) -> String {
    let dir = module_path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = module_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", dir, file)
}
