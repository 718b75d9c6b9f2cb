//! Reference payload assembly.
//!
//! Two fixed extraction passes over the `tsdecomp` package: the core module
//! for the two dataclass-like configuration/result types, the registry
//! module for the main entry point. Everything else about the payload is
//! fixed literal text plus a generation timestamp.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApirefError, Result};
use crate::extract::{extract_items, Item};

/// One documented module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub module: String,
    pub description: String,
    pub items: Vec<Item>,
}

/// The JSON document consumed by the docs site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// `YYYY-MM-DD HH:MM UTC`, captured once at assembly time.
    pub generated_at: String,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_repo: Option<String>,
}

const CORE_MODULE: &str = "tsdecomp.core";
const CORE_DESCRIPTION: &str = "Core dataclasses for configuration and results.";
const CORE_NAMES: &[&str] = &["DecompResult", "DecompositionConfig"];

const REGISTRY_MODULE: &str = "tsdecomp.registry";
const REGISTRY_DESCRIPTION: &str = "Registry entry point and main decomposition call.";
const REGISTRY_NAMES: &[&str] = &["decompose"];

/// Build the full reference payload for the repository at `repo_root`.
///
/// Both module files are checked before any extraction; a missing file is
/// fatal and the error names every absent path. `source_repo` lands in the
/// payload only when supplied.
pub fn build_reference(repo_root: &Path, source_repo: Option<&str>) -> Result<Payload> {
    let core_path = repo_root.join("tsdecomp").join("core.py");
    let registry_path = repo_root.join("tsdecomp").join("registry.py");

    let missing: Vec<String> = [&core_path, &registry_path]
        .iter()
        .filter(|path| !path.exists())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ApirefError::module_missing(format!(
            "expected module file(s) not found: {}",
            missing.join(", ")
        )));
    }

    let sections = vec![
        Section {
            module: CORE_MODULE.to_string(),
            description: CORE_DESCRIPTION.to_string(),
            items: extract_items(&core_path, CORE_NAMES)?,
        },
        Section {
            module: REGISTRY_MODULE.to_string(),
            description: REGISTRY_DESCRIPTION.to_string(),
            items: extract_items(&registry_path, REGISTRY_NAMES)?,
        },
    ];

    let payload = Payload {
        generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        sections,
        source_repo: source_repo
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };
    info!(
        items = payload.sections.iter().map(|s| s.items.len()).sum::<usize>(),
        "reference payload assembled"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    const CORE_PY: &str = "\
from dataclasses import dataclass


@dataclass
class DecompositionConfig:
    \"\"\"Configuration for a decomposition run.\"\"\"

    period: int
    robust: bool = False


@dataclass
class DecompResult:
    trend: object
    seasonal: object = None
";

    const REGISTRY_PY: &str = "\
def decompose(series, period=None, *, robust=False):
    \"\"\"Run the registered decomposition.\"\"\"
    return None
";

    fn repo_with_modules() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("tsdecomp");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("core.py"), CORE_PY).unwrap();
        fs::write(pkg.join("registry.py"), REGISTRY_PY).unwrap();
        let root = dir.path().to_path_buf();
        (dir, root)
    }

    #[test]
    fn test_payload_sections_are_fixed() {
        let (_dir, root) = repo_with_modules();
        let payload = build_reference(&root, None).unwrap();

        assert_eq!(payload.sections.len(), 2);
        assert_eq!(payload.sections[0].module, "tsdecomp.core");
        assert_eq!(
            payload.sections[0].description,
            "Core dataclasses for configuration and results."
        );
        assert_eq!(payload.sections[1].module, "tsdecomp.registry");
        assert_eq!(
            payload.sections[1].description,
            "Registry entry point and main decomposition call."
        );
    }

    #[test]
    fn test_registry_section_signature() {
        let (_dir, root) = repo_with_modules();
        let payload = build_reference(&root, None).unwrap();

        let registry = &payload.sections[1];
        assert_eq!(registry.items.len(), 1);
        assert_eq!(registry.items[0].name, "decompose");
        assert_eq!(
            registry.items[0].signature,
            "decompose(series, period=None, *, robust=False)"
        );
        assert_eq!(registry.items[0].source, "tsdecomp/registry.py");
        assert_eq!(
            registry.items[0].docstring.as_deref(),
            Some("Run the registered decomposition.")
        );
    }

    #[test]
    fn test_core_items_in_declaration_order() {
        // Allow-list order is DecompResult first; source declares
        // DecompositionConfig first and that order wins.
        let (_dir, root) = repo_with_modules();
        let payload = build_reference(&root, None).unwrap();

        let names: Vec<&str> = payload.sections[0]
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["DecompositionConfig", "DecompResult"]);
        assert_eq!(
            payload.sections[0].items[0].signature,
            "DecompositionConfig(period, robust=False)"
        );
        assert_eq!(
            payload.sections[0].items[1].signature,
            "DecompResult(trend, seasonal=None)"
        );
    }

    #[test]
    fn test_generated_at_format() {
        let (_dir, root) = repo_with_modules();
        let payload = build_reference(&root, None).unwrap();

        // YYYY-MM-DD HH:MM UTC
        assert_eq!(payload.generated_at.len(), 20);
        assert!(payload.generated_at.ends_with(" UTC"));
        assert_eq!(&payload.generated_at[4..5], "-");
        assert_eq!(&payload.generated_at[10..11], " ");
        assert_eq!(&payload.generated_at[13..14], ":");
    }

    #[test]
    fn test_source_repo_omitted_unless_supplied() {
        let (_dir, root) = repo_with_modules();

        let without = build_reference(&root, None).unwrap();
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("source_repo").is_none());

        let with = build_reference(&root, Some("github.com/example/tsdecomp")).unwrap();
        let json = serde_json::to_value(&with).unwrap();
        assert_eq!(
            json["source_repo"],
            serde_json::json!("github.com/example/tsdecomp")
        );
    }

    #[test]
    fn test_empty_source_repo_is_omitted() {
        let (_dir, root) = repo_with_modules();
        let payload = build_reference(&root, Some("")).unwrap();
        assert!(payload.source_repo.is_none());
    }

    #[test]
    fn test_missing_module_fails_before_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("tsdecomp");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("core.py"), CORE_PY).unwrap();

        let err = build_reference(dir.path(), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ModuleMissing);
        assert!(err.message.contains("registry.py"));
    }

    #[test]
    fn test_both_missing_modules_reported() {
        let dir = tempfile::tempdir().unwrap();

        let err = build_reference(dir.path(), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ModuleMissing);
        assert!(err.message.contains("core.py"));
        assert!(err.message.contains("registry.py"));
    }
}
