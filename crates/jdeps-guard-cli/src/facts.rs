//! Loading of jdeps findings from JSON.
//!
//! The file maps each analyzed type to the internal APIs it uses:
//!
//! ```json
//! {
//!   "com.foo.Bar": ["sun.misc.Unsafe", "sun.misc.Signal"],
//!   "com.foo.Baz": ["sun.reflect.Reflection"]
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use jdeps_guard_core::InternalDependencies;
use serde::Deserialize;

/// Raw JSON representation of a facts file.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct FactsFile(BTreeMap<String, Vec<String>>);

/// Reads facts from `path`, or from stdin if `path` is `-`.
pub fn load(path: &Path) -> Result<Vec<InternalDependencies>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read facts from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read facts file: {}", path.display()))?
    };
    parse(&content).with_context(|| format!("Failed to parse facts file: {}", path.display()))
}

/// Parses facts from JSON text.
///
/// Types with blank names, types without dependencies and blank
/// dependency names are skipped.
pub fn parse(content: &str) -> Result<Vec<InternalDependencies>> {
    let FactsFile(raw) = serde_json::from_str(content)?;

    let mut facts = Vec::with_capacity(raw.len());
    for (dependent, dependencies) in raw {
        if dependent.trim().is_empty() {
            tracing::warn!("Skipping {} dependencies of a type with a blank name", dependencies.len());
            continue;
        }
        let dependencies: Vec<String> = dependencies
            .into_iter()
            .filter(|d| {
                let blank = d.trim().is_empty();
                if blank {
                    tracing::warn!("Skipping blank dependency of {dependent}");
                }
                !blank
            })
            .collect();
        if dependencies.is_empty() {
            tracing::warn!("Skipping {dependent}: no internal dependencies listed");
            continue;
        }
        facts.push(InternalDependencies::new(dependent, dependencies));
    }

    tracing::debug!("Loaded internal dependencies of {} types", facts.len());
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_types_and_dependencies() {
        let facts = parse(
            r#"{
                "com.foo.Bar": ["sun.misc.Unsafe", "sun.misc.Signal"],
                "com.foo.Baz": ["sun.reflect.Reflection"]
            }"#,
        )
        .unwrap();

        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].dependent(), "com.foo.Bar");
        assert_eq!(facts[0].dependencies().len(), 2);
        assert_eq!(facts[1].dependent(), "com.foo.Baz");
    }

    #[test]
    fn empty_object_yields_no_facts() {
        assert!(parse("{}").unwrap().is_empty());
    }

    #[test]
    fn skips_types_without_dependencies() {
        let facts = parse(r#"{"com.foo.Bar": [], "com.foo.Baz": ["  "]}"#).unwrap();
        assert!(facts.is_empty());
    }

    #[test]
    fn skips_types_with_blank_names() {
        let facts = parse(
            r#"{"": ["sun.misc.Unsafe"], " ": ["sun.misc.Signal"], "com.foo.Bar": ["sun.misc.Unsafe"]}"#,
        )
        .unwrap();

        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].dependent(), "com.foo.Bar");
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(parse(r#"["com.foo.Bar"]"#).is_err());
        assert!(parse(r#"{"com.foo.Bar": "sun.misc.Unsafe"}"#).is_err());
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("facts.json");
        fs::write(&path, r#"{"com.foo.Bar": ["sun.misc.Unsafe"]}"#).unwrap();

        let facts = load(&path).unwrap();
        assert_eq!(facts.len(), 1);
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = load(Path::new("/nonexistent/facts.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/facts.json"));
    }
}
