//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# jdeps-guard configuration
#
# Rules decide how severe a dependency on a JDK-internal API is:
#   IGNORE  not reported in detail
#   INFORM  logged
#   WARN    logged as warning
#   FAIL    fails the build
#
# The dependent is a package, a type or `*` for everything. For each
# dependency the most specific matching rule wins.

# Severity for internal dependencies no rule covers.
default-severity = "FAIL"

# Compact form: `dependent -> dependency[, dependency...]: SEVERITY`
arrow-rules = [
    # "* -> sun.misc.Signal: IGNORE",
    # "com.example.legacy -> sun.misc.BASE64Encoder, sun.misc.BASE64Decoder: WARN",
]

# Table form, one rule per entry.
# [[dependency-rules]]
# dependent = "com.example.core"
# dependency = "sun.misc.Unsafe"
# severity = "INFORM"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_template(Path::new("jdeps-guard.toml"), force)?;

    println!("Created jdeps-guard.toml");
    println!("\nNext steps:");
    println!("  1. Edit jdeps-guard.toml to configure rules");
    println!("  2. Run: jdeps-guard check <facts.json>");

    Ok(())
}

fn write_template(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
