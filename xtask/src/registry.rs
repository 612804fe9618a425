use std::collections::HashSet;

use anyhow::Result;
use qbase_core::registry::{self, ResponseFormat, TargetRule};

/// Print the action registry and check that names and API ids are unique.
pub fn print_registry() -> Result<()> {
    let actions = registry::all();
    let mut names = HashSet::new();
    let mut apis = HashSet::new();

    println!("{:<24} {:<26} {:<6} {:<10} TARGET", "NAME", "API", "METHOD", "FORMAT");
    for spec in actions {
        if !names.insert(spec.name) {
            anyhow::bail!("Duplicate action name: {}", spec.name);
        }
        if !apis.insert(spec.api.to_ascii_lowercase()) {
            anyhow::bail!("Duplicate API id: {}", spec.api);
        }

        let format = match spec.format {
            ResponseFormat::Structured => "structured",
            ResponseFormat::Raw => "raw",
        };
        let target = match spec.target {
            TargetRule::Session => "session".to_string(),
            TargetRule::Default(dbid) => format!("default {dbid}"),
            TargetRule::Pinned(dbid) => format!("pinned {dbid}"),
        };
        println!(
            "{:<24} {:<26} {:<6} {:<10} {target}",
            spec.name,
            spec.api,
            spec.method.as_str(),
            format
        );
    }

    println!("\n{} actions registered", actions.len());
    Ok(())
}
