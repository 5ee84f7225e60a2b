use std::collections::BTreeSet;

use anyhow::Context;
use serde::Deserialize;

/// Crates the pure domain crate may depend on. Anything else (async runtimes,
/// database drivers, HTTP stacks) belongs in the engine.
const DOMAIN_CRATE: &str = "ballotbox-domain";
const DOMAIN_ALLOWED: &[&str] = &["chrono", "serde", "thiserror", "uuid"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    /// `None` for normal dependencies, `"dev"` / `"build"` otherwise.
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let violations = domain_violations(&metadata)?;
    if !violations.is_empty() {
        anyhow::bail!(
            "{DOMAIN_CRATE} must stay free of I/O; disallowed dependencies: {}",
            violations.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    println!("arch-check: ok");
    Ok(())
}

fn domain_violations(metadata: &Metadata) -> anyhow::Result<BTreeSet<String>> {
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == DOMAIN_CRATE)
        .with_context(|| format!("{DOMAIN_CRATE} not found in workspace"))?;

    Ok(domain
        .dependencies
        .iter()
        .filter(|d| d.kind.is_none())
        .filter(|d| !DOMAIN_ALLOWED.contains(&d.name.as_str()))
        .map(|d| d.name.clone())
        .collect())
}
