//! `typebridge generate` - scan, load, project, write

use std::path::{Path, PathBuf};

use anyhow::Context;
use typebridge_codegen::{Generator, NoHooks, NullFormatter};

/// Generate the TypeScript file for every schema under `root`.
///
/// The whole pass runs in memory; the output file is only touched after the
/// pass succeeds, so a generation failure never leaves a partial file.
pub fn run(root: &Path, namespace: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let registry = typebridge_parse::load(root, namespace)
        .with_context(|| format!("failed to load schemas from {}", root.display()))?;
    tracing::info!(symbols = registry.len(), "loaded schema registry");

    let code = Generator::new(&registry)
        .run(&NoHooks, &NullFormatter)
        .context("generation pass failed")?;

    match output {
        Some(path) => {
            std::fs::write(&path, code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{code}"),
    }

    Ok(())
}
