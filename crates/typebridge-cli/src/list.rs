//! `typebridge list` - print discovered schema symbols

use std::path::Path;

use anyhow::Context;

pub fn run(root: &Path, namespace: &str) -> anyhow::Result<()> {
    let registry = typebridge_parse::load(root, namespace)
        .with_context(|| format!("failed to load schemas from {}", root.display()))?;

    for symbol in registry.iter() {
        println!("{}", symbol.name);
    }
    Ok(())
}
