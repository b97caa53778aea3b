//! `show` subcommand — print a saved mapping file.

use std::path::PathBuf;

use super::{Config, KeyMapping, Result};

pub(super) fn cmd_show(config: &Config, file: Option<PathBuf>, json: bool) -> Result<()> {
    let path = file.unwrap_or_else(|| config.output_file.clone());
    let mapping = KeyMapping::load_from(&path)?;

    if json {
        println!("{}", mapping.to_json(2)?);
        return Ok(());
    }

    if mapping.is_empty() {
        println!("{} contains no mappings.", path.display());
        return Ok(());
    }

    println!(
        "{} mapping{} in {}:",
        mapping.len(),
        if mapping.len() == 1 { "" } else { "s" },
        path.display()
    );
    println!();

    let mut entries: Vec<(i64, &str)> = mapping.iter().collect();
    entries.sort_by_key(|&(index, _)| index);
    for (index, name) in entries {
        println!("  [{index:>3}] {name}");
    }

    Ok(())
}
