//! Difficulty table listing command.

use anyhow::Result;
use bmsledger_core::Config;

use super::load_index;

pub fn run(config: &Config) -> Result<()> {
    let index = load_index(config);
    let names = index.catalog_names();

    eprintln!(
        "{} tables in {} ({} charts indexed)",
        names.len(),
        config.table_dir().display(),
        index.len()
    );
    for name in names {
        if index.exclude_list().contains(name) {
            println!("{} (excluded)", name);
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}
