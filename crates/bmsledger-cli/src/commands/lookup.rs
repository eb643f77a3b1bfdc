//! Difficulty lookup command.

use anyhow::Result;
use bmsledger_core::Config;

use super::load_index;

pub fn run(config: &Config, hash: &str) -> Result<()> {
    let index = load_index(config);
    let folders = index.lookup(hash);

    if folders.is_empty() {
        println!("{}: not in any difficulty table", hash);
        return Ok(());
    }

    match index.title_of(hash) {
        Some((_, title)) if !title.is_empty() => println!("{} ({})", hash, title),
        _ => println!("{}", hash),
    }
    for folder in folders {
        println!("  {}", folder);
    }
    Ok(())
}
