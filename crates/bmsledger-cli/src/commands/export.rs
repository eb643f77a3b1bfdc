//! Export command for the saved session history.

use std::path::Path;

use anyhow::{Context, Result};
use bmsledger_core::{Config, ExportFormat as _, JsonExporter, SessionLedger, TsvExporter};

use crate::cli::ExportFormat;

pub fn run(config: &Config, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let ledger = SessionLedger::restore(&config.history_path).with_context(|| {
        format!(
            "Failed to read history from {}",
            config.history_path.display()
        )
    })?;

    let content = match format {
        ExportFormat::Tsv => TsvExporter.format_rows(ledger.history()),
        ExportFormat::Json => JsonExporter.format_rows(ledger.history()),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &content)?;
        eprintln!(
            "Exported {} plays to: {}",
            ledger.len(),
            output_path.display()
        );
    } else {
        print!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmsledger_core::{Judge, Lamp, PlayRecord};
    use tempfile::TempDir;

    fn config_with_history(dir: &TempDir) -> Config {
        let config = Config {
            history_path: dir.path().join("history.json"),
            ..Default::default()
        };
        let mut ledger = SessionLedger::new();
        for (sha256, ts) in [("a", 100), ("b", 200)] {
            ledger.add(PlayRecord::new(
                "Song",
                sha256,
                Judge::from_array([100, 0, 0, 0, 0, 0]),
                100,
                Lamp::FullCombo,
                Some(60.0),
                ts,
            ));
        }
        ledger.persist(&config.history_path).unwrap();
        config
    }

    #[test]
    fn test_export_tsv_to_file() {
        let dir = TempDir::new().unwrap();
        let config = config_with_history(&dir);
        let output = dir.path().join("plays.tsv");

        run(&config, ExportFormat::Tsv, Some(output.as_path())).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_export_json_to_file() {
        let dir = TempDir::new().unwrap();
        let config = config_with_history(&dir);
        let output = dir.path().join("plays.jsonl");

        run(&config, ExportFormat::Json, Some(output.as_path())).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_export_without_history_fails() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            history_path: dir.path().join("missing.json"),
            ..Default::default()
        };
        assert!(run(&config, ExportFormat::Tsv, None).is_err());
    }
}
