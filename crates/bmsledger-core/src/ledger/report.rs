use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use super::summary::Summary;
use crate::error::Result;
use crate::play::PlayRecord;

/// Escape the five XML special characters
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `H:MM:SS`, or `0` for an empty playtime
pub fn format_playtime(playtime: Duration) -> String {
    let secs = playtime.as_secs();
    if secs == 0 {
        return "0".to_string();
    }
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

fn signed(delta: Option<i64>) -> String {
    delta.map(|d| format!("{:+}", d)).unwrap_or_default()
}

/// Render the overlay report for `summary` and its `target` records
pub fn render(summary: &Summary, target: &[PlayRecord]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_document(&mut out, summary, target);
    out
}

fn write_document(out: &mut String, summary: &Summary, target: &[PlayRecord]) -> std::fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(out, "<Items>")?;
    writeln!(out, "    <date>{}</date>", summary.date.format("%Y/%m/%d"))?;
    writeln!(out, "    <notes>{}</notes>", summary.notes)?;
    writeln!(
        out,
        "    <total_score_rate>{:.2}</total_score_rate>",
        summary.total_score_rate
    )?;
    writeln!(out, "    <playcount>{}</playcount>", summary.playcount)?;
    writeln!(
        out,
        "    <playtime>{}</playtime>",
        format_playtime(summary.playtime)
    )?;
    writeln!(out, "    <pace>{}</pace>", summary.pace)?;

    for record in target {
        let prior = record.prior();
        writeln!(out, "    <Result>")?;
        writeln!(out, "        <lv>{}</lv>", escape_xml(&record.difficulties().join(",")))?;
        writeln!(out, "        <title>{}</title>", escape_xml(record.title()))?;
        writeln!(out, "        <lamp>{}</lamp>", record.lamp().ordinal())?;
        writeln!(out, "        <pre_lamp>{}</pre_lamp>", prior.lamp.ordinal())?;
        writeln!(out, "        <score>{}</score>", record.score())?;
        writeln!(out, "        <pre_score>{}</pre_score>", prior.score)?;
        writeln!(out, "        <bp>{}</bp>", record.bp())?;
        writeln!(out, "        <pre_bp>{}</pre_bp>", prior.bp)?;
        writeln!(out, "        <diff_score>{}</diff_score>", signed(record.score_delta()))?;
        writeln!(out, "        <diff_bp>{}</diff_bp>", signed(record.bp_delta()))?;
        writeln!(out, "        <score_rate>{:.2}</score_rate>", record.score_rate())?;
        writeln!(
            out,
            "        <date>{}</date>",
            record.played_at().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "    </Result>")?;
    }
    writeln!(out, "</Items>")
}

/// Render and write the report to `path`
pub fn write_report<P: AsRef<Path>>(path: P, summary: &Summary, target: &[PlayRecord]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render(summary, target))?;
    debug!(
        "Wrote report with {} results to {}",
        target.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SessionLedger;
    use crate::play::{Judge, Lamp, PriorBest};
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn worked_record(prior: PriorBest) -> PlayRecord {
        PlayRecord::new(
            "Tom & Jerry <\"Remix\">",
            "h1",
            Judge::from_array([250, 10, 5, 2, 1, 0]),
            268,
            Lamp::Hard,
            Some(134.0),
            1_700_000_000,
        )
        .with_difficulties(["★12", "sl5"])
        .with_prior(prior)
    }

    fn summary_of(records: &[PlayRecord]) -> Summary {
        let mut ledger =
            SessionLedger::starting_at(Local.timestamp_opt(1_700_000_000, 0).unwrap());
        for record in records {
            ledger.add(record.clone());
        }
        ledger.windowed_summary_at(Local.timestamp_opt(1_700_000_100, 0).unwrap(), 1)
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"a&b<c>d"e'f"#),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_format_playtime() {
        assert_eq!(format_playtime(Duration::ZERO), "0");
        assert_eq!(format_playtime(Duration::from_secs(134)), "0:02:14");
        assert_eq!(format_playtime(Duration::from_secs(3 * 3600 + 5)), "3:00:05");
        assert_eq!(format_playtime(Duration::from_secs(26 * 3600)), "26:00:00");
    }

    #[test]
    fn test_render_first_play_leaves_deltas_blank() {
        let records = vec![worked_record(PriorBest::default())];
        let xml = render(&summary_of(&records), &records);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Items>\n"));
        assert!(xml.ends_with("</Items>\n"));
        assert!(xml.contains("    <notes>268</notes>\n"));
        assert!(xml.contains("    <playcount>1</playcount>\n"));
        assert!(xml.contains("    <playtime>0:02:14</playtime>\n"));
        assert!(xml.contains("    <pace>7200</pace>\n"));
        assert!(xml.contains("<lv>sl5,★12</lv>"));
        assert!(xml.contains("<title>Tom &amp; Jerry &lt;&quot;Remix&quot;&gt;</title>"));
        assert!(xml.contains("<lamp>6</lamp>"));
        assert!(xml.contains("<pre_lamp>0</pre_lamp>"));
        assert!(xml.contains("<score>510</score>"));
        assert!(xml.contains("<pre_bp>999999</pre_bp>"));
        assert!(xml.contains("<diff_score></diff_score>"));
        assert!(xml.contains("<diff_bp></diff_bp>"));
        assert!(xml.contains("<score_rate>95.15</score_rate>"));
        assert_eq!(xml.matches("<Result>").count(), 1);
    }

    #[test]
    fn test_render_signed_deltas() {
        let records = vec![worked_record(PriorBest {
            score: 530,
            bp: 1,
            lamp: Lamp::Easy,
        })];
        let xml = render(&summary_of(&records), &records);

        assert!(xml.contains("<pre_score>530</pre_score>"));
        assert!(xml.contains("<diff_score>-20</diff_score>"));
        assert!(xml.contains("<diff_bp>+2</diff_bp>"));
        assert!(xml.contains("<pre_lamp>4</pre_lamp>"));
    }

    #[test]
    fn test_render_empty_summary() {
        let xml = render(&summary_of(&[]), &[]);
        assert!(xml.contains("<total_score_rate>0.00</total_score_rate>"));
        assert!(xml.contains("<playtime>0</playtime>"));
        assert!(xml.contains("<pace>0</pace>"));
        assert!(!xml.contains("<Result>"));
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.xml");
        let records = vec![worked_record(PriorBest::default())];
        let summary = summary_of(&records);

        write_report(&path, &summary, &records).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            render(&summary, &records)
        );
    }
}
