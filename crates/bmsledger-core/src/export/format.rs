use crate::play::PlayRecord;

/// Common interface for play log formats
pub trait ExportFormat {
    /// Header line, if the format has one
    fn header(&self) -> Option<String>;

    fn format_row(&self, record: &PlayRecord) -> String;

    /// File extension for files in this format
    fn extension(&self) -> &'static str;

    fn format_rows(&self, records: &[PlayRecord]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for record in records {
            output.push_str(&self.format_row(record));
            output.push('\n');
        }
        output
    }
}
