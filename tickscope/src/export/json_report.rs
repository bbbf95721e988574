use crate::analysis::ProfileReport;
use crate::domain::ExportError;
use std::io::Write;

/// JSON exporter for the complete analysis
pub struct JsonReportExporter<'a> {
    report: &'a ProfileReport,
}

impl<'a> JsonReportExporter<'a> {
    #[must_use]
    pub fn new(report: &'a ProfileReport) -> Self {
        Self { report }
    }

    /// Export the report to any writer (file, stdout, buffer, etc.)
    ///
    /// # Example
    /// ```
    /// use tickscope::analysis::{AnalysisConfig, ProfileReport};
    /// use tickscope::export::JsonReportExporter;
    ///
    /// let report = ProfileReport::build(&[], &AnalysisConfig::default());
    /// let mut buffer = Vec::new();
    /// JsonReportExporter::new(&report).export(&mut buffer).unwrap();
    /// assert!(!buffer.is_empty());
    /// ```
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, self.report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
