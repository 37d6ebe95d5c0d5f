// std imports
use std::fs::File;
use std::io::Write;
use std::path::Path;

// 3rd party imports
use anyhow::{Context, Result};
use serde::Serialize;

/// Result of a variant or record in the report
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ingested,
    SkippedReverseHit,
    FailedVariant,
    FailedRecord,
}

/// One row of the ingestion report
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    file: String,
    line: usize,
    pep_id: Option<String>,
    variant: Option<String>,
    status: ReportStatus,
    spectrum_id: Option<i64>,
    detail: String,
}

impl ReportRow {
    /// Creates a new report row
    ///
    /// # Arguments
    /// * `file` - Ingested file
    /// * `line` - Line of the record header
    /// * `pep_id` - PEPID of the record, if any
    /// * `variant` - Variant sequence, None for failed records
    /// * `status` - Result
    /// * `spectrum_id` - Resolved spectrum
    /// * `detail` - Free text, e.g. the error or the step resolutions
    ///
    pub fn new(
        file: String,
        line: usize,
        pep_id: Option<String>,
        variant: Option<String>,
        status: ReportStatus,
        spectrum_id: Option<i64>,
        detail: String,
    ) -> Self {
        Self {
            file,
            line,
            pep_id,
            variant,
            status,
            spectrum_id,
            detail,
        }
    }

    pub fn get_status(&self) -> ReportStatus {
        self.status
    }

    pub fn get_spectrum_id(&self) -> Option<i64> {
        self.spectrum_id
    }
}

/// Writes the operator report as CSV
///
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ReportWriter<File> {
    /// Creates the report file, replacing an existing one
    ///
    /// # Arguments
    /// * `path` - Path of the report
    ///
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("could not create report {}", path.display()))?;
        Ok(Self { writer })
    }
}

impl<W: Write> ReportWriter<W> {
    /// Creates a report writer on any output
    ///
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(true).from_writer(writer),
        }
    }

    pub fn write(&mut self, row: &ReportRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying output
    ///
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("could not flush report: {}", err.error()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_rows() {
        let mut writer = ReportWriter::from_writer(Vec::new());
        writer
            .write(&ReportRow::new(
                "a.copa".to_string(),
                1,
                Some("7".to_string()),
                Some("PEPTIDE".to_string()),
                ReportStatus::Ingested,
                Some(3),
                "peptide created".to_string(),
            ))
            .unwrap();
        writer
            .write(&ReportRow::new(
                "a.copa".to_string(),
                5,
                None,
                None,
                ReportStatus::FailedRecord,
                None,
                "bad peak".to_string(),
            ))
            .unwrap();
        let content = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "file,line,pep_id,variant,status,spectrum_id,detail",
                "a.copa,1,7,PEPTIDE,ingested,3,peptide created",
                "a.copa,5,,,failed_record,,bad peak",
            ]
        );
    }
}
