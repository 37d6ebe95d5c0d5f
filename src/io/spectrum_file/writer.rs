// std imports
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// 3rd party imports
use anyhow::{Context, Result};

/// File extension of spectrum artifacts
pub const SPECTRUM_FILE_EXTENSION: &str = "txt";

/// Writes the peak block of a spectrum as `<spectrum-id>.txt` into an output directory
///
pub struct SpectrumFileWriter {
    output_dir: PathBuf,
}

impl SpectrumFileWriter {
    /// Creates a new writer, the output directory is created if necessary
    ///
    /// # Arguments
    /// * `output_dir` - Directory for the spectrum files
    ///
    pub fn new(output_dir: &Path) -> Result<Self> {
        create_dir_all(output_dir).with_context(|| {
            format!(
                "could not create spectrum output directory {}",
                output_dir.display()
            )
        })?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Returns the path of the artifact for the given spectrum
    ///
    pub fn get_path(&self, spectrum_id: i64) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", spectrum_id, SPECTRUM_FILE_EXTENSION))
    }

    /// Writes header and peak lines, replacing an existing file of the same spectrum.
    ///
    /// # Arguments
    /// * `spectrum_id` - ID of the spectrum
    /// * `header_line` - Original header line
    /// * `peak_lines` - Original peak lines
    ///
    pub fn write(
        &self,
        spectrum_id: i64,
        header_line: &str,
        peak_lines: &[String],
    ) -> Result<PathBuf> {
        let path = self.get_path(spectrum_id);
        let mut writer = BufWriter::new(
            File::create(&path)
                .with_context(|| format!("could not create spectrum file {}", path.display()))?,
        );
        writeln!(writer, "{}", header_line)?;
        for line in peak_lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod test {
    // std imports
    use std::fs::read_to_string;

    // internal imports
    use super::*;
    use crate::tools::tests::get_test_dir;

    #[test]
    fn test_write() {
        let output_dir = get_test_dir("spectrum_file_writer").join("spectra");
        let writer = SpectrumFileWriter::new(&output_dir).unwrap();
        let path = writer
            .write(
                42,
                "H|||SEQ:::K.PEPTIDE.R",
                &["100.0 1.0".to_string(), "200.0 2.0".to_string()],
            )
            .unwrap();
        assert_eq!(path, output_dir.join("42.txt"));
        assert_eq!(
            read_to_string(&path).unwrap(),
            "H|||SEQ:::K.PEPTIDE.R\n100.0 1.0\n200.0 2.0\n"
        );
    }
}
