// std imports
use std::collections::BTreeMap;
use std::convert::TryFrom;

// 3rd party imports
use thiserror::Error;
use tracing::debug;

// internal imports
use crate::functions::sequence::{ModifiedSequence, SequenceError};
use crate::io::copa::reader::RawRecord;

pub const PEPID_KEY: &str = "PEPID";
pub const SEQ_KEY: &str = "SEQ";
pub const CHARGE_KEY: &str = "CHARGE";
pub const XCORR_KEY: &str = "XCORR";
pub const DELTACN_KEY: &str = "DELTACN";
pub const ZSCORE_KEY: &str = "ZSCORE";
pub const MZ_KEY: &str = "MZ";
pub const SPECTRUMFILE_KEY: &str = "SPECTRUMFILE";
pub const REVERSE_KEY: &str = "REVERSE";
pub const UNIPROTIDS_KEY: &str = "UNIPROTIDS";

/// Keys interpreted by [SpectralRecord], everything else ends up in the additional fields
const KNOWN_KEYS: [&str; 10] = [
    PEPID_KEY,
    SEQ_KEY,
    CHARGE_KEY,
    XCORR_KEY,
    DELTACN_KEY,
    ZSCORE_KEY,
    MZ_KEY,
    SPECTRUMFILE_KEY,
    REVERSE_KEY,
    UNIPROTIDS_KEY,
];

/// `REVERSE` value of target (non decoy) matches
pub const NOT_REVERSE_HIT: &str = "NotReverseHit";
/// Separator of the accessions in `UNIPROTIDS`
pub const ACCESSION_SEPARATOR: char = ';';

/// Errors converting a raw record into a spectral record. Fails the record only.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("record in line {line} misses field {key}")]
    MissingField { line: usize, key: &'static str },
    #[error("record in line {line} has invalid {key} '{value}'")]
    InvalidField {
        line: usize,
        key: &'static str,
        value: String,
    },
    #[error("record in line {line} has invalid sequence")]
    InvalidSequence {
        line: usize,
        #[source]
        source: SequenceError,
    },
}

/// Typed view of a COPA record
///
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralRecord {
    line_number: usize,
    pep_id: Option<String>,
    sequence: ModifiedSequence,
    charge: u8,
    xcorr: f64,
    delta_cn: f64,
    zscore: f64,
    precursor_mz: f64,
    spectrum_file: String,
    is_reverse_hit: bool,
    accessions: Vec<String>,
    additional_fields: BTreeMap<String, String>,
    header_line: String,
    peak_lines: Vec<String>,
}

/// Parses a score or m/z field. Missing fields fall back to `0.0`, present but unparseable or
/// non-finite ones (`NaN`, `inf`) are an error.
///
fn parse_score(record: &RawRecord, key: &'static str) -> Result<f64, RecordError> {
    let value = match record.get_field(key) {
        Some(value) => value,
        None => {
            debug!(
                "record in line {} has no {}, using default",
                record.get_line_number(),
                key
            );
            return Ok(0.0);
        }
    };
    match value.trim().parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(RecordError::InvalidField {
            line: record.get_line_number(),
            key,
            value: value.to_string(),
        }),
    }
}

impl TryFrom<RawRecord> for SpectralRecord {
    type Error = RecordError;

    fn try_from(record: RawRecord) -> Result<Self, Self::Error> {
        let line = record.get_line_number();

        let sequence = record
            .get_field(SEQ_KEY)
            .ok_or(RecordError::MissingField { line, key: SEQ_KEY })
            .and_then(|seq| {
                ModifiedSequence::new(seq.trim())
                    .map_err(|source| RecordError::InvalidSequence { line, source })
            })?;

        let raw_charge = record.get_field(CHARGE_KEY).ok_or(RecordError::MissingField {
            line,
            key: CHARGE_KEY,
        })?;
        let charge = match raw_charge.trim().parse::<u8>() {
            Ok(charge) if charge > 0 => charge,
            _ => {
                return Err(RecordError::InvalidField {
                    line,
                    key: CHARGE_KEY,
                    value: raw_charge.to_string(),
                })
            }
        };

        let xcorr = parse_score(&record, XCORR_KEY)?;
        let delta_cn = parse_score(&record, DELTACN_KEY)?;
        let zscore = parse_score(&record, ZSCORE_KEY)?;
        let precursor_mz = parse_score(&record, MZ_KEY)?;

        let pep_id = record.get_field(PEPID_KEY).map(|value| value.to_string());
        let spectrum_file = record
            .get_field(SPECTRUMFILE_KEY)
            .unwrap_or_default()
            .to_string();
        // Missing or any value other than NotReverseHit marks a decoy
        let is_reverse_hit = record.get_field(REVERSE_KEY) != Some(NOT_REVERSE_HIT);
        let accessions = record
            .get_field(UNIPROTIDS_KEY)
            .unwrap_or_default()
            .split(ACCESSION_SEPARATOR)
            .map(|accession| accession.trim().to_string())
            .filter(|accession| !accession.is_empty())
            .collect();

        let additional_fields = record
            .get_fields()
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            line_number: line,
            pep_id,
            sequence,
            charge,
            xcorr,
            delta_cn,
            zscore,
            precursor_mz,
            spectrum_file,
            is_reverse_hit,
            accessions,
            additional_fields,
            header_line: record.get_header_line().to_string(),
            peak_lines: record.get_peak_lines().clone(),
        })
    }
}

impl SpectralRecord {
    /// Returns the line number of the header
    ///
    pub fn get_line_number(&self) -> usize {
        self.line_number
    }

    pub fn get_pep_id(&self) -> Option<&str> {
        self.pep_id.as_deref()
    }

    pub fn get_sequence(&self) -> &ModifiedSequence {
        &self.sequence
    }

    pub fn get_charge(&self) -> u8 {
        self.charge
    }

    pub fn get_xcorr(&self) -> f64 {
        self.xcorr
    }

    pub fn get_delta_cn(&self) -> f64 {
        self.delta_cn
    }

    pub fn get_zscore(&self) -> f64 {
        self.zscore
    }

    /// Returns the observed precursor m/z
    ///
    pub fn get_precursor_mz(&self) -> f64 {
        self.precursor_mz
    }

    pub fn get_spectrum_file(&self) -> &str {
        &self.spectrum_file
    }

    pub fn is_reverse_hit(&self) -> bool {
        self.is_reverse_hit
    }

    /// Returns the matched accessions, order as in the file
    ///
    pub fn get_accessions(&self) -> &Vec<String> {
        &self.accessions
    }

    /// Returns header fields without dedicated attribute
    ///
    pub fn get_additional_fields(&self) -> &BTreeMap<String, String> {
        &self.additional_fields
    }

    pub fn get_header_line(&self) -> &str {
        &self.header_line
    }

    pub fn get_peak_lines(&self) -> &Vec<String> {
        &self.peak_lines
    }
}

#[cfg(test)]
mod test {
    // std imports
    use std::io::Cursor;

    // 3rd party imports
    use fallible_iterator::FallibleIterator;

    // internal imports
    use super::*;
    use crate::io::copa::reader::Reader;

    fn record_of(content: &str) -> Result<SpectralRecord, RecordError> {
        let raw_record = Reader::new(Cursor::new(content.as_bytes().to_vec()))
            .next()
            .unwrap()
            .unwrap();
        SpectralRecord::try_from(raw_record)
    }

    #[test]
    fn test_full_record() {
        let record = record_of(
            "H|||PEPID:::7|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||XCORR:::3.5|||DELTACN:::0.4|||ZSCORE:::5.1|||MZ:::400.69|||SPECTRUMFILE:::a.raw|||REVERSE:::NotReverseHit|||UNIPROTIDS:::P12345; Q99999;|||INSTRUMENT:::LTQ\n100.0 1.0\n",
        )
        .unwrap();
        assert_eq!(record.get_pep_id(), Some("7"));
        assert_eq!(record.get_sequence().get_inner(), "PEPTIDE");
        assert_eq!(record.get_charge(), 2);
        assert_eq!(record.get_xcorr(), 3.5);
        assert_eq!(record.get_delta_cn(), 0.4);
        assert_eq!(record.get_zscore(), 5.1);
        assert_eq!(record.get_precursor_mz(), 400.69);
        assert_eq!(record.get_spectrum_file(), "a.raw");
        assert!(!record.is_reverse_hit());
        assert_eq!(
            record.get_accessions(),
            &vec!["P12345".to_string(), "Q99999".to_string()]
        );
        assert_eq!(
            record.get_additional_fields().get("INSTRUMENT"),
            Some(&"LTQ".to_string())
        );
        assert_eq!(record.get_additional_fields().len(), 1);
        assert_eq!(record.get_peak_lines(), &vec!["100.0 1.0".to_string()]);
    }

    #[test]
    fn test_minimal_record() {
        let record = record_of(
            "H|||SEQ:::AAPEPTIDEAA|||CHARGE:::2|||REVERSE:::NotReverseHit|||UNIPROTIDS:::P12345\n100.0 1.0\n",
        )
        .unwrap();
        assert_eq!(record.get_pep_id(), None);
        assert_eq!(record.get_sequence().get_inner(), "PEPTIDE");
        assert_eq!(record.get_xcorr(), 0.0);
        assert_eq!(record.get_spectrum_file(), "");
        assert!(!record.is_reverse_hit());
    }

    #[test]
    fn test_reverse_hit() {
        let record =
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||REVERSE:::ReverseHit\n").unwrap();
        assert!(record.is_reverse_hit());
        let record = record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2\n").unwrap();
        assert!(record.is_reverse_hit());
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert!(matches!(
            record_of("H|||CHARGE:::2\n"),
            Err(RecordError::MissingField { key: SEQ_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R\n"),
            Err(RecordError::MissingField { key: CHARGE_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::0\n"),
            Err(RecordError::InvalidField { key: CHARGE_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||XCORR:::high\n"),
            Err(RecordError::InvalidField { key: XCORR_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.R|||CHARGE:::2\n"),
            Err(RecordError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn test_non_finite_scores() {
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||XCORR:::NaN\n"),
            Err(RecordError::InvalidField { key: XCORR_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||DELTACN:::inf\n"),
            Err(RecordError::InvalidField { key: DELTACN_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||ZSCORE:::-infinity\n"),
            Err(RecordError::InvalidField { key: ZSCORE_KEY, .. })
        ));
        assert!(matches!(
            record_of("H|||SEQ:::K.PEPTIDE.R|||CHARGE:::2|||MZ:::nan\n"),
            Err(RecordError::InvalidField { key: MZ_KEY, .. })
        ));
    }
}
