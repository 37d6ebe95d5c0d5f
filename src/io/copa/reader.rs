/// Contains the streaming reader for COPA files.
// std imports
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// 3rd party imports
use fallible_iterator::FallibleIterator;
use tracing::trace;

// internal imports
use crate::io::copa::error::CopaError;

/// Required file extension
pub const COPA_EXTENSION: &str = "copa";
/// First character of a header line
pub const HEADER_SENTINEL: char = 'H';
/// Separates the header fields
pub const FIELD_DELIMITER: &str = "|||";
/// Separates key and value within a header field
pub const KEY_VALUE_DELIMITER: &str = ":::";

/// One header line and its peak block, as found in the file
///
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    header_line: String,
    line_number: usize,
    fields: HashMap<String, String>,
    peaks: Vec<(f64, f64)>,
    peak_lines: Vec<String>,
}

impl RawRecord {
    /// Returns the header line as read, including the sentinel
    ///
    pub fn get_header_line(&self) -> &str {
        &self.header_line
    }

    /// Returns the 1-based line number of the header
    ///
    pub fn get_line_number(&self) -> usize {
        self.line_number
    }

    pub fn get_fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|value| value.as_str())
    }

    /// Returns the peaks as (mass, intensity)
    ///
    pub fn get_peaks(&self) -> &Vec<(f64, f64)> {
        &self.peaks
    }

    /// Returns the peak lines as read
    ///
    pub fn get_peak_lines(&self) -> &Vec<String> {
        &self.peak_lines
    }
}

/// Splits the header line into its key/value fields. The first token is the sentinel token and
/// carries no field. A token without key/value delimiter yields an empty value.
///
/// # Arguments
/// * `header_line` - Header line
/// * `line_number` - Line number of the header, used for error reporting
///
pub fn parse_header(
    header_line: &str,
    line_number: usize,
) -> Result<HashMap<String, String>, CopaError> {
    let mut fields = HashMap::new();
    for token in header_line.split(FIELD_DELIMITER).skip(1) {
        if token.is_empty() {
            continue;
        }
        let (key, value) = match token.split_once(KEY_VALUE_DELIMITER) {
            Some((key, value)) => (key, value),
            None => (token, ""),
        };
        if key.is_empty() {
            return Err(CopaError::MalformedHeader {
                line: line_number,
                token: token.to_string(),
            });
        }
        fields.insert(key.to_string(), value.to_string());
    }
    Ok(fields)
}

/// Checks every header of the stream without interpreting the peak blocks and returns the
/// number of records. The first non blank line is a header, with or without sentinel.
///
/// # Arguments
/// * `internal_reader` - Stream of COPA lines
///
pub fn validate_headers<R: BufRead>(internal_reader: R) -> Result<usize, CopaError> {
    let mut records: usize = 0;
    for (line_index, line) in internal_reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(HEADER_SENTINEL) {
            parse_header(&line, line_index + 1)?;
        } else if records == 0 {
            parse_header(&format!("{}{}", HEADER_SENTINEL, line), line_index + 1)?;
        } else {
            continue;
        }
        records += 1;
    }
    Ok(records)
}

/// Parses a peak line into (mass, intensity)
///
fn parse_peak(line: &str) -> Option<(f64, f64)> {
    let mut split = line.split_whitespace();
    let mass = split.next()?.parse::<f64>().ok()?;
    let intensity = split.next()?.parse::<f64>().ok()?;
    if split.next().is_some() {
        return None;
    }
    Some((mass, intensity))
}

/// Streaming reader for COPA files. Holds at most one line of lookahead (the next header),
/// so it must only be consumed from one place.
///
pub struct Reader<R: BufRead> {
    internal_reader: R,
    line_number: usize,
    next_header: Option<(usize, String)>,
    is_started: bool,
}

impl Reader<BufReader<File>> {
    /// Opens the given COPA file. Fails before reading if the extension is not `.copa`.
    ///
    /// # Arguments
    /// * `copa_file_path` - Path to the COPA file
    ///
    pub fn open(copa_file_path: &Path) -> Result<Self, CopaError> {
        if copa_file_path.extension().and_then(OsStr::to_str) != Some(COPA_EXTENSION) {
            return Err(CopaError::InvalidExtension(copa_file_path.to_path_buf()));
        }
        let copa_file = File::open(copa_file_path)?;
        Ok(Self::new(BufReader::new(copa_file)))
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader on an already opened stream
    ///
    /// # Arguments
    /// * `internal_reader` - Stream of COPA lines
    ///
    pub fn new(internal_reader: R) -> Self {
        Self {
            internal_reader,
            line_number: 0,
            next_header: None,
            is_started: false,
        }
    }

    /// Reads the next non blank line without line ending, None at the end of the stream
    ///
    fn read_line(&mut self) -> Result<Option<(usize, String)>, CopaError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.internal_reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if !trimmed.trim().is_empty() {
                return Ok(Some((self.line_number, trimmed.to_string())));
            }
        }
    }

    /// Returns the header line for the next record
    ///
    fn take_header(&mut self) -> Result<Option<(usize, String)>, CopaError> {
        if self.is_started {
            return Ok(self.next_header.take());
        }
        self.is_started = true;
        Ok(self.read_line()?.map(|(line_number, line)| {
            if line.starts_with(HEADER_SENTINEL) {
                (line_number, line)
            } else {
                trace!("line {} lacks the header sentinel, treated as header", line_number);
                (line_number, format!("{}{}", HEADER_SENTINEL, line))
            }
        }))
    }
}

impl<R: BufRead> FallibleIterator for Reader<R> {
    type Item = RawRecord;
    type Error = CopaError;

    fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        let (line_number, header_line) = match self.take_header()? {
            Some(header) => header,
            None => return Ok(None),
        };
        let fields = parse_header(&header_line, line_number)?;

        let mut peaks: Vec<(f64, f64)> = Vec::new();
        let mut peak_lines: Vec<String> = Vec::new();
        let mut peak_error: Option<CopaError> = None;
        // The peak block is consumed completely, even after an invalid peak, so the
        // next call starts at the following header.
        while let Some((peak_line_number, line)) = self.read_line()? {
            if line.starts_with(HEADER_SENTINEL) {
                self.next_header = Some((peak_line_number, line));
                break;
            }
            match parse_peak(&line) {
                Some(peak) => peaks.push(peak),
                None => {
                    if peak_error.is_none() {
                        peak_error = Some(CopaError::PeakParse {
                            line: peak_line_number,
                            content: line.clone(),
                        });
                    }
                }
            }
            peak_lines.push(line);
        }

        if let Some(error) = peak_error {
            return Err(error);
        }

        Ok(Some(RawRecord {
            header_line,
            line_number,
            fields,
            peaks,
            peak_lines,
        }))
    }
}
