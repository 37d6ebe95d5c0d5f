//! Reader for UniProt text files, used to resolve proteins which are not yet in the store.
//! Only the lines needed to link spectra are interpreted (ID, AC, DE, GN, OX and the sequence).
//! <https://web.expasy.org/docs/userman.html>

// std imports
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// 3rd party imports
use anyhow::{anyhow, bail, Context, Result};
use fallible_iterator::FallibleIterator;
use tracing::trace;

// internal imports
use crate::entities::protein::Protein;

/// Review status in the ID line
const IS_REVIEWED_STRING: &str = "Reviewed;";
/// Category of the recommended name in DE lines
const DE_RECNAME_IDENTIFIER: &str = "RecName";
/// Category of alternative names in DE lines
const DE_ALTNAME_IDENTIFIER: &str = "AltName";
/// Subcategory of the full name in DE lines
const DE_FULL_IDENTIFIER: &str = "Full";
/// Attribute for taxonomy ID in organism line
const OX_TAXONOMY_ATTRIBUTE: &str = "NCBI_TaxID=";
/// Attribute for name in gene line
const GN_NAME_ATTRIBUTE: &str = "Name=";
/// Attribute for synonyms in gene line
const GN_SYNONYMS_ATTRIBUTE: &str = "Synonyms=";
/// Line code terminating an entry
const END_OF_ENTRY: &str = "//";

/// Returns the value of `attribute` up to the next semicolon or the end of the line
///
fn attribute_value<'a>(content: &'a str, attribute: &str) -> Option<&'a str> {
    let start = content.find(attribute)? + attribute.len();
    let end = content[start..]
        .find(';')
        .map(|idx| idx + start)
        .unwrap_or(content.len());
    Some(content[start..end].trim())
}

/// Collects the lines of one entry
///
#[derive(Default)]
struct EntryBuilder {
    accessions: Vec<String>,
    entry_name: String,
    name: String,
    genes: Vec<String>,
    taxonomy_id: i64,
    is_reviewed: bool,
    sequence: String,
    last_de_category: String,
}

impl EntryBuilder {
    /// Interprets one line of the entry. Unknown line codes are ignored.
    ///
    /// # Arguments
    /// * `code` - Two letter line code
    /// * `content` - Line content, starting at column 6
    ///
    fn consume(&mut self, code: &str, content: &str) -> Result<()> {
        match code {
            "ID" => {
                let mut split = content.split_ascii_whitespace();
                self.entry_name = split
                    .next()
                    .ok_or_else(|| anyhow!("no entry name"))?
                    .to_string();
                self.is_reviewed =
                    split.next().ok_or_else(|| anyhow!("no review status"))? == IS_REVIEWED_STRING;
            }
            "AC" => self.accessions.extend(
                content
                    .split(';')
                    .map(|accession| accession.trim().to_string())
                    .filter(|accession| !accession.is_empty()),
            ),
            "OX" => {
                if let Some(value) = attribute_value(content, OX_TAXONOMY_ATTRIBUTE) {
                    // Evidence codes may follow, e.g. `10090 {ECO:...}`
                    let taxonomy_id = value.split_ascii_whitespace().next().unwrap_or("");
                    self.taxonomy_id = taxonomy_id
                        .parse()
                        .with_context(|| format!("invalid taxonomy ID '{}'", taxonomy_id))?;
                }
            }
            "DE" => self.consume_description(content),
            "GN" => {
                if let Some(gene_name) = attribute_value(content, GN_NAME_ATTRIBUTE) {
                    self.genes.push(gene_name.to_string());
                }
                if let Some(synonyms) = attribute_value(content, GN_SYNONYMS_ATTRIBUTE) {
                    self.genes
                        .extend(synonyms.split(',').map(|synonym| synonym.trim().to_string()));
                }
            }
            "  " => self.sequence.extend(content.split_ascii_whitespace()),
            _ => (),
        }
        Ok(())
    }

    /// Keeps the first full recommended or alternative name.
    /// Continuation lines have an empty category and inherit the previous one.
    ///
    fn consume_description(&mut self, content: &str) {
        if !self.name.is_empty() {
            return;
        }
        let (category, rest) = match content.split_once(':') {
            Some((category, rest)) if !category.starts_with(' ') => (category.trim(), rest),
            _ => ("", content),
        };
        if !category.is_empty() {
            self.last_de_category = category.to_string();
        }
        if self.last_de_category != DE_RECNAME_IDENTIFIER
            && self.last_de_category != DE_ALTNAME_IDENTIFIER
        {
            return;
        }
        if let Some((subcategory, value)) = rest.trim().split_once('=') {
            if subcategory == DE_FULL_IDENTIFIER {
                self.name = value.trim().trim_end_matches(';').to_string();
            }
        }
    }

    /// Creates the protein, the first accession is the primary one
    ///
    fn build(mut self) -> Result<Protein> {
        if self.accessions.is_empty() {
            bail!("entry {} has no accession", self.entry_name);
        }
        let accession = self.accessions.remove(0);
        Ok(Protein::new(
            accession,
            self.accessions,
            self.entry_name,
            self.name,
            self.genes,
            self.taxonomy_id,
            self.is_reviewed,
            self.sequence,
        ))
    }
}

/// Streams the proteins of a UniProt text file
///
pub struct Reader<R: BufRead> {
    internal_reader: R,
    line_number: usize,
}

impl Reader<BufReader<File>> {
    /// Opens the UniProt text file
    ///
    /// # Arguments
    /// * `uniprot_txt_file_path` - Path to UniProt text file
    /// * `buffer_size` - Capacity of the internal buffer
    ///
    pub fn open(uniprot_txt_file_path: &Path, buffer_size: usize) -> Result<Self> {
        let uniprot_txt_file = File::open(uniprot_txt_file_path).with_context(|| {
            format!(
                "could not open UniProt file {}",
                uniprot_txt_file_path.display()
            )
        })?;
        Ok(Self::new(BufReader::with_capacity(
            buffer_size,
            uniprot_txt_file,
        )))
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader for an already opened stream
    ///
    /// # Arguments
    /// * `internal_reader` - Stream of UniProt text entries
    ///
    pub fn new(internal_reader: R) -> Self {
        Self {
            internal_reader,
            line_number: 0,
        }
    }
}

impl<R: BufRead> FallibleIterator for Reader<R> {
    type Item = Protein;
    type Error = anyhow::Error;

    fn next(&mut self) -> Result<Option<Self::Item>> {
        let mut entry: Option<EntryBuilder> = None;
        let mut line = String::new();
        loop {
            line.clear();
            if self.internal_reader.read_line(&mut line)? == 0 {
                return match entry {
                    Some(_) => Err(anyhow!(
                        "end of file in line {} before end of entry",
                        self.line_number
                    )),
                    None => Ok(None),
                };
            }
            self.line_number += 1;
            let trimmed_line = line.trim_end();
            if trimmed_line.len() < 2 {
                continue;
            }
            let code = &trimmed_line[..2];
            if code == END_OF_ENTRY {
                let protein = entry
                    .take()
                    .unwrap_or_default()
                    .build()
                    .with_context(|| format!("entry ending in line {}", self.line_number))?;
                trace!("read UniProt entry {}", protein.get_accession());
                return Ok(Some(protein));
            }
            entry
                .get_or_insert_with(EntryBuilder::default)
                .consume(code, trimmed_line.get(5..).unwrap_or(""))
                .with_context(|| format!("invalid UniProt line {}", self.line_number))?;
        }
    }
}

#[cfg(test)]
mod test {
    // std imports
    use std::io::Cursor;

    // internal imports
    use super::*;
    use crate::tools::tests::UNIPROT_TEST_FILE;

    fn read_all(content: &str) -> Result<Vec<Protein>> {
        Reader::new(Cursor::new(content.to_string())).collect()
    }

    #[test]
    fn test_read_file() {
        let proteins: Vec<Protein> = Reader::open(Path::new(UNIPROT_TEST_FILE), 1024)
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(proteins.len(), 2);

        let reviewed = &proteins[0];
        assert_eq!(reviewed.get_accession(), "P12345");
        assert_eq!(reviewed.get_secondary_accessions(), &vec!["A0A000", "B1B111"]);
        assert_eq!(reviewed.get_entry_name(), "PEPT_HUMAN");
        assert_eq!(reviewed.get_name(), "Peptide test protein");
        assert_eq!(reviewed.get_genes(), &vec!["PEPT", "PTP1", "PTP2"]);
        assert_eq!(*reviewed.get_taxonomy_id(), 9606);
        assert!(reviewed.get_is_reviewed());
        assert_eq!(
            reviewed.get_sequence(),
            "MKWVTFISLLFLFSSAYSRGVFRRDAHKSEVAHRFKDLGEKPEPTIDERLLDNEQIAQMSGR"
        );

        // Submitted name is skipped in favour of the alternative name, evidence after the taxonomy ID
        let unreviewed = &proteins[1];
        assert_eq!(unreviewed.get_accession(), "Q99999");
        assert!(unreviewed.get_secondary_accessions().is_empty());
        assert_eq!(unreviewed.get_name(), "Ambiguity test protein");
        assert_eq!(*unreviewed.get_taxonomy_id(), 10090);
        assert!(!unreviewed.get_is_reviewed());
        assert_eq!(unreviewed.get_sequence().len(), 67);
    }

    #[test]
    fn test_missing_accession() {
        let error = read_all("ID   NOAC_HUMAN   Reviewed;   2 AA.\n     MK\n//\n").unwrap_err();
        assert!(format!("{:#}", error).contains("NOAC_HUMAN has no accession"));
    }

    #[test]
    fn test_truncated_entry() {
        let error = read_all("ID   CUT_HUMAN   Reviewed;   2 AA.\nAC   P00001;\n").unwrap_err();
        assert!(error.to_string().contains("before end of entry"));
    }

    #[test]
    fn test_invalid_taxonomy_id() {
        let error =
            read_all("ID   TAX_HUMAN   Reviewed;   2 AA.\nAC   P00001;\nOX   NCBI_TaxID=human;\n//\n")
                .unwrap_err();
        assert!(error.to_string().contains("line 3"));
    }

    #[test]
    fn test_empty_stream() {
        assert!(read_all("").unwrap().is_empty());
    }
}
