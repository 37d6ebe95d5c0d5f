// std imports
use std::collections::HashMap;
use std::fmt::Display;

// 3rd party imports
use anyhow::{anyhow, Result};
use indicatif::ProgressStyle;
use tracing::{debug, info, info_span, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

// internal imports
use crate::database::store::SpectrumStore;

/// Counters of a peptide state update
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeptideStatesSummary {
    pub peptides: usize,
    pub spectra: usize,
    pub links: usize,
    pub updated_links: usize,
}

impl Display for PeptideStatesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} peptides, {} spectra, {} links ({} updated)",
            self.peptides, self.spectra, self.links, self.updated_links
        )
    }
}

/// Caches the species of each library module
///
struct SpeciesLookup {
    species_of_module: HashMap<i32, i32>,
}

impl SpeciesLookup {
    fn new() -> Self {
        Self {
            species_of_module: HashMap::new(),
        }
    }

    fn get(&mut self, store: &mut dyn SpectrumStore, module_id: i32) -> Result<i32> {
        if let Some(species_id) = self.species_of_module.get(&module_id) {
            return Ok(*species_id);
        }
        let species_id = store
            .get_library_module_by_id(module_id)?
            .ok_or_else(|| anyhow!("library module {} not found", module_id))?
            .get_species_id();
        self.species_of_module.insert(module_id, species_id);
        Ok(species_id)
    }
}

/// Recalculates the flags of all spectrum protein links:
///
/// * feature peptide - the spectrum is the only spectrum of its peptide at its charge, across all modules
/// * species unique - the spectrum is the only spectrum of its peptide within the species of its module
///
/// Only links whose flags change are written.
///
/// # Arguments
/// * `store` - Entity store
///
pub fn update_peptide_states(store: &mut dyn SpectrumStore) -> Result<PeptideStatesSummary> {
    let peptides = store.list_peptides()?;
    let mut species_lookup = SpeciesLookup::new();
    let mut summary = PeptideStatesSummary::default();

    let progress_span = info_span!("updating peptide states");
    progress_span.pb_set_style(&ProgressStyle::default_bar());
    progress_span.pb_set_length(peptides.len() as u64);
    let progress_span_enter = progress_span.enter();

    for peptide in peptides.iter() {
        let spectra = store.list_spectra_of_peptide(peptide.get_id())?;
        let mut species_ids: Vec<i32> = Vec::with_capacity(spectra.len());
        for spectrum in spectra.iter() {
            species_ids.push(species_lookup.get(store, spectrum.get_module_id())?);
        }

        for (spectrum, species_id) in spectra.iter().zip(species_ids.iter()) {
            let is_feature_peptide = spectra
                .iter()
                .filter(|other| other.get_charge() == spectrum.get_charge())
                .count()
                == 1;
            let is_species_unique = species_ids
                .iter()
                .filter(|other_species_id| *other_species_id == species_id)
                .count()
                == 1;

            for link in store.list_spectrum_proteins(spectrum.get_id())? {
                summary.links += 1;
                if link.get_is_feature_peptide() == is_feature_peptide
                    && link.get_is_species_unique() == is_species_unique
                {
                    continue;
                }
                store.update_spectrum_protein_flags(
                    &link.with_flags(is_feature_peptide, is_species_unique),
                )?;
                summary.updated_links += 1;
            }
        }
        debug!(
            "peptide {} has {} spectra",
            peptide.get_sequence(),
            spectra.len()
        );
        summary.peptides += 1;
        summary.spectra += spectra.len();
        Span::current().pb_inc(1);
    }

    std::mem::drop(progress_span_enter);
    std::mem::drop(progress_span);

    store.flush()?;
    info!("Peptide states updated: {}", summary);
    Ok(summary)
}

#[cfg(test)]
mod test {
    // std imports
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::Cursor;

    // internal imports
    use super::*;
    use crate::database::memory::memory_store::MemoryStore;
    use crate::entities::configuration::Configuration;
    use crate::entities::protein::Protein;
    use crate::ingestion::spectra_update::{LibraryModuleRef, SpectraUpdate};
    use crate::io::copa::reader::Reader;
    use crate::tools::tests::get_test_store;

    fn ingest(store: &mut MemoryStore, module_id: i32, sequence: &str, charge: u8) {
        let mut proteins = HashMap::from([(
            "P12345".to_string(),
            Protein::new(
                "P12345".to_string(),
                vec![],
                "PEPT_HUMAN".to_string(),
                "Peptide test protein".to_string(),
                vec![],
                9606,
                true,
                "MKPEPTIDERLLDNEQIAQMSGR".to_string(),
            ),
        )]);
        let content = format!(
            "H|||SEQ:::{}|||CHARGE:::{}|||REVERSE:::NotReverseHit|||UNIPROTIDS:::P12345\n100.0 1.0\n",
            sequence, charge
        );
        SpectraUpdate::new(
            Reader::new(Cursor::new(content)),
            "inline.copa".to_string(),
            &LibraryModuleRef::Id(module_id),
            store,
            &mut proteins,
            &Configuration::default(),
        )
        .unwrap()
        .run::<File>(None)
        .unwrap();
    }

    fn get_flags(
        store: &mut MemoryStore,
        sequence: &str,
        module_id: i32,
        charge: u8,
    ) -> (bool, bool) {
        let spectrum = store
            .get_spectrum(sequence, module_id, charge)
            .unwrap()
            .unwrap();
        let links = store.list_spectrum_proteins(spectrum.get_id()).unwrap();
        assert_eq!(links.len(), 1);
        (
            links[0].get_is_feature_peptide(),
            links[0].get_is_species_unique(),
        )
    }

    #[test]
    fn test_update_peptide_states() {
        let mut store = get_test_store();
        // Module 1 and 2 are human, module 3 is mouse
        ingest(&mut store, 1, "K.PEPTIDE.R", 2);
        ingest(&mut store, 3, "K.PEPTIDE.R", 2);
        ingest(&mut store, 2, "K.PEPTIDE.R", 3);
        ingest(&mut store, 1, "R.LLDNEQIAQMSGR.-", 2);

        let summary = update_peptide_states(&mut store).unwrap();
        assert_eq!(summary.peptides, 2);
        assert_eq!(summary.spectra, 4);
        assert_eq!(summary.links, 4);
        assert_eq!(summary.updated_links, 3);

        assert_eq!(get_flags(&mut store, "PEPTIDE", 1, 2), (false, false));
        assert_eq!(get_flags(&mut store, "PEPTIDE", 3, 2), (false, true));
        assert_eq!(get_flags(&mut store, "PEPTIDE", 2, 3), (true, false));
        assert_eq!(get_flags(&mut store, "LLDNEQIAQMSGR", 1, 2), (true, true));

        // Second pass has nothing to do
        let summary = update_peptide_states(&mut store).unwrap();
        assert_eq!(summary.updated_links, 0);
    }
}
