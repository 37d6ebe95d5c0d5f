// std imports
use std::collections::HashSet;

// 3rd party imports
use anyhow::{anyhow, Result};
use chrono::Utc;
use itertools::Itertools;
use tracing::{debug, warn};

// internal imports
use crate::database::store::SpectrumStore;
use crate::entities::library_module::LibraryModule;
use crate::entities::peptide::Peptide;
use crate::entities::protein::Protein;
use crate::entities::ptm_type::PtmType;
use crate::entities::spectrum::Spectrum;
use crate::entities::spectrum_protein::SpectrumProtein;
use crate::functions::mass_calculation::{calc_weight_and_precursor_mz, parse_deltas};
use crate::functions::post_translational_modification::classify;
use crate::functions::sequence::ModifiedSequence;
use crate::ingestion::context::IngestionContext;
use crate::ingestion::errors::{VariantError, VariantStage};
use crate::ingestion::outcome::{
    ArtifactOutcome, IngestedVariant, LinkReconciliation, PeptideResolution, SpectrumResolution,
    VariantOutcome,
};
use crate::ingestion::protein_source::ProteinSource;
use crate::io::copa::record::SpectralRecord;
use crate::io::spectrum_file::writer::SpectrumFileWriter;

/// Resolves the entities of single variants against the store.
/// Each step is one store call. A failing step abandons the variant, earlier steps stay applied.
///
pub struct Normalizer {
    library_module: LibraryModule,
    spectrum_file_writer: Option<SpectrumFileWriter>,
}

impl Normalizer {
    /// Creates a new normalizer
    ///
    /// # Arguments
    /// * `library_module` - Module the spectra are ingested into
    /// * `spectrum_file_writer` - Writer for the peak artifacts, None to skip them
    ///
    pub fn new(
        library_module: LibraryModule,
        spectrum_file_writer: Option<SpectrumFileWriter>,
    ) -> Self {
        Self {
            library_module,
            spectrum_file_writer,
        }
    }

    pub fn get_library_module(&self) -> &LibraryModule {
        &self.library_module
    }

    /// Processes one variant of the given record.
    /// The variant is registered with the context first, so it counts towards the FDR
    /// whatever the outcome.
    ///
    /// # Arguments
    /// * `store` - Entity store
    /// * `protein_source` - Source for proteins unknown to the store
    /// * `context` - Context of the current run
    /// * `record` - Record the variant was expanded from
    /// * `variant` - Unambiguous variant of the record's sequence
    ///
    pub fn normalize_variant(
        &self,
        store: &mut dyn SpectrumStore,
        protein_source: &mut dyn ProteinSource,
        context: &mut IngestionContext,
        record: &SpectralRecord,
        variant: &ModifiedSequence,
    ) -> Result<VariantOutcome, VariantError> {
        let fdr = context.register_variant(record.is_reverse_hit());
        if record.is_reverse_hit() {
            debug!("{} is a reverse hit, skipped", variant);
            return Ok(VariantOutcome::SkippedReverseHit);
        }
        let fail = |stage: VariantStage| {
            move |cause: anyhow::Error| VariantError::new(variant.to_string(), stage, cause)
        };

        let deltas = parse_deltas(variant);
        let (weight, theoretical_mz) =
            calc_weight_and_precursor_mz(variant, &deltas, record.get_charge());
        let ptm_type_id = classify(&deltas);
        let unmodified_sequence = variant.get_unmodified();

        let (peptide, peptide_resolution) = self
            .resolve_peptide(store, &unmodified_sequence, weight)
            .map_err(fail(VariantStage::Peptide))?;

        Self::ensure_ptm_type(store, ptm_type_id).map_err(fail(VariantStage::PtmType))?;

        let candidate = Spectrum::new(
            0,
            variant.get_inner().to_string(),
            self.library_module.get_id(),
            record.get_charge(),
            record.get_xcorr(),
            record.get_delta_cn(),
            record.get_zscore(),
            record.get_precursor_mz(),
            theoretical_mz,
            record.get_spectrum_file().to_string(),
            fdr,
            ptm_type_id,
            peptide.get_id(),
        );
        let (spectrum, spectrum_resolution) = Self::resolve_spectrum(store, candidate)
            .map_err(fail(VariantStage::Spectrum))?;

        let links = self
            .reconcile_links(
                store,
                protein_source,
                &spectrum,
                variant,
                &unmodified_sequence,
                record.get_accessions(),
            )
            .map_err(fail(VariantStage::Links))?;

        let artifact = self.write_artifact(&spectrum, record);

        debug!(
            "{} ingested as spectrum {} ({:?})",
            variant,
            spectrum.get_id(),
            spectrum_resolution
        );
        Ok(VariantOutcome::Ingested(IngestedVariant::new(
            peptide.get_id(),
            peptide_resolution,
            spectrum.get_id(),
            spectrum_resolution,
            links,
            artifact,
        )))
    }

    fn resolve_peptide(
        &self,
        store: &mut dyn SpectrumStore,
        unmodified_sequence: &str,
        weight: f64,
    ) -> Result<(Peptide, PeptideResolution)> {
        if unmodified_sequence.is_empty() {
            return Err(anyhow!("variant has no residues"));
        }
        if let Some(peptide) = store.get_peptide_by_sequence(unmodified_sequence)? {
            return Ok((peptide, PeptideResolution::Existing));
        }
        let peptide = store.insert_peptide(&Peptide::new(
            0,
            unmodified_sequence.to_string(),
            weight,
        ))?;
        Ok((peptide, PeptideResolution::Created))
    }

    fn ensure_ptm_type(store: &mut dyn SpectrumStore, ptm_type_id: u8) -> Result<()> {
        if store.get_ptm_type(ptm_type_id)?.is_none() {
            debug!("creating missing modification type {}", ptm_type_id);
            store.insert_ptm_type(&PtmType::from_bitmask(ptm_type_id))?;
        }
        Ok(())
    }

    /// Creates the spectrum or updates the existing one in place if its attributes differ
    ///
    fn resolve_spectrum(
        store: &mut dyn SpectrumStore,
        candidate: Spectrum,
    ) -> Result<(Spectrum, SpectrumResolution)> {
        let existing = store.get_spectrum(
            candidate.get_ptm_sequence(),
            candidate.get_module_id(),
            candidate.get_charge(),
        )?;
        match existing {
            None => Ok((store.insert_spectrum(&candidate)?, SpectrumResolution::Created)),
            Some(existing) if candidate.has_same_attributes(&existing) => {
                Ok((existing, SpectrumResolution::Unchanged))
            }
            Some(existing) => {
                let reconciled = candidate.with_id(existing.get_id());
                store.update_spectrum(&reconciled)?;
                Ok((reconciled, SpectrumResolution::Reconciled))
            }
        }
    }

    /// Converges the links of the spectrum to the given accessions
    ///
    fn reconcile_links(
        &self,
        store: &mut dyn SpectrumStore,
        protein_source: &mut dyn ProteinSource,
        spectrum: &Spectrum,
        variant: &ModifiedSequence,
        unmodified_sequence: &str,
        accessions: &[String],
    ) -> Result<LinkReconciliation> {
        let target: Vec<&String> = accessions.iter().unique().collect();
        let target_set: HashSet<&str> = target.iter().map(|accession| accession.as_str()).collect();
        let current = store.list_spectrum_proteins(spectrum.get_id())?;
        let current_set: HashSet<String> = current
            .iter()
            .map(|link| link.get_protein_accession().clone())
            .collect();

        let mut retired = Vec::new();
        let retired_at = Utc::now();
        for link in current
            .iter()
            .filter(|link| !target_set.contains(link.get_protein_accession().as_str()))
        {
            store.retire_spectrum_protein(link, retired_at)?;
            retired.push(link.get_protein_accession().clone());
        }

        let mut added = Vec::new();
        let mut kept = Vec::new();
        let mut unresolved = Vec::new();
        for accession in target {
            if current_set.contains(accession) {
                kept.push(accession.clone());
                continue;
            }
            let protein = match Self::resolve_protein(store, protein_source, accession)? {
                Some(protein) => protein,
                None => {
                    warn!(
                        "protein {} not found, no link for spectrum {}",
                        accession,
                        spectrum.get_id()
                    );
                    unresolved.push(accession.clone());
                    continue;
                }
            };
            store.insert_spectrum_protein(&SpectrumProtein::new(
                0,
                spectrum.get_id(),
                accession.clone(),
                spectrum.get_peptide_id(),
                self.library_module.get_id(),
                variant.get_previous_residue(),
                variant.get_next_residue(),
                protein.locate(unmodified_sequence),
                true,
                true,
            ))?;
            added.push(accession.clone());
        }
        Ok(LinkReconciliation::new(added, retired, kept, unresolved))
    }

    /// Returns the protein from the store or, if unknown, from the protein source.
    /// A protein taken from the source is inserted into the store.
    ///
    fn resolve_protein(
        store: &mut dyn SpectrumStore,
        protein_source: &mut dyn ProteinSource,
        accession: &str,
    ) -> Result<Option<Protein>> {
        if let Some(protein) = store.get_protein(accession)? {
            return Ok(Some(protein));
        }
        match protein_source.fetch(accession)? {
            Some(protein) if protein.get_accession() == accession => {
                store.insert_protein(&protein)?;
                Ok(Some(protein))
            }
            Some(protein) => {
                warn!(
                    "protein source returned {} for {}",
                    protein.get_accession(),
                    accession
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn write_artifact(&self, spectrum: &Spectrum, record: &SpectralRecord) -> ArtifactOutcome {
        let writer = match self.spectrum_file_writer.as_ref() {
            Some(writer) => writer,
            None => return ArtifactOutcome::NotConfigured,
        };
        match writer.write(
            spectrum.get_id(),
            record.get_header_line(),
            record.get_peak_lines(),
        ) {
            Ok(path) => ArtifactOutcome::Written(path),
            Err(err) => {
                warn!(
                    "could not write peaks of spectrum {}: {:#}",
                    spectrum.get_id(),
                    err
                );
                ArtifactOutcome::Failed(format!("{:#}", err))
            }
        }
    }
}
