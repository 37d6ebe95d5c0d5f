// std imports
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

// 3rd party imports
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// internal imports
use crate::database::errors::snapshot_error::SnapshotError;
use crate::database::errors::store_error::StoreError;
use crate::database::store::SpectrumStore;
use crate::entities::library_module::{LibraryModule, Species};
use crate::entities::peptide::Peptide;
use crate::entities::protein::Protein;
use crate::entities::ptm_type::PtmType;
use crate::entities::spectrum::Spectrum;
use crate::entities::spectrum_protein::{SpectrumProtein, SpectrumProteinHistory};

/// Serialized form of a [MemoryStore]
///
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    species: Vec<Species>,
    library_modules: Vec<LibraryModule>,
    ptm_types: Vec<PtmType>,
    peptides: Vec<Peptide>,
    spectra: Vec<Spectrum>,
    proteins: Vec<Protein>,
    spectrum_proteins: Vec<SpectrumProtein>,
    spectrum_protein_history: Vec<SpectrumProteinHistory>,
}

type SpectrumKey = (String, i32, u8);

/// In-memory store, optionally backed by a JSON snapshot which is written on [SpectrumStore::flush].
///
#[derive(Default)]
pub struct MemoryStore {
    snapshot_path: Option<PathBuf>,
    species: BTreeMap<i32, Species>,
    library_modules: BTreeMap<i32, LibraryModule>,
    ptm_types: BTreeMap<u8, PtmType>,
    peptides: BTreeMap<i64, Peptide>,
    peptide_ids: HashMap<String, i64>,
    spectra: BTreeMap<i64, Spectrum>,
    spectrum_ids: HashMap<SpectrumKey, i64>,
    /// Spectrum IDs per peptide ID
    peptide_spectrum_ids: HashMap<i64, BTreeSet<i64>>,
    proteins: BTreeMap<String, Protein>,
    spectrum_proteins: BTreeMap<i64, SpectrumProtein>,
    /// Active link IDs per spectrum ID
    spectrum_protein_ids: HashMap<i64, BTreeSet<i64>>,
    spectrum_protein_history: Vec<SpectrumProteinHistory>,
    next_peptide_id: i64,
    next_spectrum_id: i64,
    next_spectrum_protein_id: i64,
}

fn spectrum_key(spectrum: &Spectrum) -> SpectrumKey {
    (
        spectrum.get_ptm_sequence().clone(),
        spectrum.get_module_id(),
        spectrum.get_charge(),
    )
}

impl MemoryStore {
    /// Creates an empty store without snapshot
    ///
    pub fn new() -> Self {
        Self {
            next_peptide_id: 1,
            next_spectrum_id: 1,
            next_spectrum_protein_id: 1,
            ..Default::default()
        }
    }

    /// Opens the snapshot at the given path. If the file does not exist the store starts empty
    /// and creates the file on flush.
    ///
    /// # Arguments
    /// * `snapshot_path` - Path to the JSON snapshot
    ///
    pub fn open(snapshot_path: &Path) -> Result<Self, SnapshotError> {
        let mut store = if snapshot_path.is_file() {
            let reader = BufReader::new(File::open(snapshot_path).map_err(|source| {
                SnapshotError::IoError {
                    path: snapshot_path.to_path_buf(),
                    source,
                }
            })?);
            let snapshot: Snapshot =
                serde_json::from_reader(reader).map_err(|source| SnapshotError::FormatError {
                    path: snapshot_path.to_path_buf(),
                    source,
                })?;
            info!(
                "Loaded snapshot {} with {} spectra",
                snapshot_path.display(),
                snapshot.spectra.len()
            );
            Self::from_snapshot(snapshot)
        } else {
            debug!(
                "Snapshot {} does not exist, starting empty",
                snapshot_path.display()
            );
            Self::new()
        };
        store.snapshot_path = Some(snapshot_path.to_path_buf());
        Ok(store)
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        for species in snapshot.species {
            store.species.insert(species.get_id(), species);
        }
        for library_module in snapshot.library_modules {
            store
                .library_modules
                .insert(library_module.get_id(), library_module);
        }
        for ptm_type in snapshot.ptm_types {
            store.ptm_types.insert(ptm_type.get_id(), ptm_type);
        }
        for peptide in snapshot.peptides {
            store.next_peptide_id = store.next_peptide_id.max(peptide.get_id() + 1);
            store
                .peptide_ids
                .insert(peptide.get_sequence().clone(), peptide.get_id());
            store.peptides.insert(peptide.get_id(), peptide);
        }
        for spectrum in snapshot.spectra {
            store.next_spectrum_id = store.next_spectrum_id.max(spectrum.get_id() + 1);
            store
                .spectrum_ids
                .insert(spectrum_key(&spectrum), spectrum.get_id());
            store.index_spectrum(&spectrum);
            store.spectra.insert(spectrum.get_id(), spectrum);
        }
        for protein in snapshot.proteins {
            store
                .proteins
                .insert(protein.get_accession().clone(), protein);
        }
        for spectrum_protein in snapshot.spectrum_proteins {
            store.next_spectrum_protein_id = store
                .next_spectrum_protein_id
                .max(spectrum_protein.get_id() + 1);
            store.index_spectrum_protein(&spectrum_protein);
            store
                .spectrum_proteins
                .insert(spectrum_protein.get_id(), spectrum_protein);
        }
        // Retired links keep their IDs, new links must not reuse them
        for history in snapshot.spectrum_protein_history.iter() {
            store.next_spectrum_protein_id = store
                .next_spectrum_protein_id
                .max(history.get_spectrum_protein().get_id() + 1);
        }
        store.spectrum_protein_history = snapshot.spectrum_protein_history;
        store
    }

    fn index_spectrum(&mut self, spectrum: &Spectrum) {
        self.peptide_spectrum_ids
            .entry(spectrum.get_peptide_id())
            .or_default()
            .insert(spectrum.get_id());
    }

    fn unindex_spectrum(&mut self, spectrum: &Spectrum) {
        if let Some(spectrum_ids) = self.peptide_spectrum_ids.get_mut(&spectrum.get_peptide_id()) {
            spectrum_ids.remove(&spectrum.get_id());
            if spectrum_ids.is_empty() {
                self.peptide_spectrum_ids.remove(&spectrum.get_peptide_id());
            }
        }
    }

    fn index_spectrum_protein(&mut self, spectrum_protein: &SpectrumProtein) {
        self.spectrum_protein_ids
            .entry(spectrum_protein.get_spectrum_id())
            .or_default()
            .insert(spectrum_protein.get_id());
    }

    fn unindex_spectrum_protein(&mut self, spectrum_protein: &SpectrumProtein) {
        if let Some(link_ids) = self
            .spectrum_protein_ids
            .get_mut(&spectrum_protein.get_spectrum_id())
        {
            link_ids.remove(&spectrum_protein.get_id());
            if link_ids.is_empty() {
                self.spectrum_protein_ids
                    .remove(&spectrum_protein.get_spectrum_id());
            }
        }
    }

    /// Active links of the given spectrum, ordered by ID
    ///
    fn spectrum_proteins_of(&self, spectrum_id: i64) -> impl Iterator<Item = &SpectrumProtein> {
        self.spectrum_protein_ids
            .get(&spectrum_id)
            .into_iter()
            .flatten()
            .filter_map(move |link_id| self.spectrum_proteins.get(link_id))
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            species: self.species.values().cloned().collect(),
            library_modules: self.library_modules.values().cloned().collect(),
            ptm_types: self.ptm_types.values().cloned().collect(),
            peptides: self.peptides.values().cloned().collect(),
            spectra: self.spectra.values().cloned().collect(),
            proteins: self.proteins.values().cloned().collect(),
            spectrum_proteins: self.spectrum_proteins.values().cloned().collect(),
            spectrum_protein_history: self.spectrum_protein_history.clone(),
        }
    }

    /// Writes the snapshot to the given path
    ///
    /// # Arguments
    /// * `snapshot_path` - Path to the JSON snapshot
    ///
    pub fn save(&self, snapshot_path: &Path) -> Result<(), SnapshotError> {
        let io_error = |source| SnapshotError::IoError {
            path: snapshot_path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(snapshot_path).map_err(io_error)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_snapshot()).map_err(|source| {
            SnapshotError::FormatError {
                path: snapshot_path.to_path_buf(),
                source,
            }
        })?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }

    pub fn count_ptm_types(&self) -> usize {
        self.ptm_types.len()
    }

    pub fn count_peptides(&self) -> usize {
        self.peptides.len()
    }

    pub fn count_spectra(&self) -> usize {
        self.spectra.len()
    }

    pub fn count_proteins(&self) -> usize {
        self.proteins.len()
    }

    pub fn count_spectrum_proteins(&self) -> usize {
        self.spectrum_proteins.len()
    }
}

impl SpectrumStore for MemoryStore {
    fn get_library_module_by_id(&mut self, id: i32) -> Result<Option<LibraryModule>> {
        Ok(self.library_modules.get(&id).cloned())
    }

    fn get_library_module_by_name(&mut self, name: &str) -> Result<Option<LibraryModule>> {
        Ok(self
            .library_modules
            .values()
            .find(|library_module| library_module.get_name() == name)
            .cloned())
    }

    fn get_species(&mut self, id: i32) -> Result<Option<Species>> {
        Ok(self.species.get(&id).cloned())
    }

    fn insert_species(&mut self, species: &Species) -> Result<()> {
        if self.species.contains_key(&species.get_id()) {
            bail!(StoreError::DuplicateKey {
                entity: "species",
                key: species.get_id().to_string()
            });
        }
        self.species.insert(species.get_id(), species.clone());
        Ok(())
    }

    fn insert_library_module(&mut self, library_module: &LibraryModule) -> Result<()> {
        let is_taken = self.library_modules.values().any(|existing| {
            existing.get_id() == library_module.get_id()
                || existing.get_name() == library_module.get_name()
        });
        if is_taken {
            bail!(StoreError::DuplicateKey {
                entity: "library module",
                key: library_module.get_name().clone()
            });
        }
        self.library_modules
            .insert(library_module.get_id(), library_module.clone());
        Ok(())
    }

    fn get_ptm_type(&mut self, id: u8) -> Result<Option<PtmType>> {
        Ok(self.ptm_types.get(&id).cloned())
    }

    fn insert_ptm_type(&mut self, ptm_type: &PtmType) -> Result<()> {
        if self.ptm_types.contains_key(&ptm_type.get_id()) {
            bail!(StoreError::DuplicateKey {
                entity: "ptm type",
                key: ptm_type.get_id().to_string()
            });
        }
        self.ptm_types.insert(ptm_type.get_id(), ptm_type.clone());
        Ok(())
    }

    fn get_peptide_by_sequence(&mut self, sequence: &str) -> Result<Option<Peptide>> {
        Ok(self
            .peptide_ids
            .get(sequence)
            .and_then(|id| self.peptides.get(id))
            .cloned())
    }

    fn insert_peptide(&mut self, peptide: &Peptide) -> Result<Peptide> {
        if self.peptide_ids.contains_key(peptide.get_sequence()) {
            bail!(StoreError::DuplicateKey {
                entity: "peptide",
                key: peptide.get_sequence().clone()
            });
        }
        let peptide = peptide.with_id(self.next_peptide_id);
        self.next_peptide_id += 1;
        self.peptide_ids
            .insert(peptide.get_sequence().clone(), peptide.get_id());
        self.peptides.insert(peptide.get_id(), peptide.clone());
        Ok(peptide)
    }

    fn list_peptides(&mut self) -> Result<Vec<Peptide>> {
        Ok(self.peptides.values().cloned().collect())
    }

    fn get_spectrum(
        &mut self,
        ptm_sequence: &str,
        module_id: i32,
        charge: u8,
    ) -> Result<Option<Spectrum>> {
        Ok(self
            .spectrum_ids
            .get(&(ptm_sequence.to_string(), module_id, charge))
            .and_then(|id| self.spectra.get(id))
            .cloned())
    }

    fn insert_spectrum(&mut self, spectrum: &Spectrum) -> Result<Spectrum> {
        let key = spectrum_key(spectrum);
        if self.spectrum_ids.contains_key(&key) {
            bail!(StoreError::DuplicateKey {
                entity: "spectrum",
                key: format!("{:?}", key)
            });
        }
        let spectrum = spectrum.with_id(self.next_spectrum_id);
        self.next_spectrum_id += 1;
        self.spectrum_ids.insert(key, spectrum.get_id());
        self.index_spectrum(&spectrum);
        self.spectra.insert(spectrum.get_id(), spectrum.clone());
        Ok(spectrum)
    }

    fn update_spectrum(&mut self, spectrum: &Spectrum) -> Result<()> {
        let stored = match self.spectra.get(&spectrum.get_id()) {
            Some(stored) if spectrum_key(stored) == spectrum_key(spectrum) => stored.clone(),
            _ => bail!(StoreError::NotFound {
                entity: "spectrum",
                key: spectrum.get_id().to_string()
            }),
        };
        self.unindex_spectrum(&stored);
        self.index_spectrum(spectrum);
        self.spectra.insert(spectrum.get_id(), spectrum.clone());
        Ok(())
    }

    fn list_spectra_of_peptide(&mut self, peptide_id: i64) -> Result<Vec<Spectrum>> {
        Ok(self
            .peptide_spectrum_ids
            .get(&peptide_id)
            .into_iter()
            .flatten()
            .filter_map(|spectrum_id| self.spectra.get(spectrum_id))
            .cloned()
            .collect())
    }

    fn get_protein(&mut self, accession: &str) -> Result<Option<Protein>> {
        Ok(self.proteins.get(accession).cloned())
    }

    fn insert_protein(&mut self, protein: &Protein) -> Result<()> {
        if self.proteins.contains_key(protein.get_accession()) {
            bail!(StoreError::DuplicateKey {
                entity: "protein",
                key: protein.get_accession().clone()
            });
        }
        self.proteins
            .insert(protein.get_accession().clone(), protein.clone());
        Ok(())
    }

    fn list_spectrum_proteins(&mut self, spectrum_id: i64) -> Result<Vec<SpectrumProtein>> {
        Ok(self.spectrum_proteins_of(spectrum_id).cloned().collect())
    }

    fn insert_spectrum_protein(
        &mut self,
        spectrum_protein: &SpectrumProtein,
    ) -> Result<SpectrumProtein> {
        let is_linked = self
            .spectrum_proteins_of(spectrum_protein.get_spectrum_id())
            .any(|linked| {
                linked.get_protein_accession() == spectrum_protein.get_protein_accession()
            });
        if is_linked {
            bail!(StoreError::DuplicateKey {
                entity: "spectrum protein",
                key: format!(
                    "{}/{}",
                    spectrum_protein.get_spectrum_id(),
                    spectrum_protein.get_protein_accession()
                )
            });
        }
        let spectrum_protein = spectrum_protein.with_id(self.next_spectrum_protein_id);
        self.next_spectrum_protein_id += 1;
        self.index_spectrum_protein(&spectrum_protein);
        self.spectrum_proteins
            .insert(spectrum_protein.get_id(), spectrum_protein.clone());
        Ok(spectrum_protein)
    }

    fn update_spectrum_protein_flags(&mut self, spectrum_protein: &SpectrumProtein) -> Result<()> {
        match self.spectrum_proteins.get_mut(&spectrum_protein.get_id()) {
            Some(stored) => {
                *stored = stored.with_flags(
                    spectrum_protein.get_is_feature_peptide(),
                    spectrum_protein.get_is_species_unique(),
                );
                Ok(())
            }
            None => bail!(StoreError::NotFound {
                entity: "spectrum protein",
                key: spectrum_protein.get_id().to_string()
            }),
        }
    }

    fn retire_spectrum_protein(
        &mut self,
        spectrum_protein: &SpectrumProtein,
        retired_at: DateTime<Utc>,
    ) -> Result<SpectrumProteinHistory> {
        let retired = match self.spectrum_proteins.remove(&spectrum_protein.get_id()) {
            Some(retired) => retired,
            None => bail!(StoreError::NotFound {
                entity: "spectrum protein",
                key: spectrum_protein.get_id().to_string()
            }),
        };
        self.unindex_spectrum_protein(&retired);
        let history = SpectrumProteinHistory::new(retired, retired_at);
        self.spectrum_protein_history.push(history.clone());
        Ok(history)
    }

    fn list_spectrum_protein_history(
        &mut self,
        spectrum_id: i64,
    ) -> Result<Vec<SpectrumProteinHistory>> {
        Ok(self
            .spectrum_protein_history
            .iter()
            .filter(|history| history.get_spectrum_protein().get_spectrum_id() == spectrum_id)
            .cloned()
            .collect())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(snapshot_path) = self.snapshot_path.as_ref() {
            self.save(snapshot_path)?;
            debug!("Wrote snapshot {}", snapshot_path.display());
        }
        Ok(())
    }
}
