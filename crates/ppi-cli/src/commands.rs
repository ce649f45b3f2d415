pub mod center;
pub mod chains;
pub mod interface;

use crate::error::{CliError, Result};
use ppinterface::core::io::pdb::{PdbFile, PdbMetadata};
use ppinterface::core::io::traits::StructureFile;
use ppinterface::core::models::structure::Structure;
use std::path::Path;
use tracing::{info, warn};

/// Loads a PDB file and logs what the reader had to tolerate.
pub(crate) fn load_structure(path: &Path) -> Result<(Structure, PdbMetadata)> {
    info!("Loading input structure from {:?}", path);
    let (structure, metadata) =
        PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    info!(
        name = structure.name(),
        chains = structure.chain_count(),
        residues = structure.residue_count(),
        atoms = structure.atom_count(),
        "Structure loaded."
    );
    if !metadata.unknown_elements.is_empty() {
        warn!(
            "{} atom(s) with unrecognized elements ({}) were assigned the default mass.",
            metadata.unknown_element_atom_count(),
            metadata
                .unknown_elements
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if metadata.skipped_models > 0 {
        warn!(
            "Only the first model was read; {} further model(s) were skipped.",
            metadata.skipped_models
        );
    }
    if metadata.skipped_alt_locs > 0 {
        info!(
            "Kept the first alternate location of disordered atoms; {} record(s) skipped.",
            metadata.skipped_alt_locs
        );
    }

    Ok((structure, metadata))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Heavy chain H (SER 30, LYS 31, TRP 90) facing antigen chain A (GLY 5, ARG 6).
    pub const COMPLEX_PDB: &str = "\
HEADER    IMMUNE SYSTEM                           01-JAN-00   1ABC
ATOM      1  CA  SER H  30       0.000   0.000   0.000  1.00 20.00           C
ATOM      2  OG  SER H  30       0.000   1.000   0.000  1.00 20.00           O
ATOM      3  CA  LYS H  31       0.000   6.000   0.000  1.00 20.00           C
ATOM      4  CA  TRP H  90       0.000  40.000   0.000  1.00 20.00           C
TER
ATOM      5  CA  GLY A   5       3.500   0.000   0.000  1.00 20.00           C
ATOM      6  CA  ARG A   6       3.500   6.000   0.000  1.00 20.00           C
TER
END
";

    pub fn write_complex(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("complex.pdb");
        std::fs::write(&path, COMPLEX_PDB).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_structure_reads_fixture() {
        let dir = tempdir().unwrap();
        let path = test_support::write_complex(&dir);
        let (structure, metadata) = load_structure(&path).unwrap();
        assert_eq!(structure.name(), "1ABC");
        assert_eq!(structure.chain_ids(), vec!['H', 'A']);
        assert_eq!(structure.atom_count(), 6);
        assert!(metadata.unknown_elements.is_empty());
    }

    #[test]
    fn load_structure_wraps_reader_errors_with_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.pdb");
        match load_structure(&missing) {
            Err(CliError::FileParsing { path, source }) => {
                assert_eq!(path, missing);
                assert!(source.to_string().contains("not found"));
            }
            other => panic!("Expected FileParsing error, got {:?}", other.map(|_| ())),
        }
    }
}
