use crate::core::models::ids::ResidueKey;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{self, GeometryError};
use crate::engine::error::EngineError;
use nalgebra::Point3;
use tracing::{debug, instrument};

/// Mass-weighted center of the ATOM records of one chain.
///
/// HETATM residues (waters, ions, ligands) are left out.
///
/// # Errors
///
/// Returns [`EngineError::ChainNotFound`] if the chain does not exist and
/// [`EngineError::EmptySet`] if it holds no non-hetero atoms.
#[instrument(skip_all, name = "center_of_mass_task", fields(chain = %chain))]
pub fn chain_center_of_mass(structure: &Structure, chain: char) -> Result<Point3<f64>, EngineError> {
    let chain_id = structure
        .find_chain_by_id(chain)
        .ok_or(EngineError::ChainNotFound { chain_id: chain })?;

    let polymer_atoms = structure
        .chain_atoms(chain_id)
        .map(|(_, atom)| atom)
        .filter(|atom| {
            structure
                .residue(atom.residue_id)
                .is_some_and(|residue| !residue.hetero)
        });

    let center = geometry::center_of_mass(polymer_atoms)
        .map_err(|e| empty_set(e, format!("center of mass of chain '{}'", chain)))?;

    debug!(x = center.x, y = center.y, z = center.z, "Chain center of mass computed.");
    Ok(center)
}

/// Mass-weighted center of the atoms belonging to the given residues.
///
/// Keys that do not resolve to a residue are skipped.
pub fn residues_center_of_mass<'k, I>(structure: &Structure, keys: I) -> Result<Point3<f64>, EngineError>
where
    I: IntoIterator<Item = &'k ResidueKey>,
{
    let atoms = keys
        .into_iter()
        .filter_map(|key| structure.find_residue_by_key(key))
        .filter_map(|residue_id| structure.residue(residue_id))
        .flat_map(|residue| residue.atoms().iter())
        .filter_map(|&atom_id| structure.atom(atom_id));

    geometry::center_of_mass(atoms)
        .map_err(|e| empty_set(e, "center of mass of residue selection".to_string()))
}

fn empty_set(error: GeometryError, context: String) -> EngineError {
    match error {
        GeometryError::EmptySet => EngineError::EmptySet { context },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureBuilder;

    fn structure() -> Structure {
        let mut builder = StructureBuilder::new();
        builder.start_chain('A');
        builder.start_residue(1, "GLY", false);
        builder.add_atom(1, "C1", "C", Point3::new(0.0, 0.0, 0.0));
        builder.add_atom(2, "C2", "C", Point3::new(2.0, 0.0, 0.0));
        builder.start_residue(2, "HOH", true);
        builder.add_atom(3, "O", "O", Point3::new(0.0, 5.0, 0.0));
        builder.start_chain('B');
        builder.start_residue(7, "ALA", false);
        builder.add_atom(4, "CA", "C", Point3::new(1.5, -2.0, 3.25));
        builder.build()
    }

    #[test]
    fn single_atom_chain_returns_atom_position() {
        let center = chain_center_of_mass(&structure(), 'B').unwrap();
        assert_eq!(center, Point3::new(1.5, -2.0, 3.25));
    }

    #[test]
    fn chain_center_is_mass_weighted() {
        let mut builder = StructureBuilder::new();
        builder.start_chain('A');
        builder.start_residue(1, "SER", false);
        builder.add_atom(1, "CA", "C", Point3::new(0.0, 0.0, 0.0));
        builder.add_atom(2, "OG", "O", Point3::new(0.0, 4.0, 0.0));
        let center = chain_center_of_mass(&builder.build(), 'A').unwrap();
        let (mc, mo) = (12.011, 15.999);
        assert!(center.x.abs() < 1e-12);
        assert!((center.y - 4.0 * mo / (mc + mo)).abs() < 1e-9);
    }

    #[test]
    fn hetero_residues_do_not_shift_chain_center() {
        let center = chain_center_of_mass(&structure(), 'A').unwrap();
        assert!((center.x - 1.0).abs() < 1e-12);
        assert!(center.y.abs() < 1e-12);
        assert!(center.z.abs() < 1e-12);
    }

    #[test]
    fn chain_of_only_hetero_residues_is_empty() {
        let mut builder = StructureBuilder::new();
        builder.start_chain('W');
        builder.start_residue(301, "HOH", true);
        builder.add_atom(1, "O", "O", Point3::new(1.0, 1.0, 1.0));
        assert!(matches!(
            chain_center_of_mass(&builder.build(), 'W'),
            Err(EngineError::EmptySet { .. })
        ));
    }

    #[test]
    fn missing_chain_is_reported() {
        assert_eq!(
            chain_center_of_mass(&structure(), 'X'),
            Err(EngineError::ChainNotFound { chain_id: 'X' })
        );
    }

    #[test]
    fn empty_chain_is_reported() {
        let mut structure = structure();
        structure.add_chain('E');
        assert!(matches!(
            chain_center_of_mass(&structure, 'E'),
            Err(EngineError::EmptySet { .. })
        ));
    }

    #[test]
    fn residue_selection_center_ignores_unknown_keys() {
        let structure = structure();
        let keys = [ResidueKey::new('A', 1), ResidueKey::new('A', 99)];
        let center = residues_center_of_mass(&structure, &keys).unwrap();
        assert!((center.x - 1.0).abs() < 1e-12);
        assert!(center.y.abs() < 1e-12);

        let none = [ResidueKey::new('Z', 1)];
        assert!(matches!(
            residues_center_of_mass(&structure, &none),
            Err(EngineError::EmptySet { .. })
        ));
    }
}
