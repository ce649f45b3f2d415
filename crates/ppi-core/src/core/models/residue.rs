use super::ids::{AtomId, ChainId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub residue_number: isize, // Residue sequence number from source file
    pub name: String,          // Name of the residue (e.g., "ALA", "GLY")
    pub hetero: bool,          // Whether the residue was read from HETATM records
    pub chain_id: ChainId,     // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>, // Atoms of this residue in source order
}

impl Residue {
    pub(crate) fn new(residue_number: isize, name: &str, hetero: bool, chain_id: ChainId) -> Self {
        Self {
            residue_number,
            name: name.to_string(),
            hetero,
            chain_id,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, "GLY", false, chain_id);
        assert_eq!(residue.residue_number, 10);
        assert_eq!(residue.name, "GLY");
        assert!(!residue.hetero);
        assert_eq!(residue.chain_id, chain_id);
        assert!(residue.atoms().is_empty());
    }

    #[test]
    fn add_atom_preserves_insertion_order() {
        let mut residue = Residue::new(5, "ALA", false, dummy_chain_id(2));
        let first = dummy_atom_id(42);
        let second = dummy_atom_id(7);
        residue.add_atom(first);
        residue.add_atom(second);
        assert_eq!(residue.atoms(), &[first, second]);
    }
}
