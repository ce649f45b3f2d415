use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId, ResidueKey};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;

const DEFAULT_STRUCTURE_NAME: &str = "structure";

/// Represents a complete molecular structure with chains, residues and atoms.
///
/// Ownership flows strictly structure -> chain -> residue -> atom. All three
/// levels live in slot-map arenas and refer to their parents through keys, so
/// there is no shared ownership anywhere in the model. Chains are kept in the
/// order they were first added, which is the order used for serialization.
#[derive(Debug, Clone)]
pub struct Structure {
    /// Name or identifier of the structure (e.g., a PDB ID code).
    name: String,
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in first-seen order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain ID and residue number.
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl Default for Structure {
    fn default() -> Self {
        Self::new(DEFAULT_STRUCTURE_NAME)
    }
}

impl Structure {
    /// Creates a new, empty structure with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: SlotMap::with_key(),
            residues: SlotMap::with_key(),
            chains: SlotMap::with_key(),
            chain_order: Vec::new(),
            residue_id_map: HashMap::new(),
            chain_id_map: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all atoms in the structure, in arena order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns an iterator over all residues in the structure, in arena order.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Returns an iterator over all chains in first-seen order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns the chain identifiers in first-seen order.
    pub fn chain_ids(&self) -> Vec<char> {
        self.chains_iter().map(|(_, chain)| chain.id).collect()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain ID and residue number.
    pub fn find_residue_by_number(
        &self,
        chain_id: ChainId,
        residue_number: isize,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number))
            .copied()
    }

    /// Finds a residue ID by its (chain identifier, residue number) key.
    pub fn find_residue_by_key(&self, key: &ResidueKey) -> Option<ResidueId> {
        let chain_id = self.find_chain_by_id(key.chain_id)?;
        self.find_residue_by_number(chain_id, key.residue_number)
    }

    /// Builds the [`ResidueKey`] of a residue.
    ///
    /// # Return
    ///
    /// Returns `None` if the residue or its parent chain does not exist.
    pub fn residue_key(&self, residue_id: ResidueId) -> Option<ResidueKey> {
        let residue = self.residues.get(residue_id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some(ResidueKey::new(chain.id, residue.residue_number))
    }

    /// Returns an iterator over the atoms of a chain, in residue order and then
    /// in atom order within each residue.
    pub fn chain_atoms(&self, chain_id: ChainId) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.chains
            .get(chain_id)
            .into_iter()
            .flat_map(|chain| chain.residues.iter())
            .filter_map(|&res_id| self.residues.get(res_id))
            .flat_map(|residue| residue.atoms.iter())
            .filter_map(|&atom_id| self.atoms.get(atom_id).map(|atom| (atom_id, atom)))
    }

    /// Adds a new chain to the structure or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given identifier already
    /// exists, its ID is returned without creating a duplicate.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// This method is idempotent; if a residue with the given chain ID and
    /// residue number already exists, it returns the existing residue ID and
    /// leaves its name untouched.
    ///
    /// # Return
    ///
    /// Returns `None` if the chain does not exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
        hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number);

        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let residue_id = self
            .residues
            .insert(Residue::new(residue_number, name, hetero, chain_id));
        self.residue_id_map.insert(key, residue_id);
        chain.residues.push(residue_id);
        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// The atom's `residue_id` is overwritten with `residue_id` so that the
    /// back-reference is always consistent with the owning residue.
    ///
    /// # Return
    ///
    /// Returns `None` if the residue does not exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        atom.residue_id = residue_id;
        let atom_id = self.atoms.insert(atom);
        self.residues.get_mut(residue_id)?.add_atom(atom_id);
        Some(atom_id)
    }

    /// Builds a new structure containing only the residues accepted by
    /// `predicate`, together with all of their atoms.
    ///
    /// Chain identifiers, chain order and residue order are preserved. Chains
    /// left without any residue are omitted. The source structure is not
    /// modified and the result shares no data with it.
    pub fn extract<F>(&self, predicate: F) -> Structure
    where
        F: Fn(&ResidueKey) -> bool,
    {
        let mut subset = Structure::new(&self.name);

        for (_, chain) in self.chains_iter() {
            for &res_id in chain.residues() {
                let Some(residue) = self.residues.get(res_id) else {
                    continue;
                };
                let key = ResidueKey::new(chain.id, residue.residue_number);
                if !predicate(&key) {
                    continue;
                }

                let new_chain_id = subset.add_chain(chain.id);
                let Some(new_res_id) = subset.add_residue(
                    new_chain_id,
                    residue.residue_number,
                    &residue.name,
                    residue.hetero,
                ) else {
                    continue;
                };
                for &atom_id in residue.atoms() {
                    if let Some(atom) = self.atoms.get(atom_id) {
                        subset.add_atom_to_residue(new_res_id, atom.clone());
                    }
                }
            }
        }

        subset
    }
}
