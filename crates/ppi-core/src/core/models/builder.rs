use super::atom::Atom;
use super::ids::{ChainId, ResidueId};
use super::structure::Structure;
use nalgebra::Point3;

/// Incrementally constructs a [`Structure`] from a stream of atom records.
///
/// Records are grouped into (chain, residue-number) buckets. Revisiting a
/// chain or residue that was already started appends to the existing bucket,
/// so atoms always land in first-seen order regardless of how the source
/// interleaves them.
pub struct StructureBuilder {
    structure: Structure,
    current_chain: Option<(char, ChainId)>,
    current_residue: Option<(isize, ResidueId)>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            structure: Structure::default(),
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.structure.set_name(name);
        self
    }

    pub fn start_chain(&mut self, id: char) -> &mut Self {
        if self.current_chain.map(|(c, _)| c) != Some(id) {
            let chain_id = self.structure.add_chain(id);
            self.current_chain = Some((id, chain_id));
            self.current_residue = None;
        }
        self
    }

    pub fn start_residue(&mut self, residue_number: isize, name: &str, hetero: bool) -> &mut Self {
        if self.current_residue.map(|(n, _)| n) == Some(residue_number) {
            return self;
        }
        let (_, chain_id) = *self
            .current_chain
            .get_or_insert_with(|| (' ', self.structure.add_chain(' ')));
        self.current_residue = self
            .structure
            .add_residue(chain_id, residue_number, name, hetero)
            .map(|res_id| (residue_number, res_id));
        self
    }

    /// Appends an atom to the current residue and returns a mutable reference
    /// to it so optional fields can be filled in.
    ///
    /// Returns `None` if no residue has been started.
    pub fn add_atom(
        &mut self,
        serial: usize,
        name: &str,
        element: &str,
        position: Point3<f64>,
    ) -> Option<&mut Atom> {
        let (_, residue_id) = self.current_residue?;
        let atom = Atom::new(serial, name, element, residue_id, position);
        let atom_id = self.structure.add_atom_to_residue(residue_id, atom)?;
        self.structure.atom_mut(atom_id)
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}
