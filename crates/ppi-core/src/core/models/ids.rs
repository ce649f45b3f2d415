use serde::Serialize;
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}

/// Identifies a residue by its chain identifier and sequence number.
///
/// This is the unit of identity for interface membership and mutation
/// suggestions. Keys order by chain identifier first, then by residue number,
/// which is the order used whenever residues are presented or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResidueKey {
    /// Single-character chain identifier (e.g., 'A', 'H').
    pub chain_id: char,
    /// Residue sequence number as read from the source file.
    pub residue_number: isize,
}

impl ResidueKey {
    pub fn new(chain_id: char, residue_number: isize) -> Self {
        Self {
            chain_id,
            residue_number,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.residue_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_keys_are_equal_only_when_both_fields_match() {
        assert_eq!(ResidueKey::new('A', 1), ResidueKey::new('A', 1));
        assert_ne!(ResidueKey::new('A', 1), ResidueKey::new('B', 1));
        assert_ne!(ResidueKey::new('A', 1), ResidueKey::new('A', 2));
    }

    #[test]
    fn residue_keys_sort_by_chain_then_number() {
        let mut keys = vec![
            ResidueKey::new('B', 1),
            ResidueKey::new('A', 10),
            ResidueKey::new('A', -2),
            ResidueKey::new('B', 0),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ResidueKey::new('A', -2),
                ResidueKey::new('A', 10),
                ResidueKey::new('B', 0),
                ResidueKey::new('B', 1),
            ]
        );
    }

    #[test]
    fn residue_key_displays_as_chain_colon_number() {
        assert_eq!(ResidueKey::new('H', 52).to_string(), "H:52");
    }
}
