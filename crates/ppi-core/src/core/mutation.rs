//! Rule-based point-mutation suggestions for interface residues.
//!
//! The rules form a closed lookup table keyed by residue name. They are a
//! demonstration heuristic, not a binding-affinity model.

use phf::{Map, phf_map};
use serde::Serialize;

/// Chemical class of a residue as far as the mutation rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResidueClass {
    /// Small side chains (ALA, GLY, SER).
    Small,
    /// Positively charged side chains (LYS, ARG).
    Basic,
}

static RESIDUE_CLASSES: Map<&'static str, ResidueClass> = phf_map! {
    "ALA" => ResidueClass::Small,
    "GLY" => ResidueClass::Small,
    "SER" => ResidueClass::Small,
    "LYS" => ResidueClass::Basic,
    "ARG" => ResidueClass::Basic,
};

const SMALL_TO_AROMATIC: &str = "TYR";
const SMALL_TO_AROMATIC_RATIONALE: &str =
    "Replacing small residue with larger aromatic to increase contacts";
const BASIC_TO_ACIDIC: &str = "GLU";
const BASIC_TO_ACIDIC_RATIONALE: &str = "Potential salt bridge formation";

/// A suggested substitution for one residue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MutationSuggestion {
    pub class: ResidueClass,
    /// Three-letter code of the suggested replacement.
    pub suggested: &'static str,
    pub rationale: &'static str,
}

/// Classifies a residue name, returning `None` for residues without a rule.
pub fn classify(residue_name: &str) -> Option<ResidueClass> {
    RESIDUE_CLASSES.get(residue_name.trim()).copied()
}

/// Suggests a substitution for a residue name.
///
/// Small residues map to a larger aromatic, basic residues to an acidic one,
/// and every other name yields `None`. Names are matched exactly after
/// trimming; PDB residue names are upper case.
pub fn suggest(residue_name: &str) -> Option<MutationSuggestion> {
    classify(residue_name).map(|class| match class {
        ResidueClass::Small => MutationSuggestion {
            class,
            suggested: SMALL_TO_AROMATIC,
            rationale: SMALL_TO_AROMATIC_RATIONALE,
        },
        ResidueClass::Basic => MutationSuggestion {
            class,
            suggested: BASIC_TO_ACIDIC,
            rationale: BASIC_TO_ACIDIC_RATIONALE,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_residues_map_to_larger_aromatic() {
        for name in ["ALA", "GLY", "SER"] {
            let suggestion = suggest(name).unwrap();
            assert_eq!(suggestion.class, ResidueClass::Small);
            assert_eq!(suggestion.suggested, "TYR");
            assert_eq!(
                suggestion.rationale,
                "Replacing small residue with larger aromatic to increase contacts"
            );
        }
    }

    #[test]
    fn basic_residues_map_to_acidic() {
        for name in ["LYS", "ARG"] {
            let suggestion = suggest(name).unwrap();
            assert_eq!(suggestion.class, ResidueClass::Basic);
            assert_eq!(suggestion.suggested, "GLU");
            assert_eq!(suggestion.rationale, "Potential salt bridge formation");
        }
    }

    #[test]
    fn other_residues_yield_no_suggestion() {
        for name in ["TRP", "TYR", "GLU", "ASP", "HOH", "", "XYZ"] {
            assert!(suggest(name).is_none(), "unexpected suggestion for {name}");
        }
    }

    #[test]
    fn names_are_trimmed_but_case_sensitive() {
        assert!(suggest(" ALA ").is_some());
        assert!(suggest("ala").is_none());
    }
}
