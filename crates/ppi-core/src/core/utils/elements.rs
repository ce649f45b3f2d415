use phf::{Map, phf_map};

/// Mass assigned to any element symbol missing from [`ATOMIC_MASSES`].
///
/// This is the mass of carbon. Unknown elements never fail a load; they
/// receive this value instead.
pub const DEFAULT_ATOMIC_MASS: f64 = 12.011;

/// Standard atomic masses (in daltons) of the elements common in biological
/// macromolecules, keyed by upper-case symbol.
static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.008,
    "C" => 12.011,
    "N" => 14.007,
    "O" => 15.999,
    "P" => 30.974,
    "S" => 32.065,
};

/// Looks up the atomic mass of an element symbol.
///
/// The symbol is trimmed and upper-cased before the lookup, so `"c"`, `" C"`
/// and `"C"` are equivalent.
///
/// # Return
///
/// Returns `Some(mass)` for a recognized element, otherwise `None`.
pub fn lookup_atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES
        .get(symbol.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Returns the atomic mass of an element symbol, falling back to
/// [`DEFAULT_ATOMIC_MASS`] for unrecognized symbols.
pub fn atomic_mass_or_default(symbol: &str) -> f64 {
    lookup_atomic_mass(symbol).unwrap_or(DEFAULT_ATOMIC_MASS)
}

/// Derives an element symbol from a PDB atom name.
///
/// Used when the element column is blank: the element is taken to be the
/// first character of the trimmed atom name. Returns an empty string for a
/// blank name.
pub fn element_from_atom_name(atom_name: &str) -> String {
    atom_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_masses_for_biological_elements() {
        assert_eq!(lookup_atomic_mass("H"), Some(1.008));
        assert_eq!(lookup_atomic_mass("C"), Some(12.011));
        assert_eq!(lookup_atomic_mass("N"), Some(14.007));
        assert_eq!(lookup_atomic_mass("O"), Some(15.999));
        assert_eq!(lookup_atomic_mass("P"), Some(30.974));
        assert_eq!(lookup_atomic_mass("S"), Some(32.065));
    }

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        assert_eq!(lookup_atomic_mass("s"), Some(32.065));
        assert_eq!(lookup_atomic_mass(" N "), Some(14.007));
    }

    #[test]
    fn unknown_elements_fall_back_to_carbon_mass() {
        assert_eq!(lookup_atomic_mass("FE"), None);
        assert_eq!(atomic_mass_or_default("FE"), DEFAULT_ATOMIC_MASS);
        assert_eq!(atomic_mass_or_default(""), DEFAULT_ATOMIC_MASS);
        assert_eq!(atomic_mass_or_default("Zn"), 12.011);
    }

    #[test]
    fn element_is_derived_from_first_char_of_atom_name() {
        assert_eq!(element_from_atom_name(" CA "), "C");
        assert_eq!(element_from_atom_name("OG1"), "O");
        assert_eq!(element_from_atom_name("    "), "");
    }
}
