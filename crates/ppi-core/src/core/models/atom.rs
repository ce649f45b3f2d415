use super::ids::ResidueId;
use crate::core::utils::elements::atomic_mass_or_default;
use nalgebra::Point3;

/// Default occupancy assigned when the source record does not provide one.
pub const DEFAULT_OCCUPANCY: f64 = 1.0;
/// Default temperature factor assigned when the source record does not provide one.
pub const DEFAULT_TEMPERATURE_FACTOR: f64 = 0.0;

/// Represents an atom in a molecular structure.
///
/// The atomic mass is always derived from the element symbol through the
/// element table and is never set independently, so two atoms with the same
/// element always carry the same mass. The parent residue is referenced by its
/// arena key; the atom never owns or shares ownership of its residue.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The element symbol (e.g., "C", "FE"); may be empty if it could not be derived.
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Crystallographic occupancy.
    pub occupancy: f64,
    /// Crystallographic temperature factor.
    pub temperature_factor: f64,
    mass: f64,
}

impl Atom {
    /// Creates a new `Atom`, deriving its mass from the element symbol.
    ///
    /// Occupancy and temperature factor start at their defaults and can be
    /// modified afterward as needed.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number of the atom.
    /// * `name` - The name of the atom.
    /// * `element` - The element symbol; unknown symbols receive the default mass.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        serial: usize,
        name: &str,
        element: &str,
        residue_id: ResidueId,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element: element.to_string(),
            residue_id,
            position,
            occupancy: DEFAULT_OCCUPANCY,
            temperature_factor: DEFAULT_TEMPERATURE_FACTOR,
            mass: atomic_mass_or_default(element),
        }
    }

    /// Returns the atomic mass in daltons. Always positive.
    pub fn mass(&self) -> f64 {
        self.mass
    }
}
