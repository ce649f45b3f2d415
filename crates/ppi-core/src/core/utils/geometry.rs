use crate::core::models::atom::Atom;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GeometryError {
    #[error("Cannot aggregate over an empty atom set")]
    EmptySet,
}

/// Euclidean distance between two points.
///
/// Identical points yield exactly `0.0`, and the result does not depend on
/// argument order.
pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p2).norm()
}

/// Mass-weighted center of a set of atoms.
///
/// The weighted offsets are accumulated relative to the first atom, so a
/// single atom yields exactly its own position whatever its mass.
///
/// # Errors
///
/// Returns [`GeometryError::EmptySet`] if `atoms` yields nothing.
pub fn center_of_mass<'a, I>(atoms: I) -> Result<Point3<f64>, GeometryError>
where
    I: IntoIterator<Item = &'a Atom>,
{
    weighted_center(atoms.into_iter().map(|atom| (atom.position, atom.mass())))
}

/// Weighted center of `(position, weight)` pairs.
///
/// # Errors
///
/// Returns [`GeometryError::EmptySet`] if `points` yields nothing.
pub fn weighted_center<I>(points: I) -> Result<Point3<f64>, GeometryError>
where
    I: IntoIterator<Item = (Point3<f64>, f64)>,
{
    let mut iter = points.into_iter();
    let (origin, first_weight) = iter.next().ok_or(GeometryError::EmptySet)?;

    let mut total_weight = first_weight;
    let mut weighted_offset = Vector3::zeros();
    for (position, weight) in iter {
        weighted_offset += (position - origin) * weight;
        total_weight += weight;
    }

    Ok(origin + weighted_offset / total_weight)
}
