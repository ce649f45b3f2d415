use crate::core::models::ids::ResidueKey;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::distance;
use crate::engine::config::{ContactConfig, ContactStrategy};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Added to the k-d tree search radius so pairs at exactly the cutoff survive
/// rounding in the squared distance; candidates are re-tested exactly.
const QUERY_RADIUS_PADDING: f64 = 1e-6;

/// The closest approach between one residue of each chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueContact {
    pub residue_a: ResidueKey,
    pub residue_b: ResidueKey,
    /// Shortest inter-atomic distance between the two residues, in Angstroms.
    pub min_distance: f64,
    /// Number of atom pairs within the cutoff.
    pub atom_pairs: usize,
}

struct ChainAtoms {
    keys: Vec<ResidueKey>,
    positions: Vec<Point3<f64>>,
}

impl ChainAtoms {
    fn collect(structure: &Structure, chain: char) -> Result<Self, EngineError> {
        let chain_id = structure
            .find_chain_by_id(chain)
            .ok_or(EngineError::ChainNotFound { chain_id: chain })?;

        let mut keys = Vec::new();
        let mut positions = Vec::new();
        for (_, atom) in structure.chain_atoms(chain_id) {
            if let Some(key) = structure.residue_key(atom.residue_id) {
                keys.push(key);
                positions.push(atom.position);
            }
        }
        Ok(Self { keys, positions })
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Indices into the second chain's atom list that lie within the cutoff of one probe atom.
type Hits = Vec<(usize, f64)>;

/// Returns the residues of both chains that have at least one atom within
/// `cutoff` Angstroms of an atom in the other chain.
///
/// The result is sorted by chain identifier and then residue number. A chain
/// may be queried against itself; every atom is then at distance zero from
/// itself, so every residue of the chain is reported.
pub fn find_contacts(
    structure: &Structure,
    chain_a: char,
    chain_b: char,
    cutoff: f64,
) -> Result<BTreeSet<ResidueKey>, EngineError> {
    let config = ContactConfig::new(cutoff)?;
    let reporter = ProgressReporter::new();
    let contacts = find_contact_pairs(structure, chain_a, chain_b, &config, &reporter)?;
    Ok(contact_residues(&contacts))
}

/// Collapses residue pairs into the set of residues that take part in any of them.
pub fn contact_residues(contacts: &[ResidueContact]) -> BTreeSet<ResidueKey> {
    contacts
        .iter()
        .flat_map(|c| [c.residue_a, c.residue_b])
        .collect()
}

/// Enumerates every residue pair across `chain_a` and `chain_b` whose closest
/// atoms are within the configured cutoff.
///
/// Pairs are returned ordered by `(residue_a, residue_b)`. The strategy only
/// changes how candidate atom pairs are generated; the distance test is the
/// same inclusive `d <= cutoff` comparison in both cases.
#[instrument(skip_all, name = "contact_detection_task", fields(chain_a = %chain_a, chain_b = %chain_b))]
pub fn find_contact_pairs(
    structure: &Structure,
    chain_a: char,
    chain_b: char,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ResidueContact>, EngineError> {
    config.validate()?;

    let atoms_a = ChainAtoms::collect(structure, chain_a)?;
    let atoms_b = ChainAtoms::collect(structure, chain_b)?;

    info!(
        cutoff = config.cutoff,
        strategy = %config.strategy,
        atoms_a = atoms_a.len(),
        atoms_b = atoms_b.len(),
        "Detecting inter-chain contacts."
    );

    if atoms_a.is_empty() || atoms_b.is_empty() {
        debug!("One of the chains has no atoms; no contacts possible.");
        return Ok(Vec::new());
    }

    reporter.report(Progress::TaskStart {
        total_steps: atoms_a.len() as u64,
    });

    let hits = match config.strategy {
        ContactStrategy::KdTree if config.cutoff > 0.0 => {
            scan_with_kdtree(&atoms_a, &atoms_b, config.cutoff, reporter)
        }
        _ => scan_brute_force(&atoms_a, &atoms_b, config.cutoff, reporter),
    };

    reporter.report(Progress::TaskFinish);

    let contacts = merge_hits(&atoms_a, &atoms_b, hits);

    info!(num_pairs = contacts.len(), "Contact detection complete.");

    Ok(contacts)
}

fn scan_brute_force(
    atoms_a: &ChainAtoms,
    atoms_b: &ChainAtoms,
    cutoff: f64,
    reporter: &ProgressReporter,
) -> Vec<Hits> {
    #[cfg(not(feature = "parallel"))]
    let iterator = atoms_a.positions.iter();

    #[cfg(feature = "parallel")]
    let iterator = atoms_a.positions.par_iter();

    iterator
        .map(|probe| {
            let hits = hits_within(probe, &atoms_b.positions, 0..atoms_b.len(), cutoff);
            reporter.report(Progress::TaskIncrement);
            hits
        })
        .collect()
}

fn scan_with_kdtree(
    atoms_a: &ChainAtoms,
    atoms_b: &ChainAtoms,
    cutoff: f64,
    reporter: &ProgressReporter,
) -> Vec<Hits> {
    let targets: Vec<[f64; 3]> = atoms_b.positions.iter().map(|p| [p.x, p.y, p.z]).collect();
    let kdtree: KdTree<f64, 3> = (&targets).into();
    let radius = cutoff + QUERY_RADIUS_PADDING;
    let radius_sq = radius * radius;

    #[cfg(not(feature = "parallel"))]
    let iterator = atoms_a.positions.iter();

    #[cfg(feature = "parallel")]
    let iterator = atoms_a.positions.par_iter();

    iterator
        .map(|probe| {
            let candidates = kdtree
                .within_unsorted::<SquaredEuclidean>(&[probe.x, probe.y, probe.z], radius_sq)
                .into_iter()
                .map(|neighbour| neighbour.item as usize);
            let hits = hits_within(probe, &atoms_b.positions, candidates, cutoff);
            reporter.report(Progress::TaskIncrement);
            hits
        })
        .collect()
}

fn hits_within(
    probe: &Point3<f64>,
    targets: &[Point3<f64>],
    candidates: impl IntoIterator<Item = usize>,
    cutoff: f64,
) -> Hits {
    candidates
        .into_iter()
        .filter_map(|idx| {
            let d = distance(probe, &targets[idx]);
            (d <= cutoff).then_some((idx, d))
        })
        .collect()
}

fn merge_hits(atoms_a: &ChainAtoms, atoms_b: &ChainAtoms, hits: Vec<Hits>) -> Vec<ResidueContact> {
    let mut pairs: BTreeMap<(ResidueKey, ResidueKey), (f64, usize)> = BTreeMap::new();

    for (idx_a, probe_hits) in hits.into_iter().enumerate() {
        let key_a = atoms_a.keys[idx_a];
        for (idx_b, d) in probe_hits {
            let entry = pairs
                .entry((key_a, atoms_b.keys[idx_b]))
                .or_insert((f64::INFINITY, 0));
            entry.0 = entry.0.min(d);
            entry.1 += 1;
        }
    }

    pairs
        .into_iter()
        .map(|((residue_a, residue_b), (min_distance, atom_pairs))| ResidueContact {
            residue_a,
            residue_b,
            min_distance,
            atom_pairs,
        })
        .collect()
}
