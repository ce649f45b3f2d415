use crate::core::models::ids::ResidueKey;
use crate::core::models::structure::Structure;
use crate::core::mutation;
use crate::engine::config::InterfaceConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::contacts::{self, ResidueContact};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, instrument};

/// A mutation suggestion attached to a concrete interface residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationProposal {
    pub key: ResidueKey,
    /// Residue name as read from the structure.
    pub original: String,
    pub suggested: &'static str,
    pub rationale: &'static str,
}

#[derive(Debug, Clone)]
pub struct InterfaceReport {
    pub chain_a: char,
    pub chain_b: char,
    pub cutoff: f64,
    /// Interface residues of both chains, ordered by chain then residue number.
    pub residues: BTreeSet<ResidueKey>,
    /// Contacting residue pairs with their closest approach.
    pub contacts: Vec<ResidueContact>,
    /// New structure holding only the interface residues.
    pub interface: Structure,
    pub suggestions: Vec<MutationProposal>,
}

impl InterfaceReport {
    /// Interface residues that belong to one chain, in residue-number order.
    pub fn residues_of_chain(&self, chain: char) -> impl Iterator<Item = &ResidueKey> {
        self.residues.iter().filter(move |key| key.chain_id == chain)
    }
}

/// Detects the interface between two chains, extracts it as a standalone
/// structure and collects mutation suggestions for the configured chain.
#[instrument(skip_all, name = "interface_workflow", fields(chain_a = %config.chain_a, chain_b = %config.chain_b))]
pub fn run(
    structure: &Structure,
    config: &InterfaceConfig,
    reporter: &ProgressReporter,
) -> Result<InterfaceReport, EngineError> {
    // === Phase 1: Contact Detection ===
    reporter.report(Progress::PhaseStart {
        name: "Contact Detection",
    });
    let contacts = contacts::find_contact_pairs(
        structure,
        config.chain_a,
        config.chain_b,
        &config.contacts,
        reporter,
    )?;
    let residues = contacts::contact_residues(&contacts);
    reporter.report(Progress::PhaseFinish);

    info!(
        num_residues = residues.len(),
        num_pairs = contacts.len(),
        "Interface residues identified."
    );

    // === Phase 2: Extraction ===
    reporter.report(Progress::PhaseStart {
        name: "Interface Extraction",
    });
    let mut interface = structure.extract(|key| residues.contains(key));
    interface.set_name(&format!("{}_interface", structure.name()));
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Mutation Suggestions ===
    let suggestions = match config.mutation_chain {
        Some(chain) => {
            reporter.report(Progress::PhaseStart {
                name: "Mutation Suggestions",
            });
            let proposals = suggest_for_chain(structure, &residues, chain);
            reporter.report(Progress::PhaseFinish);
            info!(
                chain = %chain,
                num_suggestions = proposals.len(),
                "Mutation suggestions collected."
            );
            proposals
        }
        None => Vec::new(),
    };

    Ok(InterfaceReport {
        chain_a: config.chain_a,
        chain_b: config.chain_b,
        cutoff: config.contacts.cutoff,
        residues,
        contacts,
        interface,
        suggestions,
    })
}

/// Applies the mutation table to the interface residues of `chain`.
///
/// Proposals follow the residue-number order of `interface`. Keys that do
/// not resolve in `structure` and residues without a rule are skipped.
pub fn suggest_for_chain(
    structure: &Structure,
    interface: &BTreeSet<ResidueKey>,
    chain: char,
) -> Vec<MutationProposal> {
    interface
        .iter()
        .filter(|key| key.chain_id == chain)
        .filter_map(|key| {
            let residue = structure.residue(structure.find_residue_by_key(key)?)?;
            let suggestion = mutation::suggest(&residue.name)?;
            Some(MutationProposal {
                key: *key,
                original: residue.name.trim().to_string(),
                suggested: suggestion.suggested,
                rationale: suggestion.rationale,
            })
        })
        .collect()
}
