use super::load_structure;
use crate::cli::ChainsArgs;
use crate::error::Result;
use ppinterface::core::models::structure::Structure;
use ppinterface::workflows::visualization::ChainPalette;

/// One line of the chain listing.
#[derive(Debug, Clone, PartialEq)]
struct ChainSummary {
    id: char,
    residues: usize,
    atoms: usize,
    color: &'static str,
}

pub fn run(args: ChainsArgs) -> Result<()> {
    let (structure, _metadata) = load_structure(&args.input)?;
    let summaries = summarize(&structure);

    println!(
        "Structure '{}' has {} chain(s):",
        structure.name(),
        summaries.len()
    );
    for summary in &summaries {
        let label = if summary.id == ' ' {
            "_".to_string()
        } else {
            summary.id.to_string()
        };
        println!(
            "  Chain {}: {} residue(s), {} atom(s), color {}",
            label, summary.residues, summary.atoms, summary.color
        );
    }
    Ok(())
}

fn summarize(structure: &Structure) -> Vec<ChainSummary> {
    let palette = ChainPalette::for_structure(structure);
    structure
        .chains_iter()
        .map(|(chain_id, chain)| ChainSummary {
            id: chain.id,
            residues: chain.residues().len(),
            atoms: structure.chain_atoms(chain_id).count(),
            color: palette.color_of(chain.id).unwrap_or("white"),
        })
        .collect()
}
