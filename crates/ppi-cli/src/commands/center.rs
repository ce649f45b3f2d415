use super::load_structure;
use crate::cli::CenterArgs;
use crate::error::Result;
use ppinterface::core::models::ids::ResidueKey;
use ppinterface::core::models::structure::Structure;
use ppinterface::engine::tasks::center_of_mass::{chain_center_of_mass, residues_center_of_mass};
use ppinterface::engine::tasks::contacts::find_contacts;
use tracing::info;

pub fn run(args: CenterArgs) -> Result<()> {
    let (structure, _metadata) = load_structure(&args.input)?;
    let ([x, y, z], label) = match args.partner {
        Some(partner) => (
            compute_interface(&structure, args.chain, partner, args.cutoff)?,
            format!(
                "chain {} at the interface with chain {} (cutoff {:.2} Å)",
                args.chain, partner, args.cutoff
            ),
        ),
        None => (
            compute(&structure, args.chain)?,
            format!("chain {}", args.chain),
        ),
    };
    println!("Center of mass of {}: ({:.3}, {:.3}, {:.3})", label, x, y, z);
    Ok(())
}

fn compute(structure: &Structure, chain: char) -> Result<[f64; 3]> {
    info!("Computing center of mass for chain {}.", chain);
    let center = chain_center_of_mass(structure, chain)?;
    Ok([center.x, center.y, center.z])
}

fn compute_interface(
    structure: &Structure,
    chain: char,
    partner: char,
    cutoff: f64,
) -> Result<[f64; 3]> {
    info!(
        "Computing center of mass for the interface residues of chain {} facing chain {}.",
        chain, partner
    );
    let interface = find_contacts(structure, chain, partner, cutoff)?;
    let own: Vec<ResidueKey> = interface
        .into_iter()
        .filter(|key| key.chain_id == chain)
        .collect();
    let center = residues_center_of_mass(structure, &own)?;
    Ok([center.x, center.y, center.z])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::commands::test_support::write_complex;
    use ppinterface::engine::error::EngineError;
    use tempfile::tempdir;

    #[test]
    fn computes_chain_center() {
        let dir = tempdir().unwrap();
        let path = write_complex(&dir);
        let (structure, _) = load_structure(&path).unwrap();
        let [x, y, z] = compute(&structure, 'A').unwrap();
        assert!((x - 3.5).abs() < 1e-9);
        assert!((y - 3.0).abs() < 1e-9);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn interface_center_ignores_distant_residues() {
        let dir = tempdir().unwrap();
        let path = write_complex(&dir);
        let (structure, _) = load_structure(&path).unwrap();
        let [x, y, z] = compute_interface(&structure, 'H', 'A', 5.0).unwrap();

        let (carbon, oxygen) = (12.011, 15.999);
        let expected_y = (oxygen * 1.0 + carbon * 6.0) / (2.0 * carbon + oxygen);
        assert!(x.abs() < 1e-12);
        assert!((y - expected_y).abs() < 1e-9);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn interface_center_without_contacts_is_empty_set() {
        let dir = tempdir().unwrap();
        let path = write_complex(&dir);
        let (structure, _) = load_structure(&path).unwrap();
        let result = compute_interface(&structure, 'H', 'A', 1.0);
        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::EmptySet { .. }))
        ));
    }

    #[test]
    fn unknown_chain_is_a_core_error() {
        let dir = tempdir().unwrap();
        let path = write_complex(&dir);
        let result = run(CenterArgs {
            input: path,
            chain: 'Q',
            partner: None,
            cutoff: 5.0,
        });
        assert!(matches!(result, Err(CliError::Core(_))));
    }
}
