use super::load_structure;
use crate::cli::InterfaceArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ppinterface::{
    core::io::{
        pdb::{PdbFile, PdbMetadata},
        traits::StructureFile,
    },
    core::models::structure::Structure,
    engine::progress::ProgressReporter,
    workflows::{
        self,
        interface::{InterfaceReport, MutationProposal},
        report,
        visualization::{self, ChainPalette},
    },
};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: InterfaceArgs) -> Result<()> {
    let app_config = config::build_config(&args)?;
    run_with_config(&app_config, CliProgressHandler::new())
}

pub(crate) fn run_with_config(app_config: &AppConfig, progress: CliProgressHandler) -> Result<()> {
    let (structure, _metadata) = load_structure(&app_config.input_path)?;
    let core_config = &app_config.core_config;

    let reporter = ProgressReporter::with_callback(progress.get_callback());

    println!(
        "Analyzing interface between chains {} and {} (cutoff {:.2} Å)...",
        core_config.chain_a, core_config.chain_b, core_config.contacts.cutoff
    );
    info!("Invoking the interface analysis workflow...");

    let report = workflows::interface::run(&structure, core_config, &reporter)?;
    progress.clear();

    print_summary(&structure, &report);
    write_outputs(app_config, &structure, &report)?;

    Ok(())
}

fn print_summary(structure: &Structure, report: &InterfaceReport) {
    if report.residues.is_empty() {
        warn!("No residues found within the cutoff distance.");
        println!("No interface residues found.");
        return;
    }

    println!(
        "Found {} interface residue(s) ({} on chain {}, {} on chain {}) in {} contacting pair(s):",
        report.residues.len(),
        report.residues_of_chain(report.chain_a).count(),
        report.chain_a,
        report.residues_of_chain(report.chain_b).count(),
        report.chain_b,
        report.contacts.len()
    );
    for key in &report.residues {
        let name = structure
            .find_residue_by_key(key)
            .and_then(|id| structure.residue(id))
            .map(|residue| residue.name.as_str())
            .unwrap_or("???");
        println!("  {} {}", key, name);
    }

    if !report.suggestions.is_empty() {
        println!("Suggested mutations:");
        for proposal in &report.suggestions {
            println!(
                "  {} {} -> {}: {}",
                proposal.key, proposal.original, proposal.suggested, proposal.rationale
            );
        }
    }
}

fn write_outputs(
    app_config: &AppConfig,
    structure: &Structure,
    report: &InterfaceReport,
) -> Result<()> {
    let outputs = &app_config.outputs;

    if let Some(path) = &outputs.interface_pdb {
        let metadata = PdbMetadata {
            remarks: vec![
                format!(
                    "Interface between chains {} and {} of '{}'",
                    report.chain_a,
                    report.chain_b,
                    structure.name()
                ),
                format!("Contact cutoff {:.2} Angstroms", report.cutoff),
            ],
            ..Default::default()
        };
        PdbFile::write_to_path(&report.interface, &metadata, path).map_err(output_error(path))?;
        announce("Interface structure", path);
    }

    if let Some(path) = &outputs.residues_csv {
        report::write_to_path(path, |w| {
            report::write_residues(w, structure, &report.residues)
        })
        .map_err(output_error(path))?;
        announce("Interface residues", path);
    }
    if let Some(path) = &outputs.pairs_csv {
        report::write_to_path(path, |w| report::write_contacts(w, &report.contacts))
            .map_err(output_error(path))?;
        announce("Contact pairs", path);
    }
    if let Some(path) = &outputs.suggestions_csv {
        report::write_to_path(path, |w| report::write_suggestions(w, &report.suggestions))
            .map_err(output_error(path))?;
        announce("Mutation suggestions", path);
    }

    if let Some(path) = &outputs.pymol_script {
        let palette = ChainPalette::for_structure(structure);
        let script = visualization::interface_script(
            &app_config.input_path.to_string_lossy(),
            &palette,
            &report.residues,
        );
        std::fs::write(path, script).map_err(output_error(path))?;
        announce("PyMOL script", path);
    }

    if let Some(dir) = &outputs.site_scripts {
        write_site_scripts(app_config, report, dir)?;
    }

    Ok(())
}

fn write_site_scripts(app_config: &AppConfig, report: &InterfaceReport, dir: &Path) -> Result<()> {
    if report.suggestions.is_empty() {
        info!("No mutation sites to visualize; skipping site scripts.");
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(output_error(dir))?;

    let structure_path = app_config.input_path.to_string_lossy();
    for proposal in &report.suggestions {
        let path = dir.join(site_script_name(proposal));
        let script =
            visualization::mutation_site_script(&structure_path, &proposal.key, &report.residues);
        std::fs::write(&path, script).map_err(output_error(&path))?;
    }
    announce(
        &format!("{} mutation site script(s)", report.suggestions.len()),
        dir,
    );
    Ok(())
}

fn site_script_name(proposal: &MutationProposal) -> String {
    let chain = match proposal.key.chain_id {
        ' ' => '_',
        other => other,
    };
    format!("mutation_{}_{}.pml", chain, proposal.key.residue_number)
}

fn output_error<E>(path: &Path) -> impl FnOnce(E) -> CliError + '_
where
    E: Into<anyhow::Error>,
{
    move |e| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

fn announce(what: &str, path: &Path) {
    info!("{} written to {:?}", what, path);
    println!("✓ {} written to: {}", what, path.display());
}
