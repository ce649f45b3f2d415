use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileMutationsConfig};
use super::models::{AppConfig, OutputPaths};
use crate::cli::InterfaceArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use ppinterface::engine::config::{ContactStrategy, InterfaceConfigBuilder};
use std::path::PathBuf;
use std::str::FromStr;

pub fn build_config(args: &InterfaceArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let contacts_file = file_config.contacts.take().unwrap_or_default();
    let cutoff = args
        .cutoff
        .or(contacts_file.cutoff)
        .unwrap_or(defaults.cutoff);

    let file_strategy = contacts_file
        .strategy
        .as_deref()
        .map(parse_value::<ContactStrategy>("contacts.strategy"))
        .transpose()?;
    let strategy = args
        .strategy
        .or(file_strategy)
        .unwrap_or(defaults.strategy);

    let mutations_file = file_config.mutations.take().unwrap_or_default();
    let mutation_chain = resolve_mutation_chain(args, &mutations_file, &defaults);

    let output_file = file_config.output.take().unwrap_or_default();
    let outputs = OutputPaths {
        interface_pdb: args.output.clone().or(output_file.interface_pdb),
        residues_csv: args.residues_csv.clone().or(output_file.residues_csv),
        pairs_csv: args.pairs_csv.clone().or(output_file.pairs_csv),
        suggestions_csv: args.suggestions_csv.clone().or(output_file.suggestions_csv),
        pymol_script: args.pymol_script.clone().or(output_file.pymol_script),
        site_scripts: args.site_scripts.clone().or(output_file.site_scripts),
    };

    let core_config = InterfaceConfigBuilder::new()
        .chain_a(args.chain_a)
        .chain_b(args.chain_b)
        .cutoff(cutoff)
        .strategy(strategy)
        .mutation_chain(mutation_chain)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        outputs,
        core_config,
    })
}

fn resolve_mutation_chain(
    args: &InterfaceArgs,
    file_val: &FileMutationsConfig,
    defaults: &DefaultsConfig,
) -> Option<char> {
    if args.no_mutations {
        return None;
    }
    if let Some(chain) = args.mutation_chain {
        return Some(chain);
    }
    if !file_val.enabled.unwrap_or(defaults.mutations_enabled) {
        return None;
    }
    Some(file_val.chain.unwrap_or(args.chain_a))
}

fn parse_value<T: FromStr>(key: &str) -> impl Fn(&str) -> Result<T> + '_ {
    move |value_str| {
        value_str.parse().map_err(|_| {
            CliError::Config(format!(
                "Invalid value for {}: '{}'",
                key, value_str
            ))
        })
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "contacts.cutoff" => {
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .cutoff = Some(parse_value::<f64>(key)(value_str)?);
            }
            "contacts.strategy" => {
                parse_value::<ContactStrategy>(key)(value_str)?;
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .strategy = Some(value_str.to_string());
            }
            "mutations.chain" => {
                config
                    .mutations
                    .get_or_insert_with(Default::default)
                    .chain = Some(
                    parser::parse_chain_id(value_str)
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "mutations.enabled" => {
                config
                    .mutations
                    .get_or_insert_with(Default::default)
                    .enabled = Some(parse_value::<bool>(key)(value_str)?);
            }
            "output.interface-pdb" => {
                config.output.get_or_insert_with(Default::default).interface_pdb =
                    Some(PathBuf::from(value_str));
            }
            "output.residues-csv" => {
                config.output.get_or_insert_with(Default::default).residues_csv =
                    Some(PathBuf::from(value_str));
            }
            "output.pairs-csv" => {
                config.output.get_or_insert_with(Default::default).pairs_csv =
                    Some(PathBuf::from(value_str));
            }
            "output.suggestions-csv" => {
                config.output.get_or_insert_with(Default::default).suggestions_csv =
                    Some(PathBuf::from(value_str));
            }
            "output.pymol-script" => {
                config.output.get_or_insert_with(Default::default).pymol_script =
                    Some(PathBuf::from(value_str));
            }
            "output.site-scripts" => {
                config.output.get_or_insert_with(Default::default).site_scripts =
                    Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
