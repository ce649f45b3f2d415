use ppinterface::engine::config::InterfaceConfig;
use std::path::PathBuf;

/// Files the `interface` command writes; `None` entries are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputPaths {
    pub interface_pdb: Option<PathBuf>,
    pub residues_csv: Option<PathBuf>,
    pub pairs_csv: Option<PathBuf>,
    pub suggestions_csv: Option<PathBuf>,
    pub pymol_script: Option<PathBuf>,
    pub site_scripts: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub outputs: OutputPaths,
    pub core_config: InterfaceConfig,
}
