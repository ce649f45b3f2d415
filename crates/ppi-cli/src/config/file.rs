use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileContactsConfig {
    pub cutoff: Option<f64>,
    pub strategy: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileMutationsConfig {
    pub chain: Option<char>,
    pub enabled: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub interface_pdb: Option<PathBuf>,
    pub residues_csv: Option<PathBuf>,
    pub pairs_csv: Option<PathBuf>,
    pub suggestions_csv: Option<PathBuf>,
    pub pymol_script: Option<PathBuf>,
    pub site_scripts: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub contacts: Option<FileContactsConfig>,
    pub mutations: Option<FileMutationsConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_complete_file() {
        let config = FileConfig::from_toml_str(
            r#"
            [contacts]
            cutoff = 4.0
            strategy = "kd-tree"

            [mutations]
            chain = "H"
            enabled = true

            [output]
            interface-pdb = "interface.pdb"
            residues-csv = "residues.csv"
            pairs-csv = "pairs.csv"
            suggestions-csv = "suggestions.csv"
            pymol-script = "view.pml"
            site-scripts = "sites"
            "#,
        )
        .unwrap();

        let contacts = config.contacts.unwrap();
        assert_eq!(contacts.cutoff, Some(4.0));
        assert_eq!(contacts.strategy.as_deref(), Some("kd-tree"));
        let mutations = config.mutations.unwrap();
        assert_eq!(mutations.chain, Some('H'));
        assert_eq!(mutations.enabled, Some(true));
        let output = config.output.unwrap();
        assert_eq!(output.interface_pdb, Some(PathBuf::from("interface.pdb")));
        assert_eq!(output.pymol_script, Some(PathBuf::from("view.pml")));
        assert_eq!(output.site_scripts, Some(PathBuf::from("sites")));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("[contacts]\nradius = 4.0\n").is_err());
        assert!(FileConfig::from_toml_str("[rendering]\n").is_err());
    }

    #[test]
    fn from_file_wraps_syntax_errors_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[contacts\ncutoff = ").unwrap();
        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected FileParsing error, got {:?}", other),
        }
    }

    #[test]
    fn from_file_reports_missing_file_as_io() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
