use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default inter-atomic distance, in Angstroms, below which two atoms are in contact.
pub const DEFAULT_CONTACT_CUTOFF: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Algorithm used to enumerate candidate atom pairs during contact detection.
///
/// Both strategies apply the same distance predicate and return identical
/// results; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ContactStrategy {
    /// Test every atom of one chain against every atom of the other.
    #[default]
    BruteForce,
    /// Index the second chain in a k-d tree and only test atoms within the search radius.
    KdTree,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid contact strategy '{0}'. Expected 'brute-force' or 'kd-tree'.")]
pub struct ParseContactStrategyError(pub String);

impl FromStr for ContactStrategy {
    type Err = ParseContactStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brute-force" | "brute_force" | "bruteforce" => Ok(ContactStrategy::BruteForce),
            "kd-tree" | "kd_tree" | "kdtree" => Ok(ContactStrategy::KdTree),
            _ => Err(ParseContactStrategyError(s.to_string())),
        }
    }
}

impl fmt::Display for ContactStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactStrategy::BruteForce => "brute-force",
            ContactStrategy::KdTree => "kd-tree",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactConfig {
    /// Maximum inter-atomic distance counted as a contact, in Angstroms.
    pub cutoff: f64,
    pub strategy: ContactStrategy,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CONTACT_CUTOFF,
            strategy: ContactStrategy::default(),
        }
    }
}

impl ContactConfig {
    /// Creates a validated brute-force configuration.
    pub fn new(cutoff: f64) -> Result<Self, ConfigError> {
        let config = Self {
            cutoff,
            strategy: ContactStrategy::BruteForce,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: ContactStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that the cutoff is a finite, non-negative distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cutoff.is_finite() || self.cutoff < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "cutoff",
                reason: format!(
                    "must be a finite, non-negative distance (got {})",
                    self.cutoff
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceConfig {
    pub chain_a: char,
    pub chain_b: char,
    pub contacts: ContactConfig,
    /// Chain whose interface residues receive mutation suggestions; `None` disables them.
    pub mutation_chain: Option<char>,
}

#[derive(Default)]
pub struct InterfaceConfigBuilder {
    chain_a: Option<char>,
    chain_b: Option<char>,
    cutoff: Option<f64>,
    strategy: Option<ContactStrategy>,
    mutation_chain: Option<Option<char>>,
}

impl InterfaceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_a(mut self, chain: char) -> Self {
        self.chain_a = Some(chain);
        self
    }

    pub fn chain_b(mut self, chain: char) -> Self {
        self.chain_b = Some(chain);
        self
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn strategy(mut self, strategy: ContactStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Selects the chain that receives mutation suggestions. Defaults to `chain_a`.
    pub fn mutation_chain(mut self, chain: Option<char>) -> Self {
        self.mutation_chain = Some(chain);
        self
    }

    pub fn build(self) -> Result<InterfaceConfig, ConfigError> {
        let chain_a = self.chain_a.ok_or(ConfigError::MissingParameter("chain_a"))?;
        let chain_b = self.chain_b.ok_or(ConfigError::MissingParameter("chain_b"))?;

        let contacts = ContactConfig {
            cutoff: self.cutoff.unwrap_or(DEFAULT_CONTACT_CUTOFF),
            strategy: self.strategy.unwrap_or_default(),
        };
        contacts.validate()?;

        Ok(InterfaceConfig {
            chain_a,
            chain_b,
            contacts,
            mutation_chain: self.mutation_chain.unwrap_or(Some(chain_a)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = InterfaceConfigBuilder::new()
            .chain_a('H')
            .chain_b('A')
            .build()
            .unwrap();
        assert_eq!(config.chain_a, 'H');
        assert_eq!(config.chain_b, 'A');
        assert_eq!(config.contacts.cutoff, DEFAULT_CONTACT_CUTOFF);
        assert_eq!(config.contacts.strategy, ContactStrategy::BruteForce);
        assert_eq!(config.mutation_chain, Some('H'));
    }

    #[test]
    fn builder_respects_explicit_values() {
        let config = InterfaceConfigBuilder::new()
            .chain_a('H')
            .chain_b('A')
            .cutoff(4.0)
            .strategy(ContactStrategy::KdTree)
            .mutation_chain(None)
            .build()
            .unwrap();
        assert_eq!(config.contacts.cutoff, 4.0);
        assert_eq!(config.contacts.strategy, ContactStrategy::KdTree);
        assert_eq!(config.mutation_chain, None);
    }

    #[test]
    fn builder_requires_both_chains() {
        let err = InterfaceConfigBuilder::new().chain_a('A').build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("chain_b"));
        let err = InterfaceConfigBuilder::new().chain_b('B').build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("chain_a"));
    }

    #[test]
    fn same_chain_on_both_sides_is_allowed() {
        let config = InterfaceConfigBuilder::new()
            .chain_a('A')
            .chain_b('A')
            .build()
            .unwrap();
        assert_eq!(config.chain_a, config.chain_b);
    }

    #[test]
    fn cutoff_must_be_finite_and_non_negative() {
        assert!(ContactConfig::new(0.0).is_ok());
        assert!(ContactConfig::new(-1.0).is_err());
        assert!(ContactConfig::new(f64::NAN).is_err());
        assert!(ContactConfig::new(f64::INFINITY).is_err());
        assert!(matches!(
            InterfaceConfigBuilder::new()
                .chain_a('A')
                .chain_b('B')
                .cutoff(-0.5)
                .build(),
            Err(ConfigError::InvalidParameter { name: "cutoff", .. })
        ));
    }

    #[test]
    fn contact_strategy_parses_and_displays() {
        assert_eq!("kd-tree".parse(), Ok(ContactStrategy::KdTree));
        assert_eq!("KdTree".parse(), Ok(ContactStrategy::KdTree));
        assert_eq!("Brute-Force".parse(), Ok(ContactStrategy::BruteForce));
        assert_eq!("brute_force".parse(), Ok(ContactStrategy::BruteForce));
        assert!("octree".parse::<ContactStrategy>().is_err());
        assert_eq!(ContactStrategy::KdTree.to_string(), "kd-tree");
        assert_eq!(ContactStrategy::BruteForce.to_string(), "brute-force");
    }
}
