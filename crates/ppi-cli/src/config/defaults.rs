use ppinterface::engine::config::{ContactStrategy, DEFAULT_CONTACT_CUTOFF};

pub struct DefaultsConfig {
    pub cutoff: f64,
    pub strategy: ContactStrategy,
    pub mutations_enabled: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CONTACT_CUTOFF,
            strategy: ContactStrategy::BruteForce,
            mutations_enabled: true,
        }
    }
}
