use std::sync::Arc;

use super::types::{ClassificationSet, Config, ConfigOverride};

/// A configuration snapshot together with the sets derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config: Config,
    /// Classifications evaluated with `--markdown`.
    pub markdown: ClassificationSet,
    /// Classifications the highlight manager decorates.
    pub highlight_allowed: ClassificationSet,
}

impl Settings {
    pub fn new(config: Config) -> Self {
        let markdown = ClassificationSet::from(&config.markdown);
        let highlight_allowed = ClassificationSet::from(&config.highlight.classifications);
        Self {
            config,
            markdown,
            highlight_allowed,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Owner of the session's configuration.
///
/// Readers hold an `Arc<Settings>` snapshot; `reconfigure` builds a new
/// snapshot and swaps it in whole, so a reader never sees a half-merged
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    current: Arc<Settings>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            current: Arc::new(Settings::new(config)),
        }
    }

    /// The current snapshot.
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.current)
    }

    pub fn config(&self) -> &Config {
        &self.current.config
    }

    /// Merge `partial` onto the current configuration and recompute the
    /// derived sets.
    pub fn reconfigure(&mut self, partial: ConfigOverride) -> Arc<Settings> {
        let mut config = self.current.config.clone();
        config.apply(partial);
        log::debug!(
            "[equals-config] Reconfigured: executable={}, highlight={}",
            config.executable,
            config.highlight.enabled
        );
        self.current = Arc::new(Settings::new(config));
        self.settings()
    }
}
