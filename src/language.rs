//! Evaluator language and markdown-mode resolution.
//!
//! Maps a document's classification to the `--language` token passed to the
//! evaluator, and decides whether the document is evaluated in markdown mode.

use crate::config::Settings;

/// Resolver bound to one configuration snapshot.
pub struct LanguageResolver<'a> {
    settings: &'a Settings,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Resolve the evaluator language.
    ///
    /// Precedence: a non-empty explicit override, then the classification
    /// map, then the raw classification when `pass-classification` is on.
    /// `None` means the evaluator infers the language itself.
    pub fn resolve(&self, classification: Option<&str>, explicit: Option<&str>) -> Option<String> {
        if let Some(language) = explicit.filter(|l| !l.is_empty()) {
            return Some(language.to_string());
        }

        let classification = classification.filter(|c| !c.is_empty())?;

        if let Some(language) = self.settings.config.languages.get(classification) {
            return Some(language.clone());
        }

        if self.settings.config.pass_classification {
            return Some(classification.to_string());
        }

        None
    }

    /// Resolve markdown mode. An explicit flag always wins; otherwise the
    /// classification must be in the markdown set.
    pub fn resolve_markdown(&self, classification: Option<&str>, explicit: Option<bool>) -> bool {
        if let Some(markdown) = explicit {
            return markdown;
        }
        classification
            .filter(|c| !c.is_empty())
            .is_some_and(|c| self.settings.markdown.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClassificationSpec, Config, ConfigOverride, ConfigStore};

    fn settings_with(partial: ConfigOverride) -> Settings {
        let mut store = ConfigStore::new();
        (*store.reconfigure(partial)).clone()
    }

    #[test]
    fn test_mapped_classification() {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        assert_eq!(resolver.resolve(Some("python"), None).as_deref(), Some("python"));
    }

    #[test]
    fn test_unknown_classification_without_passthrough() {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        assert_eq!(resolver.resolve(Some("weird"), None), None);
    }

    #[test]
    fn test_unknown_classification_with_passthrough() {
        let settings = settings_with(ConfigOverride {
            pass_classification: Some(true),
            ..Default::default()
        });
        let resolver = LanguageResolver::new(&settings);
        assert_eq!(resolver.resolve(Some("weird"), None).as_deref(), Some("weird"));
        assert_eq!(resolver.resolve(Some(""), None), None);
        assert_eq!(resolver.resolve(None, None), None);
    }

    #[test]
    fn test_explicit_override_wins() {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        assert_eq!(resolver.resolve(Some("python"), Some("numbat")).as_deref(), Some("numbat"));
        assert_eq!(resolver.resolve(None, Some("numbat")).as_deref(), Some("numbat"));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        assert_eq!(resolver.resolve(Some("python"), Some("")).as_deref(), Some("python"));
    }

    #[test]
    fn test_markdown_membership() {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        assert!(resolver.resolve_markdown(Some("markdown"), None));
        assert!(!resolver.resolve_markdown(Some("python"), None));
        assert!(!resolver.resolve_markdown(None, None));
    }

    #[test]
    fn test_markdown_explicit_wins() {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        assert!(resolver.resolve_markdown(Some("python"), Some(true)));
        assert!(!resolver.resolve_markdown(Some("markdown"), Some(false)));
    }

    #[test]
    fn test_unrestricted_markdown_set_still_needs_classification() {
        let settings = settings_with(ConfigOverride {
            markdown: Some(ClassificationSpec::Any),
            ..Default::default()
        });
        let resolver = LanguageResolver::new(&settings);
        assert!(resolver.resolve_markdown(Some("python"), None));
        assert!(!resolver.resolve_markdown(None, None));
        assert!(!resolver.resolve_markdown(Some(""), None));
    }
}
