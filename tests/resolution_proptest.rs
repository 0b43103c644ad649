use equals_sync::config::{ClassificationSet, Config, ConfigOverride, ConfigStore, Settings};
use equals_sync::highlight::{HighlightState, Transition, decide};
use equals_sync::language::LanguageResolver;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

fn settings(languages: BTreeMap<String, String>, pass_classification: bool) -> Settings {
    let mut store = ConfigStore::from_config(Config {
        languages: BTreeMap::new(),
        ..Config::default()
    });
    let settings = store.reconfigure(ConfigOverride {
        languages: Some(languages),
        pass_classification: Some(pass_classification),
        ..Default::default()
    });
    (*settings).clone()
}

fn classification() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn explicit_language_always_wins(
        languages in prop::collection::btree_map(classification(), classification(), 0..6),
        pass in any::<bool>(),
        doc in prop::option::of(classification()),
        explicit in classification(),
    ) {
        let settings = settings(languages, pass);
        let resolver = LanguageResolver::new(&settings);
        prop_assert_eq!(resolver.resolve(doc.as_deref(), Some(explicit.as_str())), Some(explicit.clone()));
    }

    #[test]
    fn mapped_classification_beats_passthrough(
        languages in prop::collection::btree_map(classification(), classification(), 1..6),
        pass in any::<bool>(),
    ) {
        let settings = settings(languages.clone(), pass);
        let resolver = LanguageResolver::new(&settings);
        for (doc, language) in &languages {
            prop_assert_eq!(resolver.resolve(Some(doc.as_str()), None), Some(language.clone()));
            prop_assert_eq!(resolver.resolve(Some(doc.as_str()), Some("")), Some(language.clone()));
        }
    }

    #[test]
    fn unmapped_classification_follows_passthrough(
        languages in prop::collection::btree_map(classification(), classification(), 0..6),
        pass in any::<bool>(),
        doc in classification(),
    ) {
        prop_assume!(!languages.contains_key(&doc));
        let settings = settings(languages, pass);
        let resolver = LanguageResolver::new(&settings);
        let expected = if pass { Some(doc.clone()) } else { None };
        prop_assert_eq!(resolver.resolve(Some(doc.as_str()), None), expected);
    }

    #[test]
    fn explicit_markdown_always_wins(doc in prop::option::of(classification()), flag in any::<bool>()) {
        let settings = Settings::new(Config::default());
        let resolver = LanguageResolver::new(&settings);
        prop_assert_eq!(resolver.resolve_markdown(doc.as_deref(), Some(flag)), flag);
    }

    #[test]
    fn decorated_documents_stay_decorated(
        enabled in any::<bool>(),
        allowed in prop::collection::hash_set(classification(), 0..4),
        doc in prop::option::of(classification()),
    ) {
        let allowed = ClassificationSet::Only(allowed);
        prop_assert_eq!(decide(enabled, &allowed, doc.as_deref(), HighlightState::Decorated), Transition::Stay);
        prop_assert_eq!(decide(enabled, &ClassificationSet::Any, doc.as_deref(), HighlightState::Decorated), Transition::Stay);
    }

    #[test]
    fn undecorated_documents_decorate_when_allowed(
        allowed in prop::collection::hash_set(classification(), 0..4),
        doc in prop::option::of(classification()),
    ) {
        let expected = match doc.as_deref() {
            Some(c) if allowed.contains(c) => Transition::Decorate,
            _ => Transition::Stay,
        };
        let set = ClassificationSet::Only(allowed.iter().cloned().collect::<HashSet<_>>());
        prop_assert_eq!(decide(true, &set, doc.as_deref(), HighlightState::Undecorated), expected);
        prop_assert_eq!(decide(false, &set, doc.as_deref(), HighlightState::Undecorated), Transition::Stay);
    }
}
