use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;

/// Wildcard accepted wherever a classification filter is expected.
pub const ANY_CLASSIFICATION: &str = "*";

/// A classification filter as written by the user.
///
/// Accepts a list (`["python", "markdown"]`), a keyed table
/// (`{ python = true, text = false }`, only `true` keys count) or `"*"`,
/// which disables the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationSpec {
    Any,
    List(Vec<String>),
    Table(BTreeMap<String, bool>),
}

impl ClassificationSpec {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl Serialize for ClassificationSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_str(ANY_CLASSIFICATION),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Table(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, enabled) in entries {
                    map.serialize_entry(key, enabled)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ClassificationSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = ClassificationSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a list of classifications, a table of classification = bool, or \"*\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value == ANY_CLASSIFICATION {
                    Ok(ClassificationSpec::Any)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<String>()? {
                    items.push(item);
                }
                Ok(ClassificationSpec::List(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((key, enabled)) = map.next_entry::<String, bool>()? {
                    entries.insert(key, enabled);
                }
                Ok(ClassificationSpec::Table(entries))
            }
        }

        deserializer.deserialize_any(SpecVisitor)
    }
}

/// Membership set derived from a [`ClassificationSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationSet {
    /// Matches every classification.
    Any,
    Only(HashSet<String>),
}

impl ClassificationSet {
    pub fn contains(&self, classification: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(set) => set.contains(classification),
        }
    }
}

impl From<&ClassificationSpec> for ClassificationSet {
    fn from(spec: &ClassificationSpec) -> Self {
        match spec {
            ClassificationSpec::Any => Self::Any,
            ClassificationSpec::List(items) => Self::Only(items.iter().cloned().collect()),
            ClassificationSpec::Table(entries) => Self::Only(
                entries
                    .iter()
                    .filter(|&(_, &enabled)| enabled)
                    .map(|(key, _)| key.clone())
                    .collect(),
            ),
        }
    }
}

/// How the evaluator process is executed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionStrategy {
    /// Pick the best strategy for the platform
    #[default]
    Auto,
    /// Separate stdout/stderr pipes and a numeric exit status
    Structured,
    /// Run through the platform shell with combined output
    Legacy,
}

/// Result highlighting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HighlightConfig {
    /// Master switch (default: true)
    pub enabled: bool,
    /// Decoration group for the sentinel
    pub marker_group: String,
    /// Decoration group for result text
    pub result_group: String,
    /// Default link for the marker group
    pub marker_link: String,
    /// Default link for the result group
    pub result_link: String,
    /// Sentinel that introduces a result (default: "#=")
    pub sentinel: String,
    /// Sequence that ends result text (default: "#")
    pub comment: String,
    /// Classifications that get decorated ("*" for all)
    pub classifications: ClassificationSpec,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marker_group: "EqualsMarker".to_string(),
            result_group: "EqualsResult".to_string(),
            marker_link: "Operator".to_string(),
            result_link: "Special".to_string(),
            sentinel: "#=".to_string(),
            comment: "#".to_string(),
            classifications: ClassificationSpec::list(["python", "numbat", "fend", "markdown", "text"]),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Evaluator executable (default: "equals")
    pub executable: String,
    /// Arguments passed before the generated flags, in order
    pub extra_args: Vec<String>,
    /// Pass unmapped classifications to the evaluator verbatim
    pub pass_classification: bool,
    /// Process execution strategy
    pub strategy: ExecutionStrategy,
    /// Directory for transient exchange files (default: system temp dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
    /// Classifications evaluated in markdown mode
    pub markdown: ClassificationSpec,
    /// Classification -> evaluator language
    pub languages: BTreeMap<String, String>,
    pub highlight: HighlightConfig,
}

impl Default for Config {
    fn default() -> Self {
        let languages = [("python", "python"), ("numbat", "numbat"), ("fend", "fend")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            executable: "equals".to_string(),
            extra_args: Vec::new(),
            pass_classification: false,
            strategy: ExecutionStrategy::default(),
            temp_dir: None,
            markdown: ClassificationSpec::list(["markdown"]),
            languages,
            highlight: HighlightConfig::default(),
        }
    }
}

/// Partial highlight settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HighlightOverride {
    pub enabled: Option<bool>,
    pub marker_group: Option<String>,
    pub result_group: Option<String>,
    pub marker_link: Option<String>,
    pub result_link: Option<String>,
    pub sentinel: Option<String>,
    pub comment: Option<String>,
    pub classifications: Option<ClassificationSpec>,
}

/// Partial configuration merged onto the current one.
///
/// Config files, CLI flags and programmatic `reconfigure` calls all produce
/// one of these. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigOverride {
    pub executable: Option<String>,
    pub extra_args: Option<Vec<String>>,
    pub pass_classification: Option<bool>,
    pub strategy: Option<ExecutionStrategy>,
    pub temp_dir: Option<PathBuf>,
    pub markdown: Option<ClassificationSpec>,
    pub languages: Option<BTreeMap<String, String>>,
    pub highlight: Option<HighlightOverride>,
}

impl ConfigOverride {
    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: ConfigOverride) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.executable, other.executable);
        take(&mut self.extra_args, other.extra_args);
        take(&mut self.pass_classification, other.pass_classification);
        take(&mut self.strategy, other.strategy);
        take(&mut self.temp_dir, other.temp_dir);
        take(&mut self.markdown, other.markdown);

        if let Some(languages) = other.languages {
            self.languages.get_or_insert_with(BTreeMap::new).extend(languages);
        }

        if let Some(hl) = other.highlight {
            let mine = self.highlight.get_or_insert_with(HighlightOverride::default);
            take(&mut mine.enabled, hl.enabled);
            take(&mut mine.marker_group, hl.marker_group);
            take(&mut mine.result_group, hl.result_group);
            take(&mut mine.marker_link, hl.marker_link);
            take(&mut mine.result_link, hl.result_link);
            take(&mut mine.sentinel, hl.sentinel);
            take(&mut mine.comment, hl.comment);
            take(&mut mine.classifications, hl.classifications);
        }
    }
}

impl Config {
    /// Deep-merge a partial configuration into this one.
    ///
    /// Scalars, lists and classification filters present in `partial`
    /// replace the current value. The `languages` map merges per key.
    pub fn apply(&mut self, partial: ConfigOverride) {
        let ConfigOverride {
            executable,
            extra_args,
            pass_classification,
            strategy,
            temp_dir,
            markdown,
            languages,
            highlight,
        } = partial;

        if let Some(executable) = executable {
            self.executable = executable;
        }
        if let Some(extra_args) = extra_args {
            self.extra_args = extra_args;
        }
        if let Some(pass) = pass_classification {
            self.pass_classification = pass;
        }
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        if temp_dir.is_some() {
            self.temp_dir = temp_dir;
        }
        if let Some(markdown) = markdown {
            self.markdown = markdown;
        }
        if let Some(languages) = languages {
            self.languages.extend(languages);
        }
        if let Some(hl) = highlight {
            self.highlight.apply(hl);
        }
    }
}

impl HighlightConfig {
    fn apply(&mut self, partial: HighlightOverride) {
        if let Some(enabled) = partial.enabled {
            self.enabled = enabled;
        }
        if let Some(group) = partial.marker_group {
            self.marker_group = group;
        }
        if let Some(group) = partial.result_group {
            self.result_group = group;
        }
        if let Some(link) = partial.marker_link {
            self.marker_link = link;
        }
        if let Some(link) = partial.result_link {
            self.result_link = link;
        }
        if let Some(sentinel) = partial.sentinel {
            self.sentinel = sentinel;
        }
        if let Some(comment) = partial.comment {
            self.comment = comment;
        }
        if let Some(classifications) = partial.classifications {
            self.classifications = classifications;
        }
    }
}
