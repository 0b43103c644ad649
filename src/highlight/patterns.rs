use crate::config::HighlightConfig;
use crate::host::DecorationRule;

/// Pattern matching the sentinel itself.
pub fn marker_pattern(sentinel: &str) -> String {
    regex::escape(sentinel)
}

/// Pattern matching the text after the sentinel, up to but excluding the
/// next comment sequence or the end of the line.
pub fn result_pattern(sentinel: &str, comment: &str) -> String {
    format!(
        r"(?<={}).*?(?={}|$)",
        regex::escape(sentinel),
        regex::escape(comment)
    )
}

/// The marker and result rules for a highlight configuration.
pub fn decoration_rules(config: &HighlightConfig) -> [DecorationRule; 2] {
    [
        DecorationRule {
            group: config.marker_group.clone(),
            pattern: marker_pattern(&config.sentinel),
            all_contexts: true,
        },
        DecorationRule {
            group: config.result_group.clone(),
            pattern: result_pattern(&config.sentinel, &config.comment),
            all_contexts: true,
        },
    ]
}
