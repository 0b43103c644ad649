use std::path::Path;

/// Build the evaluator argv.
///
/// The order is part of the evaluator contract:
/// `<executable> [extra...] [--language L] [--markdown] --input P --output P`.
pub fn build_invocation(
    executable: &str,
    extra_args: &[String],
    language: Option<&str>,
    markdown: bool,
    input: &Path,
    output: &Path,
) -> Vec<String> {
    let mut argv = Vec::with_capacity(extra_args.len() + 8);
    argv.push(executable.to_string());
    argv.extend(extra_args.iter().cloned());

    if let Some(language) = language {
        argv.push("--language".to_string());
        argv.push(language.to_string());
    }
    if markdown {
        argv.push("--markdown".to_string());
    }

    argv.push("--input".to_string());
    argv.push(input.to_string_lossy().into_owned());
    argv.push("--output".to_string());
    argv.push(output.to_string_lossy().into_owned());
    argv
}
