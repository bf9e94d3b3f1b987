//! Cleanup of model output before it is returned to callers.
//!
//! Gemini answers in markdown even when asked not to. The plan is shown as
//! plain text, so emphasis, headings, rules and quote markers are stripped.

use once_cell::sync::Lazy;
use regex::Regex;

static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{1,2}").expect("valid regex"));
static HEADINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s?").expect("valid regex"));
static RULES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{3,}").expect("valid regex"));
static QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s?").expect("valid regex"));
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Strip lightweight markup from generated text.
///
/// `None` and `""` both produce an empty string. The cleanup pass is
/// repeated until the text stops changing, since removing one marker can
/// expose another (`---# x` becomes `# x`). Each changing pass makes the
/// text shorter, so the loop terminates and the result is stable under
/// another call.
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    let mut current = clean_pass(raw);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let text = text.replace("**", "");
    let text = text.replace('*', "");
    let text = UNDERSCORES.replace_all(&text, "");
    let text = HEADINGS.replace_all(&text, "");
    let text = RULES.replace_all(&text, "");
    let text = QUOTES.replace_all(&text, "");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}
