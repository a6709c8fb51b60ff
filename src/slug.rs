use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid non-word pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid separator pattern"));

/// Turn a title into a URL slug.
///
/// Lowercases, drops everything but ASCII word characters, whitespace and
/// hyphens, then collapses separator runs into a single `-` and strips
/// hyphens from both ends. `"My Awesome Project!"` becomes `"my-awesome-project"`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATORS.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}

