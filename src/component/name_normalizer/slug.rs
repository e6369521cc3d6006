//! Canonical name rewriting.
//!
//! Recorded footage arrives with names like `Vídeo 1, Bebê.mov`; every
//! later stage (and the annotation tooling downstream) expects names
//! drawn from `[a-z0-9._-]` only.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static REGEX_SPACE_BEFORE_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\.").expect("Invalid regex"));

static REGEX_UNDERSCORE_BEFORE_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+\.").expect("Invalid regex"));

static REGEX_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("Invalid regex"));

static REGEX_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9._-]").expect("Invalid regex"));

static REGEX_UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Invalid regex"));

/// Rewrites a single file or directory name into canonical slug form.
pub struct NameSlugger {
    regex_space_before_dot: &'static Regex,
    regex_underscore_before_dot: &'static Regex,
    regex_separators: &'static Regex,
    regex_disallowed: &'static Regex,
    regex_underscore_runs: &'static Regex,
}

impl Default for NameSlugger {
    fn default() -> Self {
        Self::new()
    }
}

impl NameSlugger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regex_space_before_dot: &REGEX_SPACE_BEFORE_DOT,
            regex_underscore_before_dot: &REGEX_UNDERSCORE_BEFORE_DOT,
            regex_separators: &REGEX_SEPARATORS,
            regex_disallowed: &REGEX_DISALLOWED,
            regex_underscore_runs: &REGEX_UNDERSCORE_RUNS,
        }
    }

    /// Normalize one name: lowercase, diacritics stripped, whitespace
    /// and commas collapsed to underscores, everything outside
    /// `[a-z0-9._-]` removed. Idempotent.
    #[must_use]
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        let mut result = strip_diacritics(&lowered);

        result = self
            .regex_space_before_dot
            .replace_all(&result, ".")
            .into_owned();
        result = self
            .regex_underscore_before_dot
            .replace_all(&result, ".")
            .into_owned();
        result = self.regex_separators.replace_all(&result, "_").into_owned();
        result = self.regex_disallowed.replace_all(&result, "").into_owned();
        result = self
            .regex_underscore_runs
            .replace_all(&result, "_")
            .into_owned();
        result = result.trim_matches('_').to_string();
        // removing disallowed characters can leave a fresh `_.` pair
        result = self
            .regex_underscore_before_dot
            .replace_all(&result, ".")
            .into_owned();

        if result.is_empty() {
            return "unnamed".to_string();
        }
        // a name must not turn hidden just because its stem was eaten
        if result.starts_with('.') && !name.starts_with('.') {
            return format!("unnamed{result}");
        }

        result
    }
}

/// NFD-decompose and drop combining marks: `Bebê` -> `Bebe`.
fn strip_diacritics(name: &str) -> String {
    name.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
