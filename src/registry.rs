// Language registry
//
// Process-wide, init-once map from language name (or alias) to everything
// the engine needs for that language: the grammar constructor, the
// classification table, and the resolved strategy set. Built behind a
// `LazyLock` on first use and never mutated afterwards, so concurrent
// invocations read it without locks.

use std::sync::LazyLock;

use crate::classifier::Classifier;
use crate::languages;
use crate::strategy::StrategySet;

/// Everything registered for one language.
pub struct LanguageSupport {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// File extensions handled by this language, without the dot.
    pub extensions: &'static [&'static str],
    pub grammar: fn() -> tree_sitter::Language,
    pub classifier: Classifier,
    pub strategies: StrategySet,
}

static REGISTRY: LazyLock<Vec<LanguageSupport>> = LazyLock::new(|| {
    vec![
        languages::rust::support(),
        languages::python::support(),
        languages::javascript::support(),
        languages::go::support(),
    ]
});

/// Look a language up by canonical name or alias.
pub fn lookup(language: &str) -> Option<&'static LanguageSupport> {
    REGISTRY
        .iter()
        .find(|s| s.name == language || s.aliases.contains(&language))
}

/// Canonical names of every registered language.
pub fn supported_languages() -> Vec<&'static str> {
    REGISTRY.iter().map(|s| s.name).collect()
}

/// Map a file extension (without the dot) to a registered language.
pub fn language_for_extension(extension: &str) -> Option<&'static LanguageSupport> {
    REGISTRY
        .iter()
        .find(|s| s.extensions.contains(&extension))
}
