use crate::catalog::{CATALOG, Category, ComponentDef};
use crate::spec::Tier;
use itertools::Itertools;
use serde::Serialize;

/// A component type together with the keywords that identify it in free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    #[serde(rename = "type")]
    pub component_type: String,
    pub label: String,
    pub keywords: Vec<String>,
    pub category: Category,
    pub default_tier: Tier,
}

impl Pattern {
    /// Builds a pattern; keywords are lower-cased and empty ones dropped.
    pub fn new<I, S>(
        component_type: impl Into<String>,
        label: impl Into<String>,
        category: Category,
        default_tier: Tier,
        keywords: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            component_type: component_type.into(),
            label: label.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            category,
            default_tier,
        }
    }
}

impl From<&ComponentDef> for Pattern {
    fn from(def: &ComponentDef) -> Self {
        Pattern::new(
            def.component_type,
            def.label,
            def.category,
            def.default_tier,
            def.keywords.iter(),
        )
    }
}

/// Ordered set of patterns plus the marker substrings used by the pre-filter.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    markers: Vec<String>,
}

impl PatternRegistry {
    pub fn from_catalog() -> Self {
        Self::from_patterns(CATALOG.iter().map(Pattern::from).collect())
    }

    pub fn from_patterns(patterns: Vec<Pattern>) -> Self {
        let markers = Self::build_markers(&patterns);
        Self { patterns, markers }
    }

    /// Appends a pattern at the lowest priority. A pattern reusing an existing type
    /// name replaces the earlier entry in place.
    pub fn push(&mut self, pattern: Pattern) {
        match self
            .patterns
            .iter_mut()
            .find(|p| p.component_type == pattern.component_type)
        {
            Some(existing) => *existing = pattern,
            None => self.patterns.push(pattern),
        }
        self.markers = Self::build_markers(&self.patterns);
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Cheap pre-check: `false` guarantees that no keyword occurs in `normalized`.
    pub fn might_match(&self, normalized: &str) -> bool {
        self.markers.iter().any(|m| normalized.contains(m.as_str()))
    }

    // Each marker is a prefix of at least one keyword and every keyword has its
    // prefix in the set, so a text without any marker cannot contain a keyword.
    fn build_markers(patterns: &[Pattern]) -> Vec<String> {
        patterns
            .iter()
            .flat_map(|p| p.keywords.iter())
            .map(|k| k.chars().take(2).collect::<String>())
            .unique()
            .collect()
    }
}

// ASCII keywords this short ("db", "waf") only count as whole words.
const SHORT_KEYWORD_LEN: usize = 3;

/// Byte ranges of every occurrence of `keyword` in `normalized`.
///
/// Short ASCII keywords must not touch another ASCII letter or digit, so "db" is
/// found in "db와" and "db, cache" but not in "feedback".
pub(crate) fn keyword_positions<'a>(
    normalized: &'a str,
    keyword: &'a str,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let whole_word =
        keyword.len() <= SHORT_KEYWORD_LEN && keyword.chars().all(|c| c.is_ascii_alphanumeric());

    normalized
        .match_indices(keyword)
        .map(|(start, _)| (start, start + keyword.len()))
        .filter(move |&(start, end)| {
            !whole_word
                || !(is_word_char(normalized[..start].chars().next_back())
                    || is_word_char(normalized[end..].chars().next()))
        })
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_alphanumeric())
}

/// Lower-cases and trims input text before matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
