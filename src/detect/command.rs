use super::pattern::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse intent of a user request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    #[default]
    Create,
    Add,
    Remove,
    Connect,
    Query,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::Create => "create",
            CommandType::Add => "add",
            CommandType::Remove => "remove",
            CommandType::Connect => "connect",
            CommandType::Query => "query",
        };
        f.write_str(name)
    }
}

// Checked before connect, so "disconnect" and "연결 끊어" resolve to remove.
const REMOVE_KEYWORDS: &[&str] = &[
    "remove", "delete", "drop", "disconnect", "unlink", "삭제", "제거", "없애", "빼줘", "빼고", "끊",
    "해제",
];
const CONNECT_KEYWORDS: &[&str] = &["connect", "link", "wire", "연결"];
const ADD_KEYWORDS: &[&str] = &["add", "insert", "append", "추가", "넣어", "붙여"];
const CREATE_KEYWORDS: &[&str] = &["create", "build", "design", "make", "만들", "생성", "구성", "설계"];
const QUERY_KEYWORDS: &[&str] = &[
    "what", "why", "how", "explain", "show", "list", "?", "뭐", "무엇", "왜", "어떻게", "설명",
    "알려",
];

// Checked in this order; the first table with a hit decides the intent.
const INTENTS: &[(CommandType, &[&str])] = &[
    (CommandType::Remove, REMOVE_KEYWORDS),
    (CommandType::Connect, CONNECT_KEYWORDS),
    (CommandType::Add, ADD_KEYWORDS),
    (CommandType::Create, CREATE_KEYWORDS),
    (CommandType::Query, QUERY_KEYWORDS),
];

// Inflections accepted after an English keyword ("connected", "adding", ...).
const ENGLISH_SUFFIXES: &[&str] = &["", "s", "es", "d", "ed", "ing", "ion", "ions"];

// Inflections after the stem of a keyword ending in a silent "e" ("removing", "deletion").
const E_STEM_SUFFIXES: &[&str] = &["e", "es", "ed", "ing", "ion", "ions", "al"];

/// Classifies the intent of `text`, defaulting to [`CommandType::Create`].
pub fn detect_command_type(text: &str) -> CommandType {
    let normalized = normalize(text);
    INTENTS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| contains_keyword(&normalized, k)))
        .map(|(command, _)| *command)
        .unwrap_or_default()
}

/// Substring match for Korean and symbols; English keywords must start at a word
/// boundary and may only be followed by a common inflection, so "add" does not
/// fire on "address".
fn contains_keyword(text: &str, keyword: &str) -> bool {
    if !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
        return text.contains(keyword);
    }

    let (stem, suffixes) = match keyword.strip_suffix('e') {
        Some(stem) => (stem, E_STEM_SUFFIXES),
        None => (keyword, ENGLISH_SUFFIXES),
    };

    text.match_indices(stem).any(|(start, _)| {
        let starts_word = !text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let rest = &text[start + stem.len()..];
        let tail_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let tail = &rest[..tail_len];
        starts_word && suffixes.iter().any(|suffix| *suffix == tail)
    })
}
