//! Static vocabulary and grammar dictionaries.
//!
//! Dictionaries are loaded once at startup and read-only afterwards. Phrases
//! reference entries by ID through their keyword reference sets.

mod extract;

pub use extract::{extract_refs, KeywordRefs};

use crate::error::{Result, TingliError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Proficiency level of a dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(format!("Unknown level: {}", s)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Beginner => write!(f, "beginner"),
            Level::Intermediate => write!(f, "intermediate"),
            Level::Advanced => write!(f, "advanced"),
        }
    }
}

/// A vocabulary entry, keyed by the term as it appears in source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Unique entry ID.
    pub id: String,
    /// The term in the source language.
    pub term: String,
    /// Phonetic transliteration.
    pub phonetic: String,
    /// Meaning in the learner's language.
    pub meaning: String,
    /// Part of speech.
    pub part_of_speech: String,
    /// Example sentences.
    pub examples: Vec<String>,
    /// Proficiency level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
}

/// A grammar entry, keyed by the literal trigger substring of its pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarEntry {
    /// Unique entry ID.
    pub id: String,
    /// Literal substring that marks this pattern in source text.
    pub pattern: String,
    /// Display form of the pattern (with placeholders).
    pub label: String,
    /// Explanation in the learner's language.
    pub explanation: String,
    /// Example sentences.
    pub examples: Vec<String>,
    /// Proficiency level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
}

/// The static term and pattern dictionaries, indexed by entry ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionary {
    pub vocab: Vec<VocabEntry>,
    pub grammar: Vec<GrammarEntry>,

    #[serde(skip)]
    vocab_index: HashMap<String, usize>,
    #[serde(skip)]
    grammar_index: HashMap<String, usize>,
}

impl Dictionary {
    /// Build a dictionary from entry lists.
    pub fn new(vocab: Vec<VocabEntry>, grammar: Vec<GrammarEntry>) -> Self {
        let mut dict = Self {
            vocab,
            grammar,
            vocab_index: HashMap::new(),
            grammar_index: HashMap::new(),
        };
        dict.rebuild_index();
        dict
    }

    /// Load a dictionary from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut dict: Dictionary = serde_json::from_str(&content)
            .map_err(|e| TingliError::Dictionary(format!("{}: {}", path.display(), e)))?;
        dict.rebuild_index();
        Ok(dict)
    }

    fn rebuild_index(&mut self) {
        self.vocab_index = self
            .vocab
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        self.grammar_index = self
            .grammar
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
    }

    /// Look up a vocabulary entry by ID.
    pub fn vocab_by_id(&self, id: &str) -> Option<&VocabEntry> {
        self.vocab_index.get(id).map(|&i| &self.vocab[i])
    }

    /// Look up a grammar entry by ID.
    pub fn grammar_by_id(&self, id: &str) -> Option<&GrammarEntry> {
        self.grammar_index.get(id).map(|&i| &self.grammar[i])
    }

    /// Built-in demo dictionary for running without a dictionary file.
    pub fn builtin() -> Self {
        let vocab = vec![
            vocab_entry("vc_thank", "感谢", "gǎnxiè", "to thank", "verb", &["感谢你", "非常感谢"], Level::Beginner),
            vocab_entry("vc_perform", "表演", "biǎoyǎn", "to perform", "verb", &["表演节目", "表演得很好"], Level::Intermediate),
            vocab_entry("vc_object", "物体", "wùtǐ", "object", "noun", &["物体模仿", "物体运动"], Level::Intermediate),
            vocab_entry("vc_imitation", "模仿", "mófǎng", "imitation", "noun", &["模仿表演", "模仿动物"], Level::Intermediate),
            vocab_entry("vc_embrace", "拥抱", "yōngbào", "to embrace", "verb", &["拥抱朋友", "紧紧拥抱"], Level::Beginner),
            vocab_entry("vc_scary", "可怕", "kěpà", "scary", "adjective", &["太可怕了", "可怕的故事"], Level::Beginner),
            vocab_entry("vc_need", "需要", "xūyào", "to need", "verb", &["我需要你的帮助", "这个工作需要经验"], Level::Beginner),
            vocab_entry("vc_each", "每", "měi", "each, every", "determiner", &["每个人", "每天"], Level::Beginner),
            vocab_entry("vc_group", "组", "zǔ", "group, team", "noun", &["一组人", "分组讨论"], Level::Intermediate),
            vocab_entry("vc_challenge", "挑战", "tiǎozhàn", "challenge", "noun", &["接受挑战", "挑战自己"], Level::Intermediate),
            vocab_entry("vc_take_turns", "轮流", "lúnliú", "to take turns", "verb", &["轮流做", "轮流发言"], Level::Intermediate),
            vocab_entry("vc_success", "成功", "chénggōng", "success", "noun", &["获得成功", "很成功"], Level::Beginner),
        ];

        let grammar = vec![
            grammar_entry("gr_tai_le", "太", "太 + adjective + 了", "Expresses 'too / so ...', an emphatic degree.", &["太好了", "太可怕了"], Level::Beginner),
            grammar_entry("gr_ganxie", "感谢", "感谢 + person + verb", "Thanks someone for doing something.", &["感谢你帮助", "感谢老师教导"], Level::Beginner),
            grammar_entry("gr_keyi", "可以", "可以 + verb", "Expresses possibility or permission.", &["可以看到", "可以做到"], Level::Beginner),
            grammar_entry("gr_meizu", "每组", "每组 + noun", "Refers to each team or group unit.", &["每组搭档", "每组代表"], Level::Intermediate),
            grammar_entry("gr_lunliu", "轮流", "轮流 + verb", "Taking turns doing something.", &["轮流做", "轮流发言"], Level::Intermediate),
            grammar_entry("gr_xuyao", "需要", "需要 + noun", "Expresses that something is needed.", &["需要帮助", "需要时间"], Level::Beginner),
        ];

        Self::new(vocab, grammar)
    }
}

fn vocab_entry(
    id: &str,
    term: &str,
    phonetic: &str,
    meaning: &str,
    part_of_speech: &str,
    examples: &[&str],
    level: Level,
) -> VocabEntry {
    VocabEntry {
        id: id.to_string(),
        term: term.to_string(),
        phonetic: phonetic.to_string(),
        meaning: meaning.to_string(),
        part_of_speech: part_of_speech.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
        level: Some(level),
    }
}

fn grammar_entry(
    id: &str,
    pattern: &str,
    label: &str,
    explanation: &str,
    examples: &[&str],
    level: Level,
) -> GrammarEntry {
    GrammarEntry {
        id: id.to_string(),
        pattern: pattern.to_string(),
        label: label.to_string(),
        explanation: explanation.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
        level: Some(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let dict = Dictionary::builtin();

        let entry = dict.vocab_by_id("vc_thank").unwrap();
        assert_eq!(entry.term, "感谢");
        assert_eq!(entry.level, Some(Level::Beginner));

        assert!(dict.grammar_by_id("gr_tai_le").is_some());
        assert!(dict.vocab_by_id("vc_missing").is_none());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("beginner".parse::<Level>().unwrap(), Level::Beginner);
        assert_eq!("Advanced".parse::<Level>().unwrap(), Level::Advanced);
        assert!("expert".parse::<Level>().is_err());
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "vocab": [{
                "id": "vc_hello",
                "term": "你好",
                "phonetic": "nǐ hǎo",
                "meaning": "hello",
                "part_of_speech": "interjection",
                "examples": ["你好！"],
                "level": "beginner"
            }],
            "grammar": []
        }"#;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        std::fs::write(&path, json).unwrap();

        let dict = Dictionary::load(&path).unwrap();
        assert_eq!(dict.vocab_by_id("vc_hello").unwrap().meaning, "hello");
        assert!(dict.grammar.is_empty());
    }
}
