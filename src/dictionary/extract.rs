//! Keyword extraction: matching dictionary entries against phrase text.

use super::Dictionary;
use std::collections::BTreeSet;

/// Dictionary references found in one phrase's source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordRefs {
    pub vocab: BTreeSet<String>,
    pub grammar: BTreeSet<String>,
}

/// Find every dictionary entry whose key occurs in the given source text.
///
/// This is a case-sensitive substring containment test per entry, not a
/// tokenizer: overlapping matches are all kept, and a text matching both a
/// term and a longer term containing it yields both IDs. Never fails; a text
/// with no matches yields empty sets.
pub fn extract_refs(text: &str, dictionary: &Dictionary) -> KeywordRefs {
    let mut refs = KeywordRefs::default();

    for entry in &dictionary.vocab {
        if !entry.term.is_empty() && text.contains(&entry.term) {
            refs.vocab.insert(entry.id.clone());
        }
    }

    for entry in &dictionary.grammar {
        if !entry.pattern.is_empty() && text.contains(&entry.pattern) {
            refs.grammar.insert(entry.id.clone());
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    #[test]
    fn test_extract_matches_terms_and_patterns() {
        let dict = Dictionary::builtin();

        let refs = extract_refs("感谢你表演物体模仿", &dict);
        assert!(refs.vocab.contains("vc_thank"));
        assert!(refs.vocab.contains("vc_perform"));
        assert!(refs.vocab.contains("vc_object"));
        assert!(refs.vocab.contains("vc_imitation"));
        assert!(refs.grammar.contains("gr_ganxie"));
    }

    #[test]
    fn test_extract_no_matches_is_empty_not_error() {
        let dict = Dictionary::builtin();

        let refs = extract_refs("completely unrelated text", &dict);
        assert!(refs.vocab.is_empty());
        assert!(refs.grammar.is_empty());
    }

    #[test]
    fn test_extract_empty_dictionary() {
        let dict = Dictionary::new(vec![], vec![]);

        let refs = extract_refs("感谢你", &dict);
        assert!(refs.vocab.is_empty());
        assert!(refs.grammar.is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let dict = Dictionary::builtin();

        let a = extract_refs("每组搭档轮流挑战", &dict);
        let b = extract_refs("每组搭档轮流挑战", &dict);
        assert_eq!(a, b);
        assert!(a.vocab.contains("vc_each"));
        assert!(a.vocab.contains("vc_take_turns"));
        assert!(a.grammar.contains("gr_meizu"));
        assert!(a.grammar.contains("gr_lunliu"));
    }
}
