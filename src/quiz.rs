//! Review quiz generation.
//!
//! Builds multiple-choice questions from a clip's phrases and the dictionary
//! entries they reference: term meanings, pattern examples, and phrase
//! translations, each with distractors drawn from sibling entries.

use crate::catalog::Phrase;
use crate::dictionary::Dictionary;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Default number of questions per quiz.
pub const DEFAULT_QUESTION_LIMIT: usize = 10;

const MAX_DISTRACTORS: usize = 3;

/// What a question tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Vocab,
    Grammar,
    Translation,
}

/// One multiple-choice question.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase_id: Option<Uuid>,
}

/// Build a shuffled quiz for a clip's phrase set.
///
/// Clips with no phrases (or whose refs resolve to nothing usable) yield an
/// empty quiz rather than an error. Pure given the RNG, so tests can seed it.
pub fn build_quiz(
    phrases: &[Phrase],
    dictionary: &Dictionary,
    limit: usize,
    rng: &mut impl Rng,
) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    // Unique refs across the clip, in deterministic order.
    let vocab_ids: BTreeSet<&String> = phrases.iter().flat_map(|p| &p.vocab_refs).collect();
    let grammar_ids: BTreeSet<&String> = phrases.iter().flat_map(|p| &p.grammar_refs).collect();

    let vocabs: Vec<_> = vocab_ids
        .iter()
        .filter_map(|id| dictionary.vocab_by_id(id.as_str()))
        .collect();
    let grammars: Vec<_> = grammar_ids
        .iter()
        .filter_map(|id| dictionary.grammar_by_id(id.as_str()))
        .collect();

    for vocab in &vocabs {
        if vocab.examples.is_empty() {
            continue;
        }
        let distractors: Vec<String> = vocabs
            .iter()
            .filter(|v| v.id != vocab.id)
            .take(MAX_DISTRACTORS)
            .map(|v| v.meaning.clone())
            .collect();
        let (options, correct_index) = shuffle_options(vocab.meaning.clone(), distractors, rng);

        questions.push(QuizQuestion {
            id: format!("vocab_{}", vocab.id),
            kind: QuestionKind::Vocab,
            prompt: format!("What does \"{}\" mean?", vocab.term),
            options,
            correct_index,
            explanation: format!("{} ({})", vocab.meaning, vocab.phonetic),
            phrase_id: None,
        });
    }

    for grammar in &grammars {
        if grammar.examples.is_empty() {
            continue;
        }
        let correct = grammar.examples[0].clone();
        let distractors: Vec<String> = grammars
            .iter()
            .filter(|g| g.id != grammar.id)
            .flat_map(|g| g.examples.iter().cloned())
            .take(MAX_DISTRACTORS)
            .collect();
        let (options, correct_index) = shuffle_options(correct.clone(), distractors, rng);

        questions.push(QuizQuestion {
            id: format!("grammar_{}", grammar.id),
            kind: QuestionKind::Grammar,
            prompt: format!("Which sentence uses the pattern \"{}\"?", grammar.label),
            options,
            correct_index,
            explanation: format!("{}\n{}", correct, grammar.explanation),
            phrase_id: None,
        });
    }

    for phrase in phrases {
        if phrase.translated_text.is_empty() {
            continue;
        }
        let distractors: Vec<String> = phrases
            .iter()
            .filter(|p| p.id != phrase.id && !p.translated_text.is_empty())
            .take(MAX_DISTRACTORS)
            .map(|p| p.translated_text.clone())
            .collect();
        let (options, correct_index) =
            shuffle_options(phrase.translated_text.clone(), distractors, rng);

        questions.push(QuizQuestion {
            id: format!("translation_{}", phrase.id),
            kind: QuestionKind::Translation,
            prompt: format!("Translate: \"{}\"", phrase.source_text),
            options,
            correct_index,
            explanation: format!("{}\n{}", phrase.translated_text, phrase.phonetic_text),
            phrase_id: Some(phrase.id),
        });
    }

    questions.shuffle(rng);
    questions.truncate(limit);
    questions
}

/// Shuffle correct answer and distractors together, returning the options
/// and where the correct answer landed.
fn shuffle_options(
    correct: String,
    distractors: Vec<String>,
    rng: &mut impl Rng,
) -> (Vec<String>, usize) {
    let mut tagged: Vec<(String, bool)> = Vec::with_capacity(distractors.len() + 1);
    tagged.push((correct, true));
    tagged.extend(distractors.into_iter().map(|d| (d, false)));
    tagged.shuffle(rng);

    let correct_index = tagged
        .iter()
        .position(|(_, is_correct)| *is_correct)
        .unwrap_or(0);
    let options = tagged.into_iter().map(|(text, _)| text).collect();
    (options, correct_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_phrase(source: &str, translated: &str, vocab: &[&str], grammar: &[&str]) -> Phrase {
        Phrase {
            id: Uuid::new_v4(),
            clip_id: "clip_1".to_string(),
            start_seconds: 0.0,
            end_seconds: 3.0,
            source_text: source.to_string(),
            phonetic_text: String::new(),
            translated_text: translated.to_string(),
            vocab_refs: vocab.iter().map(|s| s.to_string()).collect(),
            grammar_refs: grammar.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_phrases_yield_empty_quiz() {
        let dict = Dictionary::builtin();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(build_quiz(&[], &dict, DEFAULT_QUESTION_LIMIT, &mut rng).is_empty());
    }

    #[test]
    fn test_quiz_covers_all_kinds() {
        let dict = Dictionary::builtin();
        let mut rng = StdRng::seed_from_u64(7);

        let phrases = vec![
            sample_phrase("感谢你", "thank you", &["vc_thank"], &["gr_ganxie"]),
            sample_phrase("太可怕了", "so scary", &["vc_scary"], &["gr_tai_le"]),
        ];

        let quiz = build_quiz(&phrases, &dict, 100, &mut rng);

        assert!(quiz.iter().any(|q| q.kind == QuestionKind::Vocab));
        assert!(quiz.iter().any(|q| q.kind == QuestionKind::Grammar));
        assert!(quiz.iter().any(|q| q.kind == QuestionKind::Translation));
    }

    #[test]
    fn test_correct_index_points_at_answer() {
        let dict = Dictionary::builtin();
        let mut rng = StdRng::seed_from_u64(99);

        let phrases = vec![
            sample_phrase("感谢你", "thank you", &["vc_thank", "vc_scary"], &[]),
            sample_phrase("需要帮助", "need help", &["vc_need"], &[]),
        ];

        for question in build_quiz(&phrases, &dict, 100, &mut rng) {
            assert!(question.correct_index < question.options.len());
            match question.kind {
                QuestionKind::Translation => {
                    let answer = &question.options[question.correct_index];
                    assert!(answer == "thank you" || answer == "need help");
                }
                _ => assert!(!question.options.is_empty()),
            }
        }
    }

    #[test]
    fn test_limit_respected() {
        let dict = Dictionary::builtin();
        let mut rng = StdRng::seed_from_u64(3);

        let phrases = vec![
            sample_phrase("感谢你表演", "thanks for performing", &["vc_thank", "vc_perform"], &["gr_ganxie"]),
            sample_phrase("每组搭档轮流挑战", "partners take turns", &["vc_each", "vc_take_turns"], &["gr_meizu"]),
        ];

        let quiz = build_quiz(&phrases, &dict, 3, &mut rng);
        assert_eq!(quiz.len(), 3);
    }

    #[test]
    fn test_unknown_refs_are_skipped() {
        let dict = Dictionary::builtin();
        let mut rng = StdRng::seed_from_u64(5);

        let phrases = vec![sample_phrase("某句", "", &["vc_not_in_dict"], &["gr_not_in_dict"])];

        // Unknown refs resolve to nothing and the empty translation is
        // skipped, so nothing is askable.
        assert!(build_quiz(&phrases, &dict, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let dict = Dictionary::builtin();
        let phrases = vec![
            sample_phrase("感谢你", "thank you", &["vc_thank"], &["gr_ganxie"]),
            sample_phrase("太可怕了", "so scary", &["vc_scary"], &["gr_tai_le"]),
        ];

        let a: Vec<String> = build_quiz(&phrases, &dict, 10, &mut StdRng::seed_from_u64(11))
            .iter()
            .map(|q| q.id.clone())
            .collect();
        let b: Vec<String> = build_quiz(&phrases, &dict, 10, &mut StdRng::seed_from_u64(11))
            .iter()
            .map(|q| q.id.clone())
            .collect();
        assert_eq!(a, b);
    }
}
