//! Timeline index: resolving playback positions against a clip's phrases.
//!
//! The phrase list for a clip is sorted by start time with non-overlapping
//! intervals, so the active phrase for any position is found by binary
//! search. Intervals are half-open `[start, end)`: a position sitting exactly
//! on a boundary belongs to the later phrase, which keeps back-filled
//! sequences (where each end equals the next start) unambiguous.

mod session;

pub use session::{StudySession, TickResult};

use crate::catalog::Phrase;

/// Find the phrase whose interval contains `position`, if any.
///
/// Precondition: `phrases` is sorted ascending by start time with
/// non-overlapping intervals, as produced by ingestion. Absence is a normal
/// outcome — positions in the trailing pad or past the last phrase resolve
/// to `None`.
pub fn locate(position: f64, phrases: &[Phrase]) -> Option<&Phrase> {
    if phrases.is_empty() {
        return None;
    }

    let mut lo = 0usize;
    let mut hi = phrases.len() - 1;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let phrase = &phrases[mid];

        if position >= phrase.start_seconds && position < phrase.end_seconds {
            return Some(phrase);
        } else if position < phrase.start_seconds {
            if mid == 0 {
                return None;
            }
            hi = mid - 1;
        } else {
            lo = mid + 1;
        }
    }

    None
}

/// Target playback position for jumping to a phrase.
pub fn seek(phrase: &Phrase) -> f64 {
    phrase.start_seconds
}

/// Phrases fully contained in the given time range.
pub fn phrases_in_range(start: f64, end: f64, phrases: &[Phrase]) -> Vec<&Phrase> {
    phrases
        .iter()
        .filter(|p| p.start_seconds >= start && p.end_seconds <= end)
        .collect()
}

/// Phrases referencing the given vocabulary entry.
pub fn phrases_with_vocab<'a>(vocab_id: &str, phrases: &'a [Phrase]) -> Vec<&'a Phrase> {
    phrases
        .iter()
        .filter(|p| p.vocab_refs.contains(vocab_id))
        .collect()
}

/// Phrases referencing the given grammar entry.
pub fn phrases_with_grammar<'a>(grammar_id: &str, phrases: &'a [Phrase]) -> Vec<&'a Phrase> {
    phrases
        .iter()
        .filter(|p| p.grammar_refs.contains(grammar_id))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::Phrase;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    pub fn timed_phrase(start: f64, end: f64) -> Phrase {
        Phrase {
            id: Uuid::new_v4(),
            clip_id: "clip_test".to_string(),
            start_seconds: start,
            end_seconds: end,
            source_text: format!("phrase at {start}"),
            phonetic_text: String::new(),
            translated_text: String::new(),
            vocab_refs: BTreeSet::new(),
            grammar_refs: BTreeSet::new(),
        }
    }

    /// Contiguous phrase sequence from a list of boundary times.
    pub fn contiguous(boundaries: &[f64]) -> Vec<Phrase> {
        boundaries
            .windows(2)
            .map(|w| timed_phrase(w[0], w[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{contiguous, timed_phrase};
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_locate_empty_sequence() {
        assert!(locate(0.0, &[]).is_none());
        assert!(locate(100.0, &[]).is_none());
    }

    #[test]
    fn test_locate_basic() {
        let phrases = contiguous(&[0.0, 14.0, 22.0, 29.0]);

        assert_eq!(locate(0.0, &phrases).unwrap().start_seconds, 0.0);
        assert_eq!(locate(7.5, &phrases).unwrap().start_seconds, 0.0);
        assert_eq!(locate(21.9, &phrases).unwrap().start_seconds, 14.0);
        assert_eq!(locate(28.0, &phrases).unwrap().start_seconds, 22.0);
    }

    #[test]
    fn test_locate_boundary_belongs_to_later_phrase() {
        let phrases = contiguous(&[0.0, 14.0, 22.0]);

        // Half-open intervals: 14.0 is the second phrase's start, not the
        // first phrase's end.
        assert_eq!(locate(14.0, &phrases).unwrap().start_seconds, 14.0);
    }

    #[test]
    fn test_locate_outside_all_intervals() {
        let phrases = contiguous(&[5.0, 10.0, 15.0]);

        // Before the first phrase, at the exclusive end, and beyond.
        assert!(locate(2.0, &phrases).is_none());
        assert!(locate(15.0, &phrases).is_none());
        assert!(locate(100.0, &phrases).is_none());
    }

    #[test]
    fn test_locate_with_gap() {
        let phrases = vec![timed_phrase(0.0, 5.0), timed_phrase(10.0, 15.0)];

        assert!(locate(7.0, &phrases).is_none());
        assert_eq!(locate(12.0, &phrases).unwrap().start_seconds, 10.0);
    }

    #[test]
    fn test_seek_locate_roundtrip() {
        let phrases = contiguous(&[0.0, 3.0, 6.0, 9.0, 44.0]);

        for phrase in &phrases {
            let target = seek(phrase);
            assert_eq!(locate(target, &phrases).unwrap().id, phrase.id);
        }
    }

    #[test]
    fn test_locate_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            // Random ascending boundaries, some with gaps between phrases.
            let mut t = 0.0f64;
            let mut phrases = Vec::new();
            for _ in 0..rng.gen_range(1..40) {
                t += rng.gen_range(0.0..5.0);
                let start = t;
                t += rng.gen_range(0.5..8.0);
                phrases.push(timed_phrase(start, t));
            }

            for _ in 0..50 {
                let position = rng.gen_range(-1.0..t + 5.0);
                let expected = phrases
                    .iter()
                    .find(|p| position >= p.start_seconds && position < p.end_seconds)
                    .map(|p| p.id);
                assert_eq!(locate(position, &phrases).map(|p| p.id), expected);
            }
        }
    }

    #[test]
    fn test_phrases_in_range() {
        let phrases = contiguous(&[0.0, 5.0, 10.0, 15.0]);

        let hits = phrases_in_range(5.0, 10.0, &phrases);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start_seconds, 5.0);

        assert_eq!(phrases_in_range(0.0, 15.0, &phrases).len(), 3);
        assert!(phrases_in_range(20.0, 30.0, &phrases).is_empty());
    }

    #[test]
    fn test_phrases_with_keyword() {
        let mut phrases = contiguous(&[0.0, 5.0, 10.0]);
        phrases[0].vocab_refs.insert("vc_thank".to_string());
        phrases[1].grammar_refs.insert("gr_tai_le".to_string());

        assert_eq!(phrases_with_vocab("vc_thank", &phrases).len(), 1);
        assert_eq!(phrases_with_grammar("gr_tai_le", &phrases).len(), 1);
        assert!(phrases_with_vocab("vc_missing", &phrases).is_empty());
    }
}
