//! Script ingestion: turning pasted transcript text into timed phrase records.
//!
//! Two line-oriented grammars are supported, selected by the structure of the
//! paste itself:
//!
//! - **One-line form**: every content line is `MM:SS` followed by source text
//!   on the same line.
//! - **Block form**: a bare `MM:SS` line opens a block; the following lines
//!   are consumed in fixed order as source text, phonetic text, and
//!   translation, until the next timestamp line.
//!
//! End times are inferred after the pass: each phrase ends where the next one
//! starts, and the last phrase gets a fixed pad. Parsing is a pure function;
//! identity assignment and keyword extraction happen downstream.

use crate::error::{Result, TingliError};
use regex::Regex;
use std::sync::OnceLock;

/// Pad appended to the last phrase, which has no successor to end it.
pub const LAST_PHRASE_PAD_SECONDS: f64 = 3.0;

/// Which grammar a pasted script uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// `MM:SS text` on every content line.
    OneLine,
    /// Bare `MM:SS` lines opening source/phonetic/translation blocks.
    Block,
}

/// A phrase as produced by the parser, before IDs and keyword references.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPhrase {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub source_text: String,
    pub phonetic_text: String,
    pub translated_text: String,
}

impl ParsedPhrase {
    fn at(start_seconds: f64) -> Self {
        Self {
            start_seconds,
            end_seconds: start_seconds + LAST_PHRASE_PAD_SECONDS,
            source_text: String::new(),
            phonetic_text: String::new(),
            translated_text: String::new(),
        }
    }
}

fn bare_timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid regex"))
}

fn inline_timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})\s+(.+)$").expect("valid regex"))
}

fn clock_to_seconds(minutes: &str, seconds: &str) -> f64 {
    // parse() cannot fail on 1-2 digit capture groups
    let m: u32 = minutes.parse().unwrap_or(0);
    let s: u32 = seconds.parse().unwrap_or(0);
    f64::from(m * 60 + s)
}

/// Pick the grammar for a paste: any bare `MM:SS` line selects the block form.
pub fn detect_format(text: &str) -> ScriptFormat {
    if text
        .lines()
        .any(|line| bare_timestamp_re().is_match(line.trim()))
    {
        ScriptFormat::Block
    } else {
        ScriptFormat::OneLine
    }
}

/// Parse a pasted script into an ordered phrase sequence.
///
/// Returns [`TingliError::NoPhrasesParsed`] when no valid phrase comes out of
/// the input, and [`TingliError::TimestampOrdering`] when timestamps are not
/// strictly increasing; in both cases nothing is produced. Lines that are
/// neither timestamps nor expected content are dropped, matching the lenient
/// behavior operators rely on when pasting from messy sources.
pub fn parse_script(text: &str) -> Result<Vec<ParsedPhrase>> {
    if text.trim().is_empty() {
        return Err(TingliError::NoPhrasesParsed);
    }

    let entries = match detect_format(text) {
        ScriptFormat::OneLine => parse_one_line(text),
        ScriptFormat::Block => parse_block(text),
    };

    if entries.is_empty() {
        return Err(TingliError::NoPhrasesParsed);
    }

    check_ordering(&entries)?;

    let mut phrases: Vec<ParsedPhrase> = entries.into_iter().map(|(_, p)| p).collect();
    backfill_end_times(&mut phrases);
    Ok(phrases)
}

/// One-line grammar: `MM:SS text`. Lines that don't match are dropped.
fn parse_one_line(text: &str) -> Vec<(usize, ParsedPhrase)> {
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = inline_timestamp_re().captures(line) {
            let mut phrase = ParsedPhrase::at(clock_to_seconds(&caps[1], &caps[2]));
            phrase.source_text = caps[3].trim().to_string();
            entries.push((index + 1, phrase));
        }
    }

    entries
}

/// Block grammar: a bare `MM:SS` line followed by up to three content lines
/// in fixed order (source, phonetic, translation). A block that never got
/// source text is discarded; content past the third line is dropped.
fn parse_block(text: &str) -> Vec<(usize, ParsedPhrase)> {
    let mut entries: Vec<(usize, ParsedPhrase)> = Vec::new();
    let mut pending: Option<(usize, ParsedPhrase)> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = bare_timestamp_re().captures(line) {
            if let Some(entry) = pending.take() {
                if !entry.1.source_text.is_empty() {
                    entries.push(entry);
                }
            }
            pending = Some((index + 1, ParsedPhrase::at(clock_to_seconds(&caps[1], &caps[2]))));
            continue;
        }

        if let Some((_, phrase)) = pending.as_mut() {
            if phrase.source_text.is_empty() {
                phrase.source_text = line.to_string();
            } else if phrase.phonetic_text.is_empty() {
                phrase.phonetic_text = line.to_string();
            } else if phrase.translated_text.is_empty() {
                phrase.translated_text = line.to_string();
            }
            // a fourth content line has no field to land in
        }
        // stray content before the first timestamp is dropped
    }

    if let Some(entry) = pending.take() {
        if !entry.1.source_text.is_empty() {
            entries.push(entry);
        }
    }

    entries
}

fn check_ordering(entries: &[(usize, ParsedPhrase)]) -> Result<()> {
    for pair in entries.windows(2) {
        let (_, previous) = &pair[0];
        let (line, current) = &pair[1];
        if current.start_seconds <= previous.start_seconds {
            return Err(TingliError::TimestampOrdering {
                line: *line,
                start_seconds: current.start_seconds,
                previous_seconds: previous.start_seconds,
            });
        }
    }
    Ok(())
}

fn backfill_end_times(phrases: &mut [ParsedPhrase]) {
    let count = phrases.len();
    for i in 0..count {
        phrases[i].end_seconds = if i + 1 < count {
            phrases[i + 1].start_seconds
        } else {
            phrases[i].start_seconds + LAST_PHRASE_PAD_SECONDS
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_form() {
        let phrases = parse_script("00:00 你好\n00:03 我是学生\n00:06 很高兴认识你").unwrap();

        assert_eq!(phrases.len(), 3);
        let starts: Vec<f64> = phrases.iter().map(|p| p.start_seconds).collect();
        let ends: Vec<f64> = phrases.iter().map(|p| p.end_seconds).collect();
        assert_eq!(starts, vec![0.0, 3.0, 6.0]);
        assert_eq!(ends, vec![3.0, 6.0, 9.0]);
        assert_eq!(phrases[0].source_text, "你好");
        assert!(phrases[0].phonetic_text.is_empty());
        assert!(phrases[0].translated_text.is_empty());
    }

    #[test]
    fn test_one_line_skips_blank_and_stray_lines() {
        let phrases = parse_script("00:00 你好\n\nnot a timestamp line\n00:05 再见").unwrap();

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[1].start_seconds, 5.0);
        assert_eq!(phrases[0].end_seconds, 5.0);
    }

    #[test]
    fn test_block_form_full_blocks() {
        let script = "00:00\n太可怕了\nTài kěpà le\n너무 무서워요\n00:14\n感谢你表演物体模仿\nGǎnxiè nǐ biǎoyǎn wùtǐ mófǎng\n물체 모방을 연기해주셔서 감사합니다";
        let phrases = parse_script(script).unwrap();

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].start_seconds, 0.0);
        assert_eq!(phrases[0].end_seconds, 14.0);
        assert_eq!(phrases[0].source_text, "太可怕了");
        assert_eq!(phrases[0].phonetic_text, "Tài kěpà le");
        assert_eq!(phrases[0].translated_text, "너무 무서워요");
        assert_eq!(phrases[1].start_seconds, 14.0);
        assert_eq!(phrases[1].end_seconds, 17.0);
    }

    #[test]
    fn test_block_form_source_only() {
        let phrases = parse_script("22:00\n你好\n").unwrap();

        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].start_seconds, 1320.0);
        assert_eq!(phrases[0].end_seconds, 1323.0);
        assert_eq!(phrases[0].source_text, "你好");
        assert!(phrases[0].phonetic_text.is_empty());
        assert!(phrases[0].translated_text.is_empty());
    }

    #[test]
    fn test_block_without_source_is_discarded() {
        // First block is closed by the second timestamp before any content.
        let phrases = parse_script("00:00\n00:05\n你好").unwrap();

        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].start_seconds, 5.0);
    }

    #[test]
    fn test_block_extra_content_lines_dropped() {
        let script = "00:00\n你好\npinyin\ntranslation\nextra line\n00:05\n再见";
        let phrases = parse_script(script).unwrap();

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].translated_text, "translation");
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(detect_format("00:00 你好"), ScriptFormat::OneLine);
        assert_eq!(detect_format("00:00\n你好"), ScriptFormat::Block);
        // One bare timestamp anywhere selects the block grammar.
        assert_eq!(detect_format("00:00 你好\n00:05\n再见"), ScriptFormat::Block);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_script(""),
            Err(TingliError::NoPhrasesParsed)
        ));
        assert!(matches!(
            parse_script("   \n  \n"),
            Err(TingliError::NoPhrasesParsed)
        ));
    }

    #[test]
    fn test_no_valid_phrases_in_nonempty_input() {
        assert!(matches!(
            parse_script("just some pasted prose\nwith no timestamps"),
            Err(TingliError::NoPhrasesParsed)
        ));
    }

    #[test]
    fn test_out_of_order_timestamps_rejected() {
        let err = parse_script("00:10 后面\n00:05 前面").unwrap_err();
        match err {
            TingliError::TimestampOrdering {
                line,
                start_seconds,
                previous_seconds,
            } => {
                assert_eq!(line, 2);
                assert_eq!(start_seconds, 5.0);
                assert_eq!(previous_seconds, 10.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_timestamps_rejected() {
        assert!(matches!(
            parse_script("00:05 一\n00:05 二"),
            Err(TingliError::TimestampOrdering { .. })
        ));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let script = "00:00\n你好\nnǐ hǎo\n안녕하세요\n00:04\n再见";
        let first = parse_script(script).unwrap();
        let second = parse_script(script).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflowing_seconds_fold_into_minutes() {
        // The clock arithmetic is MM*60+SS with no range check on SS.
        let phrases = parse_script("00:75 你好").unwrap();
        assert_eq!(phrases[0].start_seconds, 75.0);
    }

    #[test]
    fn test_single_digit_seconds_is_not_a_timestamp() {
        // "1:2" doesn't match the clock format and counts as stray content.
        assert!(matches!(
            parse_script("1:2 你好"),
            Err(TingliError::NoPhrasesParsed)
        ));
    }
}
