//! Transcript export (JSON, SRT, VTT).
//!
//! Renders a clip's phrase sequence in standard subtitle formats for use
//! outside the app.

use crate::catalog::{Clip, Phrase};
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Srt,
    Vtt,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "srt" => Ok(OutputFormat::Srt),
            "vtt" | "webvtt" => Ok(OutputFormat::Vtt),
            _ => Err(format!("Unknown format: {}. Use json, srt, or vtt.", s)),
        }
    }
}

/// JSON-serializable transcript for export.
#[derive(Debug, Serialize)]
pub struct TranscriptExport {
    pub clip_id: String,
    pub title: String,
    pub media_id: String,
    pub phrases: Vec<PhraseExport>,
}

#[derive(Debug, Serialize)]
pub struct PhraseExport {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub source_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phonetic_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub translated_text: String,
}

/// Format a clip's phrases for output.
pub fn format_transcript(clip: &Clip, phrases: &[Phrase], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(clip, phrases),
        OutputFormat::Srt => format_srt(phrases),
        OutputFormat::Vtt => format_vtt(phrases),
    }
}

fn format_json(clip: &Clip, phrases: &[Phrase]) -> String {
    let export = TranscriptExport {
        clip_id: clip.id.clone(),
        title: clip.title.clone(),
        media_id: clip.source.media_id.clone(),
        phrases: phrases
            .iter()
            .map(|p| PhraseExport {
                start_seconds: p.start_seconds,
                end_seconds: p.end_seconds,
                source_text: p.source_text.clone(),
                phonetic_text: p.phonetic_text.clone(),
                translated_text: p.translated_text.clone(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string())
}

/// Format as SRT (SubRip).
fn format_srt(phrases: &[Phrase]) -> String {
    let mut output = String::new();

    for (i, phrase) in phrases.iter().enumerate() {
        // Sequence number (1-indexed)
        output.push_str(&format!("{}\n", i + 1));

        // Timestamps: 00:00:00,000 --> 00:00:00,000
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(phrase.start_seconds),
            format_srt_timestamp(phrase.end_seconds)
        ));

        output.push_str(&cue_text(phrase));
        output.push_str("\n\n");
    }

    output
}

/// Format as WebVTT.
fn format_vtt(phrases: &[Phrase]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for (i, phrase) in phrases.iter().enumerate() {
        // Optional cue identifier
        output.push_str(&format!("{}\n", i + 1));

        // Timestamps: 00:00:00.000 --> 00:00:00.000
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(phrase.start_seconds),
            format_vtt_timestamp(phrase.end_seconds)
        ));

        output.push_str(&cue_text(phrase));
        output.push_str("\n\n");
    }

    output
}

/// Cue body: source text, with the translation on a second line when present.
fn cue_text(phrase: &Phrase) -> String {
    if phrase.translated_text.is_empty() {
        phrase.source_text.clone()
    } else {
        format!("{}\n{}", phrase.source_text, phrase.translated_text)
    }
}

/// Format timestamp for SRT (00:00:00,000).
fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}

/// Format timestamp for VTT (00:00:00.000).
fn format_vtt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, ms)
}
