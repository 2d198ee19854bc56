// ============================================================
// Layer 1 — Terminal Rendering
// ============================================================
// Turns pipeline results into coloured terminal text.
// Nothing here decides anything; it only formats.

use colored::Colorize;

use crate::application::desk_use_case::SearchHit;
use crate::domain::{
    pitch::{ClassificationResult, Label, PitchOutcome},
    quality::QualityReport,
};

pub const NAME_PROMPT: &str = "👤 What's your name? ";
pub const ROLE_PROMPT: &str = "🧠 Who are you?";
pub const DATASET_LOADED: &str = "Dataset loaded successfully.";
pub const NO_MATCH: &str = "No matching company found.";
pub const GIBBERISH: &str =
    "❌ This doesn’t look like a proper startup pitch. Please write something meaningful.";
pub const GIBBERISH_DATASET_SUFFIX: &str = " Your Pitch is too weak.";
pub const TOO_WEAK: &str = "⚠️ Your pitch is too weak. Try a stronger one.";

/// Where a pitch came from; dataset rejections get a slightly longer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchOrigin {
    Dataset,
    AdHoc,
}

pub fn banner() -> String {
    format!(
        "{}\n{}",
        "👋 Welcome to Shark Tank AI".red().bold(),
        "Pitch Your Future. Grab Your Deals.".dimmed(),
    )
}

pub fn success(message: &str) -> String {
    message.green().to_string()
}

pub fn warning(message: &str) -> String {
    message.yellow().to_string()
}

pub fn badge(result: &ClassificationResult, show_confidence: bool) -> String {
    let badge = match result.label {
        Label::Overpromising => " Overpromising ❗ ".white().bold().on_red(),
        Label::Realistic     => " Realistic ✅ ".white().bold().on_green(),
    };
    if show_confidence {
        format!("{badge} {}", format!("{:.1}% confidence", result.confidence).dimmed())
    } else {
        badge.to_string()
    }
}

pub fn outcome(outcome: &PitchOutcome, origin: PitchOrigin, show_confidence: bool) -> String {
    match outcome {
        PitchOutcome::GibberishRejected => match origin {
            PitchOrigin::AdHoc   => warning(GIBBERISH),
            PitchOrigin::Dataset => warning(&format!("{GIBBERISH}{GIBBERISH_DATASET_SUFFIX}")),
        },
        PitchOutcome::TooWeak => warning(TOO_WEAK),
        PitchOutcome::Classified(result) => badge(result, show_confidence),
    }
}

/// Company header, the pitch itself, then the verdict.
pub fn search_hit(hit: &SearchHit<'_>, show_confidence: bool) -> String {
    format!(
        "{}\n{} {}\n{}",
        format!("🚀 {}", hit.record.company_name).bold(),
        "┃".red(),
        hit.record.company_pitch,
        outcome(&hit.outcome, PitchOrigin::Dataset, show_confidence),
    )
}

pub fn search_results(hits: &[SearchHit<'_>], show_confidence: bool) -> String {
    if hits.is_empty() {
        return warning(NO_MATCH);
    }
    hits.iter()
        .map(|hit| search_hit(hit, show_confidence))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn quality_report(report: &QualityReport) -> String {
    if report.is_clean() {
        return success("✔ Looks like a real pitch: every quality check passed.");
    }
    let mut lines = vec![warning("✘ Rejected by the quality gate:")];
    lines.extend(report.signals.iter().map(|s| format!("  - {}", s.describe())));
    lines.join("\n")
}
