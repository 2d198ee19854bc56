// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and all their configurable flags:
//
//   start   — interactive: onboarding, then search + test pitches
//   predict — classify one pitch
//   search  — look up companies in the dataset and classify them
//   check   — run only the gibberish check (no model needed)
//
// Model directory and dataset path can also come from the
// PITCH_MODEL_DIR and PITCH_DATASET environment variables.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::desk_use_case::DeskConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Onboard, then search companies and test your own pitches
    Start(StartArgs),

    /// Classify a single pitch
    Predict(PredictArgs),

    /// Search the dataset by company name and classify every match
    Search(SearchArgs),

    /// Run only the gibberish check on a pitch and explain the result
    Check(CheckArgs),
}

/// Where the model and dataset live, and how results are shown.
#[derive(Args, Debug, Clone)]
pub struct DeskArgs {
    /// HuggingFace model directory (config.json, model.safetensors or pytorch_model.bin, tokenizer)
    #[arg(long, env = "PITCH_MODEL_DIR", default_value = "distilbert_model")]
    pub model_dir: PathBuf,

    /// Labelled pitch dataset (.xlsx, .xls, .ods or .csv)
    #[arg(long, env = "PITCH_DATASET", default_value = "YC_labeled_realistic_vs_overpromisinggg.xlsx")]
    pub dataset: PathBuf,

    /// Show the model's confidence next to the label
    #[arg(long)]
    pub show_confidence: bool,
}

/// Convert CLI DeskArgs into the application-layer DeskConfig.
/// The application layer never sees clap types.
impl From<DeskArgs> for DeskConfig {
    fn from(a: DeskArgs) -> Self {
        DeskConfig {
            model_dir:       a.model_dir,
            dataset:         a.dataset,
            show_confidence: a.show_confidence,
        }
    }
}

/// Onboarding answers for the one-shot commands.
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// "Investor" or "Startup Founder"
    #[arg(long)]
    pub role: String,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub desk: DeskArgs,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    #[command(flatten)]
    pub desk: DeskArgs,

    /// The startup pitch to classify
    #[arg(long)]
    pub text: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub identity: IdentityArgs,

    #[command(flatten)]
    pub desk: DeskArgs,

    /// Company name (or part of it), case-insensitive
    #[arg(long)]
    pub query: String,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The text to check
    #[arg(long)]
    pub text: String,
}
