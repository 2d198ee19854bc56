// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All decisions are delegated to Layer 2 (application).
//
// Four commands are supported:
//   1. `start`   — interactive onboarding + classifier session
//   2. `predict` — classify one pitch
//   3. `search`  — classify the pitches of matching companies
//   4. `check`   — quality gate only, no model
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the submodules
pub mod commands;
pub mod render;
pub mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{CheckArgs, Commands, PredictArgs, SearchArgs, StartArgs};
use rustyline::DefaultEditor;

use crate::application::{
    desk_use_case::{lazy_model_classifier, DeskConfig, PitchDesk},
    evaluate_use_case::PitchEvaluator,
    onboarding_use_case::Onboarding,
};
use crate::data::loader::DatasetLoader;
use crate::domain::{quality::QualityReport, session::Session, traits::PitchClassifier};
use render::PitchOrigin;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "pitch-classifier",
    version,
    about = "Shark Tank AI: label startup pitches as overpromising or realistic."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct handler.
    /// This keeps the CLI layer thin — it only routes and prints.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Start(args)   => run_start(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Search(args)  => run_search(args),
            Commands::Check(args)   => run_check(args),
        }
    }
}

/// Build the desk for an onboarded session with a lazily loaded model.
fn open_desk(session: Session, cfg: &DeskConfig) -> PitchDesk<impl PitchClassifier> {
    let classifier = lazy_model_classifier(cfg.model_dir.clone());
    PitchDesk::new(session, PitchEvaluator::new(classifier))
}

/// Load the dataset into the desk. Failure ends the classifier stage.
fn load_dataset<C: PitchClassifier>(desk: &mut PitchDesk<C>, cfg: &DeskConfig) -> Result<()> {
    let loader = DatasetLoader::new(cfg.dataset.clone());
    desk.load_dataset(&loader).context("Failed to load dataset")?;
    println!("{}", render::success(render::DATASET_LOADED));
    Ok(())
}

/// Handles the `start` subcommand.
fn run_start(args: StartArgs) -> Result<()> {
    let cfg: DeskConfig = args.desk.into();
    println!("{}\n", render::banner());

    let mut rl = DefaultEditor::new()?;
    let Some(session) = repl::run_onboarding(&mut rl)? else {
        return Ok(());
    };

    let mut desk = open_desk(session, &cfg);
    load_dataset(&mut desk, &cfg)?;
    repl::run_desk(&mut rl, &desk, cfg.show_confidence)
}

/// Handles the `predict` subcommand.
fn run_predict(args: PredictArgs) -> Result<()> {
    let session = Onboarding::complete(&args.identity.name, &args.identity.role)?;
    let cfg: DeskConfig = args.desk.into();

    let desk = open_desk(session, &cfg);
    let outcome = desk.evaluate(&args.text)?;
    println!("{}", render::outcome(&outcome, PitchOrigin::AdHoc, cfg.show_confidence));
    Ok(())
}

/// Handles the `search` subcommand.
fn run_search(args: SearchArgs) -> Result<()> {
    let session = Onboarding::complete(&args.identity.name, &args.identity.role)?;
    let cfg: DeskConfig = args.desk.into();

    let mut desk = open_desk(session, &cfg);
    load_dataset(&mut desk, &cfg)?;

    if let Some(text) = search_output(&desk, &args.query, cfg.show_confidence)? {
        println!("{text}");
    }
    Ok(())
}

/// Rendered search results; an empty query searches nothing and prints nothing.
fn search_output<C: PitchClassifier>(
    desk:            &PitchDesk<C>,
    query:           &str,
    show_confidence: bool,
) -> Result<Option<String>> {
    if query.trim().is_empty() {
        return Ok(None);
    }
    let hits = desk.search(query)?;
    Ok(Some(render::search_results(&hits, show_confidence)))
}

/// Handles the `check` subcommand.
fn run_check(args: CheckArgs) -> Result<()> {
    let report = QualityReport::evaluate(&args.text);
    println!("{}", render::quality_report(&report));
    Ok(())
}
