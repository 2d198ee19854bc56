// ============================================================
// Layer 1 — Interactive Session
// ============================================================
// The `start` command: a line-editor loop in two stages.
//
//   Stage 1 — onboarding
//     name → greeting → role menu → proceed
//
//   Stage 2 — classifier
//     search <company>   look up dataset pitches
//     predict <pitch>    test your own pitch
//     help / quit
//
// Ctrl-C or Ctrl-D ends the session at any prompt. A command
// that fails (e.g. the model directory is unreadable) prints a
// warning and the session carries on.

use anyhow::Result;
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::application::{desk_use_case::PitchDesk, onboarding_use_case::Onboarding};
use crate::cli::render::{self, PitchOrigin};
use crate::domain::{
    session::{Role, Session},
    traits::PitchClassifier,
};

const HELP: &str = "\
Commands:
  search <company>   Search a company and classify its pitch
  predict <pitch>    Test your own startup pitch
  help               Show this message
  quit               Leave the tank";

/// One line typed at the classifier prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search(String),
    Predict(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    /// Pitch text after `predict` is kept exactly as typed; only the
    /// single separator after the command word is consumed.
    pub fn parse(line: &str) -> Self {
        if line.trim().is_empty() {
            return ReplCommand::Empty;
        }
        let line = line.trim_start();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match head.to_lowercase().as_str() {
            "search" | "s"  => ReplCommand::Search(rest.trim().to_string()),
            "predict" | "p" => ReplCommand::Predict(rest.to_string()),
            "help" | "?"    => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(head.to_string()),
        }
    }
}

/// What the session does after one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Say(String),
    Silent,
    Quit,
}

/// Run one classifier-stage command against the desk.
pub fn respond<C: PitchClassifier>(
    desk:            &PitchDesk<C>,
    command:         ReplCommand,
    show_confidence: bool,
) -> Reply {
    let rendered = match command {
        ReplCommand::Empty => return Reply::Silent,
        ReplCommand::Help  => return Reply::Say(HELP.to_string()),
        ReplCommand::Quit  => return Reply::Quit,
        ReplCommand::Unknown(cmd) => {
            return Reply::Say(render::warning(&format!("Unknown command '{cmd}'. Type 'help'.")));
        }
        ReplCommand::Search(query) if query.is_empty() => {
            return Reply::Say(render::warning("Type a company name to search."));
        }
        ReplCommand::Search(query) => desk
            .search(&query)
            .map(|hits| render::search_results(&hits, show_confidence)),
        ReplCommand::Predict(pitch) => desk
            .evaluate(&pitch)
            .map(|outcome| render::outcome(&outcome, PitchOrigin::AdHoc, show_confidence)),
    };
    match rendered {
        Ok(text) => Reply::Say(text),
        Err(e)   => Reply::Say(render::warning(&format!("{e:#}"))),
    }
}

/// Read one line; None when the user pressed Ctrl-C or Ctrl-D.
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                rl.add_history_entry(line.as_str())?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Stage 1. Returns None if the user leaves before proceeding.
pub fn run_onboarding(rl: &mut DefaultEditor) -> Result<Option<Session>> {
    let mut onboarding = Onboarding::new();

    loop {
        let Some(line) = read_line(rl, render::NAME_PROMPT)? else { return Ok(None) };
        match onboarding.submit_name(&line) {
            Ok(greeting) => {
                println!("{}", render::success(&format!("{greeting} 👋")));
                break;
            }
            Err(e) => println!("{}", render::warning(&e.to_string())),
        }
    }

    println!("{}", render::ROLE_PROMPT);
    for (i, role) in Role::ALL.iter().enumerate() {
        println!("  [{}] {}", i + 1, role);
    }
    while !onboarding.can_proceed() {
        let Some(line) = read_line(rl, "> ")? else { return Ok(None) };
        match line.parse::<Role>() {
            Ok(role) => onboarding.select_role(role)?,
            Err(e) => println!("{}", render::warning(&e.to_string())),
        }
    }

    if read_line(rl, "🚀 Press Enter to proceed ")?.is_none() {
        return Ok(None);
    }
    Ok(Some(onboarding.proceed()?))
}

/// Stage 2. Runs until the user quits.
pub fn run_desk<C: PitchClassifier>(
    rl:              &mut DefaultEditor,
    desk:            &PitchDesk<C>,
    show_confidence: bool,
) -> Result<()> {
    println!("\nOverpromising Pitch Detector 🔍  ({} pitches loaded)", desk.dataset_len());
    println!("{HELP}");

    let prompt = format!("{} ({}) ▸ ", desk.session().name(), desk.session().role());
    while let Some(line) = read_line(rl, &prompt)? {
        match respond(desk, ReplCommand::parse(&line), show_confidence) {
            Reply::Say(text) => println!("{text}"),
            Reply::Silent    => {}
            Reply::Quit      => break,
        }
    }

    println!("See you in the tank, {}!", desk.session().name());
    Ok(())
}
