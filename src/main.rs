mod models;
mod questions;
mod snapshot;
mod state;
mod store;
mod tui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use models::{today_eastern, Difficulty, JsonOutput, ResultRow, Subject};
use questions::QuestionSource;
use snapshot::SnapshotStore;
use store::{ResultStore, StoreConfig};

#[derive(Parser)]
#[command(name = "letslearn")]
#[command(about = "A terminal quiz app for shared coding & math learning sessions")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Result store endpoint URL (overrides LETSLEARN_STORE_URL)
    #[arg(long, global = true)]
    store_url: Option<String>,

    /// Result store access key (overrides LETSLEARN_STORE_KEY)
    #[arg(long, global = true)]
    store_key: Option<String>,

    /// Directory holding the question documents (overrides LETSLEARN_QUESTIONS)
    #[arg(long, global = true)]
    questions_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive quiz
    Tui,

    /// List all stored session results
    Results,

    /// Record a session result by hand
    Record {
        /// Learner name
        name: String,

        /// Subject: coding or math
        #[arg(long, short)]
        subject: String,

        /// Number of correct answers
        #[arg(long, short)]
        correct: i64,

        /// Number of incorrect answers
        #[arg(long, short)]
        incorrect: i64,
    },

    /// Inspect and validate a question document
    Questions {
        /// Subject: coding or math
        subject: String,

        /// Difficulty: basics or moderate
        difficulty: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = ResultStore::new(StoreConfig::resolve(cli.store_url, cli.store_key));
    let source = QuestionSource::resolve(cli.questions_dir);

    match cli.command {
        Commands::Tui => {
            tui::run(store, source, SnapshotStore::resolve())?;
        }

        Commands::Results => {
            let rows = store.list()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&rows))?);
            } else if rows.is_empty() {
                println!("No results yet.");
            } else {
                println!(
                    "{:<20} {:<12} {:<14} {:>7} {:>10}",
                    "NAME", "DATE", "SUBJECT", "CORRECT", "INCORRECT"
                );
                println!("{}", "-".repeat(67));
                for row in rows {
                    println!(
                        "{:<20} {:<12} {:<14} {:>7} {:>10}",
                        truncate(&row.name, 18),
                        row.date,
                        row.subject.label(),
                        row.correct,
                        row.incorrect
                    );
                }
            }
        }

        Commands::Record {
            name,
            subject,
            correct,
            incorrect,
        } => {
            let subject = Subject::from_str(&subject)
                .ok_or_else(|| format!("Invalid subject '{}'. Use: coding or math", subject))?;

            let row = ResultRow {
                id: None,
                name: name.clone(),
                date: today_eastern(),
                subject,
                correct,
                incorrect,
                created_at: None,
            };
            store.upsert(&row)?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "name": name,
                        "date": row.date,
                        "subject": subject.as_str()
                    })))?
                );
            } else {
                println!(
                    "Recorded {} correct / {} incorrect for {} ({}) on {}.",
                    correct,
                    incorrect,
                    name,
                    subject.label(),
                    row.date
                );
            }
        }

        Commands::Questions {
            subject,
            difficulty,
        } => {
            let subject = Subject::from_str(&subject)
                .ok_or_else(|| format!("Invalid subject '{}'. Use: coding or math", subject))?;
            let difficulty = Difficulty::from_str(&difficulty).ok_or_else(|| {
                format!("Invalid difficulty '{}'. Use: basics or moderate", difficulty)
            })?;

            let questions = source.load(subject, difficulty)?;

            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&questions))?);
            } else if questions.is_empty() {
                println!("No questions in this document.");
            } else {
                println!(
                    "{} questions for {} • {}",
                    questions.len(),
                    subject.label(),
                    difficulty.label()
                );
                println!();
                for (i, q) in questions.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, q.prompt);
                    for (ci, choice) in q.choices.iter().enumerate() {
                        let marker = if ci == q.answer_index { "*" } else { " " };
                        println!("     {} {}", marker, choice);
                    }
                }
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
