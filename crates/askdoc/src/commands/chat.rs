//! `askdoc chat` command implementation.

use std::io::BufRead;
use std::path::PathBuf;

use askdoc_config::{CliSettings, Config};
use askdoc_core::{Answer, Conversation, Question};
use askdoc_server::Services;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Inputs that end the chat.
const EXIT_WORDS: &[&str] = &["exit", "quit", "종료"];

/// Arguments for the chat command.
#[derive(Args)]
pub(crate) struct ChatArgs {
    /// Path to configuration file (default: auto-discover askdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session name; all questions of the chat share its document.
    #[arg(short, long, default_value = "cli")]
    session: String,

    /// Completion model (overrides config).
    #[arg(short, long)]
    model: Option<String>,

    /// Enable verbose output (request and append logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ChatArgs {
    /// Execute the chat command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdin cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            model: self.model,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let services = Services::from_config(&config)?;
        let conversation = Conversation::new(
            services.completion.as_ref(),
            services.documents.as_ref(),
            services.sessions.as_ref(),
        )
        .options(services.record.clone());
        tracing::info!(session = %self.session, "Starting chat");

        output.highlight(&format!(
            "Type a question. Enter one of {} to finish.",
            EXIT_WORDS.join(", ")
        ));

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            output.prompt("\n> ");
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if is_exit(text) {
                break;
            }

            output.info("Thinking...");
            match conversation.ask(&Question::new(text, &self.session)) {
                Ok(answer) => {
                    output.data(&answer.answer)?;
                    print_summary(&output, &answer);
                }
                Err(err) => output.error(&format!("Error: {err}")),
            }
        }

        output.success("Bye.");
        Ok(())
    }
}

fn is_exit(text: &str) -> bool {
    EXIT_WORDS
        .iter()
        .any(|word| text.eq_ignore_ascii_case(word))
}

fn print_summary(output: &Output, answer: &Answer) {
    let report = &answer.answer_report;
    if answer.fully_recorded() {
        output.success(&format!(
            "\nRecorded {} block(s) in {} ({} request(s))",
            report.appended + answer.question_report.appended,
            answer.document_id,
            report.requests + answer.question_report.requests,
        ));
    } else {
        output.warning(&format!(
            "\nWarning: {} block(s) could not be recorded in {}",
            report.failed_blocks.len() + answer.question_report.failed_blocks.len(),
            answer.document_id,
        ));
    }
}
