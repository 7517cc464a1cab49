use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "responder",
    about = "Responder: questions and answers over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Question document (defaults to questions.json, or the config file's value for `serve`)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Create an empty question document if none exists
    Init,
    /// List all questions
    Questions,
    /// Show one question
    Question(QuestionArgs),
    /// Ask a new question
    Ask(DraftArgs),
    /// List the answers of a question
    Answers(QuestionArgs),
    /// Show one answer of a question
    Answer(AnswerArgs),
    /// Answer a question
    Reply(ReplyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct QuestionArgs {
    pub question_id: String,
}

#[derive(Args)]
pub struct AnswerArgs {
    pub question_id: String,
    pub answer_id: String,
}

#[derive(Args, Clone, Debug, Default)]
pub struct DraftArgs {
    #[arg(short, long)]
    pub author: Option<String>,
    #[arg(short, long)]
    pub summary: Option<String>,
}

#[derive(Args)]
pub struct ReplyArgs {
    pub question_id: String,
    #[command(flatten)]
    pub draft: DraftArgs,
}
