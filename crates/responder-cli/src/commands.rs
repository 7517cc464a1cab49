use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use responder_server::{ResponderServer, ServerConfig};
use responder_store::{
    Answer, AnswerDraft, FileDocumentStorage, Lookup, Outcome, Question, QuestionDraft,
    QuestionStore,
};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.storage).await,
        Command::Init => cmd_init(&document_path(cli.storage)).await,
        Command::Questions => {
            let questions = open(cli.storage).list_questions().await?;
            emit(format, &questions, |qs| {
                if qs.is_empty() {
                    println!("No questions.");
                }
                qs.iter().for_each(print_question);
            })
        }
        Command::Question(args) => {
            let question = open(cli.storage).get_question_by_id(&args.question_id).await?;
            emit(format, &question, |lookup| print_lookup(lookup, print_question))
        }
        Command::Ask(args) => {
            let outcome = open(cli.storage).add_question(question_draft(args)).await?;
            finish(format, &outcome, |q| {
                println!("{} Question added", "✓".green().bold());
                print_question(q);
            })
        }
        Command::Answers(args) => {
            let outcome = open(cli.storage).get_answers(&args.question_id).await?;
            finish(format, &outcome, |answers| {
                if answers.is_empty() {
                    println!("No answers yet.");
                }
                answers.iter().for_each(print_answer);
            })
        }
        Command::Answer(args) => {
            let outcome = open(cli.storage)
                .get_answer(&args.question_id, &args.answer_id)
                .await?;
            finish(format, &outcome, |lookup| print_lookup(lookup, print_answer))
        }
        Command::Reply(args) => {
            let outcome = open(cli.storage)
                .add_answer(&args.question_id, answer_draft(args.draft))
                .await?;
            finish(format, &outcome, |a| {
                println!("{} Answer added", "✓".green().bold());
                print_answer(a);
            })
        }
    }
}

fn document_path(storage: Option<PathBuf>) -> PathBuf {
    storage.unwrap_or_else(|| ServerConfig::default().storage_path)
}

fn open(storage: Option<PathBuf>) -> QuestionStore {
    QuestionStore::new(FileDocumentStorage::new(document_path(storage)))
}

async fn cmd_serve(args: ServeArgs, storage: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = storage {
        config.storage_path = path;
    }
    println!(
        "Responder on {} (document: {})",
        config.bind_addr.to_string().bold(),
        config.storage_path.display()
    );
    ResponderServer::new(config).serve().await?;
    Ok(())
}

async fn cmd_init(path: &Path) -> anyhow::Result<()> {
    let created = FileDocumentStorage::new(path).init().await?;
    if created {
        println!("{} Initialized empty question document in {}", "✓".green().bold(), path.display().to_string().bold());
    } else {
        println!("Question document {} already exists", path.display().to_string().bold());
    }
    Ok(())
}

fn question_draft(args: DraftArgs) -> QuestionDraft {
    QuestionDraft {
        author: args.author.map(Value::String),
        summary: args.summary.map(Value::String),
        ..QuestionDraft::default()
    }
}

fn answer_draft(args: DraftArgs) -> AnswerDraft {
    AnswerDraft {
        author: args.author.map(Value::String),
        summary: args.summary.map(Value::String),
        ..AnswerDraft::default()
    }
}

/// Print `value` as JSON, or through `text` in text mode.
fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(value),
    }
    Ok(())
}

/// Like [`emit`], but a rejection becomes a failing exit.
fn finish<T: Serialize>(
    format: OutputFormat,
    outcome: &Outcome<T>,
    text: impl FnOnce(&T),
) -> anyhow::Result<()> {
    match outcome {
        Outcome::Done(value) => emit(format, value, text),
        Outcome::Rejected(rejection) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(outcome)?);
            }
            anyhow::bail!("{rejection}")
        }
    }
}

fn print_lookup<T>(lookup: &Lookup<T>, print: impl Fn(&T)) {
    match lookup {
        Lookup::Found(value) => print(value),
        Lookup::Absent => println!("{}", "Not found.".dimmed()),
    }
}

fn print_question(question: &Question) {
    println!("{}  {}", question.id.yellow(), question.author.bold());
    println!("  {}", question.summary);
    println!("  {} answer(s)", question.answers.len().to_string().cyan());
}

fn print_answer(answer: &Answer) {
    println!("  {}  {}", answer.id.yellow(), answer.author.bold());
    println!("    {}", answer.summary);
}
