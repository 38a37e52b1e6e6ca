//! FAQ agent REPL demo
//!
//! Loads settings and the JSONL knowledge base, builds the pipeline
//! and answers queries from stdin with a rolling conversation
//! context. Type `exit` (or EOF) to quit.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use faq_agent_config::{load_settings, Settings};
use faq_agent_core::Message;
use faq_agent_pipeline::ChatPipeline;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config_path: Option<PathBuf> = None;
    let mut data_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = args.next().map(PathBuf::from),
            "--data" => data_path = args.next().map(PathBuf::from),
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let mut settings = match load_settings(config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load configuration, using defaults");
            Settings::default()
        }
    };
    if let Some(path) = data_path {
        settings.retrieval.index_source = path.display().to_string();
    }

    let pipeline = ChatPipeline::from_settings(settings)?;
    println!(
        "faq-agent v{} ready ({} items). Type 'exit' to quit.",
        env!("CARGO_PKG_VERSION"),
        pipeline.corpus_len()
    );

    let stdin = io::stdin();
    let mut context: Vec<Message> = Vec::new();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() || query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit")
        {
            break;
        }

        let response = pipeline.respond(query, &context);
        println!("bot> {}", response.answer);

        context.push(Message::user(query));
        context.push(Message::system(response.answer));
    }

    Ok(())
}
