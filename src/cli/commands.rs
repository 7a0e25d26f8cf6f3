//! Command implementations for the Unibot CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use log::info;

use crate::chat::{BotContext, ChatEngine};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::BotConfig;
use crate::responder::SeededSelector;
use crate::server;

/// Execute a CLI command.
pub fn execute_command(args: UnibotArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args)?;

    match &args.command {
        Command::Chat(message) => chat(&engine, message, &args),
        Command::Repl => repl(&engine, &args),
        Command::Classify(message) => classify(&engine, message, &args),
        Command::Match(message) => fuzzy_match(&engine, message, &args),
        Command::Result(result_args) => lookup_result(&engine, result_args, &args),
        Command::Serve(serve_args) => serve(engine, serve_args),
    }
}

/// Effective configuration: the config file (or defaults) with flag overrides.
pub fn load_config(args: &UnibotArgs) -> anyhow::Result<BotConfig> {
    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BotConfig::default(),
    };

    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(threshold) = args.confidence_threshold {
        config.confidence_threshold = threshold;
    }
    if let Some(threshold) = args.fuzzy_threshold {
        config.fuzzy_threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

/// Load the catalog, model and data named on the command line.
pub fn load_engine(args: &UnibotArgs) -> anyhow::Result<ChatEngine> {
    let config = load_config(args)?;

    let mut context = BotContext::load(config, &args.intents, &args.model, args.data.as_ref())
        .with_context(|| {
            format!(
                "failed to load bot from {} and {}",
                args.intents.display(),
                args.model.display()
            )
        })?;

    if let Some(seed) = args.seed {
        context = context.with_selector(Arc::new(SeededSelector::new(seed)));
    }

    Ok(ChatEngine::new(context))
}

fn chat(engine: &ChatEngine, message: &MessageArgs, args: &UnibotArgs) -> anyhow::Result<()> {
    let text = message.text();
    let reply = engine.chat(Some(text.as_str()))?;
    output_result(&ChatOutput::from(reply), args)?;
    Ok(())
}

fn repl(engine: &ChatEngine, args: &UnibotArgs) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if args.verbosity() > 0 {
        println!("Unibot is ready. Type 'quit' to exit.");
    }

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "quit" | "exit") {
            break;
        }

        let reply = engine.get_bot_response(message);
        println!("Bot: {}", render(&ChatOutput::from(reply), args)?);
    }

    Ok(())
}

fn classify(engine: &ChatEngine, message: &MessageArgs, args: &UnibotArgs) -> anyhow::Result<()> {
    let diagnosis = engine.diagnose(&message.text());
    output_result(&ClassifyOutput::from(diagnosis), args)?;
    Ok(())
}

fn fuzzy_match(engine: &ChatEngine, message: &MessageArgs, args: &UnibotArgs) -> anyhow::Result<()> {
    let text = message.text();
    let context = engine.context();
    let matcher = context.matcher();

    let output = MatchOutput {
        best: matcher.best_match(&text, context.catalog()),
        threshold: matcher.threshold(),
        message: text,
    };
    output_result(&output, args)?;
    Ok(())
}

fn lookup_result(engine: &ChatEngine, result_args: &ResultArgs, args: &UnibotArgs) -> anyhow::Result<()> {
    let output = ResultOutput {
        response: engine.lookup_result(&result_args.student_id),
        student_id: result_args.student_id.clone(),
    };
    output_result(&output, args)?;
    Ok(())
}

fn serve(engine: ChatEngine, serve_args: &ServeArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start the tokio runtime")?;
    info!("Starting HTTP server on {}", serve_args.addr);
    runtime.block_on(server::serve(engine, serve_args.addr))?;
    Ok(())
}
