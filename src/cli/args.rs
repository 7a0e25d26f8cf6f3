//! Command line argument parsing for the Unibot CLI using clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::ml::backend::ComputeBackend;

/// Unibot - a university information chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "unibot")]
#[command(about = "A university information chatbot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct UnibotArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Bot configuration file (JSON)
    #[arg(short, long, env = "UNIBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Intent catalog
    #[arg(long, env = "UNIBOT_INTENTS", default_value = "data/intents.json", global = true)]
    pub intents: PathBuf,

    /// Trained model bundle (.json or bincode)
    #[arg(long, env = "UNIBOT_MODEL", default_value = "data/model.json", global = true)]
    pub model: PathBuf,

    /// University records snapshot (JSON)
    #[arg(long, env = "UNIBOT_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// Override the classifier compute backend
    #[arg(long, global = true)]
    pub backend: Option<ComputeBackend>,

    /// Override the classifier confidence threshold
    #[arg(long, global = true)]
    pub confidence_threshold: Option<f32>,

    /// Override the fuzzy match threshold (0-100)
    #[arg(long, global = true)]
    pub fuzzy_threshold: Option<f64>,

    /// Seed for response selection, for reproducible replies
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl UnibotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer one message
    Chat(MessageArgs),

    /// Interactive chat session on stdin
    Repl,

    /// Show normalization and classification details for a message
    Classify(MessageArgs),

    /// Run only the fuzzy pattern matcher
    Match(MessageArgs),

    /// Look up a student's result
    Result(ResultArgs),

    /// Serve the HTTP API
    Serve(ServeArgs),
}

/// A message argument, possibly split over several words.
#[derive(Parser, Debug, Clone)]
pub struct MessageArgs {
    /// Message text
    #[arg(value_name = "MESSAGE", required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl MessageArgs {
    /// Words joined back into one message.
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}

/// Arguments for result lookup
#[derive(Parser, Debug, Clone)]
pub struct ResultArgs {
    /// Student registration number
    #[arg(value_name = "STUDENT_ID")]
    pub student_id: String,
}

/// Arguments for the HTTP server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "UNIBOT_ADDR", default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_command() {
        let args = UnibotArgs::try_parse_from(["unibot", "chat", "list", "of", "holidays"]).unwrap();

        if let Command::Chat(chat_args) = &args.command {
            assert_eq!(chat_args.text(), "list of holidays");
        } else {
            panic!("Expected Chat command");
        }
        assert_eq!(args.intents, PathBuf::from("data/intents.json"));
        assert_eq!(args.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = UnibotArgs::try_parse_from([
            "unibot",
            "classify",
            "hello",
            "--format",
            "json",
            "--backend",
            "parallel",
            "--confidence-threshold",
            "0.6",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.backend, Some(ComputeBackend::Parallel));
        assert_eq!(args.confidence_threshold, Some(0.6));
        assert_eq!(args.verbosity(), 3);
    }

    #[test]
    fn test_verbosity() {
        let args = UnibotArgs::try_parse_from(["unibot", "repl"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = UnibotArgs::try_parse_from(["unibot", "-q", "-v", "repl"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_serve_and_result() {
        let args = UnibotArgs::try_parse_from(["unibot", "serve", "--addr", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(serve_args) = args.command {
            assert_eq!(serve_args.addr.port(), 8080);
        } else {
            panic!("Expected Serve command");
        }

        let args = UnibotArgs::try_parse_from(["unibot", "result", "434121010021"]).unwrap();
        assert!(matches!(args.command, Command::Result(ref r) if r.student_id == "434121010021"));
    }

    #[test]
    fn test_message_is_required() {
        assert!(UnibotArgs::try_parse_from(["unibot", "chat"]).is_err());
        assert!(UnibotArgs::try_parse_from(["unibot", "--format", "yaml", "repl"]).is_err());
    }
}
