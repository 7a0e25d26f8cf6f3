//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::chat::{BotReply, Diagnosis};
use crate::cli::args::{OutputFormat, UnibotArgs};
use crate::error::Result;
use crate::matcher::FuzzyMatch;

/// Results that have a human-readable rendering.
pub trait HumanOutput {
    fn render_human(&self, verbosity: u8) -> String;
}

/// Result of the `chat` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatOutput {
    pub response: String,
    pub tag: String,
}

impl From<BotReply> for ChatOutput {
    fn from(reply: BotReply) -> Self {
        ChatOutput {
            response: reply.response,
            tag: reply.tag,
        }
    }
}

impl HumanOutput for ChatOutput {
    fn render_human(&self, verbosity: u8) -> String {
        if verbosity > 1 {
            format!("[{}] {}", self.tag, self.response)
        } else {
            self.response.clone()
        }
    }
}

/// Result of the `classify` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyOutput {
    pub message: String,
    pub corrected: String,
    pub tokens: Vec<String>,
    pub active_words: Vec<String>,
    pub tag: Option<String>,
    pub confidence: Option<f32>,
    pub confident: bool,
}

impl From<Diagnosis> for ClassifyOutput {
    fn from(diagnosis: Diagnosis) -> Self {
        let (tag, confidence) = match diagnosis.classification {
            Some(c) => (Some(c.tag), Some(c.confidence)),
            None => (None, None),
        };

        ClassifyOutput {
            message: diagnosis.utterance.raw,
            corrected: diagnosis.utterance.corrected,
            tokens: diagnosis.utterance.tokens,
            active_words: diagnosis.active_words,
            tag,
            confidence,
            confident: diagnosis.confident,
        }
    }
}

impl HumanOutput for ClassifyOutput {
    fn render_human(&self, _verbosity: u8) -> String {
        let classification = match (&self.tag, self.confidence) {
            (Some(tag), Some(confidence)) => format!(
                "{tag} ({confidence:.4}{})",
                if self.confident { ", confident" } else { "" }
            ),
            _ => "failed".to_string(),
        };

        format!(
            "Message:        {}\nCorrected:      {}\nTokens:         {}\nActive words:   {}\nClassification: {}",
            self.message,
            self.corrected,
            self.tokens.join(" "),
            self.active_words.join(" "),
            classification
        )
    }
}

/// Result of the `match` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchOutput {
    pub message: String,
    pub threshold: f64,
    pub best: Option<FuzzyMatch>,
}

impl HumanOutput for MatchOutput {
    fn render_human(&self, _verbosity: u8) -> String {
        match &self.best {
            Some(m) => format!(
                "{} ({} match on {:?}, score {:.1})",
                m.tag,
                if m.exact { "exact" } else { "fuzzy" },
                m.pattern,
                m.score
            ),
            None => format!("No pattern scored at least {:.1}", self.threshold),
        }
    }
}

/// Result of the `result` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultOutput {
    pub student_id: String,
    pub response: String,
}

impl HumanOutput for ResultOutput {
    fn render_human(&self, _verbosity: u8) -> String {
        self.response.clone()
    }
}

/// Render a result in the requested format.
pub fn render<T: Serialize + HumanOutput>(result: &T, args: &UnibotArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.render_human(args.verbosity())),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

/// Print a result in the requested format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &UnibotArgs) -> Result<()> {
    println!("{}", render(result, args)?);
    Ok(())
}
