//! Response values produced by the resolver.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HTML_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*(\s[^<>]*)?/?>").ok());

/// How the body of a response should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Plain text, possibly with `*markdown*` emphasis.
    PlainText,
    /// Markup meant to be inserted into a page as is.
    HtmlFragment,
}

/// A response body together with its rendering kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotResponse {
    pub kind: ResponseKind,
    pub body: String,
}

impl BotResponse {
    /// A plain text response.
    pub fn plain<S: Into<String>>(body: S) -> Self {
        BotResponse {
            kind: ResponseKind::PlainText,
            body: body.into(),
        }
    }

    /// An HTML fragment response.
    pub fn html<S: Into<String>>(body: S) -> Self {
        BotResponse {
            kind: ResponseKind::HtmlFragment,
            body: body.into(),
        }
    }

    /// A canned catalog response; bodies containing markup are HTML fragments.
    pub fn canned<S: Into<String>>(body: S) -> Self {
        let body = body.into();
        let is_html = HTML_TAG.as_ref().is_some_and(|re| re.is_match(&body));
        if is_html {
            Self::html(body)
        } else {
            Self::plain(body)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Collapse to the string sent over the wire.
    pub fn into_string(self) -> String {
        self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for BotResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
