//! Minimal TwiML document writer.
//!
//! The telephony collaborator consumes an XML dialect of `<Say>`,
//! `<Gather>`, `<Pause>`, `<Redirect>`, and `<Hangup>` verbs. This writer
//! covers exactly the verbs the webhook routes emit.

use std::fmt::Write as _;

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Voice used for all spoken prompts.
const VOICE: &str = "alice";

/// Speech rate used for all spoken prompts.
const RATE: &str = "0.9";

#[derive(Debug, Clone)]
enum Verb {
    Say(String),
    Gather {
        action: String,
        num_digits: u8,
        timeout_secs: u8,
    },
    Pause(u8),
    Redirect(String),
    Hangup,
}

/// An ordered TwiML `<Response>` document.
#[derive(Debug, Clone, Default)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    /// Creates an empty response document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Speaks `text`.
    pub fn say(&mut self, text: &str) -> &mut Self {
        self.verbs.push(Verb::Say(text.to_owned()));
        self
    }

    /// Collects `num_digits` digits, posting them to `action`.
    pub fn gather(&mut self, action: &str, num_digits: u8, timeout_secs: u8) -> &mut Self {
        self.verbs.push(Verb::Gather {
            action: action.to_owned(),
            num_digits,
            timeout_secs,
        });
        self
    }

    /// Pauses for `length_secs` seconds.
    pub fn pause(&mut self, length_secs: u8) -> &mut Self {
        self.verbs.push(Verb::Pause(length_secs));
        self
    }

    /// Redirects the call to `url`.
    pub fn redirect(&mut self, url: &str) -> &mut Self {
        self.verbs.push(Verb::Redirect(url.to_owned()));
        self
    }

    /// Ends the call.
    pub fn hangup(&mut self) -> &mut Self {
        self.verbs.push(Verb::Hangup);
        self
    }

    /// Serializes the document.
    ///
    /// # Panics
    ///
    /// Panics if formatting into a `String` fails, which cannot happen.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        for verb in &self.verbs {
            match verb {
                Verb::Say(text) => write!(
                    xml,
                    r#"<Say voice="{VOICE}" rate="{RATE}">{}</Say>"#,
                    escape(text)
                ),
                Verb::Gather {
                    action,
                    num_digits,
                    timeout_secs,
                } => write!(
                    xml,
                    r#"<Gather numDigits="{num_digits}" action="{}" method="POST" timeout="{timeout_secs}"/>"#,
                    escape(action)
                ),
                Verb::Pause(length) => write!(xml, r#"<Pause length="{length}"/>"#),
                Verb::Redirect(url) => write!(xml, "<Redirect>{}</Redirect>", escape(url)),
                Verb::Hangup => write!(xml, "<Hangup/>"),
            }
            .expect("writing to a String cannot fail");
        }
        xml.push_str("</Response>");
        xml
    }
}

impl IntoResponse for VoiceResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.to_xml()).into_response()
    }
}

/// Escapes XML text and attribute content.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
