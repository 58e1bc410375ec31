// libs/messaging-cell/src/services/twiml.rs
use std::fmt;

pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// TwiML `<Response>` document made of `<Message>` verbs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagingResponse {
    messages: Vec<String>,
}

impl MessagingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a response carrying one reply.
    pub fn reply(body: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.message(body);
        response
    }

    pub fn message(&mut self, body: impl Into<String>) -> &mut Self {
        self.messages.push(body.into());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MessagingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        if self.messages.is_empty() {
            return write!(f, "<Response />");
        }
        write!(f, "<Response>")?;
        for message in &self.messages {
            write!(f, "<Message>{}</Message>", escape_text(message))?;
        }
        write!(f, "</Response>")
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}
