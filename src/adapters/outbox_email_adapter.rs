//! Email delivery into a local outbox directory.
//!
//! Each message becomes one RFC 822 file (`multipart/alternative` when an
//! HTML body is present). A mail relay picks the files up from there.

use crate::ports::config_port::ConfigPort;
use crate::ports::delivery_port::{DeliveryPort, Message};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BOUNDARY: &str = "elitekpi-alt-boundary";

#[derive(Debug, Clone, Default)]
pub struct OutboxEmailAdapter {
    from: Option<String>,
    to: Option<String>,
    outbox: Option<PathBuf>,
}

impl OutboxEmailAdapter {
    pub fn new(from: Option<String>, to: Option<String>, outbox: Option<PathBuf>) -> Self {
        Self { from, to, outbox }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            from: config.get_string("email", "from"),
            to: config.get_string("email", "to"),
            outbox: config.get_string("email", "outbox").map(PathBuf::from),
        }
    }

    fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.from.is_none() {
            missing.push("from");
        }
        if self.to.is_none() {
            missing.push("to");
        }
        if self.outbox.is_none() {
            missing.push("outbox");
        }
        missing
    }

    fn write_message(&self, outbox: &Path, from: &str, to: &str, message: &Message) -> std::io::Result<PathBuf> {
        fs::create_dir_all(outbox)?;
        let now = Utc::now();
        let stem = now.format("%Y%m%dT%H%M%S%.6f").to_string();

        let mut attempt = 0u32;
        let (path, mut file) = loop {
            let name = if attempt == 0 {
                format!("{stem}.eml")
            } else {
                format!("{stem}-{attempt}.eml")
            };
            let path = outbox.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e),
            }
        };

        file.write_all(render_eml(from, to, &now.to_rfc2822(), message).as_bytes())?;
        Ok(path)
    }
}

/// Headers and body of one outgoing message, CRLF line endings.
pub fn render_eml(from: &str, to: &str, date: &str, message: &Message) -> String {
    let mut out = String::new();
    out.push_str(&format!("From: {from}\r\n"));
    out.push_str(&format!("To: {to}\r\n"));
    out.push_str(&format!("Subject: {}\r\n", message.subject.replace(['\r', '\n'], " ")));
    out.push_str(&format!("Date: {date}\r\n"));
    out.push_str("MIME-Version: 1.0\r\n");

    let text = message.text_body.replace('\n', "\r\n");
    match &message.html_body {
        Some(html) => {
            out.push_str(&format!(
                "Content-Type: multipart/alternative; boundary=\"{BOUNDARY}\"\r\n\r\n"
            ));
            out.push_str(&format!("--{BOUNDARY}\r\n"));
            out.push_str("Content-Type: text/plain; charset=utf-8\r\n\r\n");
            out.push_str(&text);
            out.push_str(&format!("\r\n--{BOUNDARY}\r\n"));
            out.push_str("Content-Type: text/html; charset=utf-8\r\n\r\n");
            out.push_str(&html.replace('\n', "\r\n"));
            out.push_str(&format!("\r\n--{BOUNDARY}--\r\n"));
        }
        None => {
            out.push_str("Content-Type: text/plain; charset=utf-8\r\n\r\n");
            out.push_str(&text);
            out.push_str("\r\n");
        }
    }
    out
}

impl DeliveryPort for OutboxEmailAdapter {
    fn channel(&self) -> &'static str {
        "email"
    }

    fn deliver(&self, message: &Message) -> bool {
        let (Some(from), Some(to), Some(outbox)) = (&self.from, &self.to, &self.outbox) else {
            warn!(missing = ?self.missing_settings(), "email delivery not configured");
            return false;
        };
        match self.write_message(outbox, from, to, message) {
            Ok(path) => {
                debug!(path = %path.display(), "email queued in outbox");
                true
            }
            Err(e) => {
                warn!(error = %e, outbox = %outbox.display(), "failed to queue email");
                false
            }
        }
    }
}
