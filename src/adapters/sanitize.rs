//! Log redaction for patient data.
//!
//! Formatted log lines pass through `SanitizingMakeWriter` before reaching the
//! sink. It strips:
//! - Embedded photo payloads (`data:<mime>;base64,...`)
//! - E-mail addresses and phone numbers
//! - National ID numbers (SSN and CPF layouts)
//!
//! Call sites already avoid logging patient names; this is the backstop for
//! anything that slips into a formatted message.
//!
//! Inputs longer than `WAITLINE_SANITIZE_MAX_BYTES` (default 16 KiB) are
//! truncated before scanning.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static REDACTIONS: OnceLock<Redactions> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Redaction {
    regex: Regex,
    replacement: &'static str,
}

struct Redactions {
    any: RegexSet,
    rules: Vec<Redaction>,
}

fn max_sanitize_bytes() -> usize {
    std::env::var("WAITLINE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn redactions() -> &'static Redactions {
    REDACTIONS.get_or_init(|| {
        // Order matters: data URLs first so their payload never reaches the
        // narrower rules below.
        let rules: [(&str, &'static str); 5] = [
            (
                r"data:[A-Za-z0-9.+/-]*;base64,[A-Za-z0-9+/]*={0,2}",
                "[REDACTED-PHOTO]",
            ),
            (
                r"(?i)\b[a-z0-9._%+-]{1,64}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (r"\b\d{3}\.\d{3}\.\d{3}-\d{2}\b", "[REDACTED-ID]"),
            (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-ID]"),
            (
                r"(?:\+\d{1,3}[\s-]?)?\(?\b\d{2,3}\)?[\s-]?\d{4,5}[\s-]?\d{4}\b",
                "[REDACTED-PHONE]",
            ),
        ];

        let any = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Redactions { any, rules }
    })
}

/// Redact patient data from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let redactions = redactions();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = if redactions.any.is_match(prefix) {
        let mut out = prefix.to_string();
        for rule in &redactions.rules {
            out = rule.regex.replace_all(&out, rule.replacement).into_owned();
        }
        out
    } else {
        prefix.to_string()
    };

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer that redacts each formatted line before it
/// reaches the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single unterminated line may not grow without bound.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}
