//! Recover structured payloads from free-form model text.
//!
//! Nothing here fails. When no JSON can be recovered the best available
//! text is handed back and the caller decides how to degrade.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tw_domain::trace::TraceEvent;

fn json_fence() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json\s*\n(.*?)\n\s*```").ok())
        .as_ref()
}

fn any_fence() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z]*[ \t]*\n(.*?)\n\s*```").ok())
        .as_ref()
}

fn jsonl_fence() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```jsonl\s*(.*?)\s*```").ok())
        .as_ref()
}

/// The text most likely to hold the JSON payload.
///
/// First a block fenced as `json`, then any fenced block whose body starts
/// with `{` or `[`, then the input unchanged.
pub fn extract_json(text: &str) -> &str {
    if let Some(caps) = json_fence().and_then(|re| re.captures(text)) {
        if let Some(body) = caps.get(1) {
            return body.as_str().trim();
        }
    }

    if let Some(re) = any_fence() {
        for caps in re.captures_iter(text) {
            if let Some(body) = caps.get(1) {
                let body = body.as_str().trim();
                if body.starts_with('{') || body.starts_with('[') {
                    return body;
                }
            }
        }
    }

    text
}

/// Extracted text plus its parsed form when it is valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub text: String,
    pub value: Option<Value>,
}

impl Extraction {
    pub fn is_parsed(&self) -> bool {
        self.value.is_some()
    }

    /// The parsed value, or the raw text as a JSON string.
    pub fn into_value(self) -> Value {
        self.value.unwrap_or(Value::String(self.text))
    }
}

/// Extract and try to parse. A parse failure is logged under `context`.
pub fn extract_and_parse(text: &str, context: &str) -> Extraction {
    let extracted = extract_json(text);
    match serde_json::from_str::<Value>(extracted) {
        Ok(value) => Extraction {
            text: extracted.to_string(),
            value: Some(value),
        },
        Err(e) => {
            tracing::warn!(context, error = %e, "extracted text is not valid JSON");
            TraceEvent::ExtractionFailed {
                context: context.to_string(),
                reason: e.to_string(),
                text_chars: extracted.chars().count(),
            }
            .emit();
            Extraction {
                text: extracted.to_string(),
                value: None,
            }
        }
    }
}

/// Parse line-delimited JSON, keeping only the lines that parse.
///
/// A fenced `jsonl` (or `json`) block is preferred when present; otherwise
/// every line of the input is tried.
pub fn extract_jsonl(text: &str) -> Vec<Value> {
    let region = jsonl_fence()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .or_else(|| {
            json_fence()
                .and_then(|re| re.captures(text))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        })
        .unwrap_or(text);

    let mut values = Vec::new();
    for line in region.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<Value>(line) {
            Ok(v) => values.push(v),
            Err(e) => {
                let preview: String = line.chars().take(50).collect();
                tracing::debug!(line = %preview, error = %e, "skipping invalid JSONL line");
            }
        }
    }
    values
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
