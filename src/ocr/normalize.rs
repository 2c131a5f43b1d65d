//! Normalization of raw vision-model output
//!
//! Models often wrap JSON in Markdown code fences, sometimes more than once.
//! [`strip_fences`] removes them and [`normalize`] turns the cleaned text
//! into a flat word to meaning mapping, or fails without a partial result.
//! Words keep the order the model listed them in.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Opening fence whose language tag runs to the end of its line
static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```[A-Za-z0-9_+-]*[ \t]*(\r?\n|$)").expect("fence pattern is valid")
});

const FENCE: &str = "```";

/// Word to meaning mapping extracted from an image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OcrExtraction(pub IndexMap<String, String>);

impl OcrExtraction {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.0.get(word).map(String::as_str)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Reasons model output could not be turned into an [`OcrExtraction`]
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The de-fenced text is not parseable JSON
    #[error("output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Parsed, but the top-level value is not an object
    #[error("output is not a JSON object")]
    NotAnObject,

    /// An object value is not a string
    #[error("value for {key:?} is not a string")]
    NonStringValue { key: String },
}

/// Remove every fence marker and trim surrounding whitespace
///
/// A word after three backticks is only dropped as a language tag when
/// nothing else follows it on the line, so `"```python"` inside a value
/// keeps `python`. Repeats until no triple backtick remains, since deleting
/// one marker can join stray backticks on either side into a new one.
pub fn strip_fences(raw: &str) -> String {
    let mut text = raw.to_string();
    while text.contains(FENCE) {
        text = OPENING_FENCE.replace_all(&text, "").replace(FENCE, "");
    }
    text.trim().to_string()
}

/// De-fence, parse and shape-check raw model output
pub fn normalize(raw: &str) -> Result<OcrExtraction, NormalizationError> {
    let cleaned = strip_fences(raw);

    let object = match serde_json::from_str::<Value>(&cleaned)? {
        Value::Object(object) => object,
        _ => return Err(NormalizationError::NotAnObject),
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(meaning) => Ok((key, meaning)),
            _ => Err(NormalizationError::NonStringValue { key }),
        })
        .collect::<Result<IndexMap<_, _>, _>>()
        .map(OcrExtraction)
}
