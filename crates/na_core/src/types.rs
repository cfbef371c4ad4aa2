use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::Error;

/// Identifier of an article in the document store.
///
/// The store addresses records with 12-byte object ids, written as 24
/// hexadecimal characters. Anything else is rejected before a lookup is made.
/// The id keeps the spelling it was parsed from; comparison ignores case.
#[derive(Debug, Clone)]
pub struct ArticleId(String);

impl ArticleId {
    pub const LEN: usize = 24;

    pub fn parse(raw: &str) -> crate::Result<Self> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidId(format!(
                "'{}' is not a valid {}-character hex object id",
                raw,
                Self::LEN
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used as the storage key.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for ArticleId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ArticleId {}

impl Hash for ArticleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl FromStr for ArticleId {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ArticleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One element of a content group. Only text elements carry article body;
/// everything else (images, captions encoded as objects, nulls) is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentElement {
    Text(String),
    Other(Value),
}

impl ContentElement {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentElement::Text(text) => Some(text),
            ContentElement::Other(_) => None,
        }
    }
}

impl From<&str> for ContentElement {
    fn from(text: &str) -> Self {
        ContentElement::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDocument {
    pub id: ArticleId,
    /// Ordered groups of ordered lines.
    #[serde(default)]
    pub content_col: Vec<Vec<ContentElement>>,
    #[serde(default)]
    pub serving_date: Option<NaiveDate>,
    #[serde(default)]
    pub gpt_result: Option<AnalysisResult>,
}

impl ArticleDocument {
    pub fn new(id: ArticleId, content_col: Vec<Vec<ContentElement>>) -> Self {
        Self {
            id,
            content_col,
            serving_date: None,
            gpt_result: None,
        }
    }

    pub fn with_serving_date(mut self, date: NaiveDate) -> Self {
        self.serving_date = Some(date);
        self
    }
}

/// Decoded model answer for the structured templates.
///
/// Only decoding is enforced: a missing section is kept as `null`, and keys
/// the model added on its own are carried along in `extra` so the persisted
/// record is the full object the model returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: Value,
    #[serde(default)]
    pub keywords: Value,
    #[serde(default)]
    pub quizzes: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let summary = object.remove("summary").unwrap_or(Value::Null);
        let keywords = object.remove("keywords").unwrap_or(Value::Null);
        let quizzes = object.remove("quizzes").unwrap_or(Value::Null);
        Self {
            summary,
            keywords,
            quizzes,
            extra: object,
        }
    }
}

/// Serving dates are stored and queried as `YYYY-MM-DD`.
pub fn format_serving_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
