use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One SMS as handed over by the extractor: message id, the extractor's raw
/// text and the receipt time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: String,
    /// Extractor output. Expected to be a JSON object, not guaranteed.
    #[serde(alias = "extractedJson")]
    pub extracted: String,
    /// Epoch milliseconds the SMS was received
    #[serde(default, alias = "timestampMillis")]
    pub timestamp_ms: Option<i64>,
}

impl RawMessage {
    pub fn new(id: impl Into<String>, extracted: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extracted: extracted.into(),
            timestamp_ms: None,
        }
    }

    pub fn with_timestamp(mut self, millis: i64) -> Self {
        self.timestamp_ms = Some(millis);
        self
    }
}

/// Split messages into the `id -> text` and `id -> timestamp` maps the
/// normalizer consumes. A repeated id keeps the last message.
pub fn into_maps(messages: &[RawMessage]) -> (HashMap<String, String>, HashMap<String, i64>) {
    let mut records = HashMap::with_capacity(messages.len());
    let mut timestamps = HashMap::with_capacity(messages.len());

    for m in messages {
        records.insert(m.id.clone(), m.extracted.clone());
        match m.timestamp_ms {
            Some(ts) => {
                timestamps.insert(m.id.clone(), ts);
            }
            None => {
                timestamps.remove(&m.id);
            }
        }
    }

    (records, timestamps)
}
