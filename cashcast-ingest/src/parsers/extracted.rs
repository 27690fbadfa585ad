//! Parse one extractor reply into typed fields.
//!
//! The extractor is a language model, so its output is untrusted text:
//!   {"amount": 450.0, "type": "debit", "date": "26/11/25", "merchant": "Swiggy", "balance": 12034.5}
//! Replies are sometimes wrapped in a Markdown code fence, and conversational
//! replies ("This is not a transaction") carry no amount at all.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

/// Fields of a reply that passed the object + numeric amount gate
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecord {
    /// Absolute value of the reported amount
    pub amount: f64,
    pub kind: Option<String>,
    /// Raw `date` text; blank values are dropped
    pub date: Option<String>,
    /// Present even when blank; only a missing or non-string merchant is `None`
    pub merchant: Option<String>,
    pub balance: Option<f64>,
}

/// Parse extractor text. Anything that is not a JSON object with a numeric
/// `amount` is an error; callers treat that as "skip this record".
pub fn parse_extracted(raw: &str) -> Result<ExtractedRecord> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body).context("not valid JSON")?;

    let Value::Object(obj) = value else {
        bail!("JSON is not an object");
    };

    let amount = obj
        .get("amount")
        .and_then(as_number)
        .context("missing or non-numeric amount")?;

    Ok(ExtractedRecord {
        amount: amount.abs(),
        kind: string_field(&obj, "type"),
        date: string_field(&obj, "date"),
        merchant: match obj.get("merchant") {
            Some(Value::String(m)) => Some(m.trim().to_string()),
            _ => None,
        },
        balance: obj.get("balance").and_then(as_number),
    })
}

/// Drop a surrounding ```` ```json ```` fence if present.
fn strip_code_fence(raw: &str) -> &str {
    let s = raw.trim();
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Optional language tag on the opening line
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// JSON numbers, or strings holding a plain number ("1250.00", "1,250.00").
fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => ungroup(s.trim())?.parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Remove digit-group separators, rejecting misplaced commas like "1,2,5".
fn ungroup(s: &str) -> Option<String> {
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let (int_part, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    if frac.is_some_and(|f| f.contains(',')) {
        return None;
    }
    let digits = int_part.strip_prefix(['-', '+']).unwrap_or(int_part);

    let groups: Vec<&str> = digits.split(',').collect();
    if !groups.iter().all(|g| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let (lead, rest) = groups.split_first()?;
    let (last, middle) = rest.split_last()?;

    // 1,250,000 or lakh-style 12,50,000
    let western = lead.len() <= 3 && rest.iter().all(|g| g.len() == 3);
    let lakh = lead.len() <= 2 && last.len() == 3 && middle.iter().all(|g| g.len() == 2);
    (western || lakh).then(|| s.replace(',', ""))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
