//! Date resolution for extractor `date` fields.
//!
//! Accepted shapes:
//!   2025-11-26          ISO shape, used as-is (even 2025-02-30)
//!   26/11/25            day/month/two-digit year, read as 20YY
//!   26/11/2025  26-11-2025  26.11.25

use anyhow::Result;
use cashcast_core::to_iso_date;
use chrono::NaiveDate;
use regex::Regex;

/// Compiled date patterns. Build once and reuse across records.
#[derive(Debug, Clone)]
pub struct DateResolver {
    iso_re: Regex,
    dmy_re: Regex,
}

impl DateResolver {
    pub fn new() -> Result<Self> {
        Ok(Self {
            iso_re: Regex::new(r"^\d{4}-\d{2}-\d{2}$")?,
            dmy_re: Regex::new(concat!(
                r"^(?P<day>\d{1,2})[/.\-]",
                r"(?P<month>\d{1,2})[/.\-]",
                r"(?P<year>\d{2}|\d{4})$"
            ))?,
        })
    }

    /// Resolve a non-blank `date` field to a `YYYY-MM-DD` day key.
    /// Unparseable input yields `None`.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if self.iso_re.is_match(s) {
            return Some(s.to_string());
        }

        let caps = self.dmy_re.captures(s)?;
        let day: u32 = caps["day"].parse().ok()?;
        let month: u32 = caps["month"].parse().ok()?;
        let year_str = &caps["year"];
        let mut year: i32 = year_str.parse().ok()?;
        if year_str.len() == 2 {
            year += 2000;
        }

        NaiveDate::from_ymd_opt(year, month, day).map(to_iso_date)
    }
}
