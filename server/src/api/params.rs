//! Request parameter helpers shared by the handlers.

use crate::error::{ApiError, ApiResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// Rejects an absent value with a 400 naming the field.
pub fn required<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::bad_request(format!("{field} is required")))
}

/// Like [`required`], but blank strings count as absent.
pub fn required_text(value: Option<String>, field: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("{field} is required"))),
    }
}

/// Accepts `YYYY-MM-DD` as well as a full timestamp, keeping only the date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub mod lenient_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_date(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
        }
    }
}

/// Half-open `[first day, first day of next month)` range.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

/// Resolves optional `year`/`month` query values into a month range.
pub fn required_month(year: Option<i32>, month: Option<u32>) -> ApiResult<(NaiveDate, NaiveDate)> {
    let year = required(year, "year")?;
    let month = required(month, "month")?;
    month_range(year, month).ok_or_else(|| ApiError::bad_request("Invalid month or year"))
}

/// Whitespace-separated search tokens.
pub fn keywords(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// `LIKE` pattern matching `word` anywhere, with wildcards in `word` escaped by `\`.
pub fn contains_pattern(word: &str) -> String {
    let mut pattern = String::with_capacity(word.len() + 2);
    pattern.push('%');
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// 1-based page number and row offset for `per_page` rows per page.
/// Offsets past the end saturate rather than wrap.
pub fn page_offset(page: Option<i64>, per_page: i64) -> (i64, i64) {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    (page, (page - 1).saturating_mul(per_page))
}

/// A single id or a list of ids.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OneOrMany {
    One(i32),
    Many(Vec<i32>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<i32> {
        match self {
            OneOrMany::One(id) => vec![id],
            OneOrMany::Many(ids) => ids,
        }
    }
}
