//! ファイル名からの基準日算出
//!
//! 例: `2026년 1월 주간배송표 (1.12~1.16).xlsx` → 2026-01-12
//!
//! 年は「N년 M월」から、月日は「(M.D~M.D)」の開始側から取る。
//! どちらかが見つからない、または日付として成立しない場合はデフォルト日付を使う。

use crate::error::{Error, Result};
use crate::layout::WEEKDAY_LABELS;
use chrono::{Days, NaiveDate};
use regex::Regex;

/// デフォルト基準日
pub const DEFAULT_BASE_DATE: (i32, u32, u32) = (2026, 1, 1);

/// ISO形式の日付文字列を解釈
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("{}: {}", value, e)))
}

pub fn default_base_date() -> NaiveDate {
    let (y, m, d) = DEFAULT_BASE_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// ファイル名から基準日（月曜日）を求める
pub fn resolve_base_date(file_name: &str, fallback: NaiveDate) -> NaiveDate {
    lazy_static::lazy_static! {
        static ref RANGE_RE: Regex = Regex::new(r"\((\d+)\.(\d+)~(\d+)\.(\d+)\)").unwrap();
        static ref YEAR_MONTH_RE: Regex = Regex::new(r"(\d+)년\s*(\d+)월").unwrap();
    }

    let (Some(range), Some(year_month)) = (
        RANGE_RE.captures(file_name),
        YEAR_MONTH_RE.captures(file_name),
    ) else {
        tracing::debug!(file_name, "date pattern not found, using default base date");
        return fallback;
    };

    let year = year_month[1].parse::<i32>().ok().map(|y| if y < 100 { y + 2000 } else { y });
    let month = range[1].parse::<u32>().ok();
    let day = range[2].parse::<u32>().ok();

    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| {
            tracing::debug!(file_name, y, m, d, "invalid calendar date, using default base date");
            fallback
        }),
        _ => fallback,
    }
}

/// 曜日ラベルと日付の組（5日分）
pub fn week_dates(base: NaiveDate) -> Vec<(&'static str, NaiveDate)> {
    WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let date = base.checked_add_days(Days::new(i as u64)).unwrap_or(base);
            (label, date)
        })
        .collect()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
