//! 変換結果の型定義
//!
//! - BlockDescriptor / ProductLine: シートから抽出した中間データ
//! - DailyRecord / ValidationRow / StoreDailyAggregate: 出力シートの各行
//! - ConversionResult: 1回の変換の最終出力

use crate::layout::ColumnFamily;
use serde::{Deserialize, Serialize};

/// 店舗ブロックの位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    pub store_name: String,
    /// マーカーセルのある行
    pub anchor_row: u32,
    pub column_family: ColumnFamily,
    pub col_sequence_no: u32,
    pub col_secondary: Option<u32>,
    pub col_product_name: u32,
    pub col_box_qty: u32,
}

/// ブロック内の商品行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub store_name: String,
    pub product_name: String,
    pub box_qty: i64,
    /// 午後陳列（補助列）
    #[serde(default)]
    pub secondary_text: String,
}

/// 店舗マッピング
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub original_name: String,
    pub code: String,
    pub display_name: String,
}

/// データシートの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// ISO形式の日付 (YYYY-MM-DD)
    pub date: String,
    pub code: String,
    pub display_name: String,
    pub product_name: String,
    pub box_qty: i64,
    #[serde(default)]
    pub secondary_text: String,
    #[serde(default)]
    pub mapping_failed: bool,
}

/// 照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchResult {
    Match,
    Mismatch { diff: i64 },
    NoOriginalData,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Match => write!(f, "일치"),
            MatchResult::Mismatch { diff } => write!(f, "불일치 (차이: {})", diff),
            MatchResult::NoOriginalData => write!(f, "원본 데이터 없음"),
        }
    }
}

/// 検証シートの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRow {
    pub date: String,
    pub day_name: String,
    pub extracted_sum: i64,
    pub original_total: i64,
    /// 店舗小計行から再集計した合計（小計照合が無効なら None）
    pub original_store_sum: Option<i64>,
    pub match_result: MatchResult,
}

/// 日付・店舗ごとの集計
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDailyAggregate {
    pub date: String,
    pub code: String,
    pub display_name: String,
    pub box_sum: i64,
}

/// 変換結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub data: Vec<DailyRecord>,
    pub validation: Vec<ValidationRow>,
    pub store_daily: Vec<StoreDailyAggregate>,
    /// マッピングに失敗した店舗名（重複なし・初出順）
    pub mapping_failures: Vec<String>,
}

impl ConversionResult {
    /// 照合で不一致となった曜日数
    pub fn mismatch_count(&self) -> usize {
        self.validation
            .iter()
            .filter(|v| matches!(v.match_result, MatchResult::Mismatch { .. }))
            .count()
    }
}
