//! 店舗名マッピング
//!
//! マッピング表（1枚目のシート、ヘッダー行あり）から
//! 原本の店舗名 → (コード, システム上の店舗名) を引く。
//! 見つからない店舗は失敗マーカーで置き換え、変換自体は継続する。

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::types::MappingEntry;
use std::collections::HashMap;

/// キー列ヘッダー
pub const HEADER_ORIGINAL_NAME: &str = "원본 사업장명";
pub const HEADER_CODE: &str = "코드";
pub const HEADER_DISPLAY_NAME: &str = "사업장명";

/// マッピング失敗時のコード
pub const FAILURE_CODE: &str = "MAPPING_FAILED";
/// マッピング失敗時の店舗名プレフィックス
pub const FAILURE_PREFIX: &str = "[매핑실패] ";

/// マッピング表
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, MappingEntry>,
}

impl MappingTable {
    pub fn from_entries(entries: impl IntoIterator<Item = MappingEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.original_name.clone(), e))
            .collect();
        Self { entries }
    }

    /// シートから読み込み
    ///
    /// 最初の空でない行をヘッダーとみなす。キー列が空の行は無視する。
    pub fn from_grid<G: Grid + ?Sized>(grid: &G) -> Result<Self> {
        let (max_row, max_col) = grid.occupied_range();

        let header_row = (1..=max_row)
            .find(|&row| (1..=max_col).any(|col| grid.cell(row, col).is_some_and(|v| !v.is_empty())))
            .ok_or_else(|| Error::MappingSheet("シートが空です".into()))?;

        let mut headers: HashMap<String, u32> = HashMap::new();
        for col in 1..=max_col {
            let header = grid.text(header_row, col).trim().to_string();
            if !header.is_empty() {
                headers.entry(header).or_insert(col);
            }
        }

        let key_col = headers.get(HEADER_ORIGINAL_NAME).copied().ok_or_else(|| {
            Error::MappingSheet(format!("「{}」列が見つかりません", HEADER_ORIGINAL_NAME))
        })?;
        let code_col = headers.get(HEADER_CODE).copied();
        let name_col = headers.get(HEADER_DISPLAY_NAME).copied();

        let read = |row: u32, col: Option<u32>| {
            col.map(|c| grid.text(row, c).trim().to_string()).unwrap_or_default()
        };

        let mut entries = HashMap::new();
        for row in (header_row + 1)..=max_row {
            let original_name = grid.text(row, key_col).trim().to_string();
            if original_name.is_empty() {
                continue;
            }

            let entry = MappingEntry {
                original_name: original_name.clone(),
                code: read(row, code_col),
                display_name: read(row, name_col),
            };
            if entries.insert(original_name, entry).is_some() {
                tracing::debug!(row, "duplicate mapping key, later row wins");
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, original_name: &str) -> Option<&MappingEntry> {
        self.entries.get(original_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 解決済みの店舗情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStore {
    pub code: String,
    pub display_name: String,
    pub failed: bool,
}

/// マッピング失敗の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFailure {
    pub day: String,
    pub store_name: String,
}

/// 店舗名リゾルバ
///
/// 失敗はここに溜め、最後に集計側で重複を除く。
pub struct NameMapper<'a> {
    table: &'a MappingTable,
    failures: Vec<MappingFailure>,
}

impl<'a> NameMapper<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        Self { table, failures: Vec::new() }
    }

    pub fn resolve(&mut self, day: &str, store_name: &str) -> ResolvedStore {
        match self.table.get(store_name) {
            Some(entry) => ResolvedStore {
                code: entry.code.clone(),
                display_name: entry.display_name.clone(),
                failed: false,
            },
            None => {
                self.failures.push(MappingFailure {
                    day: day.to_string(),
                    store_name: store_name.to_string(),
                });
                ResolvedStore {
                    code: FAILURE_CODE.to_string(),
                    display_name: format!("{}{}", FAILURE_PREFIX, store_name),
                    failed: true,
                }
            }
        }
    }

    pub fn failures(&self) -> &[MappingFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<MappingFailure> {
        self.failures
    }
}
