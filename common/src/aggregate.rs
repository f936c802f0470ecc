//! レコード集計
//!
//! データシート用のフラットなレコード列と、(日付, コード, 店舗名) ごとの箱数合計を作る。
//! 集計行の並びはキーの初出順。

use crate::mapping::{MappingFailure, ResolvedStore};
use crate::types::{DailyRecord, ProductLine, StoreDailyAggregate};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct RecordAggregator {
    records: Vec<DailyRecord>,
    failures: Vec<String>,
    seen_failures: HashSet<String>,
}

impl RecordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1ブロック分の商品行を追加
    pub fn push_lines(&mut self, date: &str, store: &ResolvedStore, lines: Vec<ProductLine>) {
        self.records.extend(lines.into_iter().map(|line| DailyRecord {
            date: date.to_string(),
            code: store.code.clone(),
            display_name: store.display_name.clone(),
            product_name: line.product_name,
            box_qty: line.box_qty,
            secondary_text: line.secondary_text,
            mapping_failed: store.failed,
        }));
    }

    pub fn extend_records(&mut self, records: Vec<DailyRecord>) {
        self.records.extend(records);
    }

    /// マッピング失敗を登録（店舗名で重複除去）
    pub fn record_failures<'a>(&mut self, failures: impl IntoIterator<Item = &'a MappingFailure>) {
        for failure in failures {
            if self.seen_failures.insert(failure.store_name.clone()) {
                tracing::warn!(store = %failure.store_name, day = %failure.day, "store name not found in mapping table");
                self.failures.push(failure.store_name.clone());
            }
        }
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// (日付, コード, 店舗名) ごとの箱数合計
    pub fn store_daily(&self) -> Vec<StoreDailyAggregate> {
        let mut index: HashMap<(&str, &str, &str), usize> = HashMap::new();
        let mut rows: Vec<StoreDailyAggregate> = Vec::new();

        for record in &self.records {
            let key = (record.date.as_str(), record.code.as_str(), record.display_name.as_str());
            match index.get(&key) {
                Some(&i) => rows[i].box_sum = rows[i].box_sum.saturating_add(record.box_qty),
                None => {
                    index.insert(key, rows.len());
                    rows.push(StoreDailyAggregate {
                        date: record.date.clone(),
                        code: record.code.clone(),
                        display_name: record.display_name.clone(),
                        box_sum: record.box_qty,
                    });
                }
            }
        }

        rows
    }

    /// (レコード, マッピング失敗店舗名) に分解
    pub fn into_parts(self) -> (Vec<DailyRecord>, Vec<String>) {
        (self.records, self.failures)
    }
}
