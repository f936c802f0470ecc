//! 変換パイプライン
//!
//! 曜日シートごとに「ブロック検出 → 商品抽出 → 店舗名解決」を行い、
//! 全曜日分を結合してから照合・集計する。
//! 曜日シート間で共有する可変状態はないので、シート単位で並列化できる。

use crate::aggregate::RecordAggregator;
use crate::date::{default_base_date, format_date, resolve_base_date, week_dates};
use crate::extractor::extract_products;
use crate::grid::MemoryGrid;
use crate::layout::{ColumnFamily, DEFAULT_MAX_PRODUCTS};
use crate::locator::find_blocks;
use crate::mapping::{MappingFailure, MappingTable, NameMapper};
use crate::reconcile::{build_validation_row, read_sheet_totals, SheetTotals};
use crate::types::{ConversionResult, DailyRecord};
use chrono::NaiveDate;

/// 抽出設定
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// 走査する列ファミリー（この順で出力される）
    pub families: Vec<ColumnFamily>,
    pub max_products: usize,
    /// ファイル名から日付が取れないときの基準日
    pub default_base_date: NaiveDate,
    /// 店舗小計行による照合を行う
    pub reconcile_store_subtotals: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            families: ColumnFamily::DEFAULTS.to_vec(),
            max_products: DEFAULT_MAX_PRODUCTS,
            default_base_date: default_base_date(),
            reconcile_store_subtotals: true,
        }
    }
}

/// 原本ワークブック（シート名 → グリッド）
#[derive(Debug, Clone, Default)]
pub struct WeeklyWorkbook {
    pub file_name: String,
    sheets: Vec<(String, MemoryGrid)>,
}

impl WeeklyWorkbook {
    pub fn new(file_name: impl Into<String>, sheets: Vec<(String, MemoryGrid)>) -> Self {
        Self { file_name: file_name.into(), sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&MemoryGrid> {
        self.sheets.iter().find(|(n, _)| n == name).map(|(_, g)| g)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(n, _)| n.as_str())
    }
}

/// 変換の入力一式
#[derive(Debug, Clone)]
pub struct ConversionInput {
    pub workbook: WeeklyWorkbook,
    pub mapping: MappingTable,
    pub settings: ExtractionSettings,
}

/// 1曜日分の処理単位
#[derive(Debug, Clone, Copy)]
pub struct DayTask<'a> {
    pub label: &'static str,
    pub date: NaiveDate,
    pub grid: &'a MemoryGrid,
}

/// 曜日シートを固定順に並べる（存在しない曜日は飛ばす）
pub fn plan_days(input: &ConversionInput) -> Vec<DayTask<'_>> {
    let base = resolve_base_date(&input.workbook.file_name, input.settings.default_base_date);

    week_dates(base)
        .into_iter()
        .filter_map(|(label, date)| {
            input.workbook.sheet(label).map(|grid| DayTask { label, date, grid })
        })
        .collect()
}

/// 1曜日分の抽出結果
#[derive(Debug, Clone)]
pub struct DayExtraction {
    pub label: &'static str,
    pub date: String,
    pub block_count: usize,
    pub records: Vec<DailyRecord>,
    pub failures: Vec<MappingFailure>,
    pub totals: SheetTotals,
}

/// 1曜日シートを処理
pub fn process_day(task: &DayTask<'_>, mapping: &MappingTable, settings: &ExtractionSettings) -> DayExtraction {
    let date = format_date(task.date);
    let blocks = find_blocks(task.grid, &settings.families);
    let mut mapper = NameMapper::new(mapping);
    let mut aggregator = RecordAggregator::new();

    for block in &blocks {
        let store = mapper.resolve(task.label, &block.store_name);
        let lines = extract_products(task.grid, block, settings.max_products);
        aggregator.push_lines(&date, &store, lines);
    }

    let totals = read_sheet_totals(task.grid, &settings.families, settings.reconcile_store_subtotals);
    let (records, _) = aggregator.into_parts();

    tracing::debug!(
        day = task.label,
        date = %date,
        blocks = blocks.len(),
        records = records.len(),
        "weekday sheet extracted"
    );

    DayExtraction {
        label: task.label,
        date,
        block_count: blocks.len(),
        records,
        failures: mapper.into_failures(),
        totals,
    }
}

/// 曜日ごとの結果を結合して最終結果を作る
///
/// `days` は曜日の固定順に並んでいること。
pub fn assemble(days: Vec<DayExtraction>) -> ConversionResult {
    let mut aggregator = RecordAggregator::new();
    let mut day_totals = Vec::with_capacity(days.len());

    for day in days {
        aggregator.record_failures(&day.failures);
        aggregator.extend_records(day.records);
        day_totals.push((day.label, day.date, day.totals));
    }

    let validation = day_totals
        .iter()
        .map(|(label, date, totals)| build_validation_row(aggregator.records(), date, label, *totals))
        .collect();
    let store_daily = aggregator.store_daily();
    let (data, mapping_failures) = aggregator.into_parts();

    ConversionResult { data, validation, store_daily, mapping_failures }
}

/// 変換バックエンド
///
/// 実装はすべて同じ入力から構造的に同一の結果を返すこと。
pub trait Converter: Send + Sync {
    fn name(&self) -> &'static str;

    fn convert(&self, input: &ConversionInput) -> ConversionResult;
}

/// 逐次処理のリファレンス実装
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceConverter;

impl Converter for ReferenceConverter {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn convert(&self, input: &ConversionInput) -> ConversionResult {
        let days = plan_days(input)
            .iter()
            .map(|task| process_day(task, &input.mapping, &input.settings))
            .collect();
        assemble(days)
    }
}
