//! ワークブック読み込み（calamine）
//!
//! xlsx/xlsm/xls/ods を自動判別し、シートを `MemoryGrid` に変換する。
//! セル位置はワークブック上の絶対位置（A1 = (1, 1)）のまま保持する。

use crate::error::{ConvertError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use delivery_convert_common::layout::WEEKDAY_LABELS;
use delivery_convert_common::{CellValue, MappingTable, MemoryGrid, WeeklyWorkbook};
use std::io::Cursor;

fn to_cell_value(value: &Data) -> CellValue {
    match value {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // 日付はシリアル値のまま
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        _ => CellValue::Empty,
    }
}

/// calamine の Range を絶対位置のグリッドに変換
pub fn range_to_grid(range: &Range<Data>) -> MemoryGrid {
    let mut grid = MemoryGrid::new();
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    for (row, col, value) in range.used_cells() {
        let cell = to_cell_value(value);
        if !matches!(cell, CellValue::Empty) {
            grid.set(start_row + row as u32 + 1, start_col + col as u32 + 1, cell);
        }
    }

    grid
}

/// 指定シートを読み込む（`filter` が false のシートは読まない）
fn read_sheets(
    bytes: Vec<u8>,
    source: &str,
    filter: impl Fn(usize, &str) -> bool,
) -> Result<Vec<(String, MemoryGrid)>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        ConvertError::WorkbookOpen { path: source.to_string(), message: e.to_string() }
    })?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(ConvertError::EmptyWorkbook(source.to_string()));
    }

    let mut sheets = Vec::new();
    for (idx, name) in sheet_names.iter().enumerate() {
        if !filter(idx, name) {
            continue;
        }
        let range = workbook.worksheet_range(name).map_err(|e| ConvertError::SheetRead {
            sheet: name.clone(),
            message: e.to_string(),
        })?;
        sheets.push((name.trim().to_string(), range_to_grid(&range)));
    }

    Ok(sheets)
}

/// 原本配送表を読み込む（曜日シートのみ）
pub fn load_origin(file_name: &str, bytes: Vec<u8>) -> Result<WeeklyWorkbook> {
    let sheets = read_sheets(bytes, file_name, |_, name| WEEKDAY_LABELS.contains(&name.trim()))?;
    tracing::debug!(file_name, sheets = sheets.len(), "origin workbook loaded");
    Ok(WeeklyWorkbook::new(file_name, sheets))
}

/// マッピング表を読み込む（1枚目のシートのみ）
pub fn load_mapping(file_name: &str, bytes: Vec<u8>) -> Result<MappingTable> {
    let mut sheets = read_sheets(bytes, file_name, |idx, _| idx == 0)?;
    let (_, grid) = sheets
        .pop()
        .ok_or_else(|| ConvertError::EmptyWorkbook(file_name.to_string()))?;

    let table = MappingTable::from_grid(&grid)?;
    tracing::debug!(file_name, entries = table.len(), "mapping table loaded");
    Ok(table)
}
