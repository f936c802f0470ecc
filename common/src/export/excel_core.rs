//! 変換結果Excelの生成（共通ライブラリ）
//!
//! シート構成:
//! 1. Data: 抽出レコード
//! 2. Validation: 曜日ごとの照合結果
//! 3. Store Summary: 日付・店舗ごとの箱数合計
//! 4. Mapping Failures: マッピング失敗店舗（失敗がある場合のみ）

use crate::error::{Error, Result};
use crate::types::ConversionResult;
use rust_xlsxwriter::*;

pub const SHEET_DATA: &str = "Data";
pub const SHEET_VALIDATION: &str = "Validation";
pub const SHEET_STORE_SUMMARY: &str = "Store Summary";
pub const SHEET_MAPPING_FAILURES: &str = "Mapping Failures";

const DATA_HEADERS: [&str; 6] = ["날짜", "코드", "사업장명", "상품명", "박스수량", "오후진열"];
const STORE_SUMMARY_HEADERS: [&str; 4] = ["날짜", "코드", "사업장명", "박스합계"];

fn xlsx_err(context: &str) -> impl Fn(XlsxError) -> Error + '_ {
    move |e| Error::Export(format!("{}: {}", context, e))
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, format)
            .map_err(xlsx_err("ヘッダー書き込みエラー"))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(xlsx_err("ウィンドウ枠固定エラー"))?;
    Ok(())
}

/// 変換結果をxlsxバッファに書き出す
pub fn generate_result_buffer(result: &ConversionResult) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let failed_format = Format::new().set_font_color(Color::RGB(0xC00000));

    // Data
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_DATA).map_err(xlsx_err("シート名設定エラー"))?;
    write_headers(sheet, &DATA_HEADERS, &header_format)?;
    for (i, record) in result.data.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &record.date).map_err(xlsx_err("データ書き込みエラー"))?;
        sheet.write_string(row, 1, &record.code).map_err(xlsx_err("データ書き込みエラー"))?;
        if record.mapping_failed {
            sheet
                .write_string_with_format(row, 2, &record.display_name, &failed_format)
                .map_err(xlsx_err("データ書き込みエラー"))?;
        } else {
            sheet
                .write_string(row, 2, &record.display_name)
                .map_err(xlsx_err("データ書き込みエラー"))?;
        }
        sheet.write_string(row, 3, &record.product_name).map_err(xlsx_err("データ書き込みエラー"))?;
        sheet.write_number(row, 4, record.box_qty as f64).map_err(xlsx_err("データ書き込みエラー"))?;
        sheet.write_string(row, 5, &record.secondary_text).map_err(xlsx_err("データ書き込みエラー"))?;
    }
    sheet.set_column_width(2, 24).map_err(xlsx_err("列幅設定エラー"))?;
    sheet.set_column_width(3, 30).map_err(xlsx_err("列幅設定エラー"))?;

    // Validation
    let with_store_sum = result.validation.iter().any(|v| v.original_store_sum.is_some());
    let mut validation_headers = vec!["날짜", "요일", "추출 박스", "원본 총계"];
    if with_store_sum {
        validation_headers.push("원본 매장합계");
    }
    validation_headers.push("결과");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_VALIDATION).map_err(xlsx_err("シート名設定エラー"))?;
    write_headers(sheet, &validation_headers, &header_format)?;
    for (i, v) in result.validation.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &v.date).map_err(xlsx_err("検証書き込みエラー"))?;
        sheet.write_string(row, 1, &v.day_name).map_err(xlsx_err("検証書き込みエラー"))?;
        sheet.write_number(row, 2, v.extracted_sum as f64).map_err(xlsx_err("検証書き込みエラー"))?;
        sheet.write_number(row, 3, v.original_total as f64).map_err(xlsx_err("検証書き込みエラー"))?;
        let mut col = 4;
        if with_store_sum {
            sheet
                .write_number(row, col, v.original_store_sum.unwrap_or(0) as f64)
                .map_err(xlsx_err("検証書き込みエラー"))?;
            col += 1;
        }
        sheet
            .write_string(row, col, v.match_result.to_string())
            .map_err(xlsx_err("検証書き込みエラー"))?;
    }
    sheet.set_column_width(validation_headers.len() as u16 - 1, 20).map_err(xlsx_err("列幅設定エラー"))?;

    // Store Summary
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_STORE_SUMMARY).map_err(xlsx_err("シート名設定エラー"))?;
    write_headers(sheet, &STORE_SUMMARY_HEADERS, &header_format)?;
    for (i, s) in result.store_daily.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &s.date).map_err(xlsx_err("集計書き込みエラー"))?;
        sheet.write_string(row, 1, &s.code).map_err(xlsx_err("集計書き込みエラー"))?;
        sheet.write_string(row, 2, &s.display_name).map_err(xlsx_err("集計書き込みエラー"))?;
        sheet.write_number(row, 3, s.box_sum as f64).map_err(xlsx_err("集計書き込みエラー"))?;
    }
    sheet.set_column_width(2, 24).map_err(xlsx_err("列幅設定エラー"))?;

    // Mapping Failures（失敗がある場合のみ）
    if !result.mapping_failures.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_MAPPING_FAILURES).map_err(xlsx_err("シート名設定エラー"))?;
        write_headers(sheet, &["원본 사업장명"], &header_format)?;
        for (i, name) in result.mapping_failures.iter().enumerate() {
            sheet
                .write_string(i as u32 + 1, 0, name)
                .map_err(xlsx_err("マッピング失敗書き込みエラー"))?;
        }
        sheet.set_column_width(0, 30).map_err(xlsx_err("列幅設定エラー"))?;
    }

    workbook.save_to_buffer().map_err(xlsx_err("Excel保存エラー"))
}
