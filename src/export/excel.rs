//! 変換結果の書き出し
//!
//! ワークブックは全体をメモリ上で生成してから書き込む（途中で失敗したら何も残さない）。

use crate::error::{ConvertError, Result};
use delivery_convert_common::export::excel_core::generate_result_buffer;
use delivery_convert_common::ConversionResult;
use std::path::Path;

pub fn encode_result(result: &ConversionResult) -> Result<Vec<u8>> {
    generate_result_buffer(result).map_err(|e| ConvertError::ExcelGeneration(e.to_string()))
}

pub async fn write_result(output_path: &Path, bytes: Vec<u8>) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(output_path, bytes).await?;
    Ok(())
}

pub async fn write_json(output_path: &Path, result: &ConversionResult) -> Result<()> {
    let json = serde_json::to_vec_pretty(result)?;
    tokio::fs::write(output_path, json).await?;
    Ok(())
}
