use crate::error::{ConvertError, Result};
use crate::export::is_output_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls"];

fn is_workbook_extension(ext: &str) -> bool {
    WORKBOOK_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// フォルダ直下の原本配送表を列挙
///
/// マッピング表・Excelのロックファイル（~$）・過去の変換結果は除外する。
pub fn scan_origin_files(folder: &Path, mapping: &Path, output_suffix: &str) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ConvertError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(ext) = path.extension() else {
            continue;
        };
        if !is_workbook_extension(&ext.to_string_lossy()) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if file_name.starts_with("~$") || is_output_file(&file_name, output_suffix) {
            continue;
        }
        if same_file(path, mapping) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    // ファイル名でソート
    files.sort();

    Ok(files)
}
