pub mod excel;

use regex::Regex;
use std::path::{Path, PathBuf};

/// 原本ファイル名から出力ファイル名を作る
///
/// 末尾のスプレッドシート拡張子（.xlsx/.xlsm/.xls）をサフィックスで置き換える。
/// 拡張子がなければサフィックスを付け足す。
pub fn output_file_name(origin_name: &str, suffix: &str) -> String {
    lazy_static::lazy_static! {
        static ref EXT_RE: Regex = Regex::new(r"(?i)\.(xlsx|xlsm|xls)$").unwrap();
    }

    format!("{}{}", EXT_RE.replace(origin_name, ""), suffix)
}

/// 出力先パス（出力ディレクトリ省略時は原本と同じ場所）
pub fn output_path_for(origin: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let origin_name = origin
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| origin.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    dir.join(output_file_name(&origin_name, suffix))
}

/// 出力ファイル名か（バッチ処理で再変換しないため）
pub fn is_output_file(name: &str, suffix: &str) -> bool {
    name.to_lowercase().ends_with(&suffix.to_lowercase())
}
