use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("ワークブックを開けません ({path}): {message}")]
    WorkbookOpen { path: String, message: String },

    #[error("シート読み込みエラー ({sheet}): {message}")]
    SheetRead { sheet: String, message: String },

    #[error("ワークブックにシートがありません: {0}")]
    EmptyWorkbook(String),

    #[error("入力ファイルが指定されていません: {0}")]
    MissingInput(&'static str),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("変換タスクエラー: {0}")]
    Task(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] delivery_convert_common::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
