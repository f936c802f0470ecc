use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "delivery-convert")]
#[command(about = "週間配送表を店舗別データに変換し、原本の合計と照合するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 配送表を1件変換
    Convert {
        /// 原本の週間配送表 (xlsx/xls)
        #[arg(required = true)]
        origin: PathBuf,

        /// 店舗マッピング表
        #[arg(short, long, required = true)]
        mapping: PathBuf,

        /// 出力ディレクトリ（デフォルト: 原本と同じ場所）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 実行バックエンド (auto/reference/parallel)
        #[arg(long)]
        backend: Option<BackendMode>,

        /// 並列バックエンドのスレッド数
        #[arg(long)]
        threads: Option<usize>,

        /// 1ブロックあたりの最大商品行数
        #[arg(long)]
        max_products: Option<usize>,

        /// 変換結果をJSONでも保存
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// フォルダ内の配送表を一括変換
    Batch {
        /// 配送表のあるフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// 店舗マッピング表
        #[arg(short, long, required = true)]
        mapping: PathBuf,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 実行バックエンド (auto/reference/parallel)
        #[arg(long)]
        backend: Option<BackendMode>,
    },

    /// ブロック検出結果と照合結果を表示（ファイルは出力しない）
    Inspect {
        /// 原本の週間配送表
        #[arg(required = true)]
        origin: PathBuf,

        /// 店舗マッピング表（省略時は全店舗がマッピング失敗扱い）
        #[arg(short, long)]
        mapping: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト基準日 (YYYY-MM-DD)
        #[arg(long)]
        set_default_date: Option<String>,

        /// 最大商品行数
        #[arg(long)]
        set_max_products: Option<usize>,

        /// デフォルトのバックエンド
        #[arg(long)]
        set_backend: Option<BackendMode>,
    },
}

/// 実行バックエンドの選択
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// 並列を試し、使えなければリファレンス
    #[default]
    Auto,
    /// 逐次処理
    Reference,
    /// 曜日シート単位の並列処理
    Parallel,
}

impl std::str::FromStr for BackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(BackendMode::Auto),
            "reference" | "ref" | "seq" => Ok(BackendMode::Reference),
            "parallel" | "par" => Ok(BackendMode::Parallel),
            _ => Err(format!("Unknown backend: {}. Use auto, reference, or parallel", s)),
        }
    }
}

impl std::fmt::Display for BackendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendMode::Auto => write!(f, "auto"),
            BackendMode::Reference => write!(f, "reference"),
            BackendMode::Parallel => write!(f, "parallel"),
        }
    }
}
