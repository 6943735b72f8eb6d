use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pantry-ai")]
#[command(about = "レシートAI解析・賞味期限トラッキングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析サーバのURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レシート画像を解析して品目リストを表示
    Analyze {
        /// レシート画像のパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// フォルダから画像を選んで解析
    Pick {
        /// 画像フォルダ（省略時はカレント）
        folder: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 解析サーバのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
