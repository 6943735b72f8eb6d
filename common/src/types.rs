//! 解析結果と送信状態の型定義
//!
//! CLIと他フロントエンドで共有される型:
//! - PantryItem: レシートから検出された購入品1件
//! - Phase / SubmissionState: 送信ステートマシンの状態
//! - SelectedFile: 選択中の画像ファイル参照

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// レシートから検出された購入品1件
///
/// 解析サーバのJSON配列の1要素。バックエンドは `item` キーで
/// 品名を返すためエイリアスで受ける。`storage` や `reasoning` など
/// 未知のキーは無視する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryItem {
    /// 品名
    #[serde(alias = "item")]
    pub name: String,

    /// 分類（固定の列挙ではなくサーバが返す自由テキスト）
    pub category: String,

    /// 賞味期限までの推定日数（負値はデコードエラー）
    #[serde(alias = "shelfLifeDays")]
    pub shelf_life_days: u32,

    /// 数量（省略時は不明。0はデコードエラー）
    #[serde(default)]
    pub quantity: Option<NonZeroU32>,
}

impl PantryItem {
    /// 表示用の数量（不明なら1）
    pub fn display_quantity(&self) -> u32 {
        self.quantity.map(NonZeroU32::get).unwrap_or(1)
    }
}

/// 送信ステートマシンのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Uploading => "uploading",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

/// 選択中の画像ファイル参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedFile {
    /// パスからファイル参照を作成（表示名はファイル名部分）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }
}

impl AsRef<Path> for SelectedFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// 送信状態
///
/// コントローラだけが書き換える単一の状態。レンダリング層は
/// このスナップショットを読み取り専用で描画する。
///
/// 不変条件:
/// - `items` が空でないのは `phase == Succeeded` のときだけ
/// - `error_message` が `Some` なのは `phase == Failed` のときだけ
/// - `progress_percent` は常に 0..=100
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    /// 選択中のファイル（最大1件）
    pub selected_file: Option<SelectedFile>,
    /// ステートマシンのフェーズ
    pub phase: Phase,
    /// リクエスト受付からセトリング完了までtrue（再入ガード兼コントロール無効化）
    pub busy: bool,
    /// 疑似進捗 0..=100
    pub progress_percent: u8,
    /// 検出された購入品（応答順のまま）
    pub items: Vec<PantryItem>,
    /// 失敗時のメッセージ
    pub error_message: Option<String>,
}
