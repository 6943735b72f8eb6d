//! 解析サーバ応答のパーサー
//!
//! 成功応答のJSON配列をPantryItemにデコードし、
//! 失敗応答からエラーメッセージを抽出する

use crate::error::{Error, Result};
use crate::types::PantryItem;

/// 成功応答のボディをパース
///
/// ボディ全体がPantryItemのJSON配列であることを要求する。
/// 1要素でもデコードに失敗すれば全体を失敗として扱う
/// （部分成功はない）。空配列は有効な結果。順序は保持される。
///
/// # Arguments
/// * `body` - 応答ボディ文字列
///
/// # Returns
/// * `Ok(Vec<PantryItem>)` - パース成功（応答順のまま）
/// * `Err` - 配列でない、または要素が期待した形でない場合
pub fn parse_items(body: &str) -> Result<Vec<PantryItem>> {
    let items: Vec<PantryItem> = serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("解析結果のJSONパースエラー: {}", e)))?;
    Ok(items)
}

/// 失敗応答のボディからエラーメッセージを抽出
///
/// 解析サーバはFastAPI形式の `{"detail": "..."}` を返す。
/// `detail` / `message` / `error` キーの順で文字列を探し、
/// 見つからなければNone（呼び出し側が汎用メッセージにフォールバック）。
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let map = value.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(text) = map.get(key).and_then(|v| v.as_str()) {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }

    None
}
