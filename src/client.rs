//! 解析サーバクライアント
//!
//! レシート画像1枚をmultipartでPOSTし、PantryItemの配列を受け取る。
//! 成功ステータス以外は一律に失敗（ステータスコードで分岐しない）。

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use pantry_ai_common::{extract_error_message, parse_items, PantryItem, SelectedFile};

use crate::error::{PantryAiError, Result};

/// アップロードするフォームのフィールド名（バックエンドと固定の取り決め）
const UPLOAD_FIELD: &str = "file";

/// 拡張子からMIMEタイプを推定（不明ならJPEG扱い）
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// 解析サーバへのHTTPクライアント
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// レシート画像を解析
    ///
    /// 画像を読み込み、`{endpoint}/upload` へ単一パートのフォームで送る。
    /// 追加ヘッダや認証、クエリパラメータは付けない。
    ///
    /// # Returns
    /// * `Ok(Vec<PantryItem>)` - 応答順のままの品目リスト（空も有効）
    /// * `Err` - 読み込み失敗、通信失敗、非成功ステータス、デコード失敗
    pub async fn analyze(&self, file: &SelectedFile) -> Result<Vec<PantryItem>> {
        let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
            PantryAiError::ImageLoad(format!("{}: {}", file.path.display(), e))
        })?;

        let part = Part::bytes(bytes)
            .file_name(file.file_name.clone())
            .mime_str(mime_type_for(&file.path))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = format!("{}/upload", self.endpoint);
        debug!(url = %url, file = %file.file_name, "解析リクエスト送信");

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "応答受信");

        if !status.is_success() {
            // メッセージはサーバ提供のものを優先し、なければ汎用文
            let message = extract_error_message(&body).unwrap_or_else(|| {
                format!("解析サーバがエラーを返しました (HTTP {})", status.as_u16())
            });
            return Err(PantryAiError::ApiCall(message));
        }

        Ok(parse_items(&body)?)
    }
}
