//! アップロード/解析コントローラ
//!
//! 送信ステートマシン本体。状態は単一のSubmissionStateに集約し、
//! tokio::sync::watch で公開する。レンダリング層は購読（subscribe）
//! またはスナップショット（snapshot）で読み取るだけで、
//! 書き換えるのはこのコントローラだけ。
//!
//! watchのsenderが更新を直列化するため、ティッカーと応答処理が
//! 同じ状態を同時に書き換えることはない（発火の相対順序は保証しない）。

mod ticker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use pantry_ai_common::{Phase, SelectedFile, SubmissionState};

use crate::client::AnalysisClient;
use crate::error::Result;
use ticker::ProgressTicker;

/// コントローラ設定
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// 解析サーバのベースURL
    pub endpoint: String,
    /// リクエストタイムアウト
    pub timeout: Duration,
    /// 疑似進捗ティッカーの周期
    pub tick_period: Duration,
    /// ティッカーの頭打ち値（100未満。実際の進捗は不明なため）
    pub progress_cap: u8,
    /// 完了後にビジーを解除するまでの猶予
    ///
    /// 100%（または失敗時の0%）表示を一瞬でも知覚できるようにする
    /// 表示上の定数。成功・失敗どちらでも同じ値を使う。
    pub settle_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            endpoint: crate::config::DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(120),
            tick_period: Duration::from_millis(500),
            progress_cap: 90,
            settle_delay: Duration::from_millis(500),
        }
    }
}

/// アップロード/解析コントローラ
///
/// 公開アクションは select_file と submit の2つだけ。
/// 結果もエラーもすべて状態経由で観測する。
pub struct UploadController {
    client: AnalysisClient,
    options: ControllerOptions,
    state: Arc<watch::Sender<SubmissionState>>,
    ticker: Mutex<Option<ProgressTicker>>,
    /// ティアダウン済みフラグ。立った後は一切状態を更新しない
    closed: Arc<AtomicBool>,
}

impl UploadController {
    pub fn new(options: ControllerOptions) -> Result<Self> {
        let client = AnalysisClient::new(options.endpoint.clone(), options.timeout)?;
        let (tx, _rx) = watch::channel(SubmissionState::default());

        Ok(Self {
            client,
            options,
            state: Arc::new(tx),
            ticker: Mutex::new(None),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// 現在状態のスナップショット
    pub fn snapshot(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// 状態変更の購読
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// ファイル選択
    ///
    /// `None`（選択キャンセル）は何もしない。選択すると前回の結果と
    /// エラーは無条件でクリアされ、フェーズはIdleに戻る。
    /// リクエストは開始しない。MIMEタイプやサイズの検証もしない
    /// （ピッカーの拡張子フィルタと解析サーバ側の検証に委ねる）。
    pub fn select_file(&self, file: Option<SelectedFile>) {
        let Some(file) = file else { return };
        debug!(file = %file.file_name, "ファイル選択");

        let mut was_uploading = false;
        self.state.send_modify(|s| {
            was_uploading = s.phase == Phase::Uploading;
            s.selected_file = Some(file);
            s.items.clear();
            s.error_message = None;
            s.progress_percent = 0;
            s.phase = Phase::Idle;
        });

        // フェーズがUploadingを離れたらティッカーは止める
        if was_uploading {
            self.stop_ticker();
        }
    }

    /// 選択中のファイルを解析サーバへ送信
    ///
    /// ファイル未選択、または前回のリクエストが完了しきっていない間は
    /// 何もしない（静かなno-op。飛行中のリクエストは常に1本以下）。
    /// 送信したリクエストは必ずSucceededかFailedのどちらかで終わる。
    pub async fn submit(&self) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        let Some(file) = self.begin_upload() else {
            return;
        };
        debug!(file = %file.file_name, "アップロード開始");

        self.start_ticker();
        let outcome = self.client.analyze(&file).await;
        self.stop_ticker();

        if self.closed.load(Ordering::SeqCst) {
            // ティアダウン後に届いた結果は捨てる
            return;
        }

        match outcome {
            Ok(items) => {
                debug!(count = items.len(), "解析成功");
                self.state.send_modify(|s| {
                    // 結果を置く前に100%を立てる（完了未満の進捗のまま
                    // 結果が見えることはない）
                    s.progress_percent = 100;
                    s.items = items;
                    s.error_message = None;
                    s.phase = Phase::Succeeded;
                });
            }
            Err(e) => {
                warn!(error = %e, "解析失敗");
                let message = e.to_string();
                self.state.send_modify(|s| {
                    // 失敗時は進捗を残さない
                    s.progress_percent = 0;
                    s.items.clear();
                    s.error_message = Some(message);
                    s.phase = Phase::Failed;
                });
            }
        }

        self.schedule_busy_clear();
    }

    /// ティアダウン
    ///
    /// ティッカーを止め、飛行中のリクエストの結果が後から届いても
    /// 無視されるようにする。
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.stop_ticker();
    }

    /// ガードを通ればUploadingへ遷移してファイル参照を返す
    ///
    /// ガード判定と遷移はwatchのロック内で一度に行うので、
    /// 同時に呼ばれても通るのは1本だけ。
    fn begin_upload(&self) -> Option<SelectedFile> {
        let mut picked = None;
        self.state.send_if_modified(|s| {
            if s.busy {
                return false;
            }
            let Some(file) = s.selected_file.clone() else {
                return false;
            };
            s.busy = true;
            s.phase = Phase::Uploading;
            s.progress_percent = 0;
            s.error_message = None;
            s.items.clear();
            picked = Some(file);
            true
        });
        picked
    }

    fn start_ticker(&self) {
        let ticker = ProgressTicker::start(
            Arc::clone(&self.state),
            self.options.tick_period,
            self.options.progress_cap,
        );
        if let Ok(mut guard) = self.ticker.lock() {
            *guard = Some(ticker);
        }
    }

    fn stop_ticker(&self) {
        if let Ok(mut guard) = self.ticker.lock() {
            if let Some(ticker) = guard.take() {
                ticker.stop();
            }
        }
    }

    /// セトリング: 少し遅らせてからビジーを解除する
    fn schedule_busy_clear(&self) {
        let state = Arc::clone(&self.state);
        let closed = Arc::clone(&self.closed);
        let delay = self.options.settle_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if closed.load(Ordering::SeqCst) {
                return;
            }
            state.send_modify(|s| s.busy = false);
        });
    }
}

impl Drop for UploadController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
