//! 疑似進捗ティッカー
//!
//! アップロード中だけ動く周期タスク。実際の進捗は測定できないため、
//! 有界の乱数増分を上限まで積むだけの見せかけの値を刻む。

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use pantry_ai_common::{Phase, SubmissionState};

/// 1ティックあたりの増分の範囲
const STEP_MIN: u8 = 5;
const STEP_MAX: u8 = 14;

/// Uploading中だけ進捗を刻む周期タスクのハンドル
///
/// Dropで必ずabortされる。フェーズがUploadingを離れた後に
/// 発火したティックは状態を変更しない。
pub(crate) struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// ティッカーを開始
    ///
    /// `cap` は100未満の頭打ち値。値は単調非減少で、capを超えない。
    pub(crate) fn start(
        state: Arc<watch::Sender<SubmissionState>>,
        period: Duration,
        cap: u8,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // intervalの初回は即時に発火するので読み捨てる
            interval.tick().await;

            loop {
                interval.tick().await;
                state.send_modify(|s| {
                    if s.phase != Phase::Uploading {
                        return;
                    }
                    let step = rand::rng().random_range(STEP_MIN..=STEP_MAX);
                    s.progress_percent = s.progress_percent.saturating_add(step).min(cap);
                });
            }
        });

        Self { handle }
    }

    /// ティッカーを停止（以降のティックは発火しない）
    pub(crate) fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
