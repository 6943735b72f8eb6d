//! CLI描画
//!
//! コントローラの状態を購読してプログレスバーと結果を描画する。
//! 判断ロジックを持たない純粋な表示層。

use chrono::{Days, Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;

use pantry_ai_common::{PantryItem, SubmissionState};

/// 賞味期限がこの日数未満の品目は「早めに消費」マーク
const URGENT_DAYS: u32 = 4;

/// ビジーが解除されるまで状態を購読し、プログレスバーを更新する
pub async fn render_progress(mut rx: watch::Receiver<SubmissionState>) {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos:>3}%") {
        bar.set_style(style);
    }
    bar.set_message("解析中");

    loop {
        let (busy, progress) = {
            let state = rx.borrow_and_update();
            (state.busy, state.progress_percent)
        };
        bar.set_position(progress as u64);

        if !busy {
            break;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }

    bar.finish_and_clear();
}

/// 検出された品目リストを表示
pub fn print_items(items: &[PantryItem]) {
    if items.is_empty() {
        println!("検出された品目はありませんでした");
        return;
    }

    println!("✔ 検出された品目: {}件\n", items.len());

    let today = Local::now().date_naive();
    for item in items {
        print_item(item, today);
    }
}

fn print_item(item: &PantryItem, today: NaiveDate) {
    let expiry = expiry_date(today, item.shelf_life_days)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let marker = if item.shelf_life_days < URGENT_DAYS {
        "⚠"
    } else {
        " "
    };

    println!(
        "{} {} x{}  [{}]  残り{}日（{}まで）",
        marker,
        item.name,
        item.display_quantity(),
        item.category,
        item.shelf_life_days,
        expiry,
    );
}

/// 今日からshelf_life_days後の日付
fn expiry_date(today: NaiveDate, shelf_life_days: u32) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(shelf_life_days as u64))
}
