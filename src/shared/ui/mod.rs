//! 画面とのやり取りを抽象化したケイパビリティ
//!
//! コンテナはDOMやモーダルライブラリに直接触れず、ここで定義した
//! トレイト越しに画面を操作する。

pub mod layout;
pub mod routes;

pub use routes::Route;

use std::sync::Mutex;

/// 画面遷移
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route) + Send + Sync,
{
    fn navigate(&self, route: Route) {
        self(route)
    }
}

/// 領収書プレビュー用のモーダル
pub trait Modal: Send + Sync {
    /// モーダルの表示幅（ピクセル）
    fn width(&self) -> u32;

    /// 本文を差し替えてモーダルを表示する
    fn show(&self, content: &str);

    fn hide(&self);
}

/// ブロッキングな警告ダイアログ
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// ページ本文の描画先
pub trait PageSurface: Send + Sync {
    /// ページ本文を丸ごと置き換える
    fn set_content(&self, html: String);
}

/// メモリ上に本文を保持するページ
#[derive(Debug, Default)]
pub struct MemoryPage {
    content: Mutex<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の本文
    pub fn content(&self) -> String {
        self.content
            .lock()
            .map(|content| content.clone())
            .unwrap_or_default()
    }
}

impl PageSurface for MemoryPage {
    fn set_content(&self, html: String) {
        match self.content.lock() {
            Ok(mut content) => *content = html,
            Err(e) => log::error!("ページ本文の更新に失敗しました: {e}"),
        }
    }
}
