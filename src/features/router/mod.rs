//! ルーティング
//!
//! ルートごとにページを描画し、対応するコンテナを生成して保持する。
//! コンテナからの遷移要求はチャネルに積まれ、`process_pending` で処理される。

use crate::features::bills::{BillStore, BillsContainer};
use crate::features::new_bill::{render_new_bill_page, NewBillContainer};
use crate::shared::session::Session;
use crate::shared::ui::layout::vertical_layout;
use crate::shared::ui::{Alert, Modal, Navigator, PageSurface, Route};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

/// 遷移要求をチャネルに積むナビゲーター
#[derive(Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<Route>,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if let Err(e) = self.sender.send(route) {
            warn!("遷移要求を送信できませんでした: route={route}, {e}");
        }
    }
}

/// 表示中のページ
pub enum ActivePage {
    Bills(BillsContainer),
    NewBill(NewBillContainer),
    Unavailable(Route),
}

impl ActivePage {
    pub fn route(&self) -> Route {
        match self {
            ActivePage::Bills(_) => Route::Bills,
            ActivePage::NewBill(_) => Route::NewBill,
            ActivePage::Unavailable(route) => *route,
        }
    }
}

/// 従業員向けページのルーター
pub struct Router {
    store: Option<Arc<dyn BillStore>>,
    session: Session,
    page: Arc<dyn PageSurface>,
    modal: Arc<dyn Modal>,
    alert: Arc<dyn Alert>,
    navigator: ChannelNavigator,
    receiver: mpsc::UnboundedReceiver<Route>,
    active: Option<ActivePage>,
}

impl Router {
    pub fn new(
        store: Option<Arc<dyn BillStore>>,
        session: Session,
        page: Arc<dyn PageSurface>,
        modal: Arc<dyn Modal>,
        alert: Arc<dyn Alert>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            store,
            session,
            page,
            modal,
            alert,
            navigator: ChannelNavigator { sender },
            receiver,
            active: None,
        }
    }

    /// コンテナに渡すナビゲーター
    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::new(self.navigator.clone())
    }

    pub fn active_page(&self) -> Option<&ActivePage> {
        self.active.as_ref()
    }

    /// 指定したルートのページを描画する
    pub async fn navigate(&mut self, route: Route) {
        info!("ページ遷移: {route}");

        let active = match route {
            Route::Bills => {
                let container =
                    BillsContainer::new(self.store.clone(), self.navigator(), self.modal.clone());
                container.render(self.page.as_ref()).await;
                ActivePage::Bills(container)
            }
            Route::NewBill => {
                self.page.set_content(render_new_bill_page());
                ActivePage::NewBill(NewBillContainer::new(
                    self.store.clone(),
                    self.navigator(),
                    self.alert.clone(),
                    self.session.clone(),
                ))
            }
            Route::Login | Route::Dashboard => {
                warn!("このルートは従業員画面では扱いません: {route}");
                self.page.set_content(unavailable_page());
                ActivePage::Unavailable(route)
            }
        };

        self.active = Some(active);
    }

    /// パス文字列で遷移する（未知のパスは一覧画面）
    pub async fn navigate_path(&mut self, path: &str) {
        let route = Route::from_path(path).unwrap_or_else(|| {
            warn!("未知のパスのため一覧画面を表示します: {path}");
            Route::Bills
        });
        self.navigate(route).await;
    }

    /// コンテナから積まれた遷移要求を順に処理する
    ///
    /// # 戻り値
    /// 処理した遷移の数
    pub async fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(route) = self.receiver.try_recv() {
            self.navigate(route).await;
            processed += 1;
        }
        processed
    }
}

fn unavailable_page() -> String {
    format!(
        r#"<div class="layout">
      {}
      <div class="content" data-testid="route-unavailable"></div>
    </div>"#,
        vertical_layout(120, None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::new_bill::{FileInputControl, NewBillForm};
    use crate::features::bills::UploadedFile;
    use crate::shared::ui::MemoryPage;
    use crate::test_support::{count_test_id, MockBillStore, RecordingAlert, RecordingModal};

    fn router_with(store: MockBillStore) -> (Router, Arc<MemoryPage>, Arc<MockBillStore>) {
        let store = Arc::new(store);
        let page = Arc::new(MemoryPage::new());
        let router = Router::new(
            Some(store.clone() as Arc<dyn BillStore>),
            Session::employee("john.doe@gmail.com"),
            page.clone(),
            Arc::new(RecordingModal::default()),
            Arc::new(RecordingAlert::default()),
        );
        (router, page, store)
    }

    #[tokio::test]
    async fn test_bills_route_highlights_window_icon() {
        let (mut router, page, _) = router_with(MockBillStore::default());

        router.navigate(Route::Bills).await;

        assert!(page
            .content()
            .contains(r#"data-testid="icon-window" class="layout-icon active-icon""#));
    }

    #[tokio::test]
    async fn test_bills_route_fetches_and_renders_bills() {
        let (mut router, page, store) = router_with(MockBillStore::default());

        router.navigate_path("#employee/bills").await;

        assert_eq!(store.list_call_count(), 1);
        let html = page.content();
        assert!(html.contains("Mes notes de frais"));
        assert!(html.contains("Nouvelle note de frais"));
        assert_eq!(count_test_id(&html, "tbody"), 1);
        assert_eq!(count_test_id(&html, "bill-date"), 4);
    }

    #[tokio::test]
    async fn test_bills_route_shows_api_errors() {
        for message in ["Erreur 404", "Erreur 500"] {
            let (mut router, page, _) = router_with(MockBillStore::failing_list(message));

            router.navigate(Route::Bills).await;

            assert!(page.content().contains(message));
        }
    }

    #[tokio::test]
    async fn test_new_bill_button_leads_to_form() {
        let (mut router, page, _) = router_with(MockBillStore::default());
        router.navigate(Route::Bills).await;

        if let Some(ActivePage::Bills(container)) = router.active_page() {
            container.handle_click_new_bill();
        }
        assert_eq!(router.process_pending().await, 1);

        assert_eq!(router.active_page().map(ActivePage::route), Some(Route::NewBill));
        assert_eq!(count_test_id(&page.content(), "form-new-bill"), 1);
    }

    #[tokio::test]
    async fn test_submit_returns_to_bills() {
        let (mut router, page, store) = router_with(MockBillStore::default());
        router.navigate(Route::NewBill).await;

        let handle = match router.active_page() {
            Some(ActivePage::NewBill(container)) => {
                let mut input = FileInputControl::with_file(UploadedFile::new(
                    "facture.png",
                    "image/png",
                    b"test".to_vec(),
                ));
                container.handle_change_file(&mut input).await;
                container.handle_submit(&NewBillForm {
                    expense_type: "Transports".to_string(),
                    expense_name: "Vol".to_string(),
                    datepicker: "2024-01-15".to_string(),
                    amount: "500".to_string(),
                    ..NewBillForm::default()
                })
            }
            _ => None,
        };
        handle.expect("update must be spawned").await.unwrap().unwrap();
        router.process_pending().await;

        assert_eq!(router.active_page().map(ActivePage::route), Some(Route::Bills));
        assert_eq!(store.update_requests().len(), 1);
        assert!(page.content().contains("Mes notes de frais"));
    }

    #[tokio::test]
    async fn test_login_route_is_not_handled() {
        let (mut router, page, store) = router_with(MockBillStore::default());

        router.navigate(Route::Login).await;

        assert_eq!(store.list_call_count(), 0);
        assert_eq!(count_test_id(&page.content(), "route-unavailable"), 1);
        assert_eq!(router.active_page().map(ActivePage::route), Some(Route::Login));
    }
}
