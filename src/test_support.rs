//! テスト用のフィクスチャとモック

use crate::features::bills::models::{Bill, CreateBillRequest, CreatedBill, UpdateBillRequest};
use crate::features::bills::store::BillStore;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::ui::{Alert, Modal, Navigator, Route};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const MOCK_FILE_URL: &str = "https://localhost:3456/images/test.jpg";
pub const MOCK_BILL_KEY: &str = "1234";

const FIXTURE_BILLS: &str = r#"[
  {
    "id": "47qAXb6fIm2zOKkLzMro",
    "vat": "80",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a/preview-facture-free-201801-pdf-1.jpg?alt=media&token=c1640e12",
    "status": "pending",
    "type": "Hôtel et logement",
    "commentary": "séminaire billed",
    "name": "encore",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2004-04-04",
    "amount": 400,
    "commentAdmin": "ok",
    "email": "a@a",
    "pct": 20
  },
  {
    "id": "BeKy5Mo4jkmdfPGYpTxZ",
    "vat": "",
    "amount": 100,
    "name": "test1",
    "fileName": "1592770761.jpeg",
    "commentary": "plop",
    "pct": 20,
    "type": "Transports",
    "email": "a@a",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a/1592770761.jpeg?alt=media&token=7685cd61",
    "date": "2001-01-01",
    "status": "refused",
    "commentAdmin": "en fait non"
  },
  {
    "id": "UIUZtnPQvnbFnB0ozvJh",
    "name": "test3",
    "email": "a@a",
    "type": "Services en ligne",
    "vat": "60",
    "pct": 20,
    "commentAdmin": "bon bah d'accord",
    "amount": 300,
    "status": "accepted",
    "date": "2003-03-03",
    "commentary": "",
    "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a/facture-client.png?alt=media&token=4df6ed2c"
  },
  {
    "id": "qcCK3SzECmaZAGRrHjaC",
    "status": "refused",
    "pct": 20,
    "amount": 200,
    "email": "a@a",
    "name": "test2",
    "vat": "40",
    "fileName": "preview-facture-free-201801-pdf-1.jpg",
    "date": "2002-02-02",
    "commentAdmin": "pas la bonne facture",
    "commentary": "test2",
    "type": "Restaurants et bars",
    "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a/preview-facture-free-201801-pdf-1.jpg?alt=media&token=4df6ed2c"
  }
]"#;

/// ストアが返す4件の経費（日付順ではない）
pub fn fixture_bills() -> Vec<Bill> {
    serde_json::from_str(FIXTURE_BILLS).expect("fixture bills must parse")
}

/// ストア操作の振る舞い
#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed,
    Fail(String),
    /// 決して完了しない
    Hang,
}

/// 呼び出しを記録するモックストア
pub struct MockBillStore {
    pub bills: Vec<Bill>,
    pub list_behavior: Behavior,
    pub create_behavior: Behavior,
    pub update_behavior: Behavior,
    pub list_calls: AtomicUsize,
    pub create_calls: Mutex<Vec<CreateBillRequest>>,
    pub update_calls: Mutex<Vec<UpdateBillRequest>>,
}

impl Default for MockBillStore {
    fn default() -> Self {
        Self {
            bills: fixture_bills(),
            list_behavior: Behavior::Succeed,
            create_behavior: Behavior::Succeed,
            update_behavior: Behavior::Succeed,
            list_calls: AtomicUsize::new(0),
            create_calls: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockBillStore {
    pub fn failing_list<S: Into<String>>(message: S) -> Self {
        Self {
            list_behavior: Behavior::Fail(message.into()),
            ..Self::default()
        }
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_requests(&self) -> Vec<CreateBillRequest> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn update_requests(&self) -> Vec<UpdateBillRequest> {
        self.update_calls.lock().unwrap().clone()
    }

    async fn settle<T>(behavior: &Behavior, value: T) -> AppResult<T> {
        match behavior {
            Behavior::Succeed => Ok(value),
            Behavior::Fail(message) => Err(AppError::store(message.clone())),
            Behavior::Hang => futures::future::pending().await,
        }
    }
}

#[async_trait]
impl BillStore for MockBillStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Self::settle(&self.list_behavior, self.bills.clone()).await
    }

    async fn create(&self, request: CreateBillRequest) -> AppResult<CreatedBill> {
        self.create_calls.lock().unwrap().push(request);
        let created = CreatedBill {
            file_url: MOCK_FILE_URL.to_string(),
            key: MOCK_BILL_KEY.to_string(),
        };
        Self::settle(&self.create_behavior, created).await
    }

    async fn update(&self, request: UpdateBillRequest) -> AppResult<Bill> {
        self.update_calls.lock().unwrap().push(request);
        Self::settle(&self.update_behavior, self.bills[0].clone()).await
    }

    async fn select(&self, selector: &str) -> AppResult<Bill> {
        self.bills
            .iter()
            .find(|bill| bill.id.as_deref() == Some(selector))
            .cloned()
            .ok_or_else(|| AppError::not_found(selector))
    }

    async fn delete(&self, _selector: &str) -> AppResult<()> {
        Ok(())
    }
}

/// 遷移先を記録するナビゲーター
#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// 表示内容を記録するモーダル（幅は500px固定）
#[derive(Default)]
pub struct RecordingModal {
    pub shown: Mutex<Vec<String>>,
    pub hidden: AtomicUsize,
}

impl RecordingModal {
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }
}

impl Modal for RecordingModal {
    fn width(&self) -> u32 {
        500
    }

    fn show(&self, content: &str) {
        self.shown.lock().unwrap().push(content.to_string());
    }

    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

/// 警告メッセージを記録する
#[derive(Default)]
pub struct RecordingAlert {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingAlert {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Alert for RecordingAlert {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

static ATTRIBUTE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-testid="([a-z-]+)"([^>]*)>"#).unwrap());

/// 指定した data-testid を持つ要素の属性値を出現順に集める
///
/// ブラウザと同じく、エスケープを戻した値を返す
pub fn attribute_values(html: &str, test_id: &str, attribute: &str) -> Vec<String> {
    let attribute_pattern = Regex::new(&format!(r#"{attribute}="([^"]*)""#)).unwrap();
    ATTRIBUTE_PATTERN
        .captures_iter(html)
        .filter(|caps| &caps[1] == test_id)
        .filter_map(|caps| {
            attribute_pattern
                .captures(&caps[2])
                .map(|attr| unescape_html(&attr[1]))
        })
        .collect()
}

fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// 指定した data-testid の出現回数
pub fn count_test_id(html: &str, test_id: &str) -> usize {
    html.matches(&format!(r#"data-testid="{test_id}""#)).count()
}
