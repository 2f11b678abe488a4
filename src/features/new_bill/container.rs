//! 経費の新規作成画面のコンテナ
//!
//! 作成は二段階で行う。ファイル選択時にストアの作成処理で領収書を送ってIDを受け取り、
//! フォーム送信時にそのIDに対して残りの項目を更新する。

use crate::features::bills::models::{Bill, CreateBillRequest, UpdateBillRequest};
use crate::features::bills::store::BillStore;
use crate::features::new_bill::models::{
    FileChangeOutcome, FileInputControl, NewBillForm, UploadedReceipt,
};
use crate::shared::errors::AppResult;
use crate::shared::session::Session;
use crate::shared::ui::{Alert, Navigator, Route};
use crate::shared::utils::file_name_from_input_value;
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// 許可されていない拡張子のファイルを選んだときの警告
pub const INVALID_FILE_MESSAGE: &str =
    "Seuls les fichiers aux formats jpg, jpeg ou png sont autorisés.";

static ALLOWED_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png)$").unwrap());

/// ファイル名の拡張子が jpg / jpeg / png か（大文字小文字は区別しない）
pub fn has_allowed_extension(file_name: &str) -> bool {
    ALLOWED_EXTENSION.is_match(file_name)
}

/// 経費の新規作成画面のコンテナ
pub struct NewBillContainer {
    store: Option<Arc<dyn BillStore>>,
    navigator: Arc<dyn Navigator>,
    alert: Arc<dyn Alert>,
    session: Session,
    receipt: Mutex<UploadedReceipt>,
}

impl NewBillContainer {
    pub fn new(
        store: Option<Arc<dyn BillStore>>,
        navigator: Arc<dyn Navigator>,
        alert: Arc<dyn Alert>,
        session: Session,
    ) -> Self {
        Self {
            store,
            navigator,
            alert,
            session,
            receipt: Mutex::new(UploadedReceipt::default()),
        }
    }

    /// アップロードで得た値の写し
    pub fn receipt(&self) -> UploadedReceipt {
        self.receipt
            .lock()
            .map(|receipt| receipt.clone())
            .unwrap_or_default()
    }

    pub fn file_url(&self) -> Option<String> {
        self.receipt().file_url
    }

    pub fn file_name(&self) -> Option<String> {
        self.receipt().file_name
    }

    pub fn bill_id(&self) -> Option<String> {
        self.receipt().bill_id
    }

    fn store_receipt(&self, receipt: UploadedReceipt) {
        match self.receipt.lock() {
            Ok(mut current) => *current = receipt,
            Err(e) => error!("アップロード結果の保存に失敗しました: {e}"),
        }
    }

    /// ファイル選択時の処理
    ///
    /// 拡張子が不正なら警告して入力欄を空にし、ストアは呼ばない。
    /// 正しければすぐに作成処理を呼び、成功時にURL・ファイル名・IDを保持する。
    /// 作成の失敗はログに残すだけで画面には出さない。
    pub async fn handle_change_file(&self, input: &mut FileInputControl) -> FileChangeOutcome {
        let Some(file) = input.files.first().cloned() else {
            debug!("ファイルが選択されていません");
            return FileChangeOutcome::NoFile;
        };

        let file_name = match file_name_from_input_value(&input.value) {
            "" => file.name.clone(),
            name => name.to_string(),
        };

        if !has_allowed_extension(&file_name) {
            info!("許可されていない拡張子のファイルが選択されました: {file_name}");
            self.alert.alert(INVALID_FILE_MESSAGE);
            input.reset();
            return FileChangeOutcome::Rejected;
        }

        let Some(store) = &self.store else {
            warn!("ストアが設定されていないため領収書をアップロードできません");
            return FileChangeOutcome::Failed("ストアが設定されていません".to_string());
        };

        let request = CreateBillRequest {
            file,
            email: self.session.email.clone(),
        };

        match store.create(request).await {
            Ok(created) => {
                let receipt = UploadedReceipt {
                    file_url: Some(created.file_url),
                    file_name: Some(file_name),
                    bill_id: Some(created.key),
                };
                info!(
                    "領収書をアップロードしました: bill_id={:?}, file_name={:?}",
                    receipt.bill_id, receipt.file_name
                );
                self.store_receipt(receipt.clone());
                FileChangeOutcome::Uploaded(receipt)
            }
            Err(e) => {
                log::log!(e.severity().log_level(), "領収書のアップロードに失敗しました: {e}");
                FileChangeOutcome::Failed(e.to_string())
            }
        }
    }

    /// フォーム送信時の処理
    ///
    /// 更新処理の完了を待たずに一覧画面へ遷移する。
    /// 戻り値のハンドルで更新の結果を確認できる（ストアがない場合は None）
    pub fn handle_submit(&self, form: &NewBillForm) -> Option<JoinHandle<AppResult<Bill>>> {
        let bill = form.to_bill(&self.receipt(), &self.session.email);
        let handle = self.update_bill(&bill);

        self.navigator.navigate(Route::Bills);
        handle
    }

    fn update_bill(&self, bill: &Bill) -> Option<JoinHandle<AppResult<Bill>>> {
        let store = self.store.clone()?;

        let request = match UpdateBillRequest::from_bill(bill, bill.id.clone()) {
            Ok(request) => request,
            Err(e) => {
                error!("経費のシリアライズに失敗しました: {e}");
                return None;
            }
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("非同期ランタイムがないため経費を更新できません: {e}");
                return None;
            }
        };

        Some(runtime.spawn(async move {
            let selector = request.selector.clone();
            let result = store.update(request).await;
            match &result {
                Ok(_) => info!("経費を更新しました: id={selector:?}"),
                Err(e) => log::log!(
                    e.severity().log_level(),
                    "経費の更新に失敗しました: id={selector:?}, {e}"
                ),
            }
            result
        }))
    }
}
