//! 経費データのリモートストア
//!
//! コンテナはこのトレイト越しに一覧取得・作成・更新を行う。

use crate::features::bills::models::{Bill, CreateBillRequest, CreatedBill, UpdateBillRequest};
use crate::shared::api_client::{ApiClient, ApiClientConfig};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use reqwest::multipart;

/// 経費ストア
#[async_trait]
pub trait BillStore: Send + Sync {
    /// 経費一覧を取得する（順序はストアが返したまま）
    async fn list(&self) -> AppResult<Vec<Bill>>;

    /// 領収書ファイルをアップロードし、新しい経費のIDとファイルURLを受け取る
    async fn create(&self, request: CreateBillRequest) -> AppResult<CreatedBill>;

    /// 経費を更新する
    async fn update(&self, request: UpdateBillRequest) -> AppResult<Bill>;

    /// IDを指定して経費を取得する
    async fn select(&self, selector: &str) -> AppResult<Bill>;

    async fn delete(&self, selector: &str) -> AppResult<()>;
}

const BILLS_ENDPOINT: &str = "/bills";

/// 個別経費のエンドポイント
pub fn bill_endpoint(selector: &str) -> String {
    format!("{BILLS_ENDPOINT}/{}", urlencoding::encode(selector))
}

/// APIサーバー経由の経費ストア
pub struct ApiBillStore {
    api_client: ApiClient,
    auth_token: Option<String>,
}

impl ApiBillStore {
    /// 環境変数の設定でストアを作成
    pub fn from_env(auth_token: Option<String>) -> AppResult<Self> {
        Self::new(ApiClientConfig::from_env()?, auth_token)
    }

    pub fn new(config: ApiClientConfig, auth_token: Option<String>) -> AppResult<Self> {
        Ok(Self {
            api_client: ApiClient::new_with_config(config)?,
            auth_token,
        })
    }

    fn token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }
}

#[async_trait]
impl BillStore for ApiBillStore {
    async fn list(&self) -> AppResult<Vec<Bill>> {
        let bills: Vec<Bill> = self.api_client.get(BILLS_ENDPOINT, self.token()).await?;
        info!("経費一覧取得成功: count={}", bills.len());
        Ok(bills)
    }

    async fn create(&self, request: CreateBillRequest) -> AppResult<CreatedBill> {
        info!(
            "領収書アップロード開始: file={}, email={}",
            request.file.name, request.email
        );

        let build_form = || -> AppResult<multipart::Form> {
            let part = multipart::Part::bytes(request.file.content.clone())
                .file_name(request.file.name.clone())
                .mime_str(&request.file.mime_type)
                .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;
            Ok(multipart::Form::new()
                .part("file", part)
                .text("email", request.email.clone()))
        };

        let created: CreatedBill = self
            .api_client
            .post_multipart(BILLS_ENDPOINT, build_form, self.token())
            .await?;

        info!("領収書アップロード成功: key={}, url={}", created.key, created.file_url);
        Ok(created)
    }

    async fn update(&self, request: UpdateBillRequest) -> AppResult<Bill> {
        let selector = request
            .selector
            .as_deref()
            .ok_or_else(|| AppError::validation("更新対象のIDがありません"))?;

        let bill: Bill = self
            .api_client
            .patch_json(&bill_endpoint(selector), &request.data, self.token())
            .await?;

        info!("経費更新成功: id={selector}");
        Ok(bill)
    }

    async fn select(&self, selector: &str) -> AppResult<Bill> {
        self.api_client
            .get(&bill_endpoint(selector), self.token())
            .await
    }

    async fn delete(&self, selector: &str) -> AppResult<()> {
        self.api_client
            .delete(&bill_endpoint(selector), self.token())
            .await?;
        info!("経費削除成功: id={selector}");
        Ok(())
    }
}
