//! 汎用APIクライアント
//!
//! Billed APIサーバーとの通信を行う。失敗したレスポンスはサーバーが返した
//! `message` を持つ `AppError::Store` に変換される。

use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIクライアント設定
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        let api_config = ApiConfig::default();
        Self {
            base_url: api_config.base_url,
            timeout_seconds: api_config.timeout_seconds,
            max_retries: api_config.max_retries,
        }
    }
}

impl ApiClientConfig {
    /// 環境設定からAPIクライアント設定を作成
    pub fn from_env() -> Result<Self, AppError> {
        let api_config = ApiConfig::from_env();
        api_config.validate().map_err(AppError::Configuration)?;
        Ok(Self {
            base_url: api_config.base_url,
            timeout_seconds: api_config.timeout_seconds,
            max_retries: api_config.max_retries,
        })
    }
}

/// APIサーバーからのエラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// 汎用APIクライアント
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(config: ApiClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// エンドポイントの完全なURL
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(request: RequestBuilder, auth_token: Option<&str>) -> RequestBuilder {
        match auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let url = self.url(endpoint);
        let request = Self::authorize(self.client.get(&url), auth_token);
        let response = self.send_with_retry(|| request.try_clone(), "GET", endpoint).await?;
        Self::parse_json(response, "GET", endpoint).await
    }

    /// マルチパートのPOSTリクエストを送信
    ///
    /// `multipart::Form` は複製できないため、リトライごとに `build_form` で作り直す
    pub async fn post_multipart<T, F>(
        &self,
        endpoint: &str,
        build_form: F,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<multipart::Form, AppError>,
    {
        info!("マルチパートPOSTリクエスト送信: endpoint={endpoint}");

        let url = self.url(endpoint);
        let mut form_error = None;
        let response = self
            .send_with_retry(
                || match build_form() {
                    Ok(form) => Some(Self::authorize(
                        self.client.post(&url).multipart(form),
                        auth_token,
                    )),
                    Err(e) => {
                        form_error = Some(e);
                        None
                    }
                },
                "POST",
                endpoint,
            )
            .await;

        if let Some(e) = form_error {
            return Err(e);
        }
        Self::parse_json(response?, "POST", endpoint).await
    }

    /// PATCHリクエストを送信（ボディはJSON文字列）
    pub async fn patch_json<T>(
        &self,
        endpoint: &str,
        json_body: &str,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let url = self.url(endpoint);
        let request = Self::authorize(
            self.client
                .patch(&url)
                .header("Content-Type", "application/json")
                .body(json_body.to_string()),
            auth_token,
        );
        let response = self
            .send_with_retry(|| request.try_clone(), "PATCH", endpoint)
            .await?;
        Self::parse_json(response, "PATCH", endpoint).await
    }

    /// DELETEリクエストを送信
    pub async fn delete(&self, endpoint: &str, auth_token: Option<&str>) -> Result<(), AppError> {
        info!("DELETEリクエスト送信: endpoint={endpoint}");

        let url = self.url(endpoint);
        let request = Self::authorize(self.client.delete(&url), auth_token);
        self.send_with_retry(|| request.try_clone(), "DELETE", endpoint)
            .await?;

        info!("DELETEリクエスト成功: endpoint={endpoint}");
        Ok(())
    }

    /// 接続失敗時のみリトライしてリクエストを送信
    ///
    /// サーバーがエラーを返した場合はリトライせず、そのメッセージでエラーにする
    async fn send_with_retry<F>(
        &self,
        mut make_request: F,
        method: &str,
        endpoint: &str,
    ) -> Result<Response, AppError>
    where
        F: FnMut() -> Option<RequestBuilder>,
    {
        let mut attempts = 0;
        loop {
            let request = make_request().ok_or_else(|| {
                AppError::ExternalService("リクエストの作成に失敗しました".to_string())
            })?;

            match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let message = Self::error_message(response).await;
                    warn!("{method}リクエストがエラーを返しました: endpoint={endpoint}, message={message}");
                    return Err(AppError::Store(message));
                }
                Err(e) if attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = Duration::from_secs(2_u64.pow(attempts));
                    warn!(
                        "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}, error={e}",
                        self.config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(AppError::ExternalService(format!(
                        "APIサーバーへの接続に失敗しました: {e}"
                    )));
                }
            }
        }
    }

    async fn parse_json<T>(response: Response, method: &str, endpoint: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("レスポンス受信エラー: {e}")))?;
        let result = decode_body(&body)?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// エラーレスポンスからユーザー向けメッセージを取り出す
    async fn error_message(response: Response) -> String {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        error_message_from_body(status, &body)
    }
}

/// 受信済みのレスポンスボディを解析する
///
/// サーバーには到達しているため、解析の失敗は接続エラーではなく `AppError::Json` として返す
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| {
        warn!("レスポンス解析エラー: {e}");
        AppError::Json(e)
    })
}

/// エラーボディのメッセージ、なければステータスから `Erreur {status}` を作る
pub fn error_message_from_body(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error_response) if !error_response.message.is_empty() => {
            debug!("構造化エラーレスポンスを受信: message={}", error_response.message);
            error_response.message
        }
        _ => format!("Erreur {status}"),
    }
}
