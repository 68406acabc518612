use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{ApiError, BatchOutcome, BatchRequest, ProcessRecord, SearchQuery};

/// Connection settings for the archive service.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8420".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The archive service surface consumed by the app.
#[async_trait::async_trait]
pub trait ArchiveApi: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProcessRecord>, ApiError>;
    async fn clients(&self) -> Result<Vec<String>, ApiError>;
    async fn open_folder(&self, path: &str) -> Result<(), ApiError>;
    async fn submit_batch(&self, request: &BatchRequest) -> Result<BatchOutcome, ApiError>;
}

/// List endpoints answer with either the items or an error envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Items(Vec<T>),
    Failure { error: String },
}

/// Envelope of the action endpoints (folder open, batch submit).
#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: String,
    message: Option<String>,
    #[serde(default)]
    files: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestArchiveApi {
    base: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestArchiveApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    async fn get_list<T>(&self, path: &str, pairs: &[(&str, &str)]) -> Result<Vec<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .query(pairs)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if status.is_success() {
            match serde_json::from_slice::<ListResponse<T>>(&body) {
                Ok(ListResponse::Items(items)) => Ok(items),
                Ok(ListResponse::Failure { error }) => Err(ApiError::Server(error)),
                Err(err) => Err(ApiError::InvalidResponse(err.to_string())),
            }
        } else {
            // The server wraps its own failures in the same envelope.
            match serde_json::from_slice::<ListResponse<T>>(&body) {
                Ok(ListResponse::Failure { error }) => Err(ApiError::Server(error)),
                _ => Err(ApiError::HttpStatus(status.as_u16())),
            }
        }
    }

    async fn read_envelope(&self, response: reqwest::Response) -> Result<StatusEnvelope, ApiError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        match serde_json::from_slice::<StatusEnvelope>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(err) if status.is_success() => Err(ApiError::InvalidResponse(err.to_string())),
            Err(_) => Err(ApiError::HttpStatus(status.as_u16())),
        }
    }
}

#[async_trait::async_trait]
impl ArchiveApi for ReqwestArchiveApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProcessRecord>, ApiError> {
        self.get_list("api/search", &query.to_pairs()).await
    }

    async fn clients(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("api/clients", &[]).await
    }

    async fn open_folder(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint("api/open_folder")?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "path": path }))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let envelope = self.read_envelope(response).await?;
        if envelope.status == "success" {
            Ok(())
        } else {
            Err(ApiError::Server(envelope.message.unwrap_or_else(|| {
                "folder could not be opened".to_string()
            })))
        }
    }

    async fn submit_batch(&self, request: &BatchRequest) -> Result<BatchOutcome, ApiError> {
        let url = self.endpoint("api/submit_batch")?;

        let mut form = Form::new()
            .text("target", request.target.clone())
            .text("kind", request.kind.clone())
            .text(
                "force_rename",
                if request.force_rename { "true" } else { "false" },
            );
        if !request.expense_label.is_empty() {
            form = form.text("expense_label", request.expense_label.clone());
        }
        if !request.expense_due_date.is_empty() {
            form = form.text("expense_due_date", request.expense_due_date.clone());
        }
        for file in &request.files {
            // Every byte is read up front; a vanished file fails the whole
            // batch before anything goes on the wire.
            let bytes =
                tokio::fs::read(&file.path)
                    .await
                    .map_err(|err| ApiError::UnreadableFile {
                        name: file.name.clone(),
                        message: err.to_string(),
                    })?;
            form = form.part("files", Part::bytes(bytes).file_name(file.name.clone()));
        }

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let envelope = self.read_envelope(response).await?;
        match envelope.status.as_str() {
            "success" => Ok(BatchOutcome::Accepted {
                message: envelope
                    .message
                    .unwrap_or_else(|| "files uploaded".to_string()),
            }),
            "exists" => Ok(BatchOutcome::Exists {
                files: envelope.files,
            }),
            other => Err(ApiError::Server(
                envelope
                    .message
                    .unwrap_or_else(|| format!("upload refused ({other})")),
            )),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
