use std::time::Duration;

use desk_logging::{desk_debug, desk_warn};
use futures_util::StreamExt;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    Ack, ArticleBatch, BackendError, ControlCall, FailureKind, FileEntry, FileListing, JobRequest,
    StatusSnapshot,
};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Root of the control API; endpoint paths are joined onto it.
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
}

impl BackendSettings {
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, BackendError> {
        let url = Url::parse(base_url)
            .map_err(|err| BackendError::with_detail(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }
}

/// The scraping backend's HTTP control surface.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn start_parser(&self, request: &JobRequest) -> Result<Ack, BackendError>;
    async fn status(&self) -> Result<StatusSnapshot, BackendError>;
    async fn start_translator(&self) -> Result<Ack, BackendError>;
    async fn list_files(&self) -> Result<Vec<FileEntry>, BackendError>;
    async fn download(&self, name: &str) -> Result<ArticleBatch, BackendError>;
    async fn control(&self, call: ControlCall) -> Result<Ack, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    settings: BackendSettings,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::with_detail(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| BackendError::with_detail(FailureKind::InvalidUrl, err.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        desk_debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Sends the request and returns the body of a 2xx reply.
    ///
    /// Non-2xx replies become `HttpStatus` errors carrying the body's `error`
    /// and `code` fields when it has them.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, BackendError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let max_bytes = self.settings.max_body_bytes;

        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(BackendError::new(FailureKind::TooLarge { max_bytes }));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(BackendError::new(FailureKind::TooLarge { max_bytes }));
            }
            body.extend_from_slice(&chunk);
        }

        if !status.is_success() {
            let reply: Ack = serde_json::from_slice(&body).unwrap_or_default();
            desk_warn!("Backend answered {}: {:?}", status, reply.error);
            return Err(BackendError {
                kind: FailureKind::HttpStatus(status.as_u16()),
                detail: reply.error,
                code: reply.code,
            });
        }
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let body = self.send(request).await?;
        serde_json::from_slice(&body)
            .map_err(|err| BackendError::with_detail(FailureKind::Decode, err.to_string()))
    }

    /// Like [`Self::fetch_json`] for `{message}` replies, but tolerates bodies
    /// that are not JSON and treats a 2xx `{error}` body as a rejection.
    async fn acknowledge(&self, request: RequestBuilder) -> Result<Ack, BackendError> {
        let body = self.send(request).await?;
        let ack: Ack = serde_json::from_slice(&body).unwrap_or_default();
        match ack.error.as_deref() {
            Some(error) if !error.is_empty() => Err(BackendError {
                kind: FailureKind::Rejected,
                detail: Some(error.to_string()),
                code: ack.code,
            }),
            _ => Ok(ack),
        }
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn start_parser(&self, request: &JobRequest) -> Result<Ack, BackendError> {
        let url = self.endpoint("api/start-parser")?;
        self.acknowledge(self.request(Method::POST, url).json(request))
            .await
    }

    async fn status(&self) -> Result<StatusSnapshot, BackendError> {
        let url = self.endpoint("api/status")?;
        self.fetch_json(self.request(Method::GET, url)).await
    }

    async fn start_translator(&self) -> Result<Ack, BackendError> {
        let url = self.endpoint("api/start-ai-translator")?;
        self.acknowledge(self.request(Method::GET, url)).await
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>, BackendError> {
        let url = self.endpoint("api/files")?;
        let listing: FileListing = self.fetch_json(self.request(Method::GET, url)).await?;
        Ok(listing.files)
    }

    async fn download(&self, name: &str) -> Result<ArticleBatch, BackendError> {
        let mut url = self.endpoint("api/download/")?;
        url.path_segments_mut()
            .map_err(|()| {
                BackendError::with_detail(FailureKind::InvalidUrl, "base url cannot hold a path")
            })?
            .pop_if_empty()
            .push(name);
        self.fetch_json(self.request(Method::GET, url)).await
    }

    async fn control(&self, call: ControlCall) -> Result<Ack, BackendError> {
        let url = self.endpoint(call.path())?;
        self.acknowledge(self.request(Method::POST, url)).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::with_detail(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::with_detail(FailureKind::Decode, err.to_string());
    }
    BackendError::with_detail(FailureKind::Network, err.to_string())
}
