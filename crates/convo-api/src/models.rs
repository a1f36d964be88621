use std::path::Path;

use reqwest::multipart::{Form, Part};

use convo_types::{
    endpoints, ModelActionResponse, ModelKind, ModelStatus, DEFAULT_LOAD_MESSAGE,
    DEFAULT_UPLOAD_MESSAGE,
};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Client for the model-management endpoints
#[derive(Debug, Clone)]
pub struct ModelsClient {
    client: ApiClient,
}

impl ModelsClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Which artifacts the backend currently holds in memory
    pub async fn status(&self) -> Result<ModelStatus, ClientError> {
        let url = self.client.endpoint(endpoints::MODELS_STATUS, None)?;
        log::debug!("GET {}", url);

        let response = self.client.http().get(url).send().await?;
        let response = ApiClient::check(response, "Failed to fetch model status").await?;
        ApiClient::read_json(response).await
    }

    /// Upload `bytes` as the artifact for `kind`. The backend also loads it.
    ///
    /// Returns the server's confirmation message.
    pub async fn upload(
        &self,
        kind: ModelKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ClientError> {
        let url = self.client.endpoint(endpoints::MODELS_UPLOAD, None)?;
        log::debug!("POST {} ({} bytes as {})", url, bytes.len(), kind);

        let form = Form::new()
            .text("tipo", kind.as_str())
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let response = self.client.http().post(url).multipart(form).send().await?;
        let response = ApiClient::check(response, "Failed to upload the model").await?;
        let body: ModelActionResponse = ApiClient::read_json(response).await?;
        Ok(body.message_or(DEFAULT_UPLOAD_MESSAGE))
    }

    /// Read `path` from disk and upload it
    pub async fn upload_file(&self, kind: ModelKind, path: &Path) -> Result<String, ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| kind.as_str().to_string());

        self.upload(kind, &file_name, bytes).await
    }

    /// Load an already uploaded artifact into memory
    pub async fn load(&self, kind: ModelKind) -> Result<String, ClientError> {
        let url = self
            .client
            .endpoint(&endpoints::model_load_path(kind), None)?;
        log::debug!("POST {}", url);

        let response = self.client.http().post(url).send().await?;
        let response = ApiClient::check(response, "Failed to load the model").await?;
        let body: ModelActionResponse = ApiClient::read_json(response).await?;
        Ok(body.message_or(DEFAULT_LOAD_MESSAGE))
    }

    /// Fetch the stored artifact for `kind`
    pub async fn download(&self, kind: ModelKind) -> Result<Vec<u8>, ClientError> {
        let url = self
            .client
            .endpoint(&endpoints::model_download_path(kind), None)?;
        log::debug!("GET {}", url);

        let response = self.client.http().get(url).send().await?;
        let response = ApiClient::check(response, "Failed to download the model").await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Download `kind` into `dest`, returning the number of bytes written
    pub async fn download_to(&self, kind: ModelKind, dest: &Path) -> Result<usize, ClientError> {
        let bytes = self.download(kind).await?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|source| ClientError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        Ok(bytes.len())
    }
}
