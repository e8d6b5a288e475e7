//! Object storage for attached documents and images
//!
//! Every "attach document" flow uploads the file here first and stores only
//! the returned public URL on the backend record.

use crate::error::{CliError, Result};
use aws_sdk_s3::{
    config::{retry::RetryConfig, Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
    Client,
};
use chrono::Utc;
use std::path::Path;
use tracing::{debug, info, instrument};

pub mod config;

pub use config::StorageConfig;

/// Largest file accepted for upload (50 MB)
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct Storage {
    client: Client,
    config: StorageConfig,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Self {
        debug!(bucket = %config.bucket, endpoint = ?config.endpoint, "Initializing storage");

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "heliops-storage",
        );

        // A failed upload aborts the form; the SDK must not retry behind our back.
        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style)
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = &config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        Self { client, config }
    }

    /// Upload `data` under `key` and return its public URL.
    ///
    /// Files over [`MAX_UPLOAD_BYTES`] are rejected before any request is made.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String> {
        check_upload_size(data.len() as u64)?;

        debug!("Uploading to s3://{}/{}", self.config.bucket, key);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .body(ByteStream::from(data));

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| CliError::storage(format!("upload of '{}' failed: {}", key, DisplayErrorContext(e))))?;

        let url = self.config.public_url(key);
        info!(url = %url, "Upload complete");

        Ok(url)
    }

    /// Upload a named file into `folder`, keyed as `<folder>/<millis>-<name>`
    pub async fn upload_file(&self, folder: &str, file_name: &str, data: Vec<u8>) -> Result<String> {
        let key = build_key(folder, file_name, Utc::now().timestamp_millis());
        let content_type = content_type_for(file_name);
        self.upload(&key, data, Some(content_type.as_ref())).await
    }

    /// Read a local file and upload it into `folder`
    pub async fn upload_path(&self, folder: &str, path: &Path) -> Result<String> {
        let size = tokio::fs::metadata(path).await?.len();
        check_upload_size(size)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CliError::storage(format!("'{}' has no file name", path.display())))?;
        let data = tokio::fs::read(path).await?;

        self.upload_file(folder, file_name, data).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CliError::storage(format!("delete of '{}' failed: {}", key, DisplayErrorContext(e))))?;

        info!("Deleted s3://{}/{}", self.config.bucket, key);
        Ok(())
    }

    /// Object key behind one of our public URLs, if it points into this bucket
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let prefix = self.config.public_url("");
        url.strip_prefix(&prefix)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

fn check_upload_size(size: u64) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(CliError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// `<folder>/<timestamp>-<name>` with path separators and spaces in the name
/// replaced so the key stays inside the folder
pub fn build_key(folder: &str, file_name: &str, timestamp: i64) -> String {
    let clean: String = file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ' ' => '_',
            c => c,
        })
        .collect();
    format!("{}/{}-{}", folder.trim_matches('/'), timestamp, clean)
}

/// Content type from the file extension
pub fn content_type_for(file_name: &str) -> mime::Mime {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => mime::APPLICATION_PDF,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("txt") => mime::TEXT_PLAIN,
        Some("csv") => mime::TEXT_CSV,
        Some("json") => mime::APPLICATION_JSON,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
