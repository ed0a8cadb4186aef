use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use crate::error::ExtractError;
use crate::services::probe::{ErrorReporter, FileError, InputFile};

/// A report the caller wants processed, addressed by a signed download URL.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub signed_url: String,
}

pub async fn load_file_from_url(client: &Client, url: &str, max_file_size: usize) -> Result<Bytes, ExtractError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ExtractError::Download(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ExtractError::Download(
            format!("Status: {}", response.status())
        ));
    }

    if let Some(size) = response.content_length() {
        let size = size as usize;
        if size > max_file_size {
            return Err(ExtractError::FileTooLarge { size, limit: max_file_size });
        }
    }

    let data = response
        .bytes()
        .await
        .map_err(|e| ExtractError::Download(format!("Failed to read response bytes: {}", e)))?;

    ensure_within_limit(data, max_file_size)
}

/// Rejects buffers over the configured upload size.
pub fn ensure_within_limit(data: Bytes, max_file_size: usize) -> Result<Bytes, ExtractError> {
    if data.len() > max_file_size {
        return Err(ExtractError::FileTooLarge { size: data.len(), limit: max_file_size });
    }
    Ok(data)
}

/// Downloads a single file, keeping the failure for the caller.
pub async fn fetch_input(client: &Client, file: &FileInfo, max_file_size: usize) -> Result<InputFile, ExtractError> {
    let download_start = std::time::Instant::now();
    let data = load_file_from_url(client, &file.signed_url, max_file_size).await?;
    tracing::info!(
        "Downloaded {}, size: {}KB, took: {:?}",
        file.name,
        data.len() / 1024,
        download_start.elapsed()
    );
    Ok(InputFile::new(file.name.clone(), data))
}

/// Downloads every file in order. A file that cannot be fetched is reported
/// and left out; the rest are returned for processing.
pub async fn fetch_inputs(files: &[FileInfo], max_file_size: usize, reporter: &dyn ErrorReporter) -> Vec<InputFile> {
    let client = Client::new();
    let mut inputs = Vec::with_capacity(files.len());

    for file in files {
        match fetch_input(&client, file, max_file_size).await {
            Ok(input) => inputs.push(input),
            Err(e) => reporter.report(FileError::new(file.name.clone(), e.to_string())),
        }
    }

    inputs
}
