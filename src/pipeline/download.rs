// src/pipeline/download.rs

//! Sequential archive downloads into the scratch area.

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CatalogItem, DownloadConfig};
use crate::storage::ScratchArea;
use crate::utils::http;

/// Fetches catalog items to `<scratch>/<name>.<ext>`.
pub struct Downloader {
    client: Client,
    scratch: ScratchArea,
}

impl Downloader {
    pub fn new(config: &DownloadConfig, scratch: ScratchArea) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            scratch,
        })
    }

    /// Stream the item's archive to disk and return its path.
    ///
    /// A partially written file is removed on failure.
    pub async fn download(&self, item: &CatalogItem) -> Result<PathBuf> {
        log::info!("Downloading {} ...", item.name);
        let path = self.scratch.archive_path(&item.name)?;

        match self.fetch(&item.url, &path).await {
            Ok(bytes) => {
                log::info!("{}: {} bytes downloaded.", item.name, bytes);
                Ok(path)
            }
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        log::warn!("Could not remove {}: {}", path.display(), cleanup);
                    }
                }
                Err(AppError::download(&item.name, &item.url, e))
            }
        }
    }

    async fn fetch(&self, url: &str, path: &Path) -> Result<u64> {
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the base URL.
    async fn serve_once(status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn downloader(tmp: &TempDir) -> Downloader {
        let scratch = ScratchArea::new(tmp.path(), "7z");
        Downloader::new(&DownloadConfig::default(), scratch).unwrap()
    }

    #[tokio::test]
    async fn test_download_writes_body() {
        let tmp = TempDir::new().unwrap();
        let base = serve_once("200 OK", b"7z-archive-bytes").await;
        let item = CatalogItem::new(1, "FR7142", format!("{}/7142.7z", base));

        let path = downloader(&tmp).download(&item).await.unwrap();

        assert_eq!(path, tmp.path().join("1_FR7142.7z"));
        assert_eq!(std::fs::read(&path).unwrap(), b"7z-archive-bytes");
    }

    #[tokio::test]
    async fn test_http_error_status_fails_item() {
        let tmp = TempDir::new().unwrap();
        let base = serve_once("404 Not Found", b"missing").await;
        let item = CatalogItem::new(2, "FR7143", format!("{}/7143.7z", base));

        let err = downloader(&tmp).download(&item).await.unwrap_err();

        assert!(matches!(err, AppError::Download { ref name, .. } if name == "2_FR7143"));
        assert!(!tmp.path().join("2_FR7143.7z").exists());
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_item() {
        let tmp = TempDir::new().unwrap();
        let item = CatalogItem::new(3, "FR7144", "http://127.0.0.1:1/7144.7z");

        let err = downloader(&tmp).download(&item).await.unwrap_err();
        assert!(err.to_string().contains("http://127.0.0.1:1/7144.7z"));
    }
}
