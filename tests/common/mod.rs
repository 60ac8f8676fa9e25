//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use carte_ingest::archive::{Archive, ArchiveOpener};
use carte_ingest::error::{AppError, Result};
use carte_ingest::models::Config;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `routes` (path -> body) over HTTP until the test ends; unknown
/// paths get a 404. Returns the base URL.
pub async fn serve(routes: HashMap<String, String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");

                let (status, body) = match routes.get(path) {
                    Some(body) => ("200 OK", body.as_str()),
                    None => ("404 Not Found", "not found"),
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Opens "archives" whose entries are the lines of the file. Extracting an
/// entry containing `corrupt` fails.
pub struct LinesOpener;

struct LinesArchive {
    entries: Vec<String>,
}

impl ArchiveOpener for LinesOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Archive>> {
        let content = fs::read_to_string(path)?;
        Ok(Box::new(LinesArchive {
            entries: content.lines().map(str::to_string).collect(),
        }))
    }
}

impl Archive for LinesArchive {
    fn entries(&self) -> &[String] {
        &self.entries
    }

    fn extract_to_file(&mut self, entry: &str, dest: &Path) -> Result<()> {
        if entry.contains("corrupt") {
            return Err(AppError::archive(entry, "CRC mismatch"));
        }
        fs::write(dest, format!("content of {}", entry))?;
        Ok(())
    }
}

/// Config rooted in `tmp`, with a small pool.
pub fn test_config(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.paths.scratch_dir = tmp.path().join("tmp");
    config.paths.result_dir = tmp.path().join("data");
    config.extraction.workers = 2;
    config.extraction.queue_capacity = 2;
    config
}

/// Sorted file names of a directory.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
