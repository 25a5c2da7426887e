//! Verse dataset fetching.
//!
//! The dataset is a JSON array of `{bookId, bookName, chapter, verse, text}`
//! records. It is fetched once, off the keystroke path, and handed to
//! [`VerseCorpus::load_once`](crate::bible::corpus::VerseCorpus::load_once).

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::VerseRecord;

/// Parse a dataset document. `origin` names the file or URL for error messages.
pub fn parse_records(json: &str, origin: &str) -> Result<Vec<VerseRecord>> {
    serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("Invalid verse dataset: {e}"), origin.to_string()))
}

/// Something that can produce the verse dataset.
#[async_trait]
pub trait CorpusFetcher: Send + Sync {
    /// Fetch and parse the full dataset.
    async fn fetch(&self) -> Result<Vec<VerseRecord>>;

    /// Human-readable description of the source (for logging/status).
    fn describe(&self) -> String;
}

/// Reads the dataset from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    /// Create a fetcher for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the dataset synchronously.
    pub fn read(&self) -> Result<Vec<VerseRecord>> {
        let content = fs_err::read_to_string(&self.path)
            .map_err(|e| Error::io(e, Some(self.path.clone())))?;
        parse_records(&content, &self.path.display().to_string())
    }
}

#[async_trait]
impl CorpusFetcher for FileFetcher {
    async fn fetch(&self) -> Result<Vec<VerseRecord>> {
        let fetcher = self.clone();
        tokio::task::spawn_blocking(move || fetcher.read())
            .await
            .map_err(|e| Error::Corpus(format!("Dataset read task failed: {e}")))?
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Downloads the dataset over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: String,
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
        }
    }

    /// Create a fetcher for `url` using an already configured client.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self { url: url.into(), client }
    }
}

#[async_trait]
impl CorpusFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<VerseRecord>> {
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", self.url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Network(format!("Request to {} returned {}", self.url, status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(format!("Reading body from {} failed: {}", self.url, e)))?;
        parse_records(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a fetcher from configuration: a local file wins over a URL.
pub fn fetcher_for(config: &Config) -> Result<Box<dyn CorpusFetcher>> {
    if let Some(path) = &config.bible_data_path {
        return Ok(Box::new(FileFetcher::new(path.clone())));
    }
    if let Some(url) = &config.bible_data_url {
        return Ok(Box::new(HttpFetcher::new(url.clone(), config.http_timeout)));
    }
    Err(Error::config(
        "No verse dataset configured",
        "Set HOLYREF_BIBLE_DATA to a JSON file or HOLYREF_BIBLE_URL to a URL",
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const SAMPLE: &str = r#"[
        {"bookId":"GEN","bookName":"창세기","chapter":1,"verse":1,"text":"태초에 하나님이 천지를 창조하시니라"},
        {"bookId":"GEN","bookName":"창세기","chapter":1,"verse":2,"text":"땅이 혼돈하고 공허하며"}
    ]"#;

    #[test]
    fn parses_dataset() {
        let records = parse_records(SAMPLE, "sample").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].verse, 2);
    }

    #[test]
    fn malformed_dataset_is_parse_error() {
        match parse_records(r#"{"not":"an array"}"#, "broken.json") {
            Err(Error::Parse { file: Some(f), .. }) => assert_eq!(f, "broken.json"),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn file_fetcher_reads_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = FileFetcher::new(file.path()).read().unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let fetcher = FileFetcher::new("/nonexistent/holyref/bible-data.json");
        match fetcher.read() {
            Err(Error::Io { path: Some(p), .. }) => assert!(p.ends_with("bible-data.json")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn async_file_fetch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let fetcher = FileFetcher::new(file.path());
        assert_eq!(fetcher.fetch().await.unwrap().len(), 2);
        assert!(fetcher.describe().contains(&*file.path().to_string_lossy()));
    }

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/bible-data.json")
    }

    fn local_fetcher(url: &str) -> HttpFetcher {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpFetcher::with_client(url, client)
    }

    #[tokio::test]
    async fn http_fetch_parses_dataset() {
        let url = serve_once("200 OK", SAMPLE).await;
        let fetcher = local_fetcher(&url);

        let records = fetcher.fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "태초에 하나님이 천지를 창조하시니라");
        assert_eq!(fetcher.describe(), url);
    }

    #[tokio::test]
    async fn http_error_status_is_network_error() {
        let url = serve_once("404 Not Found", "missing").await;

        match local_fetcher(&url).fetch().await {
            Err(Error::Network(message)) => assert!(message.contains("404"), "{message}"),
            other => panic!("Expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_malformed_body_is_parse_error() {
        let url = serve_once("200 OK", "{}").await;

        match local_fetcher(&url).fetch().await {
            Err(Error::Parse { file: Some(f), .. }) => assert_eq!(f, url),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn fetcher_prefers_local_file() {
        let mut config = Config::default();
        config.bible_data_path = Some(PathBuf::from("/data/bible.json"));
        config.bible_data_url = Some("https://example.org/bible.json".to_string());
        assert_eq!(fetcher_for(&config).unwrap().describe(), "/data/bible.json");

        config.bible_data_path = None;
        assert_eq!(fetcher_for(&config).unwrap().describe(), "https://example.org/bible.json");
    }

    #[test]
    fn unconfigured_source_is_config_error() {
        assert!(matches!(fetcher_for(&Config::default()), Err(Error::Config { .. })));
    }
}
