//! Fallback sources the question bank is seeded from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use super::LoadError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where the raw question bank document comes from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the raw JSON document.
    async fn fetch(&self) -> Result<String, LoadError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Fetches the bank with a single HTTP GET.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LoadError::Fetch(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the bank from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Fetch(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_source_returns_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/quiz.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/services/quiz.json", server.uri())).unwrap();
        assert_eq!(source.fetch().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_http_source_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/quiz.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/services/quiz.json", server.uri())).unwrap();
        assert!(matches!(source.fetch().await, Err(LoadError::Status(404))));
    }

    #[tokio::test]
    async fn test_http_source_connection_refused() {
        // Bind then drop so nothing is listening on the port.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let source = HttpSource::new(format!("http://{}/services/quiz.json", addr)).unwrap();
        assert!(matches!(source.fetch().await, Err(LoadError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));

        assert!(matches!(source.fetch().await, Err(LoadError::Fetch(_))));
    }
}
