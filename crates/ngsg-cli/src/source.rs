use std::io;
use std::path::PathBuf;

use log::debug;
use ngsg_core::pipeline::DocumentSource;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to download {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A Swagger document on disk or behind an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOrUrlSource {
    File(PathBuf),
    Url(String),
}

impl FileOrUrlSource {
    pub fn new(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            FileOrUrlSource::Url(location.to_string())
        } else {
            FileOrUrlSource::File(PathBuf::from(location))
        }
    }

    async fn download(url: &str) -> Result<String, reqwest::Error> {
        reqwest::get(url).await?.error_for_status()?.text().await
    }
}

impl DocumentSource for FileOrUrlSource {
    type Error = SourceError;

    fn location(&self) -> String {
        match self {
            FileOrUrlSource::File(path) => path.display().to_string(),
            FileOrUrlSource::Url(url) => url.clone(),
        }
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        match self {
            FileOrUrlSource::File(path) => {
                debug!("reading {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Read {
                        path: path.display().to_string(),
                        source,
                    })
            }
            FileOrUrlSource::Url(url) => {
                debug!("downloading {url}");
                Self::download(url).await.map_err(|source| SourceError::Http {
                    url: url.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_urls() {
        assert_eq!(
            FileOrUrlSource::new("https://petstore.swagger.io/v2/swagger.json"),
            FileOrUrlSource::Url("https://petstore.swagger.io/v2/swagger.json".to_string())
        );
        assert_eq!(
            FileOrUrlSource::new("http://localhost:8080/api-docs"),
            FileOrUrlSource::Url("http://localhost:8080/api-docs".to_string())
        );
        assert_eq!(
            FileOrUrlSource::new("specs/swagger.yaml"),
            FileOrUrlSource::File(PathBuf::from("specs/swagger.yaml"))
        );
    }

    #[tokio::test]
    async fn test_reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.yaml");
        std::fs::write(&path, "swagger: '2.0'\n").unwrap();

        let source = FileOrUrlSource::new(path.to_str().unwrap());
        assert_eq!(source.location(), path.display().to_string());
        assert_eq!(source.fetch().await.unwrap(), "swagger: '2.0'\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileOrUrlSource::File(dir.path().join("absent.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read "));
    }
}
