//! Where uncached assets come from.

use super::CacheError;
use std::future::Future;

/// Fetches the bytes of one asset by its absolute path (`/style.css`).
pub trait AssetSource: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, CacheError>> + Send;
}

/// Fetches assets over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    client: reqwest::Client,
    base: url::Url,
}

impl HttpAssetSource {
    /// # Errors
    ///
    /// `CacheError::InvalidUrl` unless `base` is an absolute http(s) URL.
    pub fn new(base: &str) -> Result<Self, CacheError> {
        let mut base =
            url::Url::parse(base.trim()).map_err(|e| CacheError::InvalidUrl(e.to_string()))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(CacheError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base.scheme()
            )));
        }

        // Keep the base path when joining relative asset paths.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// Absolute URL of the asset at `path`.
    pub fn url_for(&self, path: &str) -> Result<url::Url, CacheError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| CacheError::InvalidUrl(e.to_string()))
    }
}

impl AssetSource for HttpAssetSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, CacheError> {
        let url = self.url_for(path)?;
        log::debug!("Fetching asset {}", url);

        let fetch_error = |reason: String| CacheError::Fetch {
            path: path.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status.as_u16())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
