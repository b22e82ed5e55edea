use thiserror::Error;
use url::Url;

/// Errors that can occur while retrieving the feed document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The feed URL is not a fetchable http(s) URL.
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),
}

/// Fetches the raw feed document.
///
/// One outbound request, tagged with the client's User-Agent (set on the
/// `reqwest::Client` by the caller). There is no retry policy: a transient
/// upstream failure is surfaced to the operator, who re-triggers the run.
///
/// # Errors
///
/// - [`FetchError::InvalidUrl`] - URL does not parse or is not http(s)
/// - [`FetchError::Network`] - connection, DNS, TLS, or body-read failure
/// - [`FetchError::UpstreamStatus`] - non-success status code
pub async fn fetch_feed(client: &reqwest::Client, feed_url: &str) -> Result<String, FetchError> {
    let url = Url::parse(feed_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }

    tracing::info!(url = %url, "Fetching feed");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UpstreamStatus(status.as_u16()));
    }

    Ok(response.text().await?)
}
