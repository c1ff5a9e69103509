use std::time::Duration;

use super::FetchError;
use crate::models::TextSegment;
use crate::pipeline::extraction::html_to_plain_text;
use crate::pipeline_config::PipelineConfig;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const HTML_CONTENT_TYPE: &str = "text/html";

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    /// Raw `Content-Type` header value, empty when absent.
    pub content_type: String,
    pub body: String,
}

/// Fetch seam. Implementations return `Err` for transport failures and
/// non-2xx statuses alike.
pub trait UrlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResponse, FetchError>;
}

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, FetchError> {
        Self::new(config.fetch_timeout_secs, &config.user_agent)
    }
}

impl UrlFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                FetchError::Connection(url.to_string())
            } else {
                FetchError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        // PDF bodies are never read, only reported.
        if content_type.contains(PDF_CONTENT_TYPE) {
            return Ok(FetchedResponse {
                content_type,
                body: String::new(),
            });
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedResponse { content_type, body })
    }
}

/// Placeholder segment for a URL whose content could not be retrieved.
pub fn unreachable_url_segment(url: &str) -> TextSegment {
    TextSegment::unpaged(format!("Source URL: {url}"))
}

/// Turn a URL into text segments.
///
/// Never fails: HTML pages are converted to plain text, PDFs and failed
/// fetches become a single placeholder segment, anything else is used as
/// text verbatim.
pub fn acquire_url(url: &str, fetcher: &dyn UrlFetcher) -> Vec<TextSegment> {
    let response = match fetcher.fetch(url) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "URL fetch failed, using placeholder");
            return vec![unreachable_url_segment(url)];
        }
    };

    let content_type = response.content_type.to_ascii_lowercase();
    let text = if content_type.contains(HTML_CONTENT_TYPE) {
        html_to_plain_text(&response.body)
    } else if content_type.contains(PDF_CONTENT_TYPE) {
        tracing::info!(url = %url, "Remote PDF is not downloaded, using placeholder");
        format!("Source URL (PDF): {url}")
    } else {
        response.body
    };

    tracing::debug!(url = %url, content_type = %content_type, chars = text.chars().count(), "URL acquired");
    vec![TextSegment::unpaged(text)]
}

/// Fetcher that replays canned responses, keyed by URL.
#[cfg(test)]
pub(crate) struct MockFetcher {
    responses: std::collections::HashMap<String, Result<FetchedResponse, u16>>,
}

#[cfg(test)]
impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: std::collections::HashMap::new(),
        }
    }

    pub fn with_page(mut self, url: &str, content_type: &str, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(FetchedResponse {
                content_type: content_type.to_string(),
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }
}

#[cfg(test)]
impl UrlFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        match self.responses.get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(FetchError::Status { status: *status }),
            None => Err(FetchError::Connection(url.to_string())),
        }
    }
}
