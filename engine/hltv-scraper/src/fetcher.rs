use crate::config::ScraperConfig;
use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Cookie name the site reads its display timezone from
pub const TIMEZONE_COOKIE: &str = "hltvTimeZone";

/// Anything that can turn a URL into rendered HTML
///
/// `None` means the page could not be obtained; callers treat it as
/// "stop" or "skip" and never see the underlying error.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Option<String>;
}

/// Fetch a page and parse it into a navigable document
pub async fn get_parsed_page<S: PageSource + ?Sized>(source: &S, url: &str) -> Option<Html> {
    let html = source.fetch_html(url).await?;
    Some(Html::parse_document(&html))
}

/// A cookie forwarded to the proxy for the target site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyCookie {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    cmd: &'static str,
    url: &'a str,
    max_timeout: u64,
    #[serde(skip_serializing_if = "no_cookies")]
    cookies: &'a [ProxyCookie],
}

fn no_cookies(cookies: &&[ProxyCookie]) -> bool {
    cookies.is_empty()
}

#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    solution: Option<ProxySolution>,
}

#[derive(Debug, Deserialize)]
struct ProxySolution {
    response: Option<String>,
}

/// FlareSolverr-backed page fetcher
pub struct PageFetcher {
    client: Client,
    proxy_url: String,
    max_timeout_ms: u64,
    cookies: Vec<ProxyCookie>,
}

impl PageFetcher {
    /// Create a fetcher from the proxy section of the configuration
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.proxy.referer).context("Invalid referer header")?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.proxy.user_agent).context("Invalid user-agent header")?,
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let mut cookies = Vec::new();
        if config.proxy.send_timezone_cookie {
            cookies.push(ProxyCookie {
                name: TIMEZONE_COOKIE.to_string(),
                value: config.timezone.source.clone(),
            });
        }

        Ok(Self {
            client,
            proxy_url: config.proxy.url.clone(),
            max_timeout_ms: config.proxy.max_timeout_ms,
            cookies,
        })
    }

    /// Replace the cookie set sent along with every request
    pub fn with_cookies(mut self, cookies: Vec<ProxyCookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn cookies(&self) -> &[ProxyCookie] {
        &self.cookies
    }

    /// Ask the proxy to render `url`, surfacing every failure as an error
    pub async fn try_fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let body = ProxyRequest {
            cmd: "request.get",
            url,
            max_timeout: self.max_timeout_ms,
            cookies: &self.cookies,
        };

        let response = self.client.post(&self.proxy_url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let text = response.text().await?;
        parse_envelope(&text)
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn fetch_html(&self, url: &str) -> Option<String> {
        info!("Fetching page: {}", url);
        match self.try_fetch(url).await {
            Ok(html) => {
                info!("Successfully fetched page: {} ({} bytes)", url, html.len());
                Some(html)
            }
            Err(e) => {
                error!("Error fetching {} through proxy: {}", url, e);
                None
            }
        }
    }
}

/// Pull the rendered HTML out of a proxy response body
fn parse_envelope(body: &str) -> std::result::Result<String, FetchError> {
    let envelope: ProxyEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Envelope(e.to_string()))?;

    match envelope.status.as_deref() {
        Some("ok") => {}
        Some(other) => {
            return Err(FetchError::NotOk {
                status: other.to_string(),
                message: envelope.message.unwrap_or_default(),
            })
        }
        None => return Err(FetchError::Envelope("missing status".to_string())),
    }

    let html = envelope
        .solution
        .and_then(|s| s.response)
        .ok_or_else(|| FetchError::Envelope("missing solution.response".to_string()))?;

    debug!("Proxy envelope carried {} bytes of HTML", html.len());
    Ok(html)
}
