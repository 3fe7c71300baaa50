use gist_sampler::RawGist;

use crate::FetchError;
use crate::error::is_rate_limit_status;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub caps `per_page` for the gist listing at 100.
pub const MAX_PER_PAGE: u32 = 100;

/// Where rounds get their gists from.
#[allow(async_fn_in_trait)]
pub trait GistSource {
    /// Fetch one page of the public gist listing.
    async fn fetch_page(&self, page: u32) -> Result<Vec<RawGist>, FetchError>;

    /// Fetch the raw text behind a file's `raw_url`.
    async fn fetch_content(&self, raw_url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub per_page: u32,
    /// Personal access token; raises the hourly request allowance.
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            per_page: MAX_PER_PAGE,
            token: None,
            user_agent: format!("gist-quiz/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

pub struct GistClient {
    client: reqwest::Client,
    api_base: String,
    per_page: u32,
    token: Option<String>,
}

impl GistClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(FetchError::Setup)?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
            token: config.token,
        })
    }

    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/gists/public?per_page={}&page={page}",
            self.api_base, self.per_page
        )
    }

    async fn get(&self, request: reqwest::RequestBuilder, url: &str) -> Result<String, FetchError> {
        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(network)?;
        let status = response.status();

        if is_rate_limit_status(status.as_u16()) {
            let reset_at = response
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            log::warn!("GitHub rate limited {url} (HTTP {status}), reset at {reset_at:?}");
            return Err(FetchError::RateLimited {
                status: status.as_u16(),
                reset_at,
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(network)
    }
}

impl GistSource for GistClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<RawGist>, FetchError> {
        let url = self.page_url(page);
        log::info!("Fetching gist listing: {url}");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let body = self.get(request, &url).await?;
        let gists: Vec<RawGist> = serde_json::from_str(&body).map_err(FetchError::Decode)?;

        log::debug!("Page {page} returned {} gists", gists.len());
        Ok(gists)
    }

    async fn fetch_content(&self, raw_url: &str) -> Result<String, FetchError> {
        log::debug!("Fetching gist content: {raw_url}");
        self.get(self.client.get(raw_url), raw_url).await
    }
}
