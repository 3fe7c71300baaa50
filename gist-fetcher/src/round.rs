use std::ops::RangeInclusive;
use std::time::Duration;

use gist_sampler::{Round, SampleError, filter_gists, sample};
use rand::Rng;

use crate::{FetchError, GistSource};

/// Shown in place of a gist whose content could not be loaded. Must not look like a
/// comment, since comments are stripped before display.
pub const CONTENT_PLACEHOLDER: &str = "Unable to load this gist's content.";

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_delay`.
    pub retry_delay: Duration,
    /// Listing pages to pick from.
    pub pages: RangeInclusive<u32>,
    pub max_content_chars: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_millis(500),
            pages: 1..=30,
            max_content_chars: 4000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("gave up after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<RoundError>,
    },
}

impl RoundError {
    fn is_retryable(&self) -> bool {
        match self {
            RoundError::Fetch(e) => e.is_retryable(),
            RoundError::Sample(e) => e.is_retryable(),
            RoundError::Exhausted { .. } => false,
        }
    }
}

/// Fetch a page, sample a round from it and load the target's content, starting over
/// with a fresh page on retryable failures until `policy.max_attempts` is reached.
pub async fn fetch_round<S, R>(
    source: &S,
    rng: &mut R,
    policy: &RetryPolicy,
) -> Result<Round, RoundError>
where
    S: GistSource,
    R: Rng + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let error = match try_round(source, rng, policy).await {
            Ok(round) => {
                log::info!(
                    "Round ready after {attempt} attempt(s): gist {} with {} answers",
                    round.target.id,
                    round.answers.len()
                );
                return Ok(round);
            }
            Err(e) => e,
        };

        if !error.is_retryable() {
            return Err(error);
        }
        if attempt >= max_attempts {
            log::error!("Giving up on this round after {attempt} attempts: {error}");
            return Err(RoundError::Exhausted {
                attempts: attempt,
                last: Box::new(error),
            });
        }

        log::warn!("Round attempt {attempt}/{max_attempts} failed: {error}; retrying");
        tokio::time::sleep(policy.retry_delay * attempt).await;
    }
}

async fn try_round<S, R>(source: &S, rng: &mut R, policy: &RetryPolicy) -> Result<Round, RoundError>
where
    S: GistSource,
    R: Rng + ?Sized,
{
    let page = rng.random_range(policy.pages.clone());
    let gists = source.fetch_page(page).await?;
    let mut round = sample(filter_gists(gists), rng)?;

    round.target.content =
        load_content(source, &round.target.raw_url, policy.max_content_chars).await;
    Ok(round)
}

async fn load_content<S: GistSource>(source: &S, raw_url: &str, max_chars: usize) -> String {
    match source.fetch_content(raw_url).await {
        Ok(content) if !content.trim().is_empty() => truncate_chars(content, max_chars),
        Ok(_) => {
            log::warn!("Gist content at {raw_url} is empty");
            CONTENT_PLACEHOLDER.to_string()
        }
        Err(e) => {
            log::warn!("Failed to fetch gist content at {raw_url}: {e}");
            CONTENT_PLACEHOLDER.to_string()
        }
    }
}

fn truncate_chars(mut content: String, max_chars: usize) -> String {
    if let Some((cut, _)) = content.char_indices().nth(max_chars) {
        content.truncate(cut);
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use gist_sampler::RawGist;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    fn page(languages: &[&str]) -> Vec<RawGist> {
        languages
            .iter()
            .enumerate()
            .map(|(i, language)| {
                serde_json::from_value(serde_json::json!({
                    "id": format!("g{i}"),
                    "files": {
                        "snippet": {
                            "language": language,
                            "raw_url": format!("https://raw.test/g{i}")
                        }
                    }
                }))
                .unwrap()
            })
            .collect()
    }

    fn good_page() -> Vec<RawGist> {
        page(&["Rust", "Go", "Python", "Java", "C", "Ruby", "Rust"])
    }

    struct FakeSource {
        pages: RefCell<VecDeque<Result<Vec<RawGist>, FetchError>>>,
        content: Option<String>,
        page_requests: Cell<u32>,
        content_requests: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn new(pages: Vec<Result<Vec<RawGist>, FetchError>>, content: Option<&str>) -> Self {
            Self {
                pages: RefCell::new(pages.into()),
                content: content.map(str::to_string),
                page_requests: Cell::new(0),
                content_requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl GistSource for FakeSource {
        async fn fetch_page(&self, page: u32) -> Result<Vec<RawGist>, FetchError> {
            assert!((1..=30).contains(&page));
            self.page_requests.set(self.page_requests.get() + 1);
            self.pages
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn fetch_content(&self, raw_url: &str) -> Result<String, FetchError> {
            self.content_requests.borrow_mut().push(raw_url.to_string());
            self.content.clone().ok_or(FetchError::Status {
                url: raw_url.to_string(),
                status: 404,
            })
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            retry_delay: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    #[tokio::test]
    async fn test_round_with_content() {
        let source = FakeSource::new(vec![Ok(good_page())], Some("fn main() {}"));
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let round = fetch_round(&source, &mut rng, &policy()).await.unwrap();

        assert_eq!(round.target.content, "fn main() {}");
        assert!(round.answers.contains(&round.target.language));
        assert_eq!(source.page_requests.get(), 1);
        assert_eq!(
            *source.content_requests.borrow(),
            vec![round.target.raw_url.clone()]
        );
    }

    #[tokio::test]
    async fn test_retries_insufficient_and_rate_limited_pages() {
        let source = FakeSource::new(
            vec![
                Ok(page(&["Rust", "Markdown", "JSON"])),
                Err(FetchError::RateLimited {
                    status: 403,
                    reset_at: Some(1_700_000_000),
                }),
                Ok(good_page()),
            ],
            Some("print('hi')"),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let round = fetch_round(&source, &mut rng, &policy()).await.unwrap();

        assert_eq!(source.page_requests.get(), 3);
        assert_eq!(round.target.content, "print('hi')");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let source = FakeSource::new(Vec::new(), Some("x"));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let error = fetch_round(&source, &mut rng, &policy()).await.unwrap_err();

        assert_eq!(source.page_requests.get(), 5);
        match error {
            RoundError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 5);
                assert!(matches!(
                    *last,
                    RoundError::Sample(SampleError::InsufficientGists { found: 0, .. })
                ));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decode_errors_are_not_retried() {
        let decode = serde_json::from_str::<Vec<RawGist>>("{}").unwrap_err();
        let source = FakeSource::new(
            vec![Err(FetchError::Decode(decode)), Ok(good_page())],
            Some("x"),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let error = fetch_round(&source, &mut rng, &policy()).await.unwrap_err();

        assert!(matches!(error, RoundError::Fetch(FetchError::Decode(_))));
        assert_eq!(source.page_requests.get(), 1);
    }

    #[tokio::test]
    async fn test_failed_or_empty_content_uses_placeholder() {
        let source = FakeSource::new(vec![Ok(good_page())], None);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let round = fetch_round(&source, &mut rng, &policy()).await.unwrap();
        assert_eq!(round.target.content, CONTENT_PLACEHOLDER);

        let source = FakeSource::new(vec![Ok(good_page())], Some("  \n"));
        let round = fetch_round(&source, &mut rng, &policy()).await.unwrap();
        assert_eq!(round.target.content, CONTENT_PLACEHOLDER);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld".to_string(), 4), "héll");
        assert_eq!(truncate_chars("short".to_string(), 100), "short");
    }
}
