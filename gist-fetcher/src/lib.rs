//! Fetching side of the gist language quiz.
//!
//! [`GistClient`] talks to the GitHub public gist listing; [`fetch_round`] drives one
//! round from page fetch to content download, retrying with a fresh random page when the
//! page is unusable or the upstream is rate limiting.

mod client;
mod error;
mod round;

pub use client::{ClientConfig, DEFAULT_API_BASE, GistClient, GistSource, MAX_PER_PAGE};
pub use error::{FetchError, is_rate_limit_status};
pub use round::{CONTENT_PLACEHOLDER, RetryPolicy, RoundError, fetch_round};
