//! Round sampling for the gist language quiz.
//!
//! This library turns a page of public gists into a quiz round: it keeps the gists whose
//! first file declares a usable programming language, picks a small set of distinct
//! languages to offer as answers, and chooses one gist whose language is among them.
//! Nothing here performs I/O; the random source is always passed in, so a seeded RNG
//! reproduces the same round.
//!
//! # Example
//!
//! ```
//! use gist_sampler::{filter_gists, sample, RawGist};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let page: Vec<RawGist> = serde_json::from_str(r#"[
//!     {"id": "1", "files": {"a.rs": {"language": "Rust", "raw_url": "https://x/1"}}},
//!     {"id": "2", "files": {"a.go": {"language": "Go", "raw_url": "https://x/2"}}},
//!     {"id": "3", "files": {"a.py": {"language": "Python", "raw_url": "https://x/3"}}},
//!     {"id": "4", "files": {"a.rb": {"language": "Ruby", "raw_url": "https://x/4"}}},
//!     {"id": "5", "files": {"a.c": {"language": "C", "raw_url": "https://x/5"}}},
//!     {"id": "6", "files": {"a.hs": {"language": "Haskell", "raw_url": "https://x/6"}}},
//!     {"id": "7", "files": {"a.md": {"language": "Markdown", "raw_url": "https://x/7"}}}
//! ]"#).unwrap();
//!
//! let pool = filter_gists(page);
//! assert_eq!(pool.len(), 6);
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let round = sample(pool, &mut rng).unwrap();
//! assert!(round.answers.contains(&round.target.language));
//! ```

mod gist;
mod language;
mod sample;

pub use gist::{FileDescriptor, Owner, RawGist, ValidatedGist, filter_gists, refilter};
pub use language::{IGNORED_LANGUAGES, Language, is_valid_language};
pub use sample::{
    ANSWER_COUNTS, MIN_VALID_GISTS, Round, SampleError, sample, sample_with_answer_count,
};
