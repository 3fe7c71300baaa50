use std::ops::RangeInclusive;

use indexmap::IndexSet;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Language, ValidatedGist};

/// Smallest validated pool a round is drawn from.
pub const MIN_VALID_GISTS: usize = 6;

/// How many answer buttons a round may show.
pub const ANSWER_COUNTS: RangeInclusive<usize> = 4..=6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("only {found} gists with a usable language, need at least {required}")]
    InsufficientGists { found: usize, required: usize },

    #[error("only {found} distinct languages, need {required}")]
    InsufficientLanguages { found: usize, required: usize },

    #[error("a round needs at least one answer")]
    NoAnswers,
}

impl SampleError {
    /// Whether another page of gists could satisfy the request.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SampleError::NoAnswers)
    }
}

/// One guess cycle: the gist to show and the languages to offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub target: ValidatedGist,
    /// Distinct languages in display order. Always contains `target.language`.
    pub answers: Vec<Language>,
}

impl Round {
    pub fn is_correct(&self, guess: &Language) -> bool {
        *guess == self.target.language
    }

    /// Position of the target language among the answers.
    pub fn correct_index(&self) -> usize {
        self.answers
            .iter()
            .position(|language| *language == self.target.language)
            .unwrap_or_default()
    }
}

/// Draw a round from a validated pool, with an answer count chosen uniformly from
/// [`ANSWER_COUNTS`].
pub fn sample<R>(pool: Vec<ValidatedGist>, rng: &mut R) -> Result<Round, SampleError>
where
    R: Rng + ?Sized,
{
    ensure_pool_size(&pool)?;
    let answer_count = rng.random_range(ANSWER_COUNTS);
    sample_with_answer_count(pool, answer_count, rng)
}

/// Draw a round offering exactly `answer_count` languages. A count of zero is rejected
/// with [`SampleError::NoAnswers`].
pub fn sample_with_answer_count<R>(
    pool: Vec<ValidatedGist>,
    answer_count: usize,
    rng: &mut R,
) -> Result<Round, SampleError>
where
    R: Rng + ?Sized,
{
    if answer_count == 0 {
        return Err(SampleError::NoAnswers);
    }
    ensure_pool_size(&pool)?;

    // First-seen order keeps the shuffle reproducible for a seeded rng.
    let distinct: IndexSet<&Language> = pool.iter().map(|gist| &gist.language).collect();
    if distinct.len() < answer_count {
        return Err(SampleError::InsufficientLanguages {
            found: distinct.len(),
            required: answer_count,
        });
    }

    let mut answers: Vec<Language> = distinct.into_iter().cloned().collect();
    answers.shuffle(rng);
    answers.truncate(answer_count);

    let mut candidates: Vec<ValidatedGist> = pool
        .into_iter()
        .filter(|gist| answers.contains(&gist.language))
        .collect();

    // Every answer came from some gist in the pool, so there is at least one candidate.
    let target = candidates.swap_remove(rng.random_range(0..candidates.len()));

    log::debug!(
        "Sampled gist {} ({}) with answers {:?}",
        target.id,
        target.language,
        answers.iter().map(Language::as_str).collect::<Vec<_>>()
    );

    Ok(Round { target, answers })
}

fn ensure_pool_size(pool: &[ValidatedGist]) -> Result<(), SampleError> {
    if pool.len() < MIN_VALID_GISTS {
        return Err(SampleError::InsufficientGists {
            found: pool.len(),
            required: MIN_VALID_GISTS,
        });
    }
    Ok(())
}
