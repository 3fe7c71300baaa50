use std::time::Duration;

use clap::Parser;
use gist_fetcher::{ClientConfig, DEFAULT_API_BASE, RetryPolicy};

use crate::game::GameConfig;

/// Guess the programming language of random public GitHub gists
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Wrong answers (or timeouts) allowed before the game ends
    #[arg(long, default_value_t = 3)]
    pub lives: u32,

    /// Seconds to answer each round
    #[arg(long, default_value_t = 30)]
    pub round_seconds: u64,

    /// Stop after this many rounds
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Gists requested per listing page
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: u32,

    /// Pages fetched before giving up on a round
    #[arg(long, default_value_t = 5)]
    pub max_attempts: u32,

    /// Base delay between attempts, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub retry_delay_ms: u64,

    /// Seed for reproducible page and round selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show snippets with their comments instead of stripping them
    #[arg(long)]
    pub keep_comments: bool,

    /// GitHub API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Print the full error chain when the game stops on an error
    #[arg(long)]
    pub verbose_errors: bool,
}

impl Args {
    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            per_page: self.per_page,
            token,
            ..ClientConfig::default()
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            ..RetryPolicy::default()
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            lives: self.lives.max(1),
            max_rounds: self.rounds,
        }
    }

    pub fn round_time(&self) -> Duration {
        Duration::from_secs(self.round_seconds.max(1))
    }
}
