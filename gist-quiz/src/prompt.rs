use std::io;
use std::time::Duration;

use anyhow::Context;
use gist_sampler::Language;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Pick(Language),
    TimedOut,
    Quit,
}

/// Player input, read line by line on a background task.
///
/// Lines keep arriving while a round loads or after it times out; the game calls
/// [`Input::discard_pending`] when it presents a round so those lines never answer it.
pub struct Input {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl Input {
    pub fn spawn<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(Ok(line)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });
        Self { lines: rx }
    }

    /// Drop every line typed before now. Returns how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let mut discarded = 0;
        while self.lines.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            log::debug!("Discarded {discarded} line(s) typed before the round was shown");
        }
        discarded
    }
}

/// Interpret one line of input as a button number (1-based), a language name, or `q`.
pub fn parse_choice(input: &str, answers: &[Language]) -> Option<Reply> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Some(Reply::Quit);
    }

    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| answers.get(index))
            .cloned()
            .map(Reply::Pick);
    }

    let typed = Language::parse(input)?;
    answers
        .iter()
        .find(|language| **language == typed)
        .cloned()
        .map(Reply::Pick)
}

/// Read lines until one is a valid choice or `limit` runs out. Invalid lines re-prompt
/// without extending the deadline; end of input counts as quitting.
pub async fn read_reply(
    input: &mut Input,
    answers: &[Language],
    limit: Duration,
) -> anyhow::Result<Reply> {
    let deadline = Instant::now() + limit;

    loop {
        let line = match tokio::time::timeout_at(deadline, input.lines.recv()).await {
            Err(_elapsed) => return Ok(Reply::TimedOut),
            Ok(None) => return Ok(Reply::Quit),
            Ok(Some(line)) => line.context("Failed to read answer from stdin")?,
        };

        match parse_choice(&line, answers) {
            Some(reply) => return Ok(reply),
            None => println!(
                "Type a number from 1 to {} or one of the language names (q to quit).",
                answers.len()
            ),
        }
    }
}
