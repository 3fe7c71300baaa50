use anyhow::Context;
use clap::Parser;
use gist_fetcher::{GistClient, fetch_round};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::io::BufReader;

mod config;
mod game;
mod prompt;
mod render;
mod report;

use config::Args;
use game::{Answer, Game};
use prompt::{Input, Reply};
use report::ErrorReport;

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let verbose = cfg!(debug_assertions) || args.verbose_errors;

    let code = match run(args).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", ErrorReport::new(&e, verbose));
            1
        }
    };

    // The stdin reader task may be parked in a blocking read that cannot be cancelled,
    // which would keep the runtime from shutting down.
    std::process::exit(code);
}

async fn run(args: Args) -> anyhow::Result<()> {
    let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
    if token.is_none() {
        println!("No GITHUB_TOKEN set - using anonymous requests (60 per hour).");
    }

    let client = GistClient::new(args.client_config(token))
        .context("Failed to set up GitHub client")?;
    let policy = args.retry_policy();
    let round_time = args.round_time();
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    let mut game = Game::new(args.game_config());
    let mut input = Input::spawn(BufReader::new(tokio::io::stdin()));

    while !game.is_over() {
        let ticket = game.request_round();
        println!("\nFetching a fresh gist...");

        let round = fetch_round(&client, &mut rng, &policy)
            .await
            .context("Could not load a new round")?;
        if !game.present(ticket) {
            continue;
        }
        input.discard_pending();

        let content = render::display_content(&round.target.content, args.keep_comments);

        println!("{}", render::status_line(&game, round_time.as_secs()));
        println!("{}", render::code_panel(&content));
        println!("{}", render::buttons(&round));
        println!("Which language is this?");

        let answer = match prompt::read_reply(&mut input, &round.answers, round_time).await? {
            Reply::Pick(language) => Answer::Pick(language),
            Reply::TimedOut => Answer::TimedOut,
            Reply::Quit => {
                game.finish();
                break;
            }
        };

        let outcome = game.submit(ticket, answer, &round);
        log::debug!("Round {} scored, now {:?}", game.rounds_played, game.phase());
        println!("{}", render::outcome_line(&outcome, &round));
        if let Some(url) = &round.target.html_url {
            println!("  {url}");
        }
    }

    println!("\n{}", render::summary(&game));
    Ok(())
}
