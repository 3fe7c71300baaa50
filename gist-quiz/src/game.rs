use gist_sampler::{Language, Round};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Guessing,
    Scoring,
    GameOver,
}

/// Identifies one requested round. Anything carrying an older generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Pick(Language),
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Correct { points: u32 },
    Wrong { expected: Language },
    TimedOut { expected: Language },
    /// The ticket no longer matches the open round; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub lives: u32,
    pub max_rounds: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            max_rounds: None,
        }
    }
}

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    phase: Phase,
    generation: u64,
    open: Option<RoundTicket>,
    pub score: u32,
    pub lives: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub rounds_played: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Loading,
            generation: 0,
            open: None,
            score: 0,
            lives: config.lives,
            streak: 0,
            best_streak: 0,
            rounds_played: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Start loading a new round. Any ticket handed out earlier becomes stale.
    pub fn request_round(&mut self) -> RoundTicket {
        self.generation += 1;
        let ticket = RoundTicket {
            generation: self.generation,
        };
        self.open = Some(ticket);
        self.phase = Phase::Loading;
        ticket
    }

    /// Show the round loaded for `ticket`. Returns false when a newer round was requested
    /// in the meantime, in which case the loaded round should be dropped.
    pub fn present(&mut self, ticket: RoundTicket) -> bool {
        if self.open != Some(ticket) || self.phase != Phase::Loading {
            log::debug!("Discarding stale round (generation {})", ticket.generation);
            return false;
        }
        self.phase = Phase::Guessing;
        true
    }

    pub fn submit(&mut self, ticket: RoundTicket, answer: Answer, round: &Round) -> Outcome {
        if self.open != Some(ticket) || self.phase != Phase::Guessing {
            log::debug!("Ignoring answer for stale generation {}", ticket.generation);
            return Outcome::Stale;
        }
        self.open = None;
        self.rounds_played += 1;

        let expected = round.target.language.clone();
        let outcome = match answer {
            Answer::Pick(guess) if round.is_correct(&guess) => {
                let points = 1 + self.streak / 3;
                self.score += points;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
                Outcome::Correct { points }
            }
            Answer::Pick(_) => {
                self.lose_life();
                Outcome::Wrong { expected }
            }
            Answer::TimedOut => {
                self.lose_life();
                Outcome::TimedOut { expected }
            }
        };

        let out_of_rounds = self
            .config
            .max_rounds
            .is_some_and(|max| self.rounds_played >= max);
        self.phase = if self.lives == 0 || out_of_rounds {
            Phase::GameOver
        } else {
            Phase::Scoring
        };

        outcome
    }

    /// End the game early, e.g. when the player quits or rounds stop loading.
    pub fn finish(&mut self) {
        self.open = None;
        self.phase = Phase::GameOver;
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.streak = 0;
    }
}
