mod console;
mod render;

use std::io;
use std::time::Duration;

use blackjack::{RetireReason, Session, SessionSummary, TableRules};
use clap::Parser;

use crate::console::{ConsoleAnnouncer, ConsolePrompt};
use crate::render::Tone;

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "blackjack-console", about = "Blackjack against the house in your terminal")]
struct Cli {
    /// Seat a player (repeat for more seats)
    #[arg(long = "player", value_name = "NAME", default_value = "Player1")]
    players: Vec<String>,

    #[arg(long, env = "BLACKJACK_STARTING_CHIPS", default_value_t = 100)]
    starting_chips: u64,

    #[arg(long, default_value = "Dealer")]
    dealer_name: String,

    /// Fixed shuffle seed, for replaying a session
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    /// Pause after each drawn card, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

impl Cli {
    fn rules(&self) -> TableRules {
        TableRules {
            starting_chips: self.starting_chips,
            ..TableRules::default()
        }
    }
}

fn banner(rules: &TableRules) -> String {
    [
        "Welcome to the blackjack table!".to_string(),
        format!(
            "The dealer hits through {} and stands above it.",
            rules.dealer_hits_through
        ),
        format!(
            "Aces count as 1 or 11. Every player starts with {} chips.",
            rules.starting_chips
        ),
    ]
    .join("\n")
}

fn farewell(summary: &SessionSummary) -> String {
    let mut lines = vec!["Thank you everyone for playing!".to_string()];
    for standing in &summary.standings {
        let note = match standing.retired {
            Some(RetireReason::OutOfChips) => " (out of chips)",
            Some(RetireReason::Declined) | None => "",
        };
        lines.push(format!(
            "  {}: {} chips{note}",
            standing.name, standing.chips
        ));
    }
    lines.join("\n")
}

fn main() -> Result<(), BoxErr> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let rules = cli.rules();

    let session = match cli.seed {
        Some(seed) => {
            log::info!("shuffling with seed {seed}");
            Session::seeded(cli.players.as_slice(), &cli.dealer_name, rules, seed)?
        }
        None => Session::new(cli.players.as_slice(), &cli.dealer_name, rules)?,
    };

    println!("{}", render::paint(Tone::Notice, &banner(&rules)));

    let mut prompt = ConsolePrompt::new(io::stdin().lock(), io::stdout());
    let mut announcer = ConsoleAnnouncer::new(
        io::stdout(),
        cli.dealer_name.as_str(),
        Duration::from_millis(cli.delay_ms),
    );

    let summary = match session.run(&mut prompt, &mut announcer) {
        Ok(summary) => summary,
        Err(err) => {
            log::error!("table closed unexpectedly: {err}");
            return Err(err.into());
        }
    };

    println!("\n{}", farewell(&summary));
    Ok(())
}
