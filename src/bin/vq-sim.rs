//! Offline battle simulator.
//!
//! Runs one battle (printing the full result as JSON) or a seeded matchup
//! of many battles (printing aggregate stats). Useful for balancing the
//! card catalog.
//!
//! ```text
//! vq-sim --player deck.json --computer hard --seed 42
//! vq-sim --player a.json --opponent b.json --iterations 10000
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vaccine_quest::{
    simulate_matchup, BattleConfig, BattleResolver, BattleRng, CardCatalog, ComputerOpponent, Deck,
    Difficulty,
};

/// Simulate Vaccine Quest battles
#[derive(Parser)]
#[command(name = "vq-sim")]
#[command(about = "Simulate Vaccine Quest battles", long_about = None)]
#[command(version)]
struct Cli {
    /// Player deck (JSON: {"vaccines": [...], "viruses": [...]})
    #[arg(short, long, value_name = "FILE")]
    player: PathBuf,

    /// Opponent deck file
    #[arg(short, long, value_name = "FILE", conflicts_with = "computer")]
    opponent: Option<PathBuf>,

    /// Fight a generated computer deck instead (easy, normal, hard)
    #[arg(long, value_name = "DIFFICULTY")]
    computer: Option<Difficulty>,

    /// Card catalog JSON; defaults to the built-in catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Battle configuration TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of battles; more than one prints matchup stats
    #[arg(short, long, default_value = "1")]
    iterations: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BattleConfig::from_toml_str(&read(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => BattleConfig::default(),
    };
    let catalog = match &cli.catalog {
        Some(path) => CardCatalog::from_json_str(&read(path)?, config.probability_policy)
            .with_context(|| format!("invalid catalog {}", path.display()))?,
        None => CardCatalog::builtin_with(config.probability_policy).context("built-in catalog")?,
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    let player = load_deck(&cli.player)?;
    let opponent = match (&cli.opponent, cli.computer) {
        (Some(path), _) => load_deck(path)?,
        (None, difficulty) => ComputerOpponent::from_difficulty(difficulty.unwrap_or_default())
            .generate(&catalog, &mut BattleRng::new(seed).for_context("opponent-deck"))?,
    };

    let resolver = BattleResolver::new(&catalog, config)?;
    let output = if cli.iterations > 1 {
        let stats = simulate_matchup(&resolver, &player, &opponent, cli.iterations, seed)?;
        serde_json::to_string_pretty(&stats)?
    } else {
        let result = resolver.resolve(&player, &opponent, &mut BattleRng::new(seed).for_context("battle"))?;
        let places = resolver.config().display_precision;
        for event in &result.events {
            tracing::info!("{}", event.display(places));
        }
        serde_json::to_string_pretty(&result)?
    };

    eprintln!("seed: {}", seed);
    println!("{}", output);
    Ok(())
}

/// `RUST_LOG` directives when set and valid, `warn` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_deck(path: &Path) -> Result<Deck> {
    Deck::from_json_str(&read(path)?).with_context(|| format!("invalid deck {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_uses_env_directives() {
        assert_eq!(log_filter(Some("info".to_string())).to_string(), "info");
        assert_eq!(
            log_filter(Some("vaccine_quest=debug".to_string())).to_string(),
            "vaccine_quest=debug"
        );
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).to_string(), "warn");
        assert_eq!(log_filter(Some("  ".to_string())).to_string(), "warn");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["vq-sim", "--player", "a.json", "--computer", "hard", "-s", "7"])
            .unwrap();
        assert_eq!(cli.computer, Some(Difficulty::Hard));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.iterations, 1);

        assert!(Cli::try_parse_from(["vq-sim", "-p", "a.json", "-o", "b.json", "--computer", "easy"]).is_err());
    }
}
