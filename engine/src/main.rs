//! Tournament engine entry point: load config, wait for bots, run the
//! bracket, print final standings.

use engine::bootstrap::{self, DEFAULT_AGGREGATE_DEADLINE};
use engine::config::Config;
use engine::player::Player;
use engine::round::RoundConfig;
use engine::tournament::{self, TournamentConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt::init();

    let config_path = std::env::var("ENGINE_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = match Config::from_path(&config_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(path = config_path.as_str(), error = %e, "failed to load config");
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(e) = bootstrap::wait_for_bots(&config.bots, DEFAULT_AGGREGATE_DEADLINE).await {
        tracing::error!("{e}");
        return std::process::ExitCode::FAILURE;
    }
    tracing::info!(bots = config.bots.len(), "all bots reachable, starting tournament");

    let players: Vec<Player> = config
        .bots
        .iter()
        .map(|bot| Player::new(bot.name.clone(), bot.host.clone(), bot.port, config.game.starting_chips))
        .collect();

    let tournament_config = TournamentConfig {
        max_table_size: config.game.max_table_size,
        advance_per_table: config.tournament.advance_per_table,
        hands_per_match: config.tournament.hands_per_match,
        blind_step_per_round: config.tournament.blind_step_per_round,
        blind_step_per_tier: config.tournament.blind_step_per_tier,
        blinds_schedule: config.blinds_schedule(),
        round: RoundConfig {
            num_decks: config.game.num_decks,
            ..RoundConfig::default()
        },
    };

    let mut rng = StdRng::from_entropy();
    let standings = tournament::run(players, &tournament_config, &mut rng).await;

    tracing::info!("final standings:");
    for (rank, p) in standings.iter().enumerate() {
        tracing::info!(rank = rank + 1, player = p.name.as_str(), chips = p.chips);
    }

    std::process::ExitCode::SUCCESS
}
