use tracing::debug;

use roulette_engine::config::GameSettings;
use roulette_engine::logging::init_logging;
use roulette_engine::Result;

mod app_config;
mod commands;

use app_config::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = GameSettings::load(cli.config.as_deref())?;
    debug!(command = cli.command.name(), ?settings, "starting");

    match cli.command {
        Commands::Spin { bets, seed } => {
            commands::spin_command(settings, &bets, seed, cli.json)?;
        }

        Commands::Simulate {
            spins,
            strategy,
            bets,
            seed,
        } => {
            commands::simulate_command(settings, spins, strategy, &bets, seed, cli.json)?;
        }

        Commands::Autoplay { spins, seed } => {
            commands::autoplay_command(settings, spins, seed, cli.json).await?;
        }

        Commands::Bankroll {
            initial_bet,
            max_loss_streak,
            balance,
        } => {
            commands::bankroll_command(initial_bet, max_loss_streak, balance, cli.json)?;
        }

        Commands::Table => {
            commands::table_command(&settings, cli.json)?;
        }
    }

    Ok(())
}
