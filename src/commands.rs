//! Command implementations for the roulette CLI

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use roulette_engine::config::GameSettings;
use roulette_engine::gaming::{
    calculate_required_bankroll, describe_bet, has_sufficient_bankroll, AutoPlayReport,
    AutoPlayer, GameStatistics, RouletteSession, SeededSpinner, SpinResult, StrategyConfig,
};
use roulette_engine::table::{pocket_label, BetType, CHIP_VALUES, TABLE_LAYOUT};
use roulette_engine::{Error, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::app_config::BetSpec;

/// Session with a seeded wheel when asked, the OS CSPRNG otherwise
fn new_session(settings: GameSettings, seed: Option<u64>) -> RouletteSession {
    match seed {
        Some(seed) => {
            info!(seed, "using seeded wheel");
            RouletteSession::with_spinner(settings, Box::new(SeededSpinner::from_u64(seed)))
        }
        None => RouletteSession::new(settings),
    }
}

fn place_all(session: &mut RouletteSession, bets: &[BetSpec]) -> Result<()> {
    for spec in bets {
        session.place_bet(spec.bet_type, spec.numbers.as_deref(), spec.amount)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_spin(result: &SpinResult, balance: Decimal) {
    println!(
        "Ball lands on {} {}",
        pocket_label(result.number),
        result.color
    );
    for bet in &result.winning_bets {
        println!("  won  {}", describe_bet(bet));
    }
    println!(
        "  wagered ${}  returned ${}  net ${}",
        result.total_bet_amount, result.total_winnings, result.net_profit
    );
    println!("  balance ${}", balance);
}

fn print_statistics(stats: &GameStatistics) {
    println!(
        "Spins: {}  Bets: {}  Winning spins: {}",
        stats.total_spins, stats.total_bets, stats.winning_spins
    );
    println!(
        "Red {:.1}%  Black {:.1}%  Green {:.1}%",
        stats.red_percentage, stats.black_percentage, stats.green_percentage
    );
    println!(
        "Odd {:.1}%  Even {:.1}%  Low {:.1}%  High {:.1}%",
        stats.odd_percentage, stats.even_percentage, stats.low_percentage, stats.high_percentage
    );
    println!(
        "Longest runs: red {} black {} odd {} even {} low {} high {}",
        stats.max_consecutive.red,
        stats.max_consecutive.black,
        stats.max_consecutive.odd,
        stats.max_consecutive.even,
        stats.max_consecutive.low,
        stats.max_consecutive.high
    );
    println!(
        "Wagered ${}  Returned ${}  Net ${}",
        stats.total_wagered, stats.total_winnings, stats.net_profit
    );
    println!(
        "Balance ${} (start ${}, high ${}, low ${})",
        stats.current_balance, stats.starting_balance, stats.max_balance, stats.min_balance
    );
}

pub fn spin_command(
    settings: GameSettings,
    bets: &[BetSpec],
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut session = new_session(settings, seed);
    place_all(&mut session, bets)?;
    let result = session.spin()?;

    if json {
        return print_json(&result);
    }
    print_spin(&result, session.balance());
    Ok(())
}

pub fn simulate_command(
    settings: GameSettings,
    spins: usize,
    use_strategy: bool,
    bets: &[BetSpec],
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    if !use_strategy && bets.is_empty() {
        return Err(Error::InvalidBet(
            "Give at least one --bet or pass --strategy".to_string(),
        ));
    }

    let mut session = new_session(settings, seed);
    session.enable_strategy(use_strategy);

    for spin in 0..spins {
        let placed = if use_strategy {
            session.prepare_auto_bets().map(|bet| bet.is_some())
        } else {
            place_all(&mut session, bets).map(|()| true)
        };
        match placed {
            Ok(true) => {}
            Ok(false) => {
                warn!(spin, phase = ?session.strategy_phase(), "strategy stopped betting");
                break;
            }
            Err(Error::InsufficientBalance(reason)) => {
                warn!(spin, %reason, "bankroll exhausted");
                break;
            }
            Err(e) => return Err(e),
        }
        session.spin()?;
    }

    let stats = session.statistics();
    if json {
        return print_json(&stats);
    }
    print_statistics(&stats);
    Ok(())
}

pub async fn autoplay_command(
    mut settings: GameSettings,
    spins: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    settings.strategy.enabled = true;
    let session = Arc::new(Mutex::new(new_session(settings, seed)));
    let player = AutoPlayer::new(session.clone());

    let handle = player.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping auto-play");
            handle.shutdown();
        }
    });

    let report = player.run(spins).await?;

    if json {
        return print_json(&report);
    }
    print_report(&report);
    print_statistics(&session.lock().await.statistics());
    Ok(())
}

fn print_report(report: &AutoPlayReport) {
    for result in &report.results {
        println!(
            "{:>3} {:<5}  net ${}",
            pocket_label(result.number),
            result.color.as_str(),
            result.net_profit
        );
    }
    println!(
        "Stopped after {} spins ({:?}); net ${}",
        report.spins_played, report.stop_reason, report.net_profit
    );
}

#[derive(Serialize)]
struct BankrollReport {
    initial_bet: Decimal,
    max_loss_streak: u32,
    required: Decimal,
    balance: Option<Decimal>,
    sufficient: Option<bool>,
    shortfall: Option<Decimal>,
}

pub fn bankroll_command(
    initial_bet: Decimal,
    max_loss_streak: u32,
    balance: Option<Decimal>,
    json: bool,
) -> Result<()> {
    let config = StrategyConfig {
        initial_bet,
        max_loss_streak,
        ..StrategyConfig::default()
    };
    roulette_engine::config::validate_strategy_config(&config)?;

    let check = balance.map(|balance| has_sufficient_bankroll(balance, &config));
    let report = BankrollReport {
        initial_bet,
        max_loss_streak,
        required: calculate_required_bankroll(&config),
        balance,
        sufficient: check.map(|c| c.sufficient),
        shortfall: check.map(|c| c.shortfall),
    };

    if json {
        return print_json(&report);
    }

    println!(
        "Riding out {} losses from ${} needs ${}",
        max_loss_streak, initial_bet, report.required
    );
    if let (Some(balance), Some(check)) = (balance, check) {
        if check.sufficient {
            println!("Balance ${} is enough", balance);
        } else {
            println!("Balance ${} is short by ${}", balance, check.shortfall);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PayoutRow {
    bet_type: BetType,
    label: &'static str,
    payout: String,
}

pub fn table_command(settings: &GameSettings, json: bool) -> Result<()> {
    let payouts: Vec<PayoutRow> = BetType::ALL
        .iter()
        .map(|bet_type| PayoutRow {
            bet_type: *bet_type,
            label: bet_type.label(),
            payout: format!("{}:1", bet_type.payout_ratio()),
        })
        .collect();

    if json {
        return print_json(&payouts);
    }

    println!("{:?} wheel", settings.wheel_variant());
    for row in TABLE_LAYOUT.iter() {
        let cells: Vec<String> = row.iter().map(|n| format!("{:>2}", n)).collect();
        println!("  {}", cells.join(" "));
    }
    if let Some(wheel_order) = settings.wheel_variant().wheel_order() {
        let order: Vec<String> = wheel_order.iter().map(|n| n.to_string()).collect();
        println!("Wheel order: {}", order.join(" "));
    }
    let chips: Vec<String> = CHIP_VALUES.iter().map(|c| format!("${}", c)).collect();
    println!("Chips: {}", chips.join(" "));
    println!();
    for row in payouts {
        println!("{:<10} {:<8} {}", row.bet_type.name(), row.label, row.payout);
    }
    Ok(())
}
