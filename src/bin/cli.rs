//! Dicesim CLI - run martingale dice betting simulations from the terminal

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use dicesim::{run_batch, run_batch_seeded, Account, Configuration};

#[derive(Parser)]
#[command(name = "dicesim")]
#[command(author, version, about = "Martingale dice betting simulator", long_about = None)]
struct Cli {
    /// Starting account balance
    #[arg(long, default_value = "200")]
    balance: f64,

    /// Base bet placed after every win
    #[arg(long, default_value = "1")]
    base_bet: f64,

    /// Payout multiplier (platform accepts 1.01202 - 9900)
    #[arg(long, default_value = "2")]
    payout: f64,

    /// Number of independent trials to run
    #[arg(long, default_value = "100")]
    trials: usize,

    /// Percent added to the bet after each loss
    #[arg(long, default_value = "100")]
    loss_adder: u32,

    /// Number of progress bar updates over the batch
    #[arg(long, default_value = "50")]
    checkpoints: usize,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write the full aggregate result as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prompt for parameters instead of reading flags
    #[arg(short, long)]
    interactive: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let mut cli = Cli::parse();

    println!("{}", "Dicesim v0.2.0".cyan().bold());
    println!();

    if cli.interactive {
        prompt_parameters(&mut cli)?;
    }

    let config = Configuration::new(cli.base_bet, cli.payout, cli.trials, cli.loss_adder);
    let account = Account::new(cli.balance);

    print_settings(&config, &account);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let on_progress = |fraction: f64| pb.set_position((fraction * 100.0) as u64);

    let summary = match cli.seed {
        Some(seed) => run_batch_seeded(config, &account, cli.checkpoints, seed, on_progress),
        None => run_batch(config, &account, cli.checkpoints, on_progress),
    }
    .context("Simulation failed")?;
    let elapsed = start.elapsed();

    pb.finish_and_clear();

    println!("\n{}", "Results:".yellow().bold());
    println!("{}", "-".repeat(50));
    println!(
        "Average rolls until bankruptcy: {:.2}",
        summary.average_rolls_survived()
    );
    println!(
        "Average balance during run:     {:.2}",
        summary.average_balance()
    );
    println!("{}", "-".repeat(50));
    println!("Time taken: {:.2}s", elapsed.as_secs_f64());

    if let Some(path) = cli.output {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write results to {:?}", path))?;
        println!("{}: {:?}", "Saved".green(), path);
    }

    Ok(())
}

/// Prompt for each parameter, defaulting to the current flag values.
fn prompt_parameters(cli: &mut Cli) -> Result<()> {
    let theme = ColorfulTheme::default();

    cli.balance = Input::with_theme(&theme)
        .with_prompt("Balance")
        .default(cli.balance)
        .interact_text()?;
    cli.base_bet = Input::with_theme(&theme)
        .with_prompt("Base bet")
        .default(cli.base_bet)
        .interact_text()?;
    cli.payout = Input::with_theme(&theme)
        .with_prompt("Payout")
        .default(cli.payout)
        .interact_text()?;
    cli.trials = Input::with_theme(&theme)
        .with_prompt("Trials")
        .default(cli.trials)
        .interact_text()?;
    cli.loss_adder = Input::with_theme(&theme)
        .with_prompt("Loss adder (%)")
        .default(cli.loss_adder)
        .interact_text()?;

    println!();
    Ok(())
}

fn print_settings(config: &Configuration, account: &Account) {
    println!("{}", "Running new simulation".green());
    println!();
    println!("Balance:    {}", account.balance());
    println!("Base bet:   {}", config.base_bet());
    println!("Payout:     {}", config.payout_multiplier());
    println!("Trials:     {}", config.trial_count());
    println!("Loss adder: {}%", config.loss_adder_percent());
    println!(
        "Win chance: {}% (derived from payout)",
        config.win_probability()
    );
    println!();
}
