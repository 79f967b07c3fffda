use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use env_logger::Env;

use outbreak_app::config::{AppConfig, DEFAULT_CONFIG_PATH};
use outbreak_app::game_loop;
use outbreak_app::state::GameLoopCommand;
use outbreak_sim::persistence::JsonFileGateway;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load(&config_path);
    let run_for = Duration::from_secs_f64(config.run_seconds.max(0.0).min(86_400.0));
    log::info!(
        "OUTBREAK seed={} {}Hz saving to {}",
        config.sim.seed,
        config.tick_rate,
        config.save_path.display()
    );

    let gateway = JsonFileGateway::new(config.save_path.clone());
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, Box::new(gateway))
        .context("failed to spawn game loop thread")?;

    std::thread::sleep(run_for);
    // The loop also stops if the channel is already gone.
    let _ = cmd_tx.send(GameLoopCommand::Shutdown);

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    log::info!(
        "stopped after {} ticks: wave {}, {} kills, {} coins, {} game overs, {} saves",
        summary.ticks,
        summary.best_wave,
        summary.kills,
        summary.coins,
        summary.game_overs,
        summary.saves
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
