use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_pilot::game::GameConfig;
use snake_pilot::modes::{AutopilotMode, HumanMode};

#[derive(Parser)]
#[command(name = "snake_pilot")]
#[command(version, about = "Snake on a wrap-around grid, playable or driven by an A* autopilot")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width (defaults to the classic 20x15 layout)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch the pathfinding agent play
    Autopilot,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // Create game configuration from CLI arguments
    let mut config = match (cli.width, cli.height) {
        (None, None) => GameConfig::default(),
        (width, height) => GameConfig::sized(width.unwrap_or(20), height.unwrap_or(15)),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    config.validate().context("invalid game configuration")?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config);
            human_mode.run().await?;
        }
        Mode::Autopilot => {
            let mut autopilot_mode = AutopilotMode::new(config);
            autopilot_mode.run().await?;
        }
    }

    Ok(())
}
