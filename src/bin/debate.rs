use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use log::info;
use tokio::io::BufReader;

use persona_debate::core::{Config, RosterConfig};
use persona_debate::features::personas::PersonaFactory;
use persona_debate::features::session::{Session, SessionSettings};

/// Two or more personas debating with you in the terminal
#[derive(Parser)]
#[command(name = "debate", version)]
struct Cli {
    /// YAML file listing the agents (name + traits)
    #[arg(short, long)]
    agents: Option<String>,

    /// Automated rounds after each of your messages
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Model identifier passed to the generation service
    #[arg(short, long)]
    model: Option<String>,

    /// Pause between agent turns, in milliseconds
    #[arg(long)]
    turn_delay_ms: Option<u64>,

    /// Paragraph limit per reply (0 = unlimited)
    #[arg(long)]
    max_paragraphs: Option<i64>,

    /// Log filter, e.g. info or persona_debate=debug
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Command-line flags win over the environment
    fn apply(self, mut config: Config) -> Config {
        if let Some(agents) = self.agents {
            config.agents_path = Some(agents);
        }
        if let Some(rounds) = self.rounds {
            config.rounds_per_input = rounds;
        }
        if let Some(model) = self.model {
            config.openai_model = model;
        }
        if let Some(delay) = self.turn_delay_ms {
            config.turn_delay_ms = delay;
        }
        if let Some(max) = self.max_paragraphs {
            config.max_paragraphs = max;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env()?);
    config.validate()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let roster = match &config.agents_path {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::default(),
    };

    let mut factory = PersonaFactory::from_config(&config)?;
    let agents = factory.create_roster(&roster)?;
    let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
    println!(
        "{} are listening. Type a message, or exit/quit/stop/bye/cya to leave.",
        names.join(", ")
    );

    info!(
        "Using model {} with {} rounds per input",
        config.openai_model, config.rounds_per_input
    );
    let mut session = Session::new(agents, SessionSettings::from(&config))?;
    session
        .run(BufReader::new(tokio::io::stdin()), std::io::stdout())
        .await
        .context("Session aborted")?;

    Ok(())
}
