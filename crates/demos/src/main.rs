mod config;
mod logging;
mod scenarios;
mod transcript;

use clap::Parser;

use config::{DemoConfig, LogFormat};
use scenarios::Scenario;
use transcript::Transcript;

#[derive(Parser)]
#[command(name = "ddinject-demos")]
#[command(about = "Walkthroughs of the ddinject dependency container")]
struct Cli {
    /// Scenario to run
    #[arg(value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Log level filter, overrides DDINJECT_LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (plain, pretty, json), overrides DDINJECT_LOG_FORMAT
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DemoConfig::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.validate()?;
    logging::init_logging(&config)?;

    for scenario in cli.scenario.expand() {
        let transcript = Transcript::new();
        scenarios::run(scenario, &transcript)?;

        println!("\n== {} ==\n", scenario.title());
        for line in transcript.lines() {
            println!("{}", line);
        }
    }

    Ok(())
}
