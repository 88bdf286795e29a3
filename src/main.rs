use clap::Parser;

use gemcheck::app::{GemCheck, Snapshot};
use gemcheck::cli::{Cli, Command};
use gemcheck::config::Config;
use gemcheck::display::report;
use gemcheck::errors::{GemcheckError, Result};
use gemcheck::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env().with_cli(&cli);

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let app = GemCheck::new(&config)?;
    let league = cli.league.as_deref();

    let output = match cli.command {
        Command::Leagues => report::leagues(&app.leagues().await?),
        Command::Gems { color } => {
            let snapshot = snapshot(&app, league, cli.refresh).await?;
            report::gems(&snapshot, &Command::colors(color))
        }
        Command::Pool { color } => {
            let snapshot = snapshot(&app, league, cli.refresh).await?;
            report::pool(&snapshot, &Command::colors(color))
        }
        Command::Detail { name } => {
            let snapshot = snapshot(&app, league, cli.refresh).await?;
            let name = name.join(" ");
            let entry = snapshot.result.find_entry(&name).ok_or_else(|| {
                GemcheckError::ValidationError(format!(
                    "no transfigured variants for '{}' in {}",
                    name, snapshot.league.text
                ))
            })?;
            report::detail(entry)
        }
        Command::Search { query, limit } => {
            let snapshot = snapshot(&app, league, cli.refresh).await?;
            report::search(&snapshot.result.search(&query.join(" "), limit))
        }
        Command::ClearCache => {
            let removed = app.clear_cache()?;
            format!("Cleared cache ({} files removed)\n", removed)
        }
    };

    print!("{}", output);
    Ok(())
}

async fn snapshot(app: &GemCheck, league: Option<&str>, refresh: bool) -> Result<Snapshot> {
    let league = app.resolve_league(league).await?;
    app.load(&league, refresh).await
}
