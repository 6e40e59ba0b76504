use anyhow::Result;
use clap::Parser;
use consequence::config::CliConfig;
use consequence::{Config, GameInterface, VERSION};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "consequence")]
#[command(about = "A branching-narrative game where every choice leaves a mark")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Story id, or path to a .json story file
    #[arg(short, long)]
    story: Option<String>,

    /// Directory searched for story files
    #[arg(long)]
    stories_dir: Option<PathBuf>,

    /// Color theme (default, dark, light, plain)
    #[arg(short, long)]
    theme: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Play these input scripts instead of the terminal, one line per input
    #[arg(long, num_args = 1..)]
    replay: Vec<PathBuf>,

    /// Write the journal of the last run to this file
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Validate the story and exit
    #[arg(long)]
    check: bool,

    /// List available stories and exit
    #[arg(long)]
    list: bool,
}

impl Cli {
    fn cli_config(&self) -> CliConfig {
        CliConfig {
            story: self.story.clone(),
            stories_dir: self.stories_dir.clone(),
            theme: self.theme.clone(),
            no_color: self.no_color,
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::from_env()?,
    };
    config.merge_with_cli(cli.cli_config());
    config.validate()?;

    // Logs go to stderr so the transcript on stdout stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("consequence={},warn", config.logging.level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Consequence v{}", VERSION);

    let mut game_interface = GameInterface::new(config)?;

    if cli.list {
        game_interface.list_stories().await?;
        return Ok(());
    }

    if cli.check {
        let check = game_interface.check().await?;
        if !check.is_valid() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let result = if cli.replay.is_empty() {
        game_interface.play().await.map(|status| info!("Run finished: {:?}", status))
    } else {
        game_interface.run_replays(&cli.replay).await
    };

    if let Err(e) = result {
        game_interface.report_error(&e);
        error!("Game session failed");
        std::process::exit(1);
    }

    if let Some(journal_path) = &cli.journal {
        game_interface.export_journal(journal_path).await?;
    }

    info!("Game session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["consequence", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(cli.replay.is_empty());
    }

    #[test]
    fn test_cli_replay_and_journal() {
        let cli = Cli::try_parse_from([
            "consequence",
            "--story",
            "stories/tiny.json",
            "--replay",
            "a.txt",
            "b.txt",
            "--journal",
            "run.json",
        ])
        .unwrap();

        assert_eq!(cli.replay, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(cli.journal, Some(PathBuf::from("run.json")));

        let cli_config = cli.cli_config();
        assert_eq!(cli_config.story.as_deref(), Some("stories/tiny.json"));
        assert!(!cli_config.debug);
    }
}
