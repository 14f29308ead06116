use anyhow::{Context, Result, anyhow};
use body_parts_fun::config::{CONFIG_ENV, GameConfig, MatchStyle};
use body_parts_fun::effects::{Speaker, TerminalEffects};
use body_parts_fun::app;
use body_parts_fun::games::{self, ActivityKind, ModeController};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Learn about your amazing body!", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Option<Command>,
    /// TOML game configuration (falls back to $BODYPARTS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Interaction style for the match game
    #[arg(long, value_enum, global = true)]
    style: Option<MatchStyle>,
    /// Disable speech
    #[arg(long, global = true)]
    mute: bool,
    /// Write log records here while the game is on screen
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command
{
    /// List the available activities
    List,
    /// Jump straight into one activity
    Play
    {
        activity: String,
    },
}

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()>
{
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let initial = match &cli.command {
        Some(Command::List) => {
            list_games();
            return Ok(());
        }
        Some(Command::Play { activity }) => Some(
            ActivityKind::from_name(activity)
                .ok_or_else(|| anyhow!("unknown activity '{activity}', run `list` to see them"))?,
        ),
        None => None,
    };

    let mut config = load_config(cli.config.as_deref());
    if let Some(style) = cli.style {
        config.matching.style = style;
    }

    let speaker = if cli.mute || !config.speech.enabled {
        None
    } else {
        let command = Some(config.speech.command.as_str());
        match Speaker::detect(command) {
            Ok(speaker) => Some(speaker),
            Err(err) => {
                eprintln!(
                    "Warning: couldn't start speech ({err}). Spoken prompts will be shown as text."
                );
                None
            }
        }
    };

    let captions = speaker.is_none();
    let controller = ModeController::new(config, captions);
    let effects = TerminalEffects::new(speaker);

    // stderr would tear the frame; without a log file logging pauses for the session.
    let level = log::max_level();
    if cli.log_file.is_none() {
        log::set_max_level(LevelFilter::Off);
    }
    let result = app::run(controller, effects, initial);
    log::set_max_level(level);
    result.map_err(|err| anyhow!(err)).context("terminal session failed")
}

fn init_logging(log_file: Option<&Path>) -> Result<()>
{
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("initialise logging")
}

fn load_config(path: Option<&Path>) -> GameConfig
{
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    let config = match path {
        Some(path) => {
            let (config, err) = GameConfig::load_or_default(&path);
            if let Some(err) = err {
                log::warn!("config {}: {err}, using defaults", path.display());
                eprintln!(
                    "Warning: couldn't load {} ({err}). Using default settings.",
                    path.display()
                );
            }
            config
        }
        None => GameConfig::default(),
    };
    for warning in config.validate() {
        log::warn!("config: {warning}");
        eprintln!("Warning: {warning}");
    }
    config.sanitized()
}

fn list_games()
{
    println!("Available activities:");
    for game in games::registry() {
        println!("  {:<8} {:<14} - {}", game.name, game.title, game.description);
    }
}
