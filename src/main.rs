//! Binary entrypoint for the Freedle CLI.
//!
//! Commands:
//! - `init` - write a starter `freedle.toml`
//! - `stats` - print aggregate statistics and the guess distribution
//! - `achievements` - list every achievement with its unlock status
//! - `win --guesses <n> [--length <n>] [--hard] [--count]` - record a won round
//! - `loss` - record a lost round
//! - `settings [--length <n>] [--hard on|off] [--count on|off]` - show or change settings
//! - `build-words` - filter the word list and dictionary into the game's data files
//!
//! See the library crate docs for module-level details: `freedle::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use freedle::config::Config;
use freedle::game::{AchievementCategory, AchievementDefinition, SettingsStore, StatsManager};
use freedle::storage::open_store;
use freedle::wordlist::build_word_data;

#[derive(Parser)]
#[command(name = "freedle")]
#[command(about = "Stats, achievements and word data for the Freedle word game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "freedle.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Show aggregate statistics
    Stats,
    /// List all achievements with unlock status
    Achievements,
    /// Record a won round
    Win {
        /// Number of guesses used (1-6)
        #[arg(short, long)]
        guesses: u32,
        /// Word length of the solved puzzle; defaults to the current setting
        #[arg(short, long)]
        length: Option<usize>,
        /// Round was played in hard mode (also implied by the setting)
        #[arg(long)]
        hard: bool,
        /// Round was played in count mode (also implied by the setting)
        #[arg(long)]
        count: bool,
    },
    /// Record a lost round
    Loss,
    /// Show settings, applying any changes given
    Settings {
        /// Word length: 4, 5 or 6 (other values are ignored)
        #[arg(short, long)]
        length: Option<usize>,
        /// Hard mode: on/off
        #[arg(long, value_parser = parse_toggle)]
        hard: Option<bool>,
        /// Count mode: on/off
        #[arg(long, value_parser = parse_toggle)]
        count: Option<bool>,
    },
    /// Build allowed-guesses.txt and target-dictionary.json
    BuildWords,
}

fn parse_toggle(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("expected on/off, got '{}'", other)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Initializing new Freedle configuration");
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let loaded = Config::load_optional(&cli.config).await?;
    let config = loaded.clone().unwrap_or_default();
    init_logging(&Some(config.clone()), cli.verbose);
    if loaded.is_none() {
        warn!(
            "Config file {} not found (continuing with defaults)",
            cli.config
        );
    }

    if let Commands::BuildWords = cli.command {
        let summary = build_word_data(&config.wordlist).await?;
        println!(
            "{} allowed guesses, {} dictionary entries ({} sources read, {} skipped)",
            summary.allowed_words,
            summary.dictionary_entries,
            summary.sources_read,
            summary.sources_skipped
        );
        return Ok(());
    }

    let store = open_store(&config.storage)?;
    let mut settings = SettingsStore::new(store.clone());
    let mut stats = StatsManager::new(store);

    match cli.command {
        Commands::Stats => print_stats(&stats),
        Commands::Achievements => print_achievements(&stats),
        Commands::Win {
            guesses,
            length,
            hard,
            count,
        } => {
            let mut modes = settings.modes();
            modes.hard_mode |= hard;
            modes.count_mode |= count;
            let word_length = length.unwrap_or_else(|| settings.word_length());
            stats.record_win(guesses, word_length, modes);
            println!(
                "Win recorded: {} guesses, {} letters. Streak {}.",
                guesses,
                word_length,
                stats.snapshot().current_streak
            );
            print_unlocked(&stats.consume_recently_unlocked());
        }
        Commands::Loss => {
            stats.record_loss();
            println!("Loss recorded. Streak reset.");
            print_unlocked(&stats.consume_recently_unlocked());
        }
        Commands::Settings {
            length,
            hard,
            count,
        } => {
            if let Some(len) = length {
                settings.set_word_length(len);
                if settings.word_length() != len {
                    warn!("Word length {} is not playable; keeping {}", len, settings.word_length());
                }
            }
            if let Some(enabled) = hard {
                settings.set_hard_mode(enabled);
            }
            if let Some(enabled) = count {
                settings.set_count_mode(enabled);
            }
            let current = settings.settings();
            println!("Word length: {}", current.word_length);
            println!("Hard mode:   {}", on_off(current.hard_mode));
            println!("Count mode:  {}", on_off(current.count_mode));
        }
        Commands::Init | Commands::BuildWords => {}
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn print_unlocked(unlocked: &[&AchievementDefinition]) {
    for achievement in unlocked {
        println!("Achievement unlocked! {}", achievement.notification());
    }
}

fn print_stats(stats: &StatsManager) {
    let snap = stats.snapshot();
    println!("Played:       {}", snap.games_played);
    println!("Win %:        {}", stats.win_percentage());
    println!("Won / Lost:   {} / {}", snap.games_won, snap.games_lost);
    println!("Streak:       {} (max {})", snap.current_streak, snap.max_streak);
    println!(
        "By length:    4: {}  5: {}  6: {}",
        snap.wins_by_4_letter, snap.wins_by_5_letter, snap.wins_by_6_letter
    );
    println!(
        "By mode:      hard: {}  count: {}",
        snap.wins_by_hard_mode, snap.wins_by_count_mode
    );
    println!("Guess distribution:");
    let max = snap.guess_distribution.max_count().max(1);
    for (guesses, count) in snap.guess_distribution.iter() {
        let width = (count as usize * 30).div_ceil(max as usize);
        println!("  {} | {:<30} {}", guesses, "█".repeat(width), count);
    }
}

fn print_achievements(stats: &StatsManager) {
    let statuses = stats.all_achievements_with_status();
    for category in AchievementCategory::ALL {
        println!("{}:", category.name());
        for status in statuses.iter().filter(|s| s.definition.category == category) {
            let def = status.definition;
            let mark = if status.unlocked { "✔" } else { " " };
            println!("  [{}] {} {} - {}", mark, def.icon, def.name, def.description);
        }
    }
    println!(
        "{}/{} unlocked",
        statuses.iter().filter(|s| s.unlocked).count(),
        stats.total_achievements()
    );
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Only echo to the console when someone is watching it
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
