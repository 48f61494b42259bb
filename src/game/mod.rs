//! Game-side state: the achievement catalog, aggregate statistics and the
//! user's settings. Stats and settings each own one persistence namespace and
//! never read each other; the caller passes [`GameModes`] from settings into
//! [`StatsManager::record_win`].

pub mod achievements;
pub mod settings;
pub mod stats;
pub mod stats_manager;

pub use achievements::{
    achievements_by_category, catalog, evaluate_all, lookup, AchievementCategory,
    AchievementDefinition, AchievementNotification, AchievementTrigger,
};
pub use settings::{Settings, SettingsStore};
pub use stats::{AggregateStats, GameModes, GuessDistribution, MAX_GUESSES, MIN_GUESSES, WORD_LENGTHS};
pub use stats_manager::{AchievementStatus, StatsManager};
