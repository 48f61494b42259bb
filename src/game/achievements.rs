//! Achievement catalog.
//!
//! A fixed, ordered list of definitions. Each definition carries a data-only
//! [`AchievementTrigger`] that is evaluated against an explicit
//! [`AggregateStats`] view, so evaluation is pure and deterministic.

use std::fmt;

use serde::Serialize;

use crate::game::stats::AggregateStats;

/// Achievement category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Wins,
    Streaks,
    Guesses,
    WordLength,
    Volume,
    Modes,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 6] = [
        AchievementCategory::Wins,
        AchievementCategory::Streaks,
        AchievementCategory::Guesses,
        AchievementCategory::WordLength,
        AchievementCategory::Volume,
        AchievementCategory::Modes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Wins => "Wins",
            AchievementCategory::Streaks => "Streaks",
            AchievementCategory::Guesses => "Guesses",
            AchievementCategory::WordLength => "Word Length",
            AchievementCategory::Volume => "Games Played",
            AchievementCategory::Modes => "Modes",
        }
    }
}

/// Condition under which an achievement unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementTrigger {
    /// Win N games in total
    GamesWon { required: u32 },
    /// Reach a best streak of N
    MaxStreak { required: u32 },
    /// Win at least once using exactly N guesses
    WonInGuesses { guesses: u32 },
    /// Win at least once with a word of this length
    WordLengthWin { length: usize },
    /// Play N games in total
    GamesPlayed { required: u32 },
    /// Win at least once in hard mode
    HardModeWin,
    /// Win at least once in count mode
    CountModeWin,
}

impl AchievementTrigger {
    /// Reads only the counters the trigger depends on.
    pub fn is_met(&self, stats: &AggregateStats) -> bool {
        use AchievementTrigger::*;

        match *self {
            GamesWon { required } => stats.games_won >= required,
            MaxStreak { required } => stats.max_streak >= required,
            WonInGuesses { guesses } => stats.guess_distribution.get(guesses) >= 1,
            WordLengthWin { length } => stats.wins_for_length(length) >= 1,
            GamesPlayed { required } => stats.games_played >= required,
            HardModeWin => stats.wins_by_hard_mode >= 1,
            CountModeWin => stats.wins_by_count_mode >= 1,
        }
    }
}

/// Static catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub trigger: AchievementTrigger,
}

impl AchievementDefinition {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        category: AchievementCategory,
        trigger: AchievementTrigger,
    ) -> Self {
        Self {
            id,
            name,
            description,
            icon,
            category,
            trigger,
        }
    }

    pub fn is_earned(&self, stats: &AggregateStats) -> bool {
        self.trigger.is_met(stats)
    }

    pub fn notification(&self) -> AchievementNotification {
        AchievementNotification::from(self)
    }
}

/// What the UI shows when an achievement unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementNotification {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<&AchievementDefinition> for AchievementNotification {
    fn from(def: &AchievementDefinition) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
        }
    }
}

impl fmt::Display for AchievementNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.icon, self.name, self.description)
    }
}

use AchievementCategory::*;
use AchievementTrigger::*;

static ACHIEVEMENTS: [AchievementDefinition; 19] = [
    // Win-based
    AchievementDefinition::new(
        "first_win",
        "First Victory",
        "Win your first game",
        "🏆",
        Wins,
        GamesWon { required: 1 },
    ),
    AchievementDefinition::new(
        "wins_10",
        "Getting Started",
        "Win 10 games",
        "⭐",
        Wins,
        GamesWon { required: 10 },
    ),
    AchievementDefinition::new(
        "wins_50",
        "Veteran",
        "Win 50 games",
        "🌟",
        Wins,
        GamesWon { required: 50 },
    ),
    AchievementDefinition::new(
        "wins_100",
        "Master",
        "Win 100 games",
        "👑",
        Wins,
        GamesWon { required: 100 },
    ),
    // Streaks
    AchievementDefinition::new(
        "streak_3",
        "On Fire",
        "Win 3 games in a row",
        "🔥",
        Streaks,
        MaxStreak { required: 3 },
    ),
    AchievementDefinition::new(
        "streak_5",
        "Unstoppable",
        "Win 5 games in a row",
        "💪",
        Streaks,
        MaxStreak { required: 5 },
    ),
    AchievementDefinition::new(
        "streak_10",
        "Legendary",
        "Win 10 games in a row",
        "🌈",
        Streaks,
        MaxStreak { required: 10 },
    ),
    // Guess counts
    AchievementDefinition::new(
        "guess_1",
        "Lucky Guess",
        "Win on the first guess",
        "🍀",
        Guesses,
        WonInGuesses { guesses: 1 },
    ),
    AchievementDefinition::new(
        "guess_2",
        "Sharp Mind",
        "Win on the second guess",
        "🧠",
        Guesses,
        WonInGuesses { guesses: 2 },
    ),
    AchievementDefinition::new(
        "guess_6",
        "Close Call",
        "Win on the last guess",
        "😅",
        Guesses,
        WonInGuesses { guesses: 6 },
    ),
    // Word length
    AchievementDefinition::new(
        "win_4_letter",
        "Short & Sweet",
        "Win with a 4-letter word",
        "4️⃣",
        WordLength,
        WordLengthWin { length: 4 },
    ),
    AchievementDefinition::new(
        "win_5_letter",
        "Classic",
        "Win with a 5-letter word",
        "5️⃣",
        WordLength,
        WordLengthWin { length: 5 },
    ),
    AchievementDefinition::new(
        "win_6_letter",
        "Challenge Mode",
        "Win with a 6-letter word",
        "6️⃣",
        WordLength,
        WordLengthWin { length: 6 },
    ),
    // Volume
    AchievementDefinition::new(
        "played_25",
        "Wordsmith",
        "Play 25 games",
        "📚",
        Volume,
        GamesPlayed { required: 25 },
    ),
    AchievementDefinition::new(
        "played_100",
        "Dedicated",
        "Play 100 games",
        "🫶",
        Volume,
        GamesPlayed { required: 100 },
    ),
    AchievementDefinition::new(
        "played_250",
        "Addicted",
        "Play 250 games",
        "♠",
        Volume,
        GamesPlayed { required: 250 },
    ),
    AchievementDefinition::new(
        "played_500",
        "Obsessed",
        "Play 500 games",
        "💎",
        Volume,
        GamesPlayed { required: 500 },
    ),
    // Modes
    AchievementDefinition::new(
        "win_hard_mode",
        "Hardcore",
        "Win a game with Hard Mode enabled",
        "💀",
        Modes,
        HardModeWin,
    ),
    AchievementDefinition::new(
        "win_count_mode",
        "Counting Cards",
        "Win a game with Count Mode enabled",
        "🔢",
        Modes,
        CountModeWin,
    ),
];

/// The full catalog in display order.
pub fn catalog() -> &'static [AchievementDefinition] {
    &ACHIEVEMENTS
}

/// Find a definition by id.
pub fn lookup(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Every definition whose trigger is met by `stats` and whose id is not in
/// `unlocked_ids`, in catalog order.
pub fn evaluate_all(
    stats: &AggregateStats,
    unlocked_ids: &[String],
) -> Vec<&'static AchievementDefinition> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked_ids.iter().any(|id| id == a.id) && a.is_earned(stats))
        .collect()
}

/// Catalog entries in one category, in catalog order.
pub fn achievements_by_category(
    category: AchievementCategory,
) -> Vec<&'static AchievementDefinition> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}
