//! Stats aggregator: records round outcomes, derives views, unlocks achievements.
//!
//! Every public mutator finishes by writing the full record to the
//! [`KeyValueStore`] before returning. A failed write is logged and the
//! in-memory state is kept as-is.

use log::{debug, error, info, warn};

use crate::game::achievements::{self, AchievementDefinition};
use crate::game::stats::{AggregateStats, GameModes};
use crate::storage::{SharedStore, STATS_NAMESPACE};

/// A catalog entry paired with whether this player has unlocked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementStatus {
    pub definition: &'static AchievementDefinition,
    pub unlocked: bool,
}

pub struct StatsManager {
    store: SharedStore,
    stats: AggregateStats,
    /// Not persisted. Overwritten whenever a call unlocks something, cleared
    /// only by [`StatsManager::consume_recently_unlocked`].
    recently_unlocked: Vec<&'static AchievementDefinition>,
}

impl StatsManager {
    /// Load the stats record from `store`, falling back to defaults when it is
    /// absent, unreadable, or malformed.
    pub fn new(store: SharedStore) -> Self {
        let stats = Self::load(&store);
        Self {
            store,
            stats,
            recently_unlocked: Vec::new(),
        }
    }

    fn load(store: &SharedStore) -> AggregateStats {
        let value = match store.load(STATS_NAMESPACE) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("stats: no saved record under {}, starting fresh", STATS_NAMESPACE);
                return AggregateStats::default();
            }
            Err(e) => {
                warn!("stats: failed to load {}: {} (using defaults)", STATS_NAMESPACE, e);
                return AggregateStats::default();
            }
        };
        match serde_json::from_value::<AggregateStats>(value) {
            Ok(mut stats) => {
                stats.normalize();
                stats
            }
            Err(e) => {
                warn!("stats: malformed record in {}: {} (using defaults)", STATS_NAMESPACE, e);
                AggregateStats::default()
            }
        }
    }

    fn persist(&self) {
        let value = match serde_json::to_value(&self.stats) {
            Ok(v) => v,
            Err(e) => {
                error!("stats: serialize error: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(STATS_NAMESPACE, &value) {
            error!("stats: failed to persist {}: {}", STATS_NAMESPACE, e);
        }
    }

    /// Record a won round and return the achievements it unlocked.
    ///
    /// A `guess_count` outside 1..=6 or a `word_length` other than 4, 5 or 6
    /// skips only the matching counter; the rest of the win is still recorded.
    pub fn record_win(
        &mut self,
        guess_count: u32,
        word_length: usize,
        modes: GameModes,
    ) -> Vec<&'static AchievementDefinition> {
        let stats = &mut self.stats;
        stats.games_played = stats.games_played.saturating_add(1);
        stats.games_won = stats.games_won.saturating_add(1);
        stats.current_streak = stats.current_streak.saturating_add(1);
        if stats.current_streak > stats.max_streak {
            stats.max_streak = stats.current_streak;
        }

        if !stats.guess_distribution.record(guess_count) {
            debug!("stats: guess count {} outside 1..=6, not recorded", guess_count);
        }
        if !stats.record_length_win(word_length) {
            debug!("stats: word length {} not tracked, not recorded", word_length);
        }

        if modes.hard_mode {
            stats.wins_by_hard_mode = stats.wins_by_hard_mode.saturating_add(1);
        }
        if modes.count_mode {
            stats.wins_by_count_mode = stats.wins_by_count_mode.saturating_add(1);
        }
        debug!(
            "stats: win in {} guesses (length {}, {:?}); streak {}",
            guess_count, word_length, modes, stats.current_streak
        );

        let newly = self.unlock_new();
        self.persist();
        newly
    }

    /// Record a lost round. Volume achievements can still unlock here.
    pub fn record_loss(&mut self) -> Vec<&'static AchievementDefinition> {
        let stats = &mut self.stats;
        stats.games_played = stats.games_played.saturating_add(1);
        stats.games_lost = stats.games_lost.saturating_add(1);
        stats.current_streak = 0;
        debug!("stats: loss recorded; {} games played", stats.games_played);

        let newly = self.unlock_new();
        self.persist();
        newly
    }

    /// Evaluate the catalog against the current counters without recording a
    /// round. Persists only when something unlocked.
    pub fn check_achievements(&mut self) -> Vec<&'static AchievementDefinition> {
        let newly = self.unlock_new();
        if !newly.is_empty() {
            self.persist();
        }
        newly
    }

    fn unlock_new(&mut self) -> Vec<&'static AchievementDefinition> {
        let newly = achievements::evaluate_all(&self.stats, &self.stats.unlocked_achievement_ids);
        if newly.is_empty() {
            return newly;
        }
        for achievement in &newly {
            info!("stats: achievement unlocked: {} ({})", achievement.id, achievement.name);
            self.stats
                .unlocked_achievement_ids
                .push(achievement.id.to_string());
        }
        self.recently_unlocked = newly.clone();
        newly
    }

    /// Read-only view of all counters.
    pub fn snapshot(&self) -> &AggregateStats {
        &self.stats
    }

    /// `round(100 * won / played)`, or 0 before any game is played.
    pub fn win_percentage(&self) -> u32 {
        let played = u64::from(self.stats.games_played);
        if played == 0 {
            return 0;
        }
        let won = u64::from(self.stats.games_won);
        ((200 * won + played) / (2 * played)) as u32
    }

    /// Every catalog entry, in catalog order, with its unlock flag.
    pub fn all_achievements_with_status(&self) -> Vec<AchievementStatus> {
        achievements::catalog()
            .iter()
            .map(|definition| AchievementStatus {
                definition,
                unlocked: self.stats.is_unlocked(definition.id),
            })
            .collect()
    }

    /// Peek at the pending notifications without clearing them.
    pub fn recently_unlocked(&self) -> &[&'static AchievementDefinition] {
        &self.recently_unlocked
    }

    /// Take the pending notifications, leaving the buffer empty.
    pub fn consume_recently_unlocked(&mut self) -> Vec<&'static AchievementDefinition> {
        std::mem::take(&mut self.recently_unlocked)
    }

    pub fn unlocked_ids(&self) -> &[String] {
        &self.stats.unlocked_achievement_ids
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.stats.is_unlocked(id)
    }

    /// Number of stored unlock ids, including any the catalog no longer defines.
    pub fn unlocked_count(&self) -> usize {
        self.stats.unlocked_achievement_ids.len()
    }

    pub fn total_achievements(&self) -> usize {
        achievements::catalog().len()
    }
}
