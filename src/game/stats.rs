//! Aggregate statistics persisted under the stats namespace.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Fewest guesses a win can take.
pub const MIN_GUESSES: u32 = 1;
/// Most guesses a round allows; also the last histogram bucket.
pub const MAX_GUESSES: u32 = 6;
/// Word lengths the game can be played with.
pub const WORD_LENGTHS: [usize; 3] = [4, 5, 6];

/// Gameplay modifiers active for a round, passed in by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameModes {
    pub hard_mode: bool,
    pub count_mode: bool,
}

impl GameModes {
    pub fn new(hard_mode: bool, count_mode: bool) -> Self {
        Self {
            hard_mode,
            count_mode,
        }
    }
}

/// Win counts keyed by the number of guesses used (1..=6).
///
/// Stored as a JSON object with string keys (`{"1": 0, ..., "6": 0}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuessDistribution(BTreeMap<u32, u32>);

impl Default for GuessDistribution {
    fn default() -> Self {
        Self((MIN_GUESSES..=MAX_GUESSES).map(|g| (g, 0)).collect())
    }
}

impl GuessDistribution {
    /// Count for a bucket; missing buckets read as zero.
    pub fn get(&self, guesses: u32) -> u32 {
        self.0.get(&guesses).copied().unwrap_or(0)
    }

    /// Increment the bucket for `guesses`. Returns false (and records nothing)
    /// when `guesses` is outside 1..=6.
    pub fn record(&mut self, guesses: u32) -> bool {
        if !(MIN_GUESSES..=MAX_GUESSES).contains(&guesses) {
            return false;
        }
        let bucket = self.0.entry(guesses).or_insert(0);
        *bucket = bucket.saturating_add(1);
        true
    }

    /// Buckets 1..=6 in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (MIN_GUESSES..=MAX_GUESSES).map(move |g| (g, self.get(g)))
    }

    pub fn max_count(&self) -> u32 {
        self.iter().map(|(_, count)| count).max().unwrap_or(0)
    }

    /// Ensure all six buckets exist and drop keys outside 1..=6.
    pub fn normalize(&mut self) {
        self.0
            .retain(|guesses, _| (MIN_GUESSES..=MAX_GUESSES).contains(guesses));
        for guesses in MIN_GUESSES..=MAX_GUESSES {
            self.0.entry(guesses).or_insert(0);
        }
    }
}

/// Read a field that may be stored as `null`, treating it like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Every durable counter plus the set of unlocked achievement ids.
///
/// Field names on disk follow the camelCase schema (`gamesPlayed`,
/// `winsBy4Letter`, `unlockedAchievements`, ...). Fields missing from a stored
/// document, or stored as `null`, take their zero defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregateStats {
    #[serde(deserialize_with = "null_as_default")]
    pub games_played: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub games_won: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub games_lost: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub current_streak: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub max_streak: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub guess_distribution: GuessDistribution,
    #[serde(deserialize_with = "null_as_default")]
    pub wins_by_4_letter: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub wins_by_5_letter: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub wins_by_6_letter: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub wins_by_hard_mode: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub wins_by_count_mode: u32,
    /// Append-ordered, unique. Ids are never removed, even ones the catalog
    /// no longer defines.
    #[serde(rename = "unlockedAchievements", deserialize_with = "null_as_default")]
    pub unlocked_achievement_ids: Vec<String>,
}

impl AggregateStats {
    /// Wins recorded for a word length; lengths other than 4, 5 and 6 read as zero.
    pub fn wins_for_length(&self, word_length: usize) -> u32 {
        match word_length {
            4 => self.wins_by_4_letter,
            5 => self.wins_by_5_letter,
            6 => self.wins_by_6_letter,
            _ => 0,
        }
    }

    pub(crate) fn record_length_win(&mut self, word_length: usize) -> bool {
        let counter = match word_length {
            4 => &mut self.wins_by_4_letter,
            5 => &mut self.wins_by_5_letter,
            6 => &mut self.wins_by_6_letter,
            _ => return false,
        };
        *counter = counter.saturating_add(1);
        true
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievement_ids.iter().any(|u| u == id)
    }

    /// Repair a freshly loaded record: restore the counter invariants, fill
    /// histogram buckets and drop duplicate unlock ids while keeping
    /// first-seen order.
    ///
    /// `games_played` is raised to cover every recorded win and loss, and any
    /// games left unaccounted for are counted as losses, so that
    /// `played == won + lost` holds afterwards.
    pub(crate) fn normalize(&mut self) {
        self.games_played = self
            .games_played
            .max(self.games_won.saturating_add(self.games_lost));
        self.games_lost = self.games_played.saturating_sub(self.games_won);
        self.max_streak = self.max_streak.max(self.current_streak);
        self.guess_distribution.normalize();
        let mut seen = std::collections::HashSet::new();
        self.unlocked_achievement_ids
            .retain(|id| seen.insert(id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_distribution_has_six_zero_buckets() {
        let dist = GuessDistribution::default();
        let buckets: Vec<_> = dist.iter().collect();
        assert_eq!(buckets, vec![(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)]);
        assert_eq!(
            serde_json::to_value(&dist).unwrap(),
            json!({ "1": 0, "2": 0, "3": 0, "4": 0, "5": 0, "6": 0 })
        );
    }

    #[test]
    fn out_of_range_guesses_are_not_recorded() {
        let mut dist = GuessDistribution::default();
        assert!(!dist.record(0));
        assert!(!dist.record(7));
        assert!(dist.record(3));
        assert_eq!(dist.get(3), 1);
        assert_eq!(dist.max_count(), 1);
        assert_eq!(dist.get(7), 0);
    }

    #[test]
    fn stored_schema_uses_camel_case_names() {
        let mut stats = AggregateStats::default();
        stats.wins_by_4_letter = 2;
        stats.unlocked_achievement_ids.push("first_win".to_string());
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["winsBy4Letter"], 2);
        assert_eq!(value["gamesPlayed"], 0);
        assert_eq!(value["unlockedAchievements"], json!(["first_win"]));
        assert!(value.get("guessDistribution").is_some());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let mut stats: AggregateStats = serde_json::from_value(json!({
            "gamesPlayed": 4,
            "gamesWon": 3,
            "gamesLost": 1,
            "guessDistribution": { "2": 3 }
        }))
        .unwrap();
        stats.normalize();
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.max_streak, 0);
        assert_eq!(stats.guess_distribution.get(2), 3);
        assert_eq!(stats.guess_distribution.iter().count(), 6);
        assert_eq!(stats.guess_distribution.get(6), 0);
        assert!(stats.unlocked_achievement_ids.is_empty());
    }

    #[test]
    fn normalize_drops_duplicate_unlock_ids() {
        let mut stats = AggregateStats::default();
        stats.unlocked_achievement_ids = vec![
            "guess_1".to_string(),
            "first_win".to_string(),
            "guess_1".to_string(),
        ];
        stats.normalize();
        assert_eq!(stats.unlocked_achievement_ids, vec!["guess_1", "first_win"]);
    }

    #[test]
    fn null_fields_fall_back_individually() {
        let stats: AggregateStats = serde_json::from_value(json!({
            "gamesPlayed": 40,
            "gamesWon": 30,
            "gamesLost": 10,
            "maxStreak": 7,
            "winsByHardMode": null,
            "guessDistribution": null,
            "unlockedAchievements": ["first_win", "wins_10"]
        }))
        .unwrap();
        assert_eq!(stats.games_played, 40);
        assert_eq!(stats.games_won, 30);
        assert_eq!(stats.max_streak, 7);
        assert_eq!(stats.wins_by_hard_mode, 0);
        assert_eq!(stats.guess_distribution, GuessDistribution::default());
        assert_eq!(stats.unlocked_achievement_ids, vec!["first_win", "wins_10"]);
    }

    #[test]
    fn normalize_restores_counter_invariants() {
        let mut stats: AggregateStats =
            serde_json::from_value(json!({ "gamesPlayed": 1, "gamesWon": 5 })).unwrap();
        stats.normalize();
        assert_eq!(stats.games_played, 5);
        assert_eq!(stats.games_lost, 0);

        let mut stats: AggregateStats = serde_json::from_value(json!({
            "gamesPlayed": 10,
            "gamesWon": 4,
            "gamesLost": 1,
            "currentStreak": 3,
            "maxStreak": 2
        }))
        .unwrap();
        stats.normalize();
        assert_eq!(stats.games_played, 10);
        assert_eq!(stats.games_lost, 6);
        assert_eq!(stats.max_streak, 3);
        assert_eq!(stats.games_played, stats.games_won + stats.games_lost);
    }

    #[test]
    fn length_wins_only_for_playable_lengths() {
        let mut stats = AggregateStats::default();
        assert!(stats.record_length_win(6));
        assert!(!stats.record_length_win(7));
        assert_eq!(stats.wins_for_length(6), 1);
        assert_eq!(stats.wins_for_length(7), 0);
    }
}
