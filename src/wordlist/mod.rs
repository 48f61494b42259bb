//! # Word-List Build
//!
//! Offline step that turns a large newline-delimited word list and a folder
//! of dictionary JSON files into the two data files the game ships with:
//!
//! ```text
//! <out_dir>/
//! ├── allowed-guesses.txt     ← every playable guess, sorted, one per line
//! └── target-dictionary.json  ← { word: { word, meanings } } for common words
//! ```
//!
//! A word is playable when it is 4 to 6 characters long and made only of
//! `a-z` after trimming and lowercasing.
//!
//! Dictionary sources are JSON objects keyed by headword:
//!
//! ```json
//! { "abbey": { "word": "abbey", "meanings": [ { "id": "m1", "def": "...", "speech_part": "noun" } ] } }
//! ```
//!
//! The `id` of every meaning is stripped. When several sources define the
//! same word the later file (by name) wins.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

use crate::config::WordListConfig;
use crate::game::WORD_LENGTHS;

pub const ALLOWED_WORDS_FILE: &str = "allowed-guesses.txt";
pub const DICTIONARY_FILE: &str = "target-dictionary.json";

/// Merged dictionary entry as written to `target-dictionary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub meanings: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    meanings: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub allowed_words: usize,
    pub dictionary_entries: usize,
    pub sources_read: usize,
    pub sources_skipped: usize,
}

pub fn is_playable(word: &str) -> bool {
    WORD_LENGTHS.contains(&word.len()) && word.bytes().all(|b| b.is_ascii_lowercase())
}

fn playable_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| is_playable(word))
}

/// Playable words from a newline-delimited list, deduplicated and sorted.
pub fn filter_allowed_words(text: &str) -> Vec<String> {
    playable_words(text)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Playable words from the common-words list, as a lookup set.
pub fn common_word_set(text: &str) -> HashSet<String> {
    playable_words(text).collect()
}

/// Fold one parsed dictionary source into `merged`. Returns how many
/// entries were taken from this source.
pub fn merge_dictionary_source(
    merged: &mut BTreeMap<String, DictionaryEntry>,
    common: &HashSet<String>,
    source: BTreeMap<String, Value>,
) -> usize {
    let mut taken = 0;
    for (key, raw) in source {
        let entry: SourceEntry = match serde_json::from_value(raw) {
            Ok(e) => e,
            Err(e) => {
                debug!("wordlist: skipping malformed entry {}: {}", key, e);
                continue;
            }
        };
        let word = entry.word.unwrap_or(key).to_lowercase();
        if !common.contains(&word) || !is_playable(&word) {
            continue;
        }
        let meanings = entry.meanings.into_iter().map(strip_meaning_id).collect();
        merged.insert(word.clone(), DictionaryEntry { word, meanings });
        taken += 1;
    }
    taken
}

fn strip_meaning_id(mut meaning: Value) -> Value {
    if let Some(fields) = meaning.as_object_mut() {
        fields.remove("id");
    }
    meaning
}

async fn read_required(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| anyhow!("Failed to read {}: {}", path, e))
}

async fn dictionary_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| anyhow!("Failed to read dictionary dir {}: {}", dir.display(), e))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read the configured inputs and write both output files.
///
/// A missing word list or common-words file is an error. A dictionary file
/// that cannot be read or parsed is logged and skipped.
pub async fn build_word_data(config: &WordListConfig) -> Result<BuildSummary> {
    let mut summary = BuildSummary::default();
    let out_dir = Path::new(&config.out_dir);
    fs::create_dir_all(out_dir)
        .await
        .map_err(|e| anyhow!("Failed to create output dir {}: {}", config.out_dir, e))?;

    info!("Generating {}...", ALLOWED_WORDS_FILE);
    let allowed = filter_allowed_words(&read_required(&config.word_list).await?);
    let allowed_path = out_dir.join(ALLOWED_WORDS_FILE);
    fs::write(&allowed_path, allowed.join("\n"))
        .await
        .map_err(|e| anyhow!("Failed to write {}: {}", allowed_path.display(), e))?;
    summary.allowed_words = allowed.len();
    info!("Wrote {} with {} words", allowed_path.display(), allowed.len());

    info!("Generating {} for common words...", DICTIONARY_FILE);
    let common = common_word_set(&read_required(&config.common_words).await?);
    let mut merged = BTreeMap::new();
    for path in dictionary_files(Path::new(&config.dictionary_dir)).await? {
        let parsed = match fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str::<BTreeMap<String, Value>>(&text)
                .map_err(|e| anyhow!("{}", e)),
            Err(e) => Err(anyhow!("{}", e)),
        };
        match parsed {
            Ok(source) => {
                let taken = merge_dictionary_source(&mut merged, &common, source);
                debug!("wordlist: {} contributed {} entries", path.display(), taken);
                summary.sources_read += 1;
            }
            Err(e) => {
                warn!("wordlist: error processing {}: {}", path.display(), e);
                summary.sources_skipped += 1;
            }
        }
    }

    let dictionary_path = out_dir.join(DICTIONARY_FILE);
    let json = serde_json::to_string(&merged)?;
    fs::write(&dictionary_path, json)
        .await
        .map_err(|e| anyhow!("Failed to write {}: {}", dictionary_path.display(), e))?;
    summary.dictionary_entries = merged.len();
    info!("Wrote {} with {} words", dictionary_path.display(), merged.len());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn playable_words_are_four_to_six_lowercase_letters() {
        assert!(is_playable("word"));
        assert!(is_playable("crane"));
        assert!(is_playable("planet"));
        assert!(!is_playable("cat"));
        assert!(!is_playable("planets"));
        assert!(!is_playable("don't"));
        assert!(!is_playable("Crane"));
        assert!(!is_playable("café"));
    }

    #[test]
    fn allowed_words_are_normalised_deduped_and_sorted() {
        let text = "Zebra\r\ncrane\n  apple \nCRANE\nit\nx-ray\nwonderful\n\nbrick";
        assert_eq!(
            filter_allowed_words(text),
            vec!["apple", "brick", "crane", "zebra"]
        );
    }

    #[test]
    fn merge_keeps_common_words_and_strips_meaning_ids() {
        let common = common_word_set("abbey\nzebra\nox\n");
        let source: BTreeMap<String, Value> = serde_json::from_value(json!({
            "abbey": {
                "word": "Abbey",
                "meanings": [
                    { "id": "a1", "def": "a monastery", "speech_part": "noun" },
                    { "def": "a church" }
                ]
            },
            "zebra": { "meanings": [] },
            "abacus": { "word": "abacus", "meanings": [ { "id": "b1", "def": "counting frame" } ] },
            "ox": { "word": "ox", "meanings": [] },
            "broken": 42
        }))
        .unwrap();

        let mut merged = BTreeMap::new();
        let taken = merge_dictionary_source(&mut merged, &common, source);
        assert_eq!(taken, 2);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["abbey", "zebra"]);
        assert_eq!(
            merged["abbey"].meanings,
            vec![
                json!({ "def": "a monastery", "speech_part": "noun" }),
                json!({ "def": "a church" })
            ]
        );
        assert_eq!(merged["zebra"].word, "zebra");
    }

    #[test]
    fn later_sources_overwrite_earlier_ones() {
        let common = common_word_set("crane");
        let mut merged = BTreeMap::new();
        let first: BTreeMap<String, Value> =
            serde_json::from_value(json!({ "crane": { "meanings": [ { "def": "bird" } ] } })).unwrap();
        let second: BTreeMap<String, Value> =
            serde_json::from_value(json!({ "crane": { "meanings": [ { "def": "machine" } ] } })).unwrap();
        merge_dictionary_source(&mut merged, &common, first);
        merge_dictionary_source(&mut merged, &common, second);
        assert_eq!(merged["crane"].meanings, vec![json!({ "def": "machine" })]);
    }
}
