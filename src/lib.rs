//! # Freedle - Word-Guessing Game Core
//!
//! Freedle is an offline Wordle-style puzzle. This crate holds the parts of
//! it that carry state: player statistics, the achievement system, user
//! settings, and the offline build step that produces the playable word list.
//!
//! ## Features
//!
//! - **Statistics**: games played/won/lost, streaks, guess histogram, wins by word length and mode.
//! - **Achievements**: a fixed catalog of 19 achievements, each unlocked exactly once.
//! - **Settings**: word length (4-6), hard mode and count mode.
//! - **Persistence**: every mutation is written through a namespaced key-value store (sled, JSON files, or memory).
//! - **Word-List Build**: filters a raw word list and dictionary corpus down to playable 4-6 letter words.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use freedle::game::{SettingsStore, StatsManager};
//! use freedle::storage::SledStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(SledStore::open("./data/freedle.db")?);
//!     let settings = SettingsStore::new(store.clone());
//!     let mut stats = StatsManager::new(store);
//!
//!     // Round finished: solved in three guesses
//!     stats.record_win(3, settings.word_length(), settings.modes());
//!     for achievement in stats.consume_recently_unlocked() {
//!         println!("Unlocked: {}", achievement.notification());
//!     }
//!     println!("Win rate: {}%", stats.win_percentage());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - achievement catalog, stats aggregator, settings store
//! - [`storage`] - the key-value persistence contract and its backends
//! - [`config`] - TOML configuration for the binary
//! - [`wordlist`] - offline word-list and dictionary filtering
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │  SettingsStore  │     │  StatsManager   │ ← record_win / record_loss
//! └─────────────────┘     └─────────────────┘
//!          │                       │  evaluates
//!          │              ┌─────────────────┐
//!          │              │   Achievement   │
//!          │              │     Catalog     │
//!          │              └─────────────────┘
//! ┌───────────────────────────────────────────┐
//! │        KeyValueStore (per namespace)      │ ← Data persistence
//! └───────────────────────────────────────────┘
//! ```

pub mod config;
pub mod game;
pub mod storage;
pub mod wordlist;
