// src/lib.rs
// Heads-up table tracker: rebuilds live hand state from update-queue console
// lines and keys each decision point for strategy lookup

//! Turns a stream of loosely structured console notifications about a
//! heads-up poker hand into an authoritative [`Snapshot`] per decision point,
//! plus a canonical node key for looking the spot up in a precomputed
//! strategy table.
//!
//! The pipeline is [`feed::payload`] (extract and normalize the embedded
//! payload), [`feed::events`] (decode it into a typed [`TableEvent`]),
//! [`hand::tracker`] (fold events into the live hand) and [`strategy`]
//! (board texture and node keys). [`TableFeed`] wires the stages together
//! for callers that just have raw lines.

pub mod adapter;
pub mod cards;
pub mod config;
pub mod error;
pub mod feed;
pub mod hand;
pub mod strategy;

pub use adapter::{DecisionUpdate, TableFeed};
pub use cards::{Card, Rank, Suit};
pub use config::FeedConfig;
pub use error::ExtractError;
pub use feed::{extract, try_extract, RawUpdate, TableEvent};
pub use hand::{
    ActionKind, ActionRecord, HandTracker, HeroPosition, LegalAction, Player, PlayerStatus,
    Snapshot, Street,
};
pub use strategy::{build_node_key, classify_board, BoardTexture, PotClass};
