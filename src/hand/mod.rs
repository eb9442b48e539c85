// src/hand/mod.rs
// Hand state tracking: the data model and the event-folding state machine

pub mod state;
pub mod tracker;

pub use state::{
    ActionKind, ActionRecord, HandState, HeroPosition, LegalAction, Player, PlayerStatus,
    Snapshot, Street,
};
pub use tracker::HandTracker;
