// src/feed/mod.rs
// Console-line ingestion: payload extraction and typed event decoding

pub mod events;
pub mod payload;

pub use events::{Holding, PlayerDelta, SeatInfo, SeatedPlayer, TableEvent};
pub use payload::{extract, try_extract, RawUpdate, UPDATE_MARKER};
