// src/strategy/board_texture.rs
// Pure board-texture bucketing over community cards

use std::collections::HashMap;
use std::fmt;

use crate::cards::{Card, Suit};

/// The eight texture buckets a board can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTexture {
    /// Fewer than three cards known.
    Unknown,
    /// A/K high, rainbow, unpaired, uncoordinated.
    HighDry,
    /// Q/J high, rainbow, unpaired, uncoordinated.
    MidDry,
    /// T or lower high, rainbow, unpaired, uncoordinated.
    LowDry,
    Paired,
    Monotone,
    /// Two suits with straight coordination, or a plain two-suit board.
    TwoToneConnected,
    /// Multiple features at once, or anything unenumerated.
    Dynamic,
}

impl fmt::Display for BoardTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoardTexture::Unknown => "unknown",
            BoardTexture::HighDry => "high_dry",
            BoardTexture::MidDry => "mid_dry",
            BoardTexture::LowDry => "low_dry",
            BoardTexture::Paired => "paired",
            BoardTexture::Monotone => "monotone",
            BoardTexture::TwoToneConnected => "2tone_connected",
            BoardTexture::Dynamic => "dynamic",
        };
        write!(f, "{name}")
    }
}

/// Classify a board. Total and deterministic; anything that matches no
/// enumerated shape falls into `Dynamic`.
pub fn classify_board(cards: &[Card]) -> BoardTexture {
    if cards.len() < 3 {
        return BoardTexture::Unknown;
    }

    let ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    let mut suit_counts: HashMap<Suit, usize> = HashMap::new();
    for card in cards {
        *suit_counts.entry(card.suit).or_insert(0) += 1;
    }

    let paired = is_paired(&ranks);
    let monotone = suit_counts.values().any(|&count| count >= 3);
    let connected = is_connected(&ranks);
    let two_tone = suit_counts.len() == 2;

    // A board that is entirely one suit plays as monotone no matter how
    // coordinated its ranks are.
    if suit_counts.len() == 1 {
        return BoardTexture::Monotone;
    }

    let feature_count = [paired, monotone, connected].iter().filter(|&&f| f).count();
    if feature_count >= 2 {
        return BoardTexture::Dynamic;
    }

    if monotone {
        return BoardTexture::Monotone;
    }
    if paired {
        return BoardTexture::Paired;
    }
    if connected && two_tone {
        return BoardTexture::TwoToneConnected;
    }
    if connected {
        return BoardTexture::Dynamic;
    }

    // Dry boards, bucketed by high card when rainbow.
    if suit_counts.len() >= 3 {
        let high_rank = ranks.iter().copied().max().unwrap_or(0);
        return if high_rank >= 13 {
            BoardTexture::HighDry
        } else if high_rank >= 10 {
            BoardTexture::MidDry
        } else {
            BoardTexture::LowDry
        };
    }

    if two_tone {
        return BoardTexture::TwoToneConnected;
    }

    BoardTexture::Dynamic
}

fn is_paired(ranks: &[u8]) -> bool {
    let mut unique = ranks.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique.len() != ranks.len()
}

/// Straight coordination: at least three distinct ranks, and either the full
/// spread fits a straight window or, with four or more ranks, some sorted
/// four-card window does. The ace also plays low for the wheel.
fn is_connected(ranks: &[u8]) -> bool {
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() < 3 {
        return false;
    }
    if sorted.contains(&14) {
        let mut wheel: Vec<u8> = sorted.iter().map(|&r| if r == 14 { 1 } else { r }).collect();
        wheel.sort_unstable();
        if window_connected(&wheel) {
            return true;
        }
    }
    window_connected(&sorted)
}

fn window_connected(sorted: &[u8]) -> bool {
    if sorted[sorted.len() - 1] - sorted[0] <= 4 {
        return true;
    }
    if sorted.len() >= 4 {
        for window in sorted.windows(4) {
            if window[3] - window[0] <= 4 {
                return true;
            }
        }
    }
    false
}
