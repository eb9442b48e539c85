// src/feed/events.rs
// Typed table events decoded from raw update payloads

use serde::Deserialize;
use tracing::debug;

use crate::config::DEFAULT_MINIMUM_RAISE;
use crate::hand::state::{ActionKind, PlayerStatus, Street};

use super::payload::RawUpdate;

/// Default chip amount for an action whose payload omits the size.
const DEFAULT_CHIPS: u64 = 0;

/// One recognized table notification. Anything the feed sends outside this
/// set is dropped at decode time.
#[derive(Debug, Clone)]
pub enum TableEvent {
    HandStart {
        hand_id: Option<u64>,
        dealer_seat: Option<u32>,
        seats: Vec<SeatInfo>,
        seated: Vec<SeatedPlayer>,
    },
    DealHoleCards {
        holdings: Vec<Holding>,
    },
    Blinds {
        deltas: Vec<PlayerDelta>,
        minimum_raise: u64,
    },
    Tick {
        acting_seat: Option<u32>,
        street: Street,
        minimum_raise: u64,
    },
    PlayerAction {
        kind: ActionKind,
        seat: Option<u32>,
        chips: u64,
        deltas: Vec<PlayerDelta>,
    },
    DealCommunityCards {
        cards: Vec<String>,
    },
    UpdatePots {
        pot_total: u64,
        deltas: Vec<PlayerDelta>,
    },
}

/// A seat listing entry from the hand-start notification.
#[derive(Debug, Clone)]
pub struct SeatInfo {
    pub seat: u32,
    pub user_id: Option<u64>,
    pub stack: u64,
}

/// A players listing entry from the hand-start notification.
#[derive(Debug, Clone)]
pub struct SeatedPlayer {
    pub seat: u32,
    pub status: PlayerStatus,
}

/// One player's card list from the hole-card deal.
#[derive(Debug, Clone)]
pub struct Holding {
    pub user_id: Option<u64>,
    pub cards: Vec<String>,
}

/// Per-player bet/stack/status change embedded in an event. A missing bet
/// reads as zero, a missing stack keeps the prior value, and a missing or
/// unrecognized status reads as waiting-to-act.
#[derive(Debug, Clone)]
pub struct PlayerDelta {
    pub seat: u32,
    pub bet: u64,
    pub stack: Option<u64>,
    pub status: PlayerStatus,
}

impl TableEvent {
    /// Decode a raw update into its typed event, or `None` when the action
    /// is unrecognized or the payload does not have the expected shape.
    pub fn from_update(update: RawUpdate) -> Option<TableEvent> {
        let RawUpdate { action, fields } = update;
        let decoded: Result<TableEvent, serde_json::Error> = match action.as_str() {
            "startHand" => serde_json::from_value::<HandStartWire>(fields).map(Into::into),
            "dealHoleCards" => serde_json::from_value::<HoldingsWire>(fields).map(Into::into),
            "blinds" => serde_json::from_value::<BlindsWire>(fields).map(Into::into),
            "tick" => serde_json::from_value::<TickWire>(fields).map(Into::into),
            "raise" | "call" | "check" | "bet" | "fold" => {
                let kind = ActionKind::from_action_name(&action)?;
                serde_json::from_value::<ActionWire>(fields).map(|wire| wire.into_event(kind))
            }
            "dealCommunityCards" => serde_json::from_value::<CardsWire>(fields).map(Into::into),
            "updatePots" => serde_json::from_value::<PotsWire>(fields).map(Into::into),
            _ => return None,
        };
        match decoded {
            Ok(event) => Some(event),
            Err(err) => {
                debug!(%action, %err, "dropping undecodable update payload");
                None
            }
        }
    }
}

// Wire shapes as the feed sends them, camelCase keys and all. Unknown keys
// are ignored; listing entries without a seat id cannot be joined to a
// player and are dropped.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HandStartWire {
    id: Option<u64>,
    hand_id: Option<u64>,
    dealer_seat: Option<u32>,
    seats: Vec<SeatWire>,
    players: Vec<SeatedWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SeatWire {
    id: Option<u32>,
    user_id: Option<u64>,
    stack: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SeatedWire {
    seat_id: Option<u32>,
    state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HoldingsWire {
    players: Vec<HoldingWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HoldingWire {
    user_id: Option<u64>,
    cards: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BlindsWire {
    players: Vec<DeltaWire>,
    minimum_raise: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DeltaWire {
    seat_id: Option<u32>,
    bet: u64,
    stack: Option<u64>,
    state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TickWire {
    current_player: CurrentPlayerWire,
    state: Option<String>,
    minimum_raise: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CurrentPlayerWire {
    seat_id: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ActionWire {
    seat_id: Option<u32>,
    chips: Option<u64>,
    players: Vec<DeltaWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CardsWire {
    cards: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PotsWire {
    pots: Vec<PotWire>,
    players: Vec<DeltaWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PotWire {
    chips: u64,
}

fn deltas(wires: Vec<DeltaWire>) -> Vec<PlayerDelta> {
    wires
        .into_iter()
        .filter_map(|wire| {
            Some(PlayerDelta {
                seat: wire.seat_id?,
                bet: wire.bet,
                stack: wire.stack,
                status: PlayerStatus::from_name(wire.state.as_deref()),
            })
        })
        .collect()
}

impl From<HandStartWire> for TableEvent {
    fn from(wire: HandStartWire) -> TableEvent {
        TableEvent::HandStart {
            hand_id: wire.id.or(wire.hand_id),
            dealer_seat: wire.dealer_seat,
            seats: wire
                .seats
                .into_iter()
                .filter_map(|seat| {
                    Some(SeatInfo {
                        seat: seat.id?,
                        user_id: seat.user_id,
                        stack: seat.stack,
                    })
                })
                .collect(),
            seated: wire
                .players
                .into_iter()
                .filter_map(|entry| {
                    Some(SeatedPlayer {
                        seat: entry.seat_id?,
                        status: PlayerStatus::from_name(entry.state.as_deref()),
                    })
                })
                .collect(),
        }
    }
}

impl From<HoldingsWire> for TableEvent {
    fn from(wire: HoldingsWire) -> TableEvent {
        TableEvent::DealHoleCards {
            holdings: wire
                .players
                .into_iter()
                .map(|entry| Holding {
                    user_id: entry.user_id,
                    cards: entry.cards,
                })
                .collect(),
        }
    }
}

impl From<BlindsWire> for TableEvent {
    fn from(wire: BlindsWire) -> TableEvent {
        TableEvent::Blinds {
            deltas: deltas(wire.players),
            minimum_raise: wire.minimum_raise.unwrap_or(DEFAULT_MINIMUM_RAISE),
        }
    }
}

impl From<TickWire> for TableEvent {
    fn from(wire: TickWire) -> TableEvent {
        TableEvent::Tick {
            acting_seat: wire.current_player.seat_id,
            street: Street::from_name(wire.state.as_deref()),
            minimum_raise: wire.minimum_raise.unwrap_or(DEFAULT_MINIMUM_RAISE),
        }
    }
}

impl ActionWire {
    fn into_event(self, kind: ActionKind) -> TableEvent {
        TableEvent::PlayerAction {
            kind,
            seat: self.seat_id,
            chips: self.chips.unwrap_or(DEFAULT_CHIPS),
            deltas: deltas(self.players),
        }
    }
}

impl From<CardsWire> for TableEvent {
    fn from(wire: CardsWire) -> TableEvent {
        TableEvent::DealCommunityCards { cards: wire.cards }
    }
}

impl From<PotsWire> for TableEvent {
    fn from(wire: PotsWire) -> TableEvent {
        TableEvent::UpdatePots {
            pot_total: wire.pots.iter().map(|pot| pot.chips).sum(),
            deltas: deltas(wire.players),
        }
    }
}
