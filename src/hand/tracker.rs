// src/hand/tracker.rs
// Sequential fold of table events into the live hand state

use tracing::debug;

use crate::cards::Card;
use crate::config::FeedConfig;
use crate::feed::events::{Holding, PlayerDelta, SeatInfo, SeatedPlayer, TableEvent};

use super::state::{ActionKind, ActionRecord, HandState, Player, PlayerStatus, Snapshot};

/// Long-lived hand state machine. One instance sees many hands; a hand-start
/// event discards whatever was in flight and starts over.
pub struct HandTracker {
    hero_user_id: Option<u64>,
    big_blind_chips: u64,
    hand: HandState,
}

impl HandTracker {
    pub fn new(config: &FeedConfig) -> HandTracker {
        HandTracker {
            hero_user_id: config.hero_user_id,
            big_blind_chips: config.big_blind_chips.max(1),
            hand: HandState::default(),
        }
    }

    pub fn hero_user_id(&self) -> Option<u64> {
        self.hero_user_id
    }

    /// Takes effect at the next hand start, when seats are resolved.
    pub fn set_hero_user_id(&mut self, user_id: u64) {
        self.hero_user_id = Some(user_id);
    }

    /// Copy of the current state. `apply` hands one out at every tick; this
    /// is for peeking in between.
    pub fn snapshot(&self) -> Snapshot {
        self.hand.snapshot(self.big_blind_chips)
    }

    /// Fold one event into the hand. Only a tick, the event announcing whose
    /// turn it is, yields a snapshot.
    pub fn apply(&mut self, event: TableEvent) -> Option<Snapshot> {
        match event {
            TableEvent::HandStart { hand_id, dealer_seat, seats, seated } => {
                self.on_hand_start(hand_id, dealer_seat, seats, seated);
                None
            }
            TableEvent::DealHoleCards { holdings } => {
                self.on_hole_cards(holdings);
                None
            }
            TableEvent::Blinds { deltas, minimum_raise } => {
                self.on_blinds(deltas, minimum_raise);
                None
            }
            TableEvent::Tick { acting_seat, street, minimum_raise } => {
                self.hand.acting_seat = acting_seat;
                self.hand.street = street;
                self.hand.minimum_raise = minimum_raise;
                Some(self.snapshot())
            }
            TableEvent::PlayerAction { kind, seat, chips, deltas } => {
                self.on_player_action(kind, seat, chips, deltas);
                None
            }
            TableEvent::DealCommunityCards { cards } => {
                self.on_community_cards(cards);
                None
            }
            TableEvent::UpdatePots { pot_total, deltas } => {
                self.hand.pot = pot_total;
                self.apply_deltas(&deltas);
                None
            }
        }
    }

    fn on_hand_start(
        &mut self,
        hand_id: Option<u64>,
        dealer_seat: Option<u32>,
        seats: Vec<SeatInfo>,
        seated: Vec<SeatedPlayer>,
    ) {
        let mut hand = HandState::fresh(hand_id, dealer_seat);
        hand.hero_seat = self.hero_user_id.and_then(|hero| {
            seats
                .iter()
                .find(|entry| entry.user_id == Some(hero))
                .map(|entry| entry.seat)
        });
        for entry in &seated {
            let (user_id, stack) = seats
                .iter()
                .find(|seat| seat.seat == entry.seat)
                .map(|seat| (seat.user_id, seat.stack))
                .unwrap_or((None, 0));
            hand.players.push(Player {
                seat: entry.seat,
                user_id,
                stack,
                bet: 0,
                status: entry.status,
            });
        }
        debug!(hand_id = ?hand.hand_id, hero_seat = ?hand.hero_seat, "hand start");
        self.hand = hand;
    }

    fn on_hole_cards(&mut self, holdings: Vec<Holding>) {
        let Some(hero) = self.hero_user_id else {
            return;
        };
        if let Some(holding) = holdings.into_iter().find(|h| h.user_id == Some(hero)) {
            self.hand.hole_cards = parse_cards(&holding.cards);
        }
    }

    fn on_blinds(&mut self, deltas: Vec<PlayerDelta>, minimum_raise: u64) {
        self.apply_deltas(&deltas);
        self.hand.current_bets = self.total_bets();
        self.hand.minimum_raise = minimum_raise;

        let small_blind = (self.big_blind_chips / 2).max(1);
        for delta in &deltas {
            let (kind, size_bb) = if delta.bet == small_blind {
                (ActionKind::PostSmallBlind, 0.5)
            } else if delta.bet == self.big_blind_chips {
                (ActionKind::PostBigBlind, 1.0)
            } else {
                continue;
            };
            self.hand.history.push(ActionRecord {
                seat: Some(delta.seat),
                kind,
                size_bb: Some(size_bb),
                all_in: false,
                street: self.hand.street,
            });
        }
    }

    fn on_player_action(
        &mut self,
        kind: ActionKind,
        seat: Option<u32>,
        chips: u64,
        deltas: Vec<PlayerDelta>,
    ) {
        self.apply_deltas(&deltas);
        let size_bb = match kind {
            ActionKind::Raise | ActionKind::Call | ActionKind::Bet => Some(chips as f64),
            _ => None,
        };
        let all_in = seat
            .and_then(|s| self.hand.player(s))
            .map(|player| player.status == PlayerStatus::AllIn)
            .unwrap_or(false);
        self.hand.history.push(ActionRecord {
            seat,
            kind,
            size_bb,
            all_in,
            street: self.hand.street,
        });
        self.hand.current_bets = self.total_bets();
    }

    fn on_community_cards(&mut self, cards: Vec<String>) {
        // Three cards replace the board (flop), one extends it (turn, river).
        match cards.len() {
            3 => self.hand.board = parse_cards(&cards),
            1 => self.hand.board.extend(parse_cards(&cards)),
            other => debug!(count = other, "ignoring community deal of unexpected size"),
        }
    }

    fn apply_deltas(&mut self, deltas: &[PlayerDelta]) {
        for delta in deltas {
            if let Some(player) = self.hand.player_mut(delta.seat) {
                player.bet = delta.bet;
                if let Some(stack) = delta.stack {
                    player.stack = stack;
                }
                player.status = delta.status;
            }
        }
    }

    fn total_bets(&self) -> u64 {
        self.hand.players.iter().map(|p| p.bet).sum()
    }
}

fn parse_cards(codes: &[String]) -> Vec<Card> {
    codes.iter().filter_map(|code| Card::parse(code)).collect()
}
