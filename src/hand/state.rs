// src/hand/state.rs
// Live hand state, the immutable snapshot emitted at decision-relevant
// events, and the query surface consumers read off a snapshot

use std::fmt;

use crate::cards::Card;
use crate::config::DEFAULT_MINIMUM_RAISE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Parse the feed's street spelling, case-tolerant ("preFlop" included).
    /// Missing or unrecognized names read as preflop.
    pub fn from_name(name: Option<&str>) -> Street {
        match name.map(str::to_ascii_lowercase).as_deref() {
            Some("flop") => Street::Flop,
            Some("turn") => Street::Turn,
            Some("river") => Street::River,
            _ => Street::Preflop,
        }
    }

    pub fn is_preflop(self) -> bool {
        self == Street::Preflop
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        write!(f, "{name}")
    }
}

/// Player status as the feed reports it ("ask", "bet", "fold", "all_in").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    /// Waiting to act ("ask" on the wire).
    #[default]
    Waiting,
    Bet,
    Fold,
    AllIn,
}

impl PlayerStatus {
    pub fn from_name(name: Option<&str>) -> PlayerStatus {
        match name {
            Some("bet") => PlayerStatus::Bet,
            Some("fold") => PlayerStatus::Fold,
            Some("all_in") => PlayerStatus::AllIn,
            _ => PlayerStatus::Waiting,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    PostSmallBlind,
    PostBigBlind,
    Raise,
    Call,
    Check,
    Bet,
    Fold,
}

impl ActionKind {
    pub fn from_action_name(name: &str) -> Option<ActionKind> {
        match name {
            "raise" => Some(ActionKind::Raise),
            "call" => Some(ActionKind::Call),
            "check" => Some(ActionKind::Check),
            "bet" => Some(ActionKind::Bet),
            "fold" => Some(ActionKind::Fold),
            _ => None,
        }
    }

    pub fn is_blind(self) -> bool {
        matches!(self, ActionKind::PostSmallBlind | ActionKind::PostBigBlind)
    }
}

/// One append-only history entry. Records carry the street that was in
/// effect when they were appended; per-street scans stop on a street change
/// or a blind posting.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub seat: Option<u32>,
    pub kind: ActionKind,
    /// Size in big blinds as the feed reported it, where the action has one.
    pub size_bb: Option<f64>,
    /// The actor was all-in once this action resolved.
    pub all_in: bool,
    pub street: Street,
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seat {
            Some(seat) => write!(f, "Seat{seat}")?,
            None => write!(f, "Seat?")?,
        }
        match self.kind {
            ActionKind::PostSmallBlind => write!(f, " post SB 0.5bb"),
            ActionKind::PostBigBlind => write!(f, " post BB 1bb"),
            ActionKind::Raise => write!(f, " raises {}bb", fmt_bb(self.size_bb)),
            ActionKind::Call => write!(f, " calls {}bb", fmt_bb(self.size_bb)),
            ActionKind::Check => write!(f, " checks"),
            ActionKind::Bet => write!(f, " bets {}bb", fmt_bb(self.size_bb)),
            ActionKind::Fold => write!(f, " folds"),
        }
    }
}

fn fmt_bb(size: Option<f64>) -> String {
    match size {
        Some(value) if value.fract() == 0.0 => format!("{}", value as i64),
        Some(value) => format!("{value}"),
        None => "0".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub seat: u32,
    pub user_id: Option<u64>,
    pub stack: u64,
    /// Chips committed this betting round.
    pub bet: u64,
    pub status: PlayerStatus,
}

/// The one live hand. Replaced wholesale on every hand start; nothing
/// survives into the next hand.
#[derive(Debug, Clone, Default)]
pub struct HandState {
    pub hand_id: Option<u64>,
    pub street: Street,
    pub dealer_seat: Option<u32>,
    pub hero_seat: Option<u32>,
    /// Authoritative pot total as last reported by the feed, raw chips.
    pub pot: u64,
    /// Sum of bets currently committed in front of the players.
    pub current_bets: u64,
    pub minimum_raise: u64,
    pub hole_cards: Vec<Card>,
    pub board: Vec<Card>,
    pub players: Vec<Player>,
    pub acting_seat: Option<u32>,
    pub history: Vec<ActionRecord>,
}

impl HandState {
    pub fn fresh(hand_id: Option<u64>, dealer_seat: Option<u32>) -> HandState {
        HandState {
            hand_id,
            dealer_seat,
            minimum_raise: DEFAULT_MINIMUM_RAISE,
            ..HandState::default()
        }
    }

    pub fn player(&self, seat: u32) -> Option<&Player> {
        self.players.iter().find(|player| player.seat == seat)
    }

    pub(crate) fn player_mut(&mut self, seat: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.seat == seat)
    }

    pub fn snapshot(&self, big_blind_chips: u64) -> Snapshot {
        Snapshot {
            hand_id: self.hand_id,
            street: self.street,
            dealer_seat: self.dealer_seat,
            hero_seat: self.hero_seat,
            pot: self.pot,
            current_bets: self.current_bets,
            minimum_raise: self.minimum_raise,
            hole_cards: self.hole_cards.clone(),
            board: self.board.clone(),
            players: self.players.clone(),
            acting_seat: self.acting_seat,
            history: self.history.clone(),
            big_blind_chips: big_blind_chips.max(1),
        }
    }
}

/// Hero's seat relative to the dealer button, heads-up: the dealer posts the
/// small blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroPosition {
    SmallBlind,
    BigBlind,
    Unknown,
}

impl fmt::Display for HeroPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeroPosition::SmallBlind => "SB",
            HeroPosition::BigBlind => "BB",
            HeroPosition::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalAction {
    Fold,
    Call,
    Raise,
    Check,
    Bet,
}

impl fmt::Display for LegalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LegalAction::Fold => "fold",
            LegalAction::Call => "call",
            LegalAction::Raise => "raise",
            LegalAction::Check => "check",
            LegalAction::Bet => "bet",
        };
        write!(f, "{name}")
    }
}

/// Immutable copy of the hand state taken when a decision-relevant event is
/// processed. All classification and display reads go through this.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub hand_id: Option<u64>,
    pub street: Street,
    pub dealer_seat: Option<u32>,
    pub hero_seat: Option<u32>,
    pub pot: u64,
    pub current_bets: u64,
    pub minimum_raise: u64,
    pub hole_cards: Vec<Card>,
    pub board: Vec<Card>,
    pub players: Vec<Player>,
    pub acting_seat: Option<u32>,
    pub history: Vec<ActionRecord>,
    pub big_blind_chips: u64,
}

impl Snapshot {
    pub fn is_hero_turn(&self) -> bool {
        self.acting_seat.is_some() && self.acting_seat == self.hero_seat
    }

    pub fn hero(&self) -> Option<&Player> {
        self.hero_seat.and_then(|seat| self.players.iter().find(|p| p.seat == seat))
    }

    /// First non-hero seat, which heads-up is the only other player.
    pub fn villain(&self) -> Option<&Player> {
        self.hero_seat
            .and_then(|seat| self.players.iter().find(|p| p.seat != seat))
    }

    pub fn hero_stack_bb(&self) -> f64 {
        self.hero()
            .map(|p| p.stack as f64 / self.big_blind_chips as f64)
            .unwrap_or(0.0)
    }

    pub fn villain_stack_bb(&self) -> f64 {
        self.villain()
            .map(|p| p.stack as f64 / self.big_blind_chips as f64)
            .unwrap_or(0.0)
    }

    pub fn pot_bb(&self) -> f64 {
        self.pot as f64 / self.big_blind_chips as f64
    }

    pub fn position(&self) -> HeroPosition {
        match (self.dealer_seat, self.hero_seat) {
            (Some(dealer), Some(hero)) if dealer == hero => HeroPosition::SmallBlind,
            (Some(_), Some(_)) => HeroPosition::BigBlind,
            _ => HeroPosition::Unknown,
        }
    }

    /// Ordered display strings for the action history.
    pub fn history_lines(&self) -> Vec<String> {
        self.history.iter().map(ToString::to_string).collect()
    }

    /// Actions open to the hero right now. Empty when it is not the hero's
    /// turn. Fold is always available; facing a higher bet allows call and,
    /// with chips behind, raise; otherwise check and, with chips behind, bet.
    pub fn legal_actions(&self) -> Vec<LegalAction> {
        if !self.is_hero_turn() {
            return Vec::new();
        }
        let Some(hero) = self.hero() else {
            return Vec::new();
        };
        let mut actions = vec![LegalAction::Fold];
        let max_bet = self.players.iter().map(|p| p.bet).max().unwrap_or(0);
        if hero.bet < max_bet {
            actions.push(LegalAction::Call);
            if hero.stack > 0 {
                actions.push(LegalAction::Raise);
            }
        } else {
            actions.push(LegalAction::Check);
            if hero.stack > 0 {
                actions.push(LegalAction::Bet);
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(seat: u32, stack: u64, bet: u64) -> Player {
        Player {
            seat,
            user_id: Some(seat as u64 * 100),
            stack,
            bet,
            status: PlayerStatus::Waiting,
        }
    }

    fn snapshot(players: Vec<Player>) -> Snapshot {
        Snapshot {
            hand_id: Some(1),
            street: Street::Preflop,
            dealer_seat: Some(1),
            hero_seat: Some(1),
            pot: 0,
            current_bets: 0,
            minimum_raise: 2,
            hole_cards: Vec::new(),
            board: Vec::new(),
            players,
            acting_seat: Some(1),
            history: Vec::new(),
            big_blind_chips: 2,
        }
    }

    #[test]
    fn test_stacks_in_big_blinds() {
        let snap = snapshot(vec![player(1, 199, 1), player(2, 150, 2)]);
        assert!((snap.hero_stack_bb() - 99.5).abs() < f64::EPSILON);
        assert!((snap.villain_stack_bb() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_position_follows_dealer_seat() {
        let mut snap = snapshot(vec![player(1, 200, 0), player(2, 200, 0)]);
        assert_eq!(snap.position(), HeroPosition::SmallBlind);
        snap.dealer_seat = Some(2);
        assert_eq!(snap.position(), HeroPosition::BigBlind);
        snap.hero_seat = None;
        assert_eq!(snap.position(), HeroPosition::Unknown);
    }

    #[test]
    fn test_legal_actions_facing_a_bet() {
        let snap = snapshot(vec![player(1, 199, 1), player(2, 198, 2)]);
        assert_eq!(
            snap.legal_actions(),
            vec![LegalAction::Fold, LegalAction::Call, LegalAction::Raise]
        );
    }

    #[test]
    fn test_legal_actions_unopened() {
        let snap = snapshot(vec![player(1, 198, 2), player(2, 198, 2)]);
        assert_eq!(
            snap.legal_actions(),
            vec![LegalAction::Fold, LegalAction::Check, LegalAction::Bet]
        );
    }

    #[test]
    fn test_no_raise_or_bet_without_chips() {
        let snap = snapshot(vec![player(1, 0, 1), player(2, 0, 2)]);
        assert_eq!(snap.legal_actions(), vec![LegalAction::Fold, LegalAction::Call]);
    }

    #[test]
    fn test_no_actions_when_not_hero_turn() {
        let mut snap = snapshot(vec![player(1, 199, 1), player(2, 198, 2)]);
        snap.acting_seat = Some(2);
        assert!(snap.legal_actions().is_empty());
        snap.acting_seat = None;
        assert!(snap.legal_actions().is_empty());
    }

    #[test]
    fn test_history_display_strings() {
        let records = vec![
            ActionRecord {
                seat: Some(1),
                kind: ActionKind::PostSmallBlind,
                size_bb: Some(0.5),
                all_in: false,
                street: Street::Preflop,
            },
            ActionRecord {
                seat: Some(2),
                kind: ActionKind::Raise,
                size_bb: Some(3.0),
                all_in: false,
                street: Street::Preflop,
            },
            ActionRecord {
                seat: Some(1),
                kind: ActionKind::Check,
                size_bb: None,
                all_in: false,
                street: Street::Flop,
            },
        ];
        let lines: Vec<String> = records.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["Seat1 post SB 0.5bb", "Seat2 raises 3bb", "Seat1 checks"]);
    }

    #[test]
    fn test_street_parsing() {
        assert_eq!(Street::from_name(Some("preFlop")), Street::Preflop);
        assert_eq!(Street::from_name(Some("FLOP")), Street::Flop);
        assert_eq!(Street::from_name(Some("river")), Street::River);
        assert_eq!(Street::from_name(Some("showdown")), Street::Preflop);
        assert_eq!(Street::from_name(None), Street::Preflop);
    }
}
