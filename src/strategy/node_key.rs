// src/strategy/node_key.rs
// Canonical decision-node keys for strategy table lookup

use std::fmt;

use crate::hand::state::{ActionKind, ActionRecord, HeroPosition, Snapshot};

use super::board_texture::classify_board;

/// How many times the pot was raised preflop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotClass {
    SingleRaised,
    ThreeBet,
    FourBet,
}

impl fmt::Display for PotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PotClass::SingleRaised => "SRP",
            PotClass::ThreeBet => "3BP",
            PotClass::FourBet => "4BP",
        };
        write!(f, "{name}")
    }
}

/// Build the lookup key for a decision point.
///
/// Preflop: `PF|{position}|{facing}|{pot_class}|{stack_bucket}`.
/// Postflop: `POST|{role}|{pot_class}|{street}|{line}|{board_bucket}|{stack_bucket}`.
pub fn build_node_key(snapshot: &Snapshot) -> String {
    let position = snapshot.position();
    let stack_bucket = stack_bucket(snapshot.hero_stack_bb());
    let pot_class = pot_class(snapshot);

    if snapshot.street.is_preflop() {
        format!(
            "PF|{}|{}|{}|{}",
            position,
            facing(snapshot),
            pot_class,
            stack_bucket
        )
    } else {
        // The dealer keeps the in-position role in 3-bet and 4-bet pots too;
        // no aggressor recomputation.
        let role = if position == HeroPosition::SmallBlind { "IP" } else { "OOP" };
        format!(
            "POST|{}|{}|{}|{}|{}|{}",
            role,
            pot_class,
            snapshot.street,
            street_line(snapshot),
            classify_board(&snapshot.board),
            stack_bucket
        )
    }
}

/// Effective-stack bucket, in big blinds.
pub fn stack_bucket(stack_bb: f64) -> &'static str {
    if stack_bb < 40.0 {
        "0-40bb"
    } else if stack_bb < 70.0 {
        "40-70bb"
    } else {
        "70-120bb"
    }
}

/// What the hero faces preflop, read from the blind-excluded preflop action.
pub fn facing(snapshot: &Snapshot) -> String {
    let voluntary: Vec<&ActionRecord> = snapshot
        .history
        .iter()
        .filter(|record| record.street.is_preflop() && !record.kind.is_blind())
        .collect();
    if voluntary.is_empty() {
        return "Unopened".to_string();
    }

    let raises: Vec<&ActionRecord> = voluntary
        .iter()
        .copied()
        .filter(|record| record.kind == ActionKind::Raise)
        .collect();
    match raises.len() {
        0 => {
            if voluntary.iter().any(|record| record.kind == ActionKind::Call) {
                "Limped".to_string()
            } else {
                "Unopened".to_string()
            }
        }
        count => {
            let size = raise_size_category(raises[raises.len() - 1]);
            let label = match count {
                1 => "Open",
                2 => "3Bet",
                _ => "4Bet",
            };
            format!("{label}_{size}")
        }
    }
}

/// Raise size buckets: under 2.5bb small, under 3.5bb medium, larger is
/// large; an all-in raise is a jam and an unsized one reads medium.
pub fn raise_size_category(record: &ActionRecord) -> &'static str {
    if record.all_in {
        return "jam";
    }
    match record.size_bb {
        Some(bb) if bb < 2.5 => "s",
        Some(bb) if bb < 3.5 => "m",
        Some(_) => "l",
        None => "m",
    }
}

/// Bet size relative to the pot (pot taken in big blinds): under half pot
/// small, up to 1.2x pot-sized, beyond that a jam.
pub fn bet_size_category(size_bb: Option<f64>, pot_bb: f64) -> &'static str {
    let Some(bet) = size_bb else {
        return "p";
    };
    if pot_bb <= 0.0 {
        return "p";
    }
    let ratio = bet / pot_bb;
    if ratio < 0.5 {
        "s"
    } else if ratio < 1.2 {
        "p"
    } else {
        "jam"
    }
}

/// Pot class from the preflop raise count.
pub fn pot_class(snapshot: &Snapshot) -> PotClass {
    let raises = snapshot
        .history
        .iter()
        .filter(|record| record.street.is_preflop() && record.kind == ActionKind::Raise)
        .count();
    match raises {
        0 | 1 => PotClass::SingleRaised,
        2 => PotClass::ThreeBet,
        _ => PotClass::FourBet,
    }
}

/// The line faced on the current street: walk history back to the street
/// boundary and classify the most recent action on it.
fn street_line(snapshot: &Snapshot) -> String {
    let last = snapshot
        .history
        .iter()
        .rev()
        .take_while(|record| record.street == snapshot.street && !record.kind.is_blind())
        .next();
    let Some(last) = last else {
        return "vs_check".to_string();
    };
    match last.kind {
        ActionKind::Check => "vs_check".to_string(),
        ActionKind::Bet => format!(
            "vs_bet_{}",
            bet_size_category(last.size_bb, snapshot.pot_bb())
        ),
        ActionKind::Raise => format!("vs_raise_{}", raise_size_category(last)),
        _ => "vs_check".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::hand::state::{Player, PlayerStatus, Street};

    fn record(kind: ActionKind, size_bb: Option<f64>, street: Street) -> ActionRecord {
        ActionRecord {
            seat: Some(2),
            kind,
            size_bb,
            all_in: false,
            street,
        }
    }

    fn blinds() -> Vec<ActionRecord> {
        vec![
            ActionRecord {
                seat: Some(1),
                kind: ActionKind::PostSmallBlind,
                size_bb: Some(0.5),
                all_in: false,
                street: Street::Preflop,
            },
            ActionRecord {
                seat: Some(2),
                kind: ActionKind::PostBigBlind,
                size_bb: Some(1.0),
                all_in: false,
                street: Street::Preflop,
            },
        ]
    }

    fn snapshot(street: Street, history: Vec<ActionRecord>) -> Snapshot {
        Snapshot {
            hand_id: Some(1),
            street,
            dealer_seat: Some(1),
            hero_seat: Some(1),
            pot: 0,
            current_bets: 0,
            minimum_raise: 2,
            hole_cards: Vec::new(),
            board: Vec::new(),
            players: vec![
                Player {
                    seat: 1,
                    user_id: Some(777),
                    stack: 199,
                    bet: 1,
                    status: PlayerStatus::Bet,
                },
                Player {
                    seat: 2,
                    user_id: Some(888),
                    stack: 198,
                    bet: 2,
                    status: PlayerStatus::Bet,
                },
            ],
            acting_seat: Some(1),
            history,
            big_blind_chips: 2,
        }
    }

    #[test]
    fn test_stack_buckets() {
        assert_eq!(stack_bucket(12.0), "0-40bb");
        assert_eq!(stack_bucket(39.9), "0-40bb");
        assert_eq!(stack_bucket(40.0), "40-70bb");
        assert_eq!(stack_bucket(69.9), "40-70bb");
        assert_eq!(stack_bucket(70.0), "70-120bb");
        assert_eq!(stack_bucket(150.0), "70-120bb");
    }

    #[test]
    fn test_facing_unopened_with_only_blinds() {
        let snap = snapshot(Street::Preflop, blinds());
        assert_eq!(facing(&snap), "Unopened");
    }

    #[test]
    fn test_facing_limped() {
        let mut history = blinds();
        history.push(record(ActionKind::Call, Some(1.0), Street::Preflop));
        let snap = snapshot(Street::Preflop, history);
        assert_eq!(facing(&snap), "Limped");
    }

    #[test]
    fn test_facing_open_sizes() {
        for (size, expected) in [(2.0, "Open_s"), (3.0, "Open_m"), (4.0, "Open_l")] {
            let mut history = blinds();
            history.push(record(ActionKind::Raise, Some(size), Street::Preflop));
            let snap = snapshot(Street::Preflop, history);
            assert_eq!(facing(&snap), expected);
        }
    }

    #[test]
    fn test_facing_unsized_raise_defaults_medium() {
        let mut history = blinds();
        history.push(record(ActionKind::Raise, None, Street::Preflop));
        let snap = snapshot(Street::Preflop, history);
        assert_eq!(facing(&snap), "Open_m");
    }

    #[test]
    fn test_facing_three_bet_uses_latest_raise_size() {
        let mut history = blinds();
        history.push(record(ActionKind::Raise, Some(3.0), Street::Preflop));
        history.push(record(ActionKind::Raise, Some(9.0), Street::Preflop));
        let snap = snapshot(Street::Preflop, history);
        assert_eq!(facing(&snap), "3Bet_l");
        assert_eq!(pot_class(&snap), PotClass::ThreeBet);
    }

    #[test]
    fn test_facing_four_bet_jam() {
        let mut history = blinds();
        history.push(record(ActionKind::Raise, Some(3.0), Street::Preflop));
        history.push(record(ActionKind::Raise, Some(9.0), Street::Preflop));
        let mut jam = record(ActionKind::Raise, Some(99.0), Street::Preflop);
        jam.all_in = true;
        history.push(jam);
        let snap = snapshot(Street::Preflop, history);
        assert_eq!(facing(&snap), "4Bet_jam");
        assert_eq!(pot_class(&snap), PotClass::FourBet);
    }

    #[test]
    fn test_pot_class_counts_only_preflop_raises() {
        let mut history = blinds();
        history.push(record(ActionKind::Raise, Some(3.0), Street::Preflop));
        history.push(record(ActionKind::Raise, Some(10.0), Street::Flop));
        let snap = snapshot(Street::Flop, history);
        assert_eq!(pot_class(&snap), PotClass::SingleRaised);
    }

    #[test]
    fn test_preflop_key_shape() {
        let snap = snapshot(Street::Preflop, blinds());
        assert_eq!(build_node_key(&snap), "PF|SB|Unopened|SRP|70-120bb");
    }

    #[test]
    fn test_postflop_key_vs_check() {
        let mut history = blinds();
        history.push(record(ActionKind::Raise, Some(3.0), Street::Preflop));
        history.push(record(ActionKind::Call, Some(2.0), Street::Preflop));
        let mut snap = snapshot(Street::Flop, history);
        snap.pot = 12;
        snap.board = vec![
            Card::parse("Ks").unwrap(),
            Card::parse("7d").unwrap(),
            Card::parse("2c").unwrap(),
        ];
        assert_eq!(
            build_node_key(&snap),
            "POST|IP|SRP|flop|vs_check|high_dry|70-120bb"
        );
    }

    #[test]
    fn test_postflop_role_oop_for_big_blind_hero() {
        let mut snap = snapshot(Street::Flop, blinds());
        snap.dealer_seat = Some(2);
        snap.pot = 8;
        snap.board = vec![
            Card::parse("Qs").unwrap(),
            Card::parse("7d").unwrap(),
            Card::parse("2c").unwrap(),
        ];
        assert!(build_node_key(&snap).starts_with("POST|OOP|"));
    }

    #[test]
    fn test_postflop_line_bet_sizes() {
        for (bet, expected) in [(2.0, "vs_bet_s"), (6.0, "vs_bet_p"), (12.0, "vs_bet_jam")] {
            let mut history = blinds();
            history.push(record(ActionKind::Bet, Some(bet), Street::Flop));
            let mut snap = snapshot(Street::Flop, history);
            snap.pot = 16; // 8bb
            let key = build_node_key(&snap);
            assert!(key.contains(expected), "{key} should contain {expected}");
        }
    }

    #[test]
    fn test_postflop_line_vs_raise() {
        let mut history = blinds();
        history.push(record(ActionKind::Bet, Some(4.0), Street::Flop));
        history.push(record(ActionKind::Raise, Some(12.0), Street::Flop));
        let mut snap = snapshot(Street::Flop, history);
        snap.pot = 16;
        assert!(build_node_key(&snap).contains("vs_raise_l"));
    }

    #[test]
    fn test_bet_size_with_unknown_pot_reads_pot_sized() {
        assert_eq!(bet_size_category(Some(4.0), 0.0), "p");
        assert_eq!(bet_size_category(None, 8.0), "p");
    }
}
