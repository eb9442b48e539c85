// src/cards.rs
// Card codes as the update feed prints them ("Ah", "7c", face-down "X")

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Numeric value, ace high (2..=14).
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2, Rank::Three => 3, Rank::Four => 4, Rank::Five => 5,
            Rank::Six => 6, Rank::Seven => 7, Rank::Eight => 8, Rank::Nine => 9,
            Rank::Ten => 10, Rank::Jack => 11, Rank::Queen => 12, Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two), '3' => Some(Rank::Three), '4' => Some(Rank::Four),
            '5' => Some(Rank::Five), '6' => Some(Rank::Six), '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight), '9' => Some(Rank::Nine), 'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack), 'Q' => Some(Rank::Queen), 'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Rank::Two => '2', Rank::Three => '3', Rank::Four => '4', Rank::Five => '5',
            Rank::Six => '6', Rank::Seven => '7', Rank::Eight => '8', Rank::Nine => '9',
            Rank::Ten => 'T', Rank::Jack => 'J', Rank::Queen => 'Q', Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Parse a two-character feed code. The face-down placeholder "X" and
    /// anything else malformed comes back as `None`.
    pub fn parse(code: &str) -> Option<Card> {
        let mut chars = code.chars();
        let rank = Rank::from_char(chars.next()?)?;
        let suit = Suit::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Card { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.as_char(), self.suit.as_char())
    }
}
