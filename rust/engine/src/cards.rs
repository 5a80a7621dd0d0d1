use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four suits of a standard 52-card deck.
/// Suits carry no value in blackjack; they only make each card unique.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        match c {
            '♠' | 'S' | 's' => Some(Suit::Spades),
            '♥' | 'H' | 'h' => Some(Suit::Hearts),
            '♦' | 'D' | 'd' => Some(Suit::Diamonds),
            '♣' | 'C' | 'c' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// The rank (face) of a playing card, Ace through King.
/// Discriminants follow the printed face; use [`Rank::base_value`] for scoring.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace, counted 11 until softened to 1
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (10)
    Jack,
    /// Queen (10)
    Queen,
    /// King (10)
    King,
}

impl Rank {
    /// Value before any ace softening: Ace = 11, faces = 10, pips at face value.
    pub fn base_value(self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            pip => pip as u8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    fn from_label(s: &str) -> Option<Rank> {
        let r = match s.to_ascii_uppercase().as_str() {
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return None,
        };
        Some(r)
    }
}

/// A single playing card. Cards have no identity beyond rank and suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Ace through King)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Parses the `Display` form (`A♠`, `10♥`) or the ASCII form (`AS`, `TH`, `10d`).
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s
            .chars()
            .last()
            .ok_or_else(|| "empty card".to_string())?;
        let suit = Suit::from_char(suit_char).ok_or_else(|| format!("unknown suit in {:?}", s))?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let rank =
            Rank::from_label(rank_part).ok_or_else(|| format!("unknown rank in {:?}", s))?;
        Ok(Card { rank, suit })
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_values_follow_blackjack_counting() {
        assert_eq!(Rank::Ace.base_value(), 11);
        assert_eq!(Rank::Two.base_value(), 2);
        assert_eq!(Rank::Nine.base_value(), 9);
        assert_eq!(Rank::Ten.base_value(), 10);
        assert_eq!(Rank::Jack.base_value(), 10);
        assert_eq!(Rank::Queen.base_value(), 10);
        assert_eq!(Rank::King.base_value(), 10);
    }

    #[test]
    fn display_uses_suit_symbols() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
        assert_eq!(Card::new(Rank::King, Suit::Clubs).to_string(), "K♣");
    }

    #[test]
    fn parses_symbol_and_ascii_forms() {
        let a: Card = "A♠".parse().unwrap();
        assert_eq!(a, Card::new(Rank::Ace, Suit::Spades));
        let t: Card = "TH".parse().unwrap();
        assert_eq!(t, Card::new(Rank::Ten, Suit::Hearts));
        let ten: Card = "10d".parse().unwrap();
        assert_eq!(ten, Card::new(Rank::Ten, Suit::Diamonds));
        assert!("1X".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn full_deck_has_every_pair_once() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let set: std::collections::HashSet<_> = deck.iter().collect();
        assert_eq!(set.len(), 52);
    }
}
