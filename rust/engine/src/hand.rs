use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Upper bound of a live hand; anything above busts.
pub const BLACKJACK: u8 = 21;

/// Derived value of a hand. Never stored; recompute with [`score`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandScore {
    pub total: u8,
    pub is_bust: bool,
    /// Exactly two cards totalling 21.
    pub is_blackjack: bool,
    /// At least one ace is still counted as 11.
    pub is_soft: bool,
}

/// Best total for `cards` under soft/hard ace rules.
///
/// Aces start at 11 and are softened to 1, one at a time, while the total is
/// above 21. Only the ace count matters, so the result does not depend on
/// card order.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::Card;
/// use blackjack_engine::hand::score;
///
/// let cards: Vec<Card> = ["AS", "AH", "9C"].iter().map(|s| s.parse().unwrap()).collect();
/// let s = score(&cards);
/// assert_eq!(s.total, 21);
/// assert!(!s.is_bust);
/// assert!(!s.is_blackjack);
/// ```
pub fn score(cards: &[Card]) -> HandScore {
    let mut total: u32 = 0;
    let mut soft_aces = 0u32;
    for c in cards {
        total += u32::from(c.rank.base_value());
        if c.rank == Rank::Ace {
            soft_aces += 1;
        }
    }
    while total > u32::from(BLACKJACK) && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    // saturate for absurd inputs; a 52-card hand is still well below u8::MAX
    let total = total.min(u32::from(u8::MAX)) as u8;
    HandScore {
        total,
        is_bust: total > BLACKJACK,
        is_blackjack: cards.len() == 2 && total == BLACKJACK,
        is_soft: soft_aces > 0,
    }
}

/// Cards held by the player or the dealer, in the order they were dealt.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> HandScore {
        score(&self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(labels: &[&str]) -> Vec<Card> {
        labels.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn empty_hand_scores_zero() {
        let s = score(&[]);
        assert_eq!(s.total, 0);
        assert!(!s.is_bust && !s.is_blackjack && !s.is_soft);
    }

    #[test]
    fn soft_seventeen_is_soft() {
        let s = score(&cards(&["AS", "6D"]));
        assert_eq!(s.total, 17);
        assert!(s.is_soft);
    }

    #[test]
    fn softened_ace_makes_hand_hard() {
        let s = score(&cards(&["AS", "6D", "9C"]));
        assert_eq!(s.total, 16);
        assert!(!s.is_soft);
    }

    #[test]
    fn bust_keeps_minimal_total() {
        let s = score(&cards(&["KS", "QD", "5C"]));
        assert_eq!(s.total, 25);
        assert!(s.is_bust);
    }

    #[test]
    fn hand_push_and_clear() {
        let mut h = Hand::new();
        h.push("AS".parse().unwrap());
        h.push("KH".parse().unwrap());
        assert!(h.score().is_blackjack);
        h.clear();
        assert!(h.is_empty());
    }
}
