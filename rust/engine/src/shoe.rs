use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The working deck for one round: 52 unique cards, drawn from the top.
///
/// A shoe only ever shrinks between calls to [`Shoe::build`]. The shuffle is
/// driven by a seeded ChaCha20 generator so every sequence of shoes can be
/// reproduced from the seed alone.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
    // cards forced onto the top on every build, in draw order
    top: Vec<Card>,
}

impl Shoe {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Unshuffled until build is called
        Self {
            cards: full_deck(),
            position: 0,
            rng,
            top: Vec::new(),
        }
    }

    /// A shoe whose builds always deal `top` first, in order, followed by the
    /// shuffled remainder of the deck.
    ///
    /// # Errors
    ///
    /// [`GameError::DuplicateCard`] if `top` names the same card twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use blackjack_engine::cards::Card;
    /// use blackjack_engine::shoe::Shoe;
    ///
    /// let ace: Card = "A♠".parse().unwrap();
    /// let mut shoe = Shoe::stacked(7, vec![ace]).unwrap();
    /// shoe.build();
    /// assert_eq!(shoe.draw().unwrap(), ace);
    /// assert_eq!(shoe.remaining(), 51);
    /// ```
    pub fn stacked(seed: u64, top: Vec<Card>) -> Result<Self, GameError> {
        let mut seen = HashSet::with_capacity(top.len());
        for &c in &top {
            if !seen.insert(c) {
                return Err(GameError::DuplicateCard(c));
            }
        }
        let mut shoe = Self::new_with_seed(seed);
        shoe.top = top;
        Ok(shoe)
    }

    /// Rebuilds all 52 cards and shuffles them (Fisher-Yates).
    pub fn build(&mut self) {
        let mut cards = full_deck();
        cards.shuffle(&mut self.rng);
        if !self.top.is_empty() {
            cards.retain(|c| !self.top.contains(c));
            let mut stacked = self.top.clone();
            stacked.extend(cards);
            cards = stacked;
        }
        self.cards = cards;
        self.position = 0;
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::ShoeExhausted)?;
        self.position += 1;
        Ok(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards not yet drawn, top first.
    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.position.min(self.cards.len())..]
    }
}
