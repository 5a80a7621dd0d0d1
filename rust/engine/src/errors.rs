use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// Drawing from an empty shoe. A fresh shoe never runs dry within one
    /// round, so this is an invariant violation and halts the round.
    #[error("Shoe exhausted: no cards left to draw")]
    ShoeExhausted,
    #[error("Card {0} appears more than once in the stacked shoe")]
    DuplicateCard(Card),
}
