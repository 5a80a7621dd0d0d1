use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::hand::{Hand, HandScore};
use crate::logger::{ActionRecord, Seat};
use crate::rules::{dealer_should_draw, resolve, resolve_opening, Outcome};
use crate::shoe::Shoe;

/// Identifier of one round at a table. Increases by one per `new_round`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase of a round. Exactly one is live at a time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// Opening cards are on the table, naturals not yet checked
    Dealing,
    /// Waiting for the player to hit or stand
    PlayerTurn,
    /// Dealer drawing under the fixed policy
    DealerTurn,
    /// Terminal; only a new round moves on
    Settled,
}

/// Inputs a round reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    /// One paced step of the dealer's automated play
    DealerDraw,
}

/// Authoritative state of a single round.
///
/// A `Round` is a value: [`Round::apply`] never mutates `self`, it returns the
/// next round. Actions that make no sense in the current state (hitting after
/// the round settled, a dealer step during the player's turn) come back as an
/// unchanged copy rather than an error.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::Card;
/// use blackjack_engine::game::{Action, Round, RoundId, RoundState};
/// use blackjack_engine::rules::Outcome;
/// use blackjack_engine::shoe::Shoe;
///
/// // player 10,7  dealer 6,K  then the dealer draws a 5
/// let top: Vec<Card> = ["10S", "6H", "7S", "KD", "5C"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let round = Round::open(RoundId(1), Shoe::stacked(1, top).unwrap()).unwrap();
/// assert_eq!(round.state(), RoundState::PlayerTurn);
///
/// let round = round.apply(Action::Stand).unwrap();
/// assert_eq!(round.state(), RoundState::DealerTurn);
/// let round = round.apply(Action::DealerDraw).unwrap();
/// assert_eq!(round.state(), RoundState::Settled);
/// assert_eq!(round.outcome(), Some(Outcome::DealerWins));
/// ```
#[derive(Debug, Clone)]
pub struct Round {
    id: RoundId,
    shoe: Shoe,
    player: Hand,
    dealer: Hand,
    state: RoundState,
    outcome: Option<Outcome>,
    actions: Vec<ActionRecord>,
}

impl Round {
    /// Rebuilds `shoe`, deals player, dealer, player, dealer and checks for
    /// naturals. The round comes back in `PlayerTurn`, or `Settled` when
    /// either opening hand is a blackjack.
    pub fn open(id: RoundId, mut shoe: Shoe) -> Result<Self, GameError> {
        shoe.build();
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        for _ in 0..2 {
            player.push(shoe.draw()?);
            dealer.push(shoe.draw()?);
        }
        let mut round = Self {
            id,
            shoe,
            player,
            dealer,
            state: RoundState::Dealing,
            outcome: None,
            actions: Vec::new(),
        };
        tracing::debug!(
            round_id = %id,
            player = round.player.score().total,
            "opening hands dealt"
        );

        match resolve_opening(&round.player.score(), &round.dealer.score()) {
            Some(outcome) => round.settle(outcome),
            None => round.state = RoundState::PlayerTurn,
        }
        Ok(round)
    }

    /// Returns the round that follows `action`.
    ///
    /// # Errors
    ///
    /// [`GameError::ShoeExhausted`] if a draw finds the shoe empty. `self` is
    /// left untouched so the caller still holds the last consistent round.
    pub fn apply(&self, action: Action) -> Result<Self, GameError> {
        let mut next = self.clone();
        match (self.state, action) {
            (RoundState::PlayerTurn, Action::Hit) => {
                let card = next.shoe.draw()?;
                next.player.push(card);
                next.actions.push(ActionRecord {
                    seat: Seat::Player,
                    action,
                    card: Some(card),
                });
                let score = next.player.score();
                tracing::debug!(round_id = %self.id, card = %card, total = score.total, "player hit");
                if score.is_bust {
                    next.settle(Outcome::PlayerBust);
                }
            }
            (RoundState::PlayerTurn, Action::Stand) => {
                next.actions.push(ActionRecord {
                    seat: Seat::Player,
                    action,
                    card: None,
                });
                next.state = RoundState::DealerTurn;
                next.finish_if_dealer_done();
            }
            (RoundState::DealerTurn, Action::DealerDraw) => {
                if dealer_should_draw(&next.dealer.score()) {
                    let card = next.shoe.draw()?;
                    next.dealer.push(card);
                    next.actions.push(ActionRecord {
                        seat: Seat::Dealer,
                        action,
                        card: Some(card),
                    });
                    tracing::debug!(
                        round_id = %self.id,
                        card = %card,
                        total = next.dealer.score().total,
                        "dealer drew"
                    );
                }
                next.finish_if_dealer_done();
            }
            (state, action) => {
                tracing::debug!(round_id = %self.id, ?state, ?action, "action ignored");
            }
        }
        Ok(next)
    }

    fn finish_if_dealer_done(&mut self) {
        let dealer = self.dealer.score();
        if !dealer_should_draw(&dealer) {
            let outcome = resolve(&self.player.score(), &dealer);
            self.settle(outcome);
        }
    }

    fn settle(&mut self, outcome: Outcome) {
        self.state = RoundState::Settled;
        self.outcome = Some(outcome);
        tracing::info!(
            round_id = %self.id,
            ?outcome,
            player = self.player.score().total,
            dealer = self.dealer.score().total,
            "round settled"
        );
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_score(&self) -> HandScore {
        self.player.score()
    }

    pub fn dealer_score(&self) -> HandScore {
        self.dealer.score()
    }

    /// The dealer's first card stays face down until the player's turn ends.
    pub fn dealer_concealed(&self) -> bool {
        matches!(self.state, RoundState::Dealing | RoundState::PlayerTurn)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn message(&self) -> Option<&'static str> {
        self.outcome.map(Outcome::message)
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    pub fn is_settled(&self) -> bool {
        self.state == RoundState::Settled
    }

    #[cfg(test)]
    pub(crate) fn drain_shoe(&mut self) {
        while self.shoe.draw().is_ok() {}
    }
}
