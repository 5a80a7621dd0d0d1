use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{Action, Round, RoundId, RoundState};
use crate::rules::Outcome;
use crate::shoe::Shoe;

/// Permission for one paced dealer step, bound to the round that issued it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DealerTicket {
    pub round: RoundId,
}

/// Result of a single [`Table::dealer_step`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DealerStep {
    /// Dealer drew and is still below 17; schedule `next`
    Drew { next: DealerTicket },
    Settled(Outcome),
    /// The ticket belongs to a superseded or already finished round
    Stale,
}

/// Read-only snapshot handed to presentation layers.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub round_id: RoundId,
    pub state: RoundState,
    pub player_cards: Vec<Card>,
    /// Face-down cards are `None`
    pub dealer_cards: Vec<Option<Card>>,
    pub dealer_concealed: bool,
    pub player_score: u8,
    /// `None` while the hole card is concealed
    pub dealer_score: Option<u8>,
    pub outcome: Option<Outcome>,
    pub message: Option<String>,
    /// Set once the round halted on a fatal error
    pub fault: Option<String>,
}

type ShoeSource = Box<dyn FnMut(RoundId) -> Shoe + Send>;

/// Single-player blackjack table: the live round plus the action entry points.
///
/// Every mutation goes through `&mut self`, so the table serializes actions by
/// construction. The dealer's turn is driven in steps through
/// [`DealerTicket`]s; a ticket issued for an earlier round is refused, which
/// keeps a late paced draw from landing in a newer round.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::Table;
/// use blackjack_engine::game::RoundState;
///
/// let mut table = Table::new(42);
/// table.new_round().unwrap();
/// if table.view().unwrap().state == RoundState::PlayerTurn {
///     if let Some(ticket) = table.stand().unwrap() {
///         table.play_dealer(ticket).unwrap();
///     }
/// }
/// assert_eq!(table.view().unwrap().state, RoundState::Settled);
/// ```
pub struct Table {
    seed: Option<u64>,
    shoes: ShoeSource,
    last_id: u64,
    round: Option<Round>,
    fault: Option<GameError>,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("seed", &self.seed)
            .field("last_id", &self.last_id)
            .field("round", &self.round)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Round `n` is shuffled from `seed + n`, so any round can be replayed on
    /// its own.
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            shoes: Box::new(move |id| Shoe::new_with_seed(seed.wrapping_add(id.0))),
            last_id: 0,
            round: None,
            fault: None,
        }
    }

    /// A table that asks `shoes` for each round's shoe.
    pub fn with_shoes<F>(shoes: F) -> Self
    where
        F: FnMut(RoundId) -> Shoe + Send + 'static,
    {
        Self {
            seed: None,
            shoes: Box::new(shoes),
            last_id: 0,
            round: None,
            fault: None,
        }
    }

    /// Seed of the shoe used for round `id`, when the table is seed-driven.
    pub fn round_seed(&self, id: RoundId) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(id.0))
    }

    /// Discards the current round and deals a new one.
    pub fn new_round(&mut self) -> Result<RoundId, GameError> {
        self.last_id += 1;
        let id = RoundId(self.last_id);
        self.fault = None;
        self.round = None;
        let shoe = (self.shoes)(id);
        match Round::open(id, shoe) {
            Ok(round) => {
                self.round = Some(round);
                Ok(id)
            }
            Err(e) => Err(self.halt(id, e)),
        }
    }

    pub fn hit(&mut self) -> Result<(), GameError> {
        self.apply(Action::Hit).map(|_| ())
    }

    /// Ends the player's turn. Returns the ticket for the first dealer step
    /// when the dealer still has to draw, `None` when the round is already
    /// settled or the action did not apply.
    pub fn stand(&mut self) -> Result<Option<DealerTicket>, GameError> {
        let in_player_turn = self
            .round
            .as_ref()
            .is_some_and(|r| r.state() == RoundState::PlayerTurn);
        if !in_player_turn {
            return Ok(None);
        }
        let Some(round) = self.apply(Action::Stand)? else {
            return Ok(None);
        };
        Ok((round.state() == RoundState::DealerTurn).then_some(DealerTicket { round: round.id() }))
    }

    /// Performs one dealer draw if `ticket` still matches the live round.
    pub fn dealer_step(&mut self, ticket: DealerTicket) -> Result<DealerStep, GameError> {
        let live = self
            .round
            .as_ref()
            .filter(|r| r.id() == ticket.round && r.state() == RoundState::DealerTurn);
        if live.is_none() || self.fault.is_some() {
            tracing::debug!(ticket_round = %ticket.round, "stale dealer ticket dropped");
            return Ok(DealerStep::Stale);
        }
        let Some(round) = self.apply(Action::DealerDraw)? else {
            return Ok(DealerStep::Stale);
        };
        Ok(match round.outcome() {
            Some(outcome) => DealerStep::Settled(outcome),
            None => DealerStep::Drew { next: ticket },
        })
    }

    /// Runs the dealer's turn to completion without pacing.
    pub fn play_dealer(&mut self, ticket: DealerTicket) -> Result<Option<Outcome>, GameError> {
        loop {
            match self.dealer_step(ticket)? {
                DealerStep::Drew { .. } => continue,
                DealerStep::Settled(outcome) => return Ok(Some(outcome)),
                DealerStep::Stale => return Ok(None),
            }
        }
    }

    fn apply(&mut self, action: Action) -> Result<Option<&Round>, GameError> {
        if let Some(e) = &self.fault {
            tracing::debug!(?action, error = %e, "action ignored on halted round");
            return Ok(None);
        }
        let Some(current) = self.round.as_ref() else {
            return Ok(None);
        };
        match current.apply(action) {
            Ok(next) => {
                self.round = Some(next);
                Ok(self.round.as_ref())
            }
            Err(e) => {
                let id = current.id();
                Err(self.halt(id, e))
            }
        }
    }

    fn halt(&mut self, id: RoundId, e: GameError) -> GameError {
        tracing::error!(round_id = %id, error = %e, "round halted");
        self.fault = Some(e.clone());
        e
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn fault(&self) -> Option<&GameError> {
        self.fault.as_ref()
    }

    pub fn view(&self) -> Option<RoundView> {
        let round = self.round.as_ref()?;
        let concealed = round.dealer_concealed();
        let dealer_cards = round
            .dealer()
            .cards()
            .iter()
            .enumerate()
            .map(|(i, c)| if concealed && i == 0 { None } else { Some(*c) })
            .collect();
        Some(RoundView {
            round_id: round.id(),
            state: round.state(),
            player_cards: round.player().cards().to_vec(),
            dealer_cards,
            dealer_concealed: concealed,
            player_score: round.player_score().total,
            dealer_score: (!concealed).then(|| round.dealer_score().total),
            outcome: round.outcome(),
            message: round.message().map(str::to_string),
            fault: self.fault.as_ref().map(|e| e.to_string()),
        })
    }
}
