//! Paced dealer play on a tokio runtime.
//!
//! The dealer draws one card per `delay` so observers can render each
//! intermediate hand. Every step re-checks its [`DealerTicket`] against the
//! live round under the table lock; once a new round has started the old
//! ticket comes back [`DealerStep::Stale`] and the task ends without touching
//! the table.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::engine::{DealerStep, DealerTicket, Table};
use crate::errors::GameError;

/// Pause between dealer draws in the original table presentation.
pub const DEFAULT_DEALER_DELAY: Duration = Duration::from_millis(1000);

pub type SharedTable = Arc<Mutex<Table>>;

#[derive(Debug, Clone)]
pub struct DealerPacer {
    table: SharedTable,
    delay: Duration,
}

impl DealerPacer {
    pub fn new(table: SharedTable, delay: Duration) -> Self {
        Self { table, delay }
    }

    pub fn table(&self) -> &SharedTable {
        &self.table
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Stands for the player and, if the dealer has to draw, starts the paced
    /// dealer task.
    pub fn stand(&self) -> Result<Option<JoinHandle<Result<DealerStep, GameError>>>, GameError> {
        let ticket = lock(&self.table).stand()?;
        Ok(ticket.map(|t| self.spawn(t)))
    }

    pub fn spawn(&self, ticket: DealerTicket) -> JoinHandle<Result<DealerStep, GameError>> {
        let pacer = self.clone();
        tokio::spawn(async move { pacer.run(ticket).await })
    }

    /// Steps the dealer until the round settles or the ticket goes stale.
    /// Returns the final step: `Settled` or `Stale`.
    pub async fn run(&self, ticket: DealerTicket) -> Result<DealerStep, GameError> {
        loop {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            // guard dropped before the next await
            let step = lock(&self.table).dealer_step(ticket)?;
            match step {
                DealerStep::Drew { .. } => {
                    if self.delay.is_zero() {
                        tokio::task::yield_now().await;
                    }
                }
                done => return Ok(done),
            }
        }
    }
}

fn lock(table: &SharedTable) -> MutexGuard<'_, Table> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RoundState;
    use crate::rules::Outcome;
    use crate::shoe::Shoe;

    fn shared(labels: &'static [&'static str]) -> SharedTable {
        Arc::new(Mutex::new(Table::with_shoes(move |id| {
            let top = labels.iter().map(|s| s.parse().unwrap()).collect();
            Shoe::stacked(id.0, top).unwrap()
        })))
    }

    #[tokio::test(start_paused = true)]
    async fn paced_dealer_draws_one_card_per_delay() {
        // player 10,8 = 18; dealer 2,3 then 4, 5, 10 -> 24 bust
        let table = shared(&["10S", "2H", "8S", "3H", "4C", "5C", "10D"]);
        lock(&table).new_round().unwrap();
        let pacer = DealerPacer::new(table.clone(), Duration::from_millis(1000));

        let start = tokio::time::Instant::now();
        let handle = pacer.stand().unwrap().expect("dealer must draw");
        let step = handle.await.unwrap().unwrap();

        assert_eq!(step, DealerStep::Settled(Outcome::DealerBust));
        assert!(start.elapsed() >= Duration::from_millis(3000));
        let t = lock(&table);
        assert_eq!(t.round().unwrap().dealer().len(), 5);
        assert_eq!(t.round().unwrap().state(), RoundState::Settled);
    }

    #[tokio::test]
    async fn zero_delay_still_completes() {
        let table = shared(&["10S", "6H", "7S", "KD", "5C"]);
        lock(&table).new_round().unwrap();
        let pacer = DealerPacer::new(table.clone(), Duration::ZERO);
        let step = pacer.stand().unwrap().unwrap().await.unwrap().unwrap();
        assert_eq!(step, DealerStep::Settled(Outcome::DealerWins));
    }

    #[tokio::test]
    async fn stand_without_dealer_draw_spawns_nothing() {
        // dealer 10,7 stands immediately
        let table = shared(&["10S", "10H", "8S", "7H"]);
        lock(&table).new_round().unwrap();
        let pacer = DealerPacer::new(table.clone(), DEFAULT_DEALER_DELAY);
        assert!(pacer.stand().unwrap().is_none());
        assert_eq!(
            lock(&table).round().unwrap().outcome(),
            Some(Outcome::PlayerWins)
        );
    }
}
