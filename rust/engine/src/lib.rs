//! # blackjack-engine: Blackjack Game Engine Core
//!
//! A deterministic single-player blackjack engine: one player against a dealer
//! who plays a fixed policy, dealt from a seeded 52-card shoe.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`shoe`] - Seeded shoe shuffling with ChaCha20 RNG
//! - [`hand`] - Hand scoring with soft/hard aces
//! - [`rules`] - Dealer policy and outcome resolution
//! - [`game`] - Round state machine (deal, player turn, dealer turn, settle)
//! - [`engine`] - Table facade: action entry points, dealer tickets, views
//! - [`pacer`] - Paced dealer play on tokio with stale-round protection
//! - [`logger`] - RoundRecord serialization and JSONL round log
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::engine::Table;
//! use blackjack_engine::game::RoundState;
//!
//! let mut table = Table::new(7);
//! table.new_round().unwrap();
//!
//! // hit until 17 or better, then stand
//! while let Some(view) = table.view() {
//!     if view.state != RoundState::PlayerTurn || view.player_score >= 17 {
//!         break;
//!     }
//!     table.hit().unwrap();
//! }
//! if let Some(ticket) = table.stand().unwrap() {
//!     table.play_dealer(ticket).unwrap();
//! }
//! let view = table.view().unwrap();
//! assert_eq!(view.state, RoundState::Settled);
//! println!("{}", view.message.unwrap());
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use blackjack_engine::shoe::Shoe;
//!
//! let mut a = Shoe::new_with_seed(42);
//! let mut b = Shoe::new_with_seed(42);
//! a.build();
//! b.build();
//! assert_eq!(a.undealt(), b.undealt());
//! ```

pub mod cards;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod pacer;
pub mod rules;
pub mod shoe;
