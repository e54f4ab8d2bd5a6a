//! # blackjack-engine: Multi-hand Blackjack Rules Engine
//!
//! A deterministic blackjack table for one player playing up to four hands
//! against an automated dealer. Covers the shoe, hand scoring with soft aces,
//! the round state machine, settlement and the session ledger, with seeded
//! RNG so a whole session can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Four-deck shoe with Fisher–Yates shuffling on ChaCha20
//! - [`hand`] - Hand value, soft aces, naturals and pairs
//! - [`player`] - Player actions, hand status lifecycle and `PlayerHand`
//! - [`rules`] - Table limits, stake and action validation
//! - [`game`] - Round state and the snapshots front ends render
//! - [`engine`] - Round orchestration: deal, actions, dealer play
//! - [`settlement`] - Outcomes and payouts
//! - [`session`] - Bankroll and running statistics
//! - [`logger`] - Round records and JSONL history writer
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::{hand_value, is_blackjack};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::King, Suit::Hearts),
//! ];
//! assert_eq!(hand_value(&cards), 21);
//! assert!(is_blackjack(&cards));
//! ```
//!
//! ## Deterministic Play
//!
//! ```rust
//! use blackjack_engine::engine::Engine;
//!
//! let mut a = Engine::new(Some(42));
//! let mut b = Engine::new(Some(42));
//! assert_eq!(a.start_round(3, 10).unwrap(), b.start_round(3, 10).unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod session;
pub mod settlement;
