//! # blackjack-ai: Automated Players
//!
//! Strategies that look at a [`RoundSnapshot`] and choose the next action
//! for the hand in play. Used by the CLI's automatic mode and simulator.
//!
//! ## Core Components
//!
//! - [`Strategy`] - Trait every automated player implements
//! - [`basic`] - Basic-strategy chart for a dealer standing on all 17s
//! - [`mimic`] - Plays like the dealer: hit below 17
//! - [`random`] - Seeded uniform choice among legal actions
//! - [`create_strategy`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_ai::create_strategy;
//! use blackjack_engine::engine::Engine;
//! use blackjack_engine::game::Phase;
//!
//! let mut strategy = create_strategy("basic", Some(1)).unwrap();
//! let mut engine = Engine::new(Some(42));
//! let mut snap = engine.start_round(2, 10).unwrap();
//! while snap.phase == Phase::Playing {
//!     let action = strategy.decide(&snap);
//!     snap = engine.apply(action).unwrap();
//! }
//! assert_eq!(snap.phase, Phase::Finished);
//! ```

use blackjack_engine::game::RoundSnapshot;
use blackjack_engine::player::PlayerAction;
use thiserror::Error;

pub mod basic;
pub mod mimic;
pub mod random;

/// Names accepted by [`create_strategy`].
pub const STRATEGY_NAMES: [&str; 3] = ["basic", "mimic", "random"];

/// An automated player.
///
/// # Example Implementation
///
/// ```rust
/// use blackjack_ai::Strategy;
/// use blackjack_engine::game::RoundSnapshot;
/// use blackjack_engine::player::PlayerAction;
///
/// struct AlwaysStand;
///
/// impl Strategy for AlwaysStand {
///     fn decide(&mut self, _snapshot: &RoundSnapshot) -> PlayerAction {
///         PlayerAction::Stand
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysStand"
///     }
/// }
/// ```
pub trait Strategy: Send {
    /// Picks an action for the hand at `snapshot.current_hand_index`.
    ///
    /// Implementations only return actions the snapshot's availability
    /// allows; with no hand awaiting action they return `Stand`.
    fn decide(&mut self, snapshot: &RoundSnapshot) -> PlayerAction;

    fn name(&self) -> &str;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown strategy: {0} (expected one of: basic, mimic, random)")]
pub struct UnknownStrategy(pub String);

/// Builds a strategy by name. `seed` only matters to `random`.
///
/// ```rust
/// use blackjack_ai::create_strategy;
///
/// assert_eq!(create_strategy("mimic", None).unwrap().name(), "Mimic");
/// assert!(create_strategy("card-counter", None).is_err());
/// ```
pub fn create_strategy(
    name: &str,
    seed: Option<u64>,
) -> Result<Box<dyn Strategy>, UnknownStrategy> {
    match name.trim().to_ascii_lowercase().as_str() {
        "basic" => Ok(Box::new(basic::BasicStrategy::new())),
        "mimic" => Ok(Box::new(mimic::MimicDealer)),
        "random" => Ok(Box::new(random::RandomStrategy::new(seed))),
        _ => Err(UnknownStrategy(name.to_string())),
    }
}

/// `preferred` when legal, otherwise the first legal entry of `fallbacks`,
/// otherwise `Stand`.
pub(crate) fn legal_or(
    snapshot: &RoundSnapshot,
    preferred: PlayerAction,
    fallbacks: &[PlayerAction],
) -> PlayerAction {
    let Some(avail) = snapshot.available.as_ref() else {
        return PlayerAction::Stand;
    };
    std::iter::once(preferred)
        .chain(fallbacks.iter().copied())
        .find(|a| avail.allows(*a))
        .unwrap_or(PlayerAction::Stand)
}
