//! Gift box prize lottery
//!
//! A fixed set of boxes is dealt a shuffled prize pool every round. Opening
//! one box reveals its prize, locks every other box, and fires a confetti
//! burst unless the prize is the consolation one. A reset deals a new round.
//!
//! The controller only holds state. Front-ends draw it, feed activations in,
//! supply box geometry through [`BoxLayout`], render bursts through
//! [`ParticleEffect`], and run the delayed panel step with [`RevealTimer`].

pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod pool;
pub mod prize;
pub mod timer;

pub use config::LotteryConfig;
pub use controller::{BoxState, LotteryController, PanelState, Reveal, RoundSummary};
pub use effect::{
    confetti_origin, parse_hex_color, BoxLayout, ConfettiConfig, ConfettiSettings, Origin,
    ParticleEffect, Rect, Viewport,
};
pub use error::{GiftboxError, Result};
pub use pool::{shuffle, DistributionReport, PrizePool};
pub use prize::{default_prizes, Prize, PrizeCategory};
pub use timer::{shared, RevealTimer, SharedController};

