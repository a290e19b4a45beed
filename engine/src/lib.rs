//! Tombola draw engine.
//!
//! This crate contains the square-ring layout generator, the pure frame
//! sequencers (history replay and buffered spin) and the async [`Game`]
//! controller that drives a draw from backend call to result dialog.
//!
//! ## Timing requirements
//! - Sequencers are pure: they compute tile indices and hold durations but
//!   never sleep. Only the controller awaits.
//! - A frame's hold is fixed when the frame is emitted; pace bookkeeping for
//!   the next frame happens after.
//!
//! ## Minimal draw (example)
//! ```rust,ignore
//! # #[cfg(feature = "mocks")]
//! # {
//! use tombola_engine::{Game, mocks::{RecordingFrontend, ScriptedBackend}};
//! use tombola_types::{Prize, ReceiverPrefill, SpinConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let prizes: Vec<Prize> = (1..=8).map(|i| Prize::award(i, "prize")).collect();
//! let backend = ScriptedBackend::returning(prizes[5].clone());
//! let frontend = RecordingFrontend::new();
//! let game = Game::new(
//!     prizes,
//!     SpinConfig::default(),
//!     ReceiverPrefill::default(),
//!     backend,
//!     frontend.clone(),
//! )?;
//! let prize = game.draw().await?;
//! assert_eq!(frontend.lit_tiles().last(), Some(&5));
//! # Ok(())
//! # }
//! # }
//! ```

pub mod backend;
pub mod controller;
pub mod frontend;
pub mod layout;
pub mod pace;
pub mod replay;
pub mod spin;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use backend::DrawBackend;
pub use controller::{DrawPhase, Game};
pub use frontend::{DialogOutcome, Frontend};
pub use layout::{RingLayout, TilePos};
pub use pace::{Frame, StepPace, EASE_WINDOW};
pub use replay::ReplaySequencer;
pub use spin::SpinSequencer;
