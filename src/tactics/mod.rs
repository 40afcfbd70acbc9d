//! Team tactics: the give-and-go detector and play calls.
//!
//! Both are small timed state machines driven entirely by the caller's
//! clock. The engine owns one of each per run.
//!
//! ```
//! use rogue_pitch::tactics::{PlayCallController, PlayCallKind};
//! use rogue_pitch::GameTime;
//!
//! let mut calls = PlayCallController::new();
//! assert!(calls.call_play(PlayCallKind::Press, GameTime(0), 8_000, 20_000).is_some());
//! assert!(calls.call_play(PlayCallKind::Hold, GameTime(1_000), 8_000, 20_000).is_none());
//! assert_eq!(calls.get_active(GameTime(1_000)), Some(PlayCallKind::Press));
//! ```

mod combo;
mod play_call;

pub use combo::{ComboArm, ComboDetector};
pub use play_call::{ActivePlayCall, PlayCallController, PlayCallKind};
