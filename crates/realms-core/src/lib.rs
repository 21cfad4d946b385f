//! # Seven Realms Core Library
//!
//! This library provides the logic behind the Seven Realms countdown: eight
//! reveal cards that unlock one per day at the observer's local midnight.
//! The CLI and any web front end are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Unlock Engine**: a pure function from `(schedule, now)` to the set of
//!   unlocked cards plus a countdown for each locked one, and a tokio driver
//!   that re-evaluates it on a fixed cadence
//! - **Viewer**: pan/zoom state for the poster viewer
//! - **Celebration**: particle-burst plans and a cancellable driver that fires
//!   them at an external effects sink
//! - **Journey**: card board projection and the reveal/proposal session
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`evaluate`]: the unlock engine
//! - [`start_polling`]: recurring re-evaluation with an explicit cancel handle
//! - [`ZoomView`]: poster pan/zoom state
//! - [`JourneySession`]: card selection and the finale sequence
//! - [`Config`]: Application configuration management

pub mod celebration;
pub mod error;
pub mod events;
pub mod journey;
pub mod milestone;
pub mod rotator;
pub mod storage;
pub mod unlock;
pub mod viewer;

pub use celebration::{start_celebration, BurstSpec, CelebrationHandle, CelebrationPlan, Effects, Trigger};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use journey::{board, CardView, Closing, JourneySession, ProposalStage, Reveal};
pub use milestone::{CalendarDate, Milestone, PosterAssets, Schedule};
pub use rotator::{Rotator, Typewriter};
pub use storage::Config;
pub use unlock::{
    evaluate, local_midnight, start_polling, Clock, Countdown, ManualClock, PollHandle,
    SystemClock, UnlockState,
};
pub use viewer::{Point, ZoomView};
