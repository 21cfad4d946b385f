mod engine;
mod poller;

pub use engine::{evaluate, local_midnight, Countdown, UnlockState};
pub use poller::{start_polling, Clock, ManualClock, PollHandle, SystemClock};
