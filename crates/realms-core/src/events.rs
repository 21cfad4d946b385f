use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::celebration::{CelebrationPlan, Trigger};
use crate::unlock::{Countdown, UnlockState};

/// Every state change of a journey produces an Event.
/// The presentation layer renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    BoardSnapshot {
        state: UnlockState,
        at: DateTime<Utc>,
    },
    /// An unlocked card was opened.
    CardOpened {
        milestone_id: u32,
        finale: bool,
        at: DateTime<Utc>,
    },
    /// A locked card was clicked; nothing opens.
    CardLocked {
        milestone_id: u32,
        countdown: Option<Countdown>,
        at: DateTime<Utc>,
    },
    ProposalAccepted {
        milestone_id: u32,
        at: DateTime<Utc>,
    },
    FinalLetterShown {
        at: DateTime<Utc>,
    },
    /// The open card was dismissed. Any running celebration must stop.
    SessionClosed {
        milestone_id: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The celebration this event should set off, if any.
    pub fn celebration(&self) -> Option<CelebrationPlan> {
        match self {
            Event::CardOpened { finale, .. } => Some(CelebrationPlan::for_trigger(
                Trigger::CardOpened { finale: *finale },
            )),
            Event::ProposalAccepted { .. } => {
                Some(CelebrationPlan::for_trigger(Trigger::ProposalAccepted))
            }
            _ => None,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::BoardSnapshot { at, .. }
            | Event::CardOpened { at, .. }
            | Event::CardLocked { at, .. }
            | Event::ProposalAccepted { at, .. }
            | Event::FinalLetterShown { at }
            | Event::SessionClosed { at, .. } => *at,
        }
    }
}
