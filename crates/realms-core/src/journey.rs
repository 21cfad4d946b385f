//! Journey board and reveal session.
//!
//! The board is a pure projection of an [`UnlockState`] onto the schedule.
//! The session tracks which card is open and, on the finale card, the
//! proposal sequence:
//!
//! ```text
//! Asking -- accept --> Accepted -- letter delay elapsed --> LetterShown
//! ```
//!
//! Closing the card clears everything; the caller stops any celebration it
//! started for the session.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::milestone::{Milestone, PosterAssets, Schedule};
use crate::unlock::{Countdown, UnlockState};

pub const DEFAULT_LETTER_DELAY_MS: u64 = 3_000;

/// What one card on the board shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CardView {
    Unlocked {
        id: u32,
        title: String,
        icon: String,
        description: String,
        finale: bool,
    },
    Locked {
        id: u32,
        countdown: Option<Countdown>,
        /// Locale-default date, shown while no countdown is available.
        opens_on: String,
    },
}

impl CardView {
    pub fn id(&self) -> u32 {
        match self {
            CardView::Unlocked { id, .. } | CardView::Locked { id, .. } => *id,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, CardView::Unlocked { .. })
    }

    /// One-line text for the card body.
    pub fn label(&self) -> String {
        match self {
            CardView::Unlocked { title, .. } => title.clone(),
            CardView::Locked {
                countdown: Some(c), ..
            } => c.to_string(),
            CardView::Locked { opens_on, .. } => format!("Opens {opens_on}"),
        }
    }
}

fn short_date(m: &Milestone) -> String {
    m.date.naive().format("%-m/%-d/%Y").to_string()
}

/// Project `state` onto every milestone in display order.
pub fn board(schedule: &Schedule, state: &UnlockState) -> Vec<CardView> {
    schedule
        .iter()
        .map(|m| {
            if state.is_unlocked(m.id) {
                CardView::Unlocked {
                    id: m.id,
                    title: m.title.clone(),
                    icon: m.icon.clone(),
                    description: m.description.clone(),
                    finale: m.is_finale(),
                }
            } else {
                CardView::Locked {
                    id: m.id,
                    countdown: state.countdown(m.id).copied(),
                    opens_on: short_date(m),
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ProposalStage {
    Asking,
    Accepted { at: DateTime<Utc> },
    LetterShown,
}

/// How the reveal panel closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Closing {
    Signature(String),
    Proposal(ProposalStage),
}

/// Everything the reveal panel needs for the open card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub milestone_id: u32,
    /// e.g. "Saturday, February 7".
    pub date_label: String,
    pub title: String,
    pub quote: String,
    pub poster_path: String,
    pub download_name: String,
    pub closing: Closing,
}

#[derive(Debug, Clone)]
pub struct JourneySession {
    schedule: Schedule,
    assets: PosterAssets,
    signature: String,
    letter_delay: Duration,
    selected: Option<u32>,
    proposal: Option<ProposalStage>,
}

impl JourneySession {
    pub fn new(schedule: Schedule, assets: PosterAssets) -> Self {
        Self {
            schedule,
            assets,
            signature: "Yours Forever".into(),
            letter_delay: Duration::milliseconds(DEFAULT_LETTER_DELAY_MS as i64),
            selected: None,
            proposal: None,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn with_letter_delay_ms(mut self, ms: u64) -> Self {
        self.letter_delay = Duration::milliseconds(ms.min(i64::MAX as u64) as i64);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn selected(&self) -> Option<&Milestone> {
        self.selected.and_then(|id| self.schedule.get(id))
    }

    pub fn proposal(&self) -> Option<ProposalStage> {
        self.proposal
    }

    pub fn letter_visible(&self) -> bool {
        self.proposal == Some(ProposalStage::LetterShown)
    }

    pub fn reveal(&self) -> Option<Reveal> {
        let m = self.selected()?;
        let closing = match self.proposal {
            Some(stage) => Closing::Proposal(stage),
            None => Closing::Signature(self.signature.clone()),
        };
        Some(Reveal {
            milestone_id: m.id,
            date_label: m.date.naive().format("%A, %B %-d").to_string(),
            title: m.title.clone(),
            quote: m.quote.clone(),
            poster_path: self.assets.poster_path(m),
            download_name: self.assets.download_name(m),
            closing,
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open card `id` if `state` has it unlocked.
    ///
    /// Unknown ids yield nothing. Locked ids yield `CardLocked` and leave the
    /// current selection alone.
    pub fn select(&mut self, id: u32, state: &UnlockState, at: DateTime<Utc>) -> Option<Event> {
        let milestone = self.schedule.get(id)?;
        if !state.is_unlocked(id) {
            return Some(Event::CardLocked {
                milestone_id: id,
                countdown: state.countdown(id).copied(),
                at,
            });
        }
        let finale = milestone.is_finale();
        self.selected = Some(id);
        self.proposal = finale.then_some(ProposalStage::Asking);
        Some(Event::CardOpened {
            milestone_id: id,
            finale,
            at,
        })
    }

    /// Say yes. Only valid once, while the finale card is asking.
    pub fn accept(&mut self, at: DateTime<Utc>) -> Option<Event> {
        let milestone_id = self.selected?;
        match self.proposal {
            Some(ProposalStage::Asking) => {
                self.proposal = Some(ProposalStage::Accepted { at });
                Some(Event::ProposalAccepted { milestone_id, at })
            }
            _ => None,
        }
    }

    /// Call periodically. Returns `FinalLetterShown` once the letter delay has
    /// passed since acceptance.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.proposal {
            Some(ProposalStage::Accepted { at }) if now - at >= self.letter_delay => {
                self.proposal = Some(ProposalStage::LetterShown);
                Some(Event::FinalLetterShown { at: now })
            }
            _ => None,
        }
    }

    pub fn close(&mut self, at: DateTime<Utc>) -> Option<Event> {
        let milestone_id = self.selected.take()?;
        self.proposal = None;
        Some(Event::SessionClosed { milestone_id, at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unlock::evaluate;
    use chrono::TimeZone;

    fn session() -> JourneySession {
        JourneySession::new(Schedule::valentine_week(), PosterAssets::default())
    }

    fn state_at(day: u32, hour: u32) -> UnlockState {
        let now = Utc.with_ymd_and_hms(2026, 2, day, hour, 0, 0).unwrap();
        evaluate(&Schedule::valentine_week(), &now)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn board_mixes_unlocked_and_locked_cards() {
        let cards = board(&Schedule::valentine_week(), &state_at(9, 6));
        assert_eq!(cards.len(), 8);
        assert_eq!(cards.iter().filter(|c| c.is_unlocked()).count(), 3);
        assert_eq!(cards[0].label(), "Rose Day");
        assert_eq!(cards[3].label(), "0d 18h 00m 00s");
    }

    #[test]
    fn locked_card_without_countdown_shows_open_date() {
        let cards = board(&Schedule::valentine_week(), &UnlockState::default());
        assert_eq!(cards[0].label(), "Opens 2/7/2026");
        assert_eq!(cards[7].label(), "Opens 2/14/2026");
    }

    #[test]
    fn locked_card_cannot_be_opened() {
        let mut s = session();
        let event = s.select(5, &state_at(9, 6), t0()).unwrap();
        assert!(matches!(event, Event::CardLocked { milestone_id: 5, countdown: Some(_), .. }));
        assert!(s.selected().is_none());
        assert!(s.select(99, &state_at(9, 6), t0()).is_none());
    }

    #[test]
    fn ordinary_card_reveals_with_signature() {
        let mut s = session();
        let event = s.select(1, &state_at(9, 6), t0()).unwrap();
        assert!(event.celebration().is_some());

        let reveal = s.reveal().unwrap();
        assert_eq!(reveal.date_label, "Saturday, February 7");
        assert_eq!(reveal.poster_path, "/posters/07.jpg");
        assert_eq!(reveal.download_name, "Rose Day-Poster.jpg");
        assert_eq!(reveal.closing, Closing::Signature("Yours Forever".into()));
        assert!(s.accept(t0()).is_none());
    }

    #[test]
    fn proposal_sequence_ends_with_letter() {
        let mut s = session().with_letter_delay_ms(3_000);
        let event = s.select(8, &state_at(14, 1), t0()).unwrap();
        assert!(matches!(event, Event::CardOpened { finale: true, .. }));
        assert_eq!(s.proposal(), Some(ProposalStage::Asking));

        assert!(s.tick(t0() + Duration::seconds(10)).is_none());
        assert!(matches!(s.accept(t0()), Some(Event::ProposalAccepted { milestone_id: 8, .. })));
        assert!(s.accept(t0()).is_none());

        assert!(s.tick(t0() + Duration::milliseconds(2_999)).is_none());
        assert!(!s.letter_visible());
        assert!(matches!(
            s.tick(t0() + Duration::milliseconds(3_000)),
            Some(Event::FinalLetterShown { .. })
        ));
        assert!(s.letter_visible());
        assert!(s.tick(t0() + Duration::seconds(60)).is_none());
    }

    #[test]
    fn close_resets_proposal() {
        let mut s = session();
        s.select(8, &state_at(14, 1), t0());
        s.accept(t0());
        assert!(matches!(s.close(t0()), Some(Event::SessionClosed { milestone_id: 8, .. })));
        assert!(s.selected().is_none());
        assert!(s.proposal().is_none());
        assert!(s.close(t0()).is_none());

        s.select(8, &state_at(14, 1), t0());
        assert_eq!(s.proposal(), Some(ProposalStage::Asking));
    }
}
