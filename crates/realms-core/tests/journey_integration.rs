//! Integration tests for a full journey: poll the board, open cards,
//! celebrate, accept the proposal.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{FixedOffset, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use realms_core::{
    board, start_celebration, start_polling, BurstSpec, Effects, Event, JourneySession,
    ManualClock, PosterAssets, ProposalStage, Schedule, UnlockState,
};

#[derive(Default)]
struct Screen {
    bursts: Mutex<Vec<BurstSpec>>,
    resets: Mutex<u32>,
}

impl Effects for Screen {
    fn burst(&self, spec: &BurstSpec) {
        self.bursts.lock().unwrap().push(spec.clone());
    }

    fn reset(&self) {
        *self.resets.lock().unwrap() += 1;
        self.bursts.lock().unwrap().clear();
    }
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_board_refreshes_across_midnight() {
    let clock = ManualClock::new(ist().with_ymd_and_hms(2026, 2, 8, 23, 59, 58).unwrap());
    let latest: Arc<Mutex<UnlockState>> = Arc::default();
    let sink = Arc::clone(&latest);

    let handle = start_polling(
        Schedule::valentine_week(),
        Duration::from_secs(1),
        clock.clone(),
        move |state| *sink.lock().unwrap() = state,
    );

    let cards = board(&Schedule::valentine_week(), &latest.lock().unwrap());
    assert_eq!(cards.iter().filter(|c| c.is_unlocked()).count(), 2);
    assert_eq!(cards[2].label(), "0d 00h 00m 02s");

    clock.advance(chrono::Duration::seconds(2));
    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let cards = board(&Schedule::valentine_week(), &latest.lock().unwrap());
    assert_eq!(cards.iter().filter(|c| c.is_unlocked()).count(), 3);
    assert_eq!(cards[2].label(), "Chocolate Day");

    handle.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_finale_acceptance_flow() {
    let schedule = Schedule::valentine_week();
    let now = Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap();
    let state = realms_core::evaluate(&schedule, &now);
    assert!(state.all_unlocked());

    let screen = Arc::new(Screen::default());
    let mut session = JourneySession::new(schedule, PosterAssets::default());

    let opened = session.select(8, &state, now).unwrap();
    let mut celebration = start_celebration(
        opened.celebration().unwrap(),
        screen.clone(),
        StdRng::seed_from_u64(14),
    );
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(screen.bursts.lock().unwrap().len(), 4);

    let accepted = session.accept(now).unwrap();
    assert!(matches!(accepted, Event::ProposalAccepted { milestone_id: 8, .. }));
    celebration.cancel();
    celebration = start_celebration(
        accepted.celebration().unwrap(),
        screen.clone(),
        StdRng::seed_from_u64(15),
    );
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(screen.bursts.lock().unwrap().len() >= 3);

    assert!(session.tick(now + chrono::Duration::seconds(2)).is_none());
    assert!(session.tick(now + chrono::Duration::seconds(3)).is_some());
    assert_eq!(session.proposal(), Some(ProposalStage::LetterShown));

    let resets_before = *screen.resets.lock().unwrap();
    let closed = session.close(now + chrono::Duration::seconds(30)).unwrap();
    assert!(matches!(closed, Event::SessionClosed { .. }));
    celebration.cancel();
    assert_eq!(*screen.resets.lock().unwrap(), resets_before + 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(screen.bursts.lock().unwrap().is_empty());
}

#[test]
fn test_locked_card_reports_countdown() {
    let schedule = Schedule::valentine_week();
    let now = Utc.with_ymd_and_hms(2026, 2, 13, 18, 30, 0).unwrap();
    let state = realms_core::evaluate(&schedule, &now);
    let mut session = JourneySession::new(schedule, PosterAssets::default());

    match session.select(8, &state, now) {
        Some(Event::CardLocked {
            countdown: Some(c), ..
        }) => assert_eq!(c.to_string(), "0d 05h 30m 00s"),
        other => panic!("expected CardLocked, got {other:?}"),
    }
    assert!(session.reveal().is_none());
}
