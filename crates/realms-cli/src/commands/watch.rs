use std::time::Duration;

use chrono::{Local, Utc};
use clap::Args;
use realms_core::{board, start_polling, Config, Event, Schedule, SystemClock, UnlockState};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::status::print_board;

#[derive(Args)]
pub struct WatchArgs {
    /// Refresh period in milliseconds (defaults to poll.interval_ms)
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Stop after this many refreshes
    #[arg(long)]
    ticks: Option<u64>,
    /// Print one BoardSnapshot event per line instead of the board
    #[arg(long)]
    json: bool,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let interval = args
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.poll_interval());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(config.schedule(), interval, args.ticks, args.json))
}

async fn watch(
    schedule: Schedule,
    interval: Duration,
    ticks: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = start_polling(
        schedule.clone(),
        interval,
        SystemClock,
        move |state: UnlockState| {
            let _ = tx.send(Event::BoardSnapshot {
                state,
                at: Utc::now(),
            });
        },
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut seen = 0u64;
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                seen += 1;
                render(&schedule, &event, json)?;
                if ticks.is_some_and(|n| seen >= n) {
                    debug!(seen, "tick limit reached");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }
    }
    handle.cancel();
    Ok(())
}

fn render(schedule: &Schedule, event: &Event, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else if let Event::BoardSnapshot { state, .. } = event {
        let at = event.at().with_timezone(&Local);
        println!("-- {}", at.format("%Y-%m-%d %H:%M:%S"));
        print_board(&board(schedule, state));
    }
    Ok(())
}
