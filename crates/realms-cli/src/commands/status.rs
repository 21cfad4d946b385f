use clap::Args;
use realms_core::{board, CardView, Config};
use serde_json::json;

use super::Observer;

#[derive(Args)]
pub struct StatusArgs {
    /// Evaluate at this time instead of now
    #[arg(long)]
    at: Option<String>,
    /// Print the board as JSON
    #[arg(long)]
    json: bool,
}

pub fn print_board(cards: &[CardView]) {
    for card in cards {
        match card {
            CardView::Unlocked {
                id, icon, title, ..
            } => println!("{id:>2}  {icon}  {title}"),
            CardView::Locked { id, .. } => {
                println!("{id:>2}  🔒  Awaiting the Stars  {}", card.label())
            }
        }
    }
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = config.schedule();
    let observer = Observer::parse(args.at.as_deref())?;
    let state = observer.evaluate(&schedule);
    let cards = board(&schedule, &state);

    if args.json {
        let out = json!({
            "at": observer.utc(),
            "all_unlocked": state.all_unlocked(),
            "cards": cards,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("The Seven Realms, as of {}", observer.label());
        print_board(&cards);
        if let Some((id, countdown)) = state.next_locked() {
            println!("next: card {id} in {countdown}");
        }
    }
    Ok(())
}
