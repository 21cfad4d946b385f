use clap::Args;
use realms_core::{
    CelebrationPlan, Closing, Config, Event, JourneySession, ProposalStage, Reveal,
    ValidationError,
};
use serde_json::json;

use super::Observer;

#[derive(Args)]
pub struct RevealArgs {
    /// Milestone id
    id: u32,
    /// Evaluate at this time instead of now
    #[arg(long)]
    at: Option<String>,
    /// Answer the finale card's question
    #[arg(long)]
    accept: bool,
    /// Print the reveal and celebration plans as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RevealArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let observer = Observer::parse(args.at.as_deref())?;
    let schedule = config.schedule();
    let state = observer.evaluate(&schedule);
    let at = observer.utc();

    let mut session = JourneySession::new(schedule, config.assets.clone())
        .with_signature(config.journey.signature.clone())
        .with_letter_delay_ms(config.journey.letter_delay_ms);

    let mut events = Vec::new();
    match session.select(args.id, &state, at) {
        None => return Err(ValidationError::UnknownMilestone(args.id).into()),
        Some(Event::CardLocked { countdown, .. }) => {
            let when = countdown
                .map(|c| format!("opens in {c}"))
                .unwrap_or_else(|| "not open yet".into());
            return Err(format!("card {} is still locked ({when})", args.id).into());
        }
        Some(event) => events.push(event),
    }

    if args.accept {
        let accepted = session
            .accept(at)
            .ok_or_else(|| format!("card {} has no question to answer", args.id))?;
        events.push(accepted);
    }

    let reveal = session.reveal().ok_or("no card is open")?;
    let celebrations: Vec<CelebrationPlan> = if config.celebration.enabled {
        events.iter().filter_map(Event::celebration).collect()
    } else {
        Vec::new()
    };

    if args.json {
        let out = json!({
            "reveal": reveal,
            "events": events,
            "celebrations": celebrations,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_reveal(&reveal, config.journey.letter_delay_ms);
        for plan in &celebrations {
            print_plan(plan);
        }
    }
    Ok(())
}

fn print_reveal(reveal: &Reveal, letter_delay_ms: u64) {
    println!("{}", reveal.date_label);
    println!("{}", reveal.title);
    println!();
    println!("\"{}\"", reveal.quote);
    println!();
    println!(
        "poster: {} (save as {})",
        reveal.poster_path, reveal.download_name
    );
    match &reveal.closing {
        Closing::Signature(signature) => println!("{signature}"),
        Closing::Proposal(ProposalStage::Asking) => {
            println!("Will you be my Valentine? (answer with --accept)")
        }
        Closing::Proposal(ProposalStage::Accepted { .. }) => {
            println!("Yes! A letter follows in {}s.", letter_delay_ms / 1_000)
        }
        Closing::Proposal(ProposalStage::LetterShown) => println!("The letter is open."),
    }
}

fn print_plan(plan: &CelebrationPlan) {
    match &plan.stream {
        Some(stream) => println!(
            "celebration: {} burst(s), then a stream every {}ms for {}s",
            plan.bursts.len(),
            stream.period.as_millis(),
            stream.duration.as_secs()
        ),
        None => println!("celebration: {} burst(s)", plan.bursts.len()),
    }
}
