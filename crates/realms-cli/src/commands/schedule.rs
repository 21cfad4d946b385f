use clap::Subcommand;
use realms_core::{Config, ValidationError};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the active schedule
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the poster path for a milestone
    Poster {
        /// Milestone id
        id: u32,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let schedule = config.schedule();

    match action {
        ScheduleAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                for m in &schedule {
                    let marker = if m.is_finale() { "  (finale)" } else { "" };
                    println!("{:>2}  {}  {} {}{marker}", m.id, m.date, m.icon, m.title);
                }
            }
        }
        ScheduleAction::Poster { id } => {
            let milestone = schedule
                .get(id)
                .ok_or(ValidationError::UnknownMilestone(id))?;
            println!("{}", config.assets.poster_path(milestone));
        }
    }
    Ok(())
}
