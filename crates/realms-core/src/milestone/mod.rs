mod assets;
mod schedule;

pub use assets::PosterAssets;
pub use schedule::{CalendarDate, Milestone, Schedule};
