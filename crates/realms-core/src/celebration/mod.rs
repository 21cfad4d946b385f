mod burst;
mod driver;

pub use burst::{
    BurstSpec, CelebrationPlan, Origin, ScheduledBurst, Shape, StreamSpec, Trigger, BLOOD,
    BRIGHT_GOLD, CREAM, GOLD, RED, ROSE, WHITE,
};
pub use driver::{start_celebration, CelebrationHandle, Effects};
