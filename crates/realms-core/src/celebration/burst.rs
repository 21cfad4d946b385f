//! Celebration plans.
//!
//! A plan is plain data: which particle bursts to fire and when. Rendering
//! the particles belongs to whatever implements [`super::Effects`].

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const GOLD: &str = "#d4af37";
pub const CREAM: &str = "#f3e5ab";
pub const BLOOD: &str = "#8a1c1c";
pub const BRIGHT_GOLD: &str = "#ffd700";
pub const RED: &str = "#ff0000";
pub const ROSE: &str = "#e91e63";
pub const WHITE: &str = "#ffffff";

/// Viewport-relative burst origin. `y` may go slightly negative so particles
/// start above the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Circle,
    Heart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstSpec {
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_velocity: Option<f64>,
    /// Particle lifetime in animation frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<u32>,
    pub origin: Origin,
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
}

/// A one-shot burst fired `delay` after the celebration starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledBurst {
    #[serde(with = "millis")]
    pub delay: Duration,
    pub burst: BurstSpec,
}

/// Paired left/right bursts repeated every `period` until `duration` has
/// elapsed since the celebration started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSpec {
    #[serde(with = "millis")]
    pub duration: Duration,
    #[serde(with = "millis")]
    pub period: Duration,
    pub particle_count: u32,
    /// Scale the particle count down linearly with the remaining time.
    pub decay: bool,
    pub ticks: u32,
    pub left_x: (f64, f64),
    pub right_x: (f64, f64),
    pub colors: Vec<String>,
}

/// Uniform pick from an origin range. Reversed bounds are accepted; an empty
/// or non-finite range collapses to its finite end, or the screen centre.
fn pick_x<R: Rng>(rng: &mut R, (a, b): (f64, f64)) -> f64 {
    match (a.is_finite(), b.is_finite()) {
        (true, true) if a != b && (b - a).is_finite() => rng.gen_range(a.min(b)..=a.max(b)),
        (true, _) => a,
        (false, true) => b,
        (false, false) => 0.5,
    }
}

impl StreamSpec {
    /// Bursts for the tick at `elapsed`, or none once the stream has run out.
    pub fn bursts_at<R: Rng>(&self, elapsed: Duration, rng: &mut R) -> Vec<BurstSpec> {
        if elapsed >= self.duration {
            return Vec::new();
        }
        let particle_count = if self.decay {
            let remaining = (self.duration - elapsed).as_secs_f64();
            (self.particle_count as f64 * remaining / self.duration.as_secs_f64()) as u32
        } else {
            self.particle_count
        };

        [self.left_x, self.right_x]
            .into_iter()
            .map(|range| BurstSpec {
                particle_count,
                spread: 360.0,
                start_velocity: Some(30.0),
                ticks: Some(self.ticks),
                origin: Origin {
                    x: pick_x(rng, range),
                    y: rng.gen::<f64>() - 0.2,
                },
                colors: self.colors.clone(),
                shapes: Vec::new(),
            })
            .collect()
    }
}

/// What caused the celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    CardOpened { finale: bool },
    ProposalAccepted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelebrationPlan {
    pub trigger: Trigger,
    pub bursts: Vec<ScheduledBurst>,
    pub stream: Option<StreamSpec>,
}

fn colors(palette: &[&str]) -> Vec<String> {
    palette.iter().map(|c| c.to_string()).collect()
}

impl CelebrationPlan {
    pub fn for_trigger(trigger: Trigger) -> Self {
        match trigger {
            Trigger::CardOpened { finale: false } => Self {
                trigger,
                bursts: vec![ScheduledBurst {
                    delay: Duration::ZERO,
                    burst: BurstSpec {
                        particle_count: 150,
                        spread: 100.0,
                        start_velocity: None,
                        ticks: None,
                        origin: Origin { x: 0.5, y: 0.6 },
                        colors: colors(&[GOLD, CREAM, BLOOD]),
                        shapes: Vec::new(),
                    },
                }],
                stream: None,
            },
            Trigger::CardOpened { finale: true } => Self {
                trigger,
                bursts: Vec::new(),
                stream: Some(StreamSpec {
                    duration: Duration::from_secs(3),
                    period: Duration::from_millis(250),
                    particle_count: 50,
                    decay: true,
                    ticks: 60,
                    left_x: (0.1, 0.3),
                    right_x: (0.7, 0.9),
                    colors: colors(&[GOLD, BLOOD]),
                }),
            },
            Trigger::ProposalAccepted => {
                let heart = BurstSpec {
                    particle_count: 30,
                    spread: 70.0,
                    start_velocity: None,
                    ticks: None,
                    origin: Origin { x: 0.5, y: 0.6 },
                    colors: colors(&[RED, GOLD, ROSE]),
                    shapes: vec![Shape::Heart],
                };
                Self {
                    trigger,
                    bursts: [0, 300, 600]
                        .into_iter()
                        .map(|ms| ScheduledBurst {
                            delay: Duration::from_millis(ms),
                            burst: heart.clone(),
                        })
                        .collect(),
                    stream: Some(StreamSpec {
                        duration: Duration::from_secs(60 * 60),
                        period: Duration::from_millis(400),
                        particle_count: 40,
                        decay: false,
                        ticks: 100,
                        left_x: (0.1, 0.2),
                        right_x: (0.8, 0.9),
                        colors: colors(&[BRIGHT_GOLD, RED, WHITE]),
                    }),
                }
            }
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
