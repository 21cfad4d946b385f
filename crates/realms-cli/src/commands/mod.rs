pub mod config;
pub mod reveal;
pub mod schedule;
pub mod status;
pub mod watch;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use realms_core::{evaluate, Schedule, UnlockState};

/// The instant, and the zone whose midnights count, a command evaluates from.
#[derive(Debug, Clone)]
pub enum Observer {
    Local(DateTime<Local>),
    Fixed(DateTime<FixedOffset>),
}

impl Observer {
    /// Parse an `--at` argument. An explicit offset pins the observer to that
    /// offset; a bare `YYYY-MM-DDTHH:MM:SS` is read as local wall-clock time.
    /// No argument means now.
    pub fn parse(at: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(raw) = at else {
            return Ok(Observer::Local(Local::now()));
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Observer::Fixed(dt));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map_err(|_| {
            format!("invalid time '{raw}': expected RFC3339 or YYYY-MM-DDTHH:MM:SS")
        })?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(Observer::Local)
            .ok_or_else(|| format!("'{raw}' does not exist in the local timezone").into())
    }

    pub fn evaluate(&self, schedule: &Schedule) -> UnlockState {
        match self {
            Observer::Local(now) => evaluate(schedule, now),
            Observer::Fixed(now) => evaluate(schedule, now),
        }
    }

    pub fn utc(&self) -> DateTime<Utc> {
        match self {
            Observer::Local(now) => now.with_timezone(&Utc),
            Observer::Fixed(now) => now.with_timezone(&Utc),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Observer::Local(now) => now.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
            Observer::Fixed(now) => now.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_offset_is_kept() {
        let obs = Observer::parse(Some("2026-02-10T12:00:00+05:30")).unwrap();
        assert!(matches!(obs, Observer::Fixed(_)));
        assert_eq!(obs.label(), "2026-02-10 12:00:00 +05:30");
        assert_eq!(obs.utc().to_rfc3339(), "2026-02-10T06:30:00+00:00");
    }

    #[test]
    fn bare_datetime_is_local() {
        let obs = Observer::parse(Some("2026-02-10T12:00:00")).unwrap();
        assert!(matches!(obs, Observer::Local(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Observer::parse(Some("tomorrow")).is_err());
    }
}
