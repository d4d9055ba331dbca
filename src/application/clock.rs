//! Wall clock in the configured time zone.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Produces "updated at" timestamps in a named IANA zone.
///
/// An unresolvable zone falls back to UTC; the warning is emitted once,
/// when the clock is resolved.
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    zone: Option<Tz>,
}

impl LocalClock {
    /// Resolve `name` (e.g. `Europe/Madrid`).
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(zone) => Self { zone: Some(zone) },
            Err(e) => {
                warn!(timezone = %name, error = %e, "Unknown time zone, falling back to UTC");
                Self::utc()
            }
        }
    }

    #[must_use]
    pub const fn utc() -> Self {
        Self { zone: None }
    }

    /// Current time in the resolved zone.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        let now = Utc::now();
        match self.zone {
            Some(zone) => now.with_timezone(&zone).fixed_offset(),
            None => now.fixed_offset(),
        }
    }

    /// Name of the zone in use.
    #[must_use]
    pub fn zone_name(&self) -> &'static str {
        self.zone.map_or("UTC", |zone| zone.name())
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.zone.is_none()
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_zone() {
        let clock = LocalClock::resolve("Europe/Madrid");
        assert!(!clock.is_fallback());
        assert_eq!(clock.zone_name(), "Europe/Madrid");

        let offset = clock.now().offset().local_minus_utc();
        assert!(offset == 3600 || offset == 7200);
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        let clock = LocalClock::resolve("Mars/Olympus_Mons");
        assert!(clock.is_fallback());
        assert_eq!(clock.zone_name(), "UTC");
        assert_eq!(clock.now().offset().local_minus_utc(), 0);
    }
}
