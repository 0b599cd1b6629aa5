// Progression query service: validate inputs, evaluate "now" in the
// requested zone and assemble the result

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};
use tracing::debug;

use crate::core::errors::ProgressionError;
use crate::core::models::{OutputFormat, ProgressionResult};
use crate::engine::calendar;
use crate::engine::clock::{Clock, SystemClock};

/// RFC 1123 layout, e.g. `Mon, 02 Jan 2006 15:04:05 MST`
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Resolve an IANA zone name against the bundled database
pub fn resolve_time_zone(name: &str) -> Result<Tz, ProgressionError> {
    name.parse::<Tz>()
        .map_err(|_| ProgressionError::InvalidTimeZone)
}

/// All zone names known to the bundled database, sorted
pub fn available_time_zones() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    names.sort_unstable();
    names
}

/// Evaluate a query against a given instant
///
/// The zone is resolved before the format is checked, so a request with
/// both invalid reports `InvalidTimeZone`. The zone identifier is echoed
/// back exactly as supplied.
pub fn query_at(
    format: &str,
    timezone: &str,
    instant: DateTime<Utc>,
) -> Result<ProgressionResult, ProgressionError> {
    let tz = resolve_time_zone(timezone)?;
    let format: OutputFormat = format.parse()?;

    let local = instant.with_timezone(&tz);
    let result = match format {
        OutputFormat::Seconds => calendar::elapsed_seconds(&local),
        OutputFormat::Percentage => calendar::percentages(&local),
    };

    Ok(ProgressionResult {
        timezone: timezone.to_string(),
        timestamp: local.format(TIMESTAMP_FORMAT).to_string(),
        result,
    })
}

/// Evaluate a query against the system clock
pub fn query(format: &str, timezone: &str) -> Result<ProgressionResult, ProgressionError> {
    query_at(format, timezone, Utc::now())
}

/// Query entry point used by the HTTP layer
///
/// Holds only the clock; every call reads it once and shares nothing with
/// other calls.
#[derive(Clone)]
pub struct ProgressionService {
    clock: Arc<dyn Clock>,
}

impl ProgressionService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn query(&self, format: &str, timezone: &str) -> Result<ProgressionResult, ProgressionError> {
        let now = self.clock.now();
        debug!(format = %format, timezone = %timezone, now = %now, "Evaluating progression query");
        query_at(format, timezone, now)
    }
}

impl Default for ProgressionService {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for ProgressionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionService").finish_non_exhaustive()
    }
}
