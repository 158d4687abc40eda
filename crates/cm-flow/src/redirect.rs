//! One-shot manual transfer of people between zones.
//!
//! Redirect is an operator override: the destination is deliberately not
//! capacity-checked and may end up over its limit.

use cm_core::{ZoneCounts, ZoneId};

/// Maximum number of people moved by a single redirect.
pub const REDIRECT_BATCH: u32 = 20;

/// Zone the dashboard redirects people out of.
pub const REDIRECT_SOURCE: ZoneId = ZoneId::MainHall;

/// How many people a redirect from `source` to `dest` would move.
#[inline]
pub fn redirect_shift(zones: &ZoneCounts, source: ZoneId, dest: ZoneId) -> u32 {
    if source == dest {
        return 0;
    }
    REDIRECT_BATCH.min(zones[source])
}

/// Move up to [`REDIRECT_BATCH`] people from `source` to `dest`.
///
/// Returns `zones` unchanged when `source == dest`.
pub fn redirect(zones: &ZoneCounts, source: ZoneId, dest: ZoneId) -> ZoneCounts {
    let shift = redirect_shift(zones, source, dest);
    let mut next = *zones;
    next[source] -= shift;
    next[dest] = next[dest].saturating_add(shift);
    next
}
