//! Push-channel payloads.
//!
//! Each tick produces a `crowdUpdate` event carrying every zone; ticks that
//! end with a zone at or over its limit also produce an `alert` event listing
//! those zones.  Events are framed as one JSON object per line:
//!
//! ```text
//! {"event":"crowdUpdate","data":{"zones":[{"id":"entry","name":"Entry","current":30,"capacity":150},…]}}
//! {"event":"alert","data":{"type":"overcrowd","severity":"high","payload":{"zones":[…]}}}
//! ```

use std::io::Write;

use serde::Serialize;

use cm_core::{SafeLimits, Tick, ZoneCounts, ZoneId};
use cm_sim::{SimObserver, TickReport};

use crate::{OutputError, OutputResult};

/// One zone in a `crowdUpdate` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneStatus {
    pub id:       &'static str,
    pub name:     &'static str,
    pub current:  u32,
    pub capacity: u32,
}

/// `{ zones: [{id, name, current, capacity}, …] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneBroadcast {
    pub zones: Vec<ZoneStatus>,
}

impl ZoneBroadcast {
    pub fn from_counts(zones: &ZoneCounts, limits: &SafeLimits) -> Self {
        Self {
            zones: zones
                .zones(limits)
                .into_iter()
                .map(|z| ZoneStatus {
                    id:       z.id.as_str(),
                    name:     z.name,
                    current:  z.count,
                    capacity: z.capacity,
                })
                .collect(),
        }
    }
}

/// One zone in an `alert` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverLimitZone {
    pub zone:     &'static str,
    pub name:     &'static str,
    pub current:  u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub zones: Vec<OverLimitZone>,
}

/// `{ type: "overcrowd", severity: "high", payload: { zones: […] } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertBroadcast {
    #[serde(rename = "type")]
    pub kind:     &'static str,
    pub severity: &'static str,
    pub payload:  AlertPayload,
}

impl AlertBroadcast {
    /// `None` when no zone in `over_limit` is given.
    pub fn for_zones(over_limit: &[ZoneId], zones: &ZoneCounts, limits: &SafeLimits) -> Option<Self> {
        if over_limit.is_empty() {
            return None;
        }
        Some(Self {
            kind:     "overcrowd",
            severity: "high",
            payload:  AlertPayload {
                zones: over_limit
                    .iter()
                    .map(|&id| OverLimitZone {
                        zone:     id.as_str(),
                        name:     id.display_name(),
                        current:  zones[id],
                        capacity: limits.limit(id),
                    })
                    .collect(),
            },
        })
    }
}

/// Event envelope: `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PushEvent {
    CrowdUpdate(ZoneBroadcast),
    Alert(AlertBroadcast),
}

impl PushEvent {
    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A [`SimObserver`] that writes push events as JSON lines to `out`.
pub struct BroadcastObserver<W: Write> {
    out:        W,
    limits:     SafeLimits,
    events:     u64,
    last_error: Option<OutputError>,
}

impl<W: Write> BroadcastObserver<W> {
    pub fn new(out: W, limits: SafeLimits) -> Self {
        Self { out, limits, events: 0, last_error: None }
    }

    /// Events successfully written.
    pub fn events_written(&self) -> u64 {
        self.events
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Serialise and write one event line.
    pub fn publish(&mut self, event: &PushEvent) -> OutputResult<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.events += 1;
        Ok(())
    }

    fn publish_report(&mut self, report: &TickReport) -> OutputResult<()> {
        let update = ZoneBroadcast::from_counts(&report.zones, &self.limits);
        self.publish(&PushEvent::CrowdUpdate(update))?;
        if let Some(alert) = AlertBroadcast::for_zones(&report.over_limit, &report.zones, &self.limits) {
            self.publish(&PushEvent::Alert(alert))?;
        }
        Ok(())
    }
}

impl<W: Write> SimObserver for BroadcastObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        if let Err(e) = self.publish_report(report) {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        if let Err(e) = self.out.flush() {
            if self.last_error.is_none() {
                self.last_error = Some(e.into());
            }
        }
    }
}
