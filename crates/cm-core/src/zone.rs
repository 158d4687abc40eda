//! The four modelled zones, their occupancy counts, and the fixed flow graph.
//!
//! # Topology
//!
//! ```text
//! Entry ──► Main Hall ──► Exit ──► Parking
//! ```
//!
//! The graph never changes at runtime.  Entry and Exit counts are
//! *instantaneous flow gauges* (people passing the checkpoint this tick);
//! Main Hall and Parking counts are *accumulators*.  Every consumer of
//! [`ZoneCounts`] must keep that distinction in mind: a high Entry count means
//! a heavy inflow, not a crowded room.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::CoreError;

/// Hard occupancy ceiling of the Main Hall.  Applied as a clamp every tick.
pub const MAIN_HALL_CAPACITY: u32 = 300;

/// Safe limit shared by every zone except the Main Hall.  Used only for
/// alerting; these zones are never clamped.
pub const DEFAULT_SAFE_LIMIT: u32 = 150;

// ── ZoneId ────────────────────────────────────────────────────────────────────

/// Stable identifier of one of the four zones.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ZoneId {
    Entry,
    MainHall,
    Exit,
    Parking,
}

impl ZoneId {
    pub const COUNT: usize = 4;

    /// All zones in topological (display) order.
    pub const ALL: [ZoneId; Self::COUNT] =
        [ZoneId::Entry, ZoneId::MainHall, ZoneId::Exit, ZoneId::Parking];

    /// Position in [`ZoneId::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ZoneId::Entry    => 0,
            ZoneId::MainHall => 1,
            ZoneId::Exit     => 2,
            ZoneId::Parking  => 3,
        }
    }

    /// Wire identifier, as used in CSV headers and push payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneId::Entry    => "entry",
            ZoneId::MainHall => "mainHall",
            ZoneId::Exit     => "exit",
            ZoneId::Parking  => "parking",
        }
    }

    /// Human-readable label.  Not semantically load-bearing.
    pub fn display_name(self) -> &'static str {
        match self {
            ZoneId::Entry    => "Entry",
            ZoneId::MainHall => "Main Hall",
            ZoneId::Exit     => "Exit",
            ZoneId::Parking  => "Parking",
        }
    }

    /// Whether this zone has an operator-controlled gate.  The Main Hall has
    /// none.
    #[inline]
    pub fn has_gate(self) -> bool {
        !matches!(self, ZoneId::MainHall)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneId::ALL
            .into_iter()
            .find(|z| z.as_str() == s)
            .ok_or_else(|| CoreError::UnknownZone(s.to_owned()))
    }
}

// ── ZoneCounts ────────────────────────────────────────────────────────────────

/// Occupancy count per zone.  Counts are unsigned, so `count >= 0` holds by
/// construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneCounts {
    pub entry:     u32,
    pub main_hall: u32,
    pub exit:      u32,
    pub parking:   u32,
}

impl ZoneCounts {
    pub fn new(entry: u32, main_hall: u32, exit: u32, parking: u32) -> Self {
        Self { entry, main_hall, exit, parking }
    }

    /// The counts the dashboard starts from.
    pub fn initial() -> Self {
        Self::new(80, 120, 60, 40)
    }

    #[inline]
    pub fn get(&self, id: ZoneId) -> u32 {
        self[id]
    }

    /// Iterate `(zone, count)` pairs in topological order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, u32)> + '_ {
        ZoneId::ALL.into_iter().map(move |id| (id, self[id]))
    }

    /// Sum over all zones.  Mixes gauges and accumulators, so only useful as
    /// a rough activity indicator.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, c)| c as u64).sum()
    }

    /// Materialise full [`Zone`] records using `limits` as each zone's
    /// capacity.
    pub fn zones(&self, limits: &SafeLimits) -> [Zone; ZoneId::COUNT] {
        ZoneId::ALL.map(|id| Zone {
            id,
            name:     id.display_name(),
            count:    self[id],
            capacity: limits.limit(id),
        })
    }
}

impl Index<ZoneId> for ZoneCounts {
    type Output = u32;

    #[inline]
    fn index(&self, id: ZoneId) -> &u32 {
        match id {
            ZoneId::Entry    => &self.entry,
            ZoneId::MainHall => &self.main_hall,
            ZoneId::Exit     => &self.exit,
            ZoneId::Parking  => &self.parking,
        }
    }
}

impl IndexMut<ZoneId> for ZoneCounts {
    #[inline]
    fn index_mut(&mut self, id: ZoneId) -> &mut u32 {
        match id {
            ZoneId::Entry    => &mut self.entry,
            ZoneId::MainHall => &mut self.main_hall,
            ZoneId::Exit     => &mut self.exit,
            ZoneId::Parking  => &mut self.parking,
        }
    }
}

impl fmt::Display for ZoneCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry={} mainHall={} exit={} parking={}",
            self.entry, self.main_hall, self.exit, self.parking
        )
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// A zone as presented to consumers: identity, label, count, and capacity.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Zone {
    pub id:       ZoneId,
    pub name:     &'static str,
    pub count:    u32,
    pub capacity: u32,
}

impl Zone {
    /// At or over capacity.
    #[inline]
    pub fn is_over_limit(&self) -> bool {
        self.count >= self.capacity
    }
}

// ── SafeLimits ────────────────────────────────────────────────────────────────

/// Per-zone occupancy thresholds used by the overcrowding alert.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SafeLimits {
    pub main_hall: u32,
    /// Limit for every other zone.
    pub default:   u32,
}

impl SafeLimits {
    #[inline]
    pub fn limit(&self, id: ZoneId) -> u32 {
        match id {
            ZoneId::MainHall => self.main_hall,
            _                => self.default,
        }
    }
}

impl Default for SafeLimits {
    fn default() -> Self {
        Self { main_hall: MAIN_HALL_CAPACITY, default: DEFAULT_SAFE_LIMIT }
    }
}

// ── ZoneGraph ─────────────────────────────────────────────────────────────────

/// The fixed directed flow topology.  Lookup only.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZoneGraph;

impl ZoneGraph {
    /// Directed edges `(from, to)`.
    pub const EDGES: [(ZoneId, ZoneId); 3] = [
        (ZoneId::Entry,    ZoneId::MainHall),
        (ZoneId::MainHall, ZoneId::Exit),
        (ZoneId::Exit,     ZoneId::Parking),
    ];

    /// The zone people flow into from `id`, if any.
    pub fn downstream(id: ZoneId) -> Option<ZoneId> {
        Self::EDGES.iter().find(|(from, _)| *from == id).map(|&(_, to)| to)
    }

    /// The zone people flow in from, if any.
    pub fn upstream(id: ZoneId) -> Option<ZoneId> {
        Self::EDGES.iter().find(|(_, to)| *to == id).map(|&(from, _)| from)
    }

    #[inline]
    pub fn has_edge(from: ZoneId, to: ZoneId) -> bool {
        Self::EDGES.contains(&(from, to))
    }
}
