//! Throttled probe cache.
//!
//! Probes are too slow to run on every frame, so each one is read at most
//! once per refresh interval. There is no background worker: a stale entry
//! is refreshed synchronously by the `get` that notices it. Threshold
//! warnings are raised right after the refresh that crosses them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::{ProbeIntervals, Thresholds};
use crate::events::EventLog;
use crate::probes::{Probe, ProbeGroup, ProbeSource, ProbeValue};

#[derive(Debug, Clone)]
pub struct StatCacheEntry {
    pub value: ProbeValue,
    pub refreshed_at: Instant,
    pub interval: Duration,
}

impl StatCacheEntry {
    fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.refreshed_at) >= self.interval
    }
}

pub struct StatCache {
    source: Box<dyn ProbeSource>,
    entries: HashMap<Probe, StatCacheEntry>,
    intervals: ProbeIntervals,
    thresholds: Thresholds,
    cpu_alarm: bool,
    memory_alarm: bool,
}

impl StatCache {
    pub fn new(
        source: Box<dyn ProbeSource>,
        intervals: ProbeIntervals,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            intervals,
            thresholds,
            cpu_alarm: false,
            memory_alarm: false,
        }
    }

    pub fn interval_for(&self, probe: Probe) -> Duration {
        match probe.group() {
            ProbeGroup::Fast => self.intervals.fast,
            ProbeGroup::Monitor => self.intervals.monitor,
            ProbeGroup::Network => self.intervals.network,
        }
    }

    pub fn get(&mut self, probe: Probe, events: &mut EventLog) -> ProbeValue {
        self.get_at(probe, Instant::now(), events)
    }

    /// Cached value for `probe`, refreshed first if missing or stale.
    pub fn get_at(&mut self, probe: Probe, now: Instant, events: &mut EventLog) -> ProbeValue {
        let fresh = self
            .entries
            .get(&probe)
            .is_some_and(|entry| !entry.is_stale(now));
        if !fresh {
            let value = self.source.read(probe);
            if !value.is_available() {
                tracing::trace!(?probe, "probe unavailable");
            }
            let interval = self.interval_for(probe);
            self.entries.insert(
                probe,
                StatCacheEntry {
                    value,
                    refreshed_at: now,
                    interval,
                },
            );
            self.check_thresholds(probe, events);
        }
        self.entries
            .get(&probe)
            .map(|entry| entry.value.clone())
            .unwrap_or(ProbeValue::Unavailable)
    }

    pub fn entry(&self, probe: Probe) -> Option<&StatCacheEntry> {
        self.entries.get(&probe)
    }

    fn check_thresholds(&mut self, probe: Probe, events: &mut EventLog) {
        let Some(percent) = self.entries.get(&probe).and_then(|entry| entry.value.percent())
        else {
            return;
        };
        match probe {
            Probe::CpuPercent => {
                let above = percent > self.thresholds.cpu;
                if above && !self.cpu_alarm {
                    events.warn(format!("CPU spike detected: {percent}%"));
                }
                self.cpu_alarm = above;
            }
            Probe::Memory => {
                let above = percent > self.thresholds.memory;
                if above && !self.memory_alarm {
                    events.warn(format!("Memory critical: {percent}%"));
                }
                self.memory_alarm = above;
            }
            _ => {}
        }
    }
}
