use crate::layout::LayoutStats;
use crate::logging::{LogEvent, LogFields, LogLevel, field_map};
use serde_json::json;

/// Saturating counters for pack and cache activity.
#[derive(Debug, Default, Clone)]
pub struct PackMetrics {
    packs: u64,
    tiles_placed: u64,
    rows_closed: u64,
    overshoots: u64,
    cache_hits: u64,
    cache_misses: u64,
}

impl PackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pack(&mut self, stats: &LayoutStats) {
        self.packs = self.packs.saturating_add(1);
        self.tiles_placed = self.tiles_placed.saturating_add(stats.tiles as u64);
        self.rows_closed = self.rows_closed.saturating_add(stats.rows_closed as u64);
        if stats.overshot {
            self.overshoots = self.overshoots.saturating_add(1);
        }
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits = self.cache_hits.saturating_add(1);
    }

    pub fn record_cache_miss(&mut self) {
        self.cache_misses = self.cache_misses.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            packs: self.packs,
            tiles_placed: self.tiles_placed,
            rows_closed: self.rows_closed,
            overshoots: self.overshoots,
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub packs: u64,
    pub tiles_placed: u64,
    pub rows_closed: u64,
    pub overshoots: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "pack_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = field_map();
        map.insert("packs".to_string(), json!(self.packs));
        map.insert("tiles_placed".to_string(), json!(self.tiles_placed));
        map.insert("rows_closed".to_string(), json!(self.rows_closed));
        map.insert("overshoots".to_string(), json!(self.overshoots));
        map.insert("cache_hits".to_string(), json!(self.cache_hits));
        map.insert("cache_misses".to_string(), json!(self.cache_misses));
        map
    }
}

pub fn snapshot_event(snapshot: &MetricSnapshot, target: &str) -> LogEvent {
    snapshot.to_log_event(target)
}
