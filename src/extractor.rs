use chrono::{DateTime, Utc};

use crate::layout::Layout;

/// Microflake component extractor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MicroflakeExtractor {
    layout: Layout,
    epoch: u64,
}

impl MicroflakeExtractor {
    /// Create an extractor for identifiers of `layout` issued against `epoch`
    pub fn new(layout: Layout, epoch: u64) -> Self {
        Self { layout, epoch }
    }

    #[inline(always)]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Extract timestamp component (ticks since epoch)
    #[inline(always)]
    pub fn timestamp(&self, id: u64) -> u64 {
        (id >> self.layout.shift()) & self.layout.max_timestamp()
    }

    /// Extract instance component
    #[inline(always)]
    pub fn instance(&self, id: u64) -> u64 {
        (id >> self.layout.sequence_bits()) & self.layout.max_instance()
    }

    /// Extract sequence component
    #[inline(always)]
    pub fn sequence(&self, id: u64) -> u64 {
        id & self.layout.max_sequence()
    }

    /// Decompose an identifier into timestamp, instance ID and sequence
    #[inline]
    pub fn decompose(&self, id: u64) -> (u64, u64, u64) {
        self.layout.unpack(id)
    }

    /// Absolute ticks since the Unix epoch at which `id` was issued
    #[inline]
    pub fn unix_ticks(&self, id: u64) -> u64 {
        self.epoch.saturating_add(self.timestamp(id))
    }

    /// Wall-clock time at which `id` was issued
    pub fn datetime(&self, id: u64) -> Option<DateTime<Utc>> {
        self.layout.unit().to_datetime(self.unix_ticks(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Preset;
    use crate::time::DEFAULT_EPOCH_MS;

    #[test]
    fn test_decompose() {
        let layout = Preset::SnowflakeMs.layout();
        let extract = MicroflakeExtractor::new(layout, DEFAULT_EPOCH_MS);

        let timestamp = 0x1234567;
        let instance = 42;
        let sequence = 123;
        let id = layout.pack(timestamp, instance, sequence).unwrap();

        assert_eq!(extract.timestamp(id), timestamp);
        assert_eq!(extract.instance(id), instance);
        assert_eq!(extract.sequence(id), sequence);
        assert_eq!(extract.decompose(id), (timestamp, instance, sequence));
    }

    #[test]
    fn test_component_boundaries() {
        let layout = Preset::MicroflakeV1.layout();
        let extract = MicroflakeExtractor::new(layout, 0);

        let id = layout
            .pack(layout.max_timestamp(), layout.max_instance(), layout.max_sequence())
            .unwrap();

        assert_eq!(extract.timestamp(id), layout.max_timestamp());
        assert_eq!(extract.instance(id), 255);
        assert_eq!(extract.sequence(id), 15);
    }

    #[test]
    fn test_datetime() {
        let layout = Preset::SnowflakeMs.layout();
        let extract = MicroflakeExtractor::new(layout, DEFAULT_EPOCH_MS);
        let id = layout.pack(1_500, 1, 0).unwrap();

        let dt = extract.datetime(id).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:01.500+00:00");

        let micro = Preset::MicroflakeV2.layout();
        let extract = MicroflakeExtractor::new(micro, DEFAULT_EPOCH_MS * 1_000);
        let id = micro.pack(2_000_001, 0, 0).unwrap();
        assert_eq!(
            extract.datetime(id).unwrap().timestamp_micros(),
            (DEFAULT_EPOCH_MS * 1_000 + 2_000_001) as i64
        );
    }
}
