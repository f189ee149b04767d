//! Configuration and construction validation tests

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{no_wait_config, ManualClock};
    use crate::time::DEFAULT_EPOCH_MS;
    use crate::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = MicroflakeConfig::default();
        assert_eq!(config.layout(), Preset::SnowflakeMs.layout());
        assert_eq!(config.instance_bits(), 10);
        assert_eq!(config.sequence_bits(), 12);
        assert_eq!(config.epoch(), DEFAULT_EPOCH_MS);
        assert_eq!(config.starting_sequence(), 0);
        assert!(config.spin_enabled());
        assert_eq!(config.max_wait(), Duration::from_millis(10));
        assert_eq!(MicroflakeConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn test_default_epoch_follows_unit() {
        let config = MicroflakeConfig::builder()
            .preset(Preset::MicroflakeV1)
            .build()
            .unwrap();
        assert_eq!(config.unit(), TimeUnit::Microsecond);
        assert_eq!(config.epoch(), DEFAULT_EPOCH_MS * 1_000);
    }

    #[test]
    fn test_custom_widths() {
        let config = MicroflakeConfig::builder()
            .widths(TimeUnit::Millisecond, 12, 10)
            .unwrap()
            .epoch(1_640_995_200_000)
            .build()
            .unwrap();

        assert_eq!(config.instance_bits(), 12);
        assert_eq!(config.sequence_bits(), 10);
        assert_eq!(config.max_instance_id(), 4095);
        assert_eq!(config.max_sequence(), 1023);
        assert_eq!(config.epoch(), 1_640_995_200_000);
    }

    #[test]
    fn test_widths_without_timestamp_room_rejected() {
        let err = MicroflakeConfig::builder()
            .widths(TimeUnit::Millisecond, 40, 23)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidWidths {
                instance_bits: 40,
                sequence_bits: 23
            }
        );
    }

    #[test]
    fn test_starting_sequence_out_of_range() {
        let err = MicroflakeConfig::builder()
            .preset(Preset::MicroflakeV2)
            .starting_sequence(16)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidStartingSequence { sequence: 16, max: 15 });
    }

    #[test]
    fn test_instance_one_past_max_rejected() {
        for preset in [Preset::SnowflakeMs, Preset::MicroflakeV1, Preset::MicroflakeV2] {
            let cfg = MicroflakeConfig::builder().preset(preset).build().unwrap();
            let max = cfg.max_instance_id();

            match Microflake::with_config(max + 1, cfg) {
                Err(ConfigError::InvalidInstanceId { instance_id, max: m }) => {
                    assert_eq!(instance_id, max + 1);
                    assert_eq!(m, max);
                }
                other => panic!("expected InvalidInstanceId, got {other:?}"),
            }
            assert!(Microflake::with_config(max, cfg).is_ok());
        }
    }

    #[test]
    fn test_snowflake_instance_error_message() {
        let err = Microflake::new(1024).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Instance ID 1024 is invalid. Maximum allowed value is 1023"
        );
    }

    #[test]
    fn test_epoch_in_future_rejected() {
        let clock = ManualClock::new(1_000);
        let cfg = MicroflakeConfig::builder().epoch(1_001).build().unwrap();
        let err = Microflake::with_clock(0, cfg, &clock).unwrap_err();
        assert_eq!(err, ConfigError::EpochInFuture { epoch: 1_001, now: 1_000 });

        let cfg = MicroflakeConfig::builder().epoch(1_000).build().unwrap();
        assert!(Microflake::with_clock(0, cfg, &clock).is_ok());
    }

    #[test]
    fn test_system_clock_future_epoch_rejected() {
        let cfg = MicroflakeConfig::builder()
            .epoch(u64::MAX / 2)
            .build()
            .unwrap();
        assert!(matches!(
            Microflake::with_config(1, cfg),
            Err(ConfigError::EpochInFuture { .. })
        ));
    }

    #[test]
    fn test_expired_layout_rejected() {
        // One timestamp bit: only ticks 0 and 1 are encodable
        let cfg = MicroflakeConfig::builder()
            .widths(TimeUnit::Millisecond, 31, 31)
            .unwrap()
            .epoch(0)
            .build()
            .unwrap();
        let clock = ManualClock::new(2);
        assert_eq!(
            Microflake::with_clock(0, cfg, &clock).unwrap_err(),
            ConfigError::LayoutExpired { timestamp: 2, max: 1 }
        );
    }

    #[test]
    fn test_runtime_layout_overflow() {
        let cfg = MicroflakeConfig::builder()
            .widths(TimeUnit::Millisecond, 31, 31)
            .unwrap()
            .epoch(0)
            .build()
            .unwrap();
        let clock = ManualClock::new(1);
        let g = Microflake::with_clock(0, cfg, &clock).unwrap();
        assert!(g.next_id().is_ok());

        clock.set(2);
        let err = g.next_id().unwrap_err();
        assert_eq!(err, MicroflakeError::TimestampOverflow { timestamp: 2, max: 1 });
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_spin_tuning_builder() {
        let cfg = MicroflakeConfig::builder()
            .enable_spin(false)
            .spin_loops(0)
            .spin_yield_every(0)
            .build()
            .unwrap();
        assert!(!cfg.spin_enabled());
        assert_eq!(cfg.spin_loops(), 0);
        assert_eq!(cfg.spin_yield_every(), 0);

        let cfg2 = MicroflakeConfig::builder()
            .enable_spin(true)
            .spin_loops(128)
            .spin_yield_every(8)
            .max_wait(Duration::from_micros(250))
            .build()
            .unwrap();
        assert!(cfg2.spin_enabled());
        assert_eq!(cfg2.spin_loops(), 128);
        assert_eq!(cfg2.spin_yield_every(), 8);
        assert_eq!(cfg2.max_wait(), Duration::from_micros(250));

        let capped = MicroflakeConfig::builder()
            .max_wait(Duration::MAX)
            .build()
            .unwrap();
        assert_eq!(capped.max_wait(), Duration::from_secs(1));
    }

    #[test]
    fn test_generator_exposes_config() {
        let clock = ManualClock::new(10);
        let g = Microflake::with_clock(6, no_wait_config(), &clock).unwrap();
        assert_eq!(g.instance_id(), 6);
        assert_eq!(g.config().epoch(), 0);
        assert_eq!(g.config().starting_sequence(), 0);
        assert_eq!(g.extract.layout(), Preset::SnowflakeMs.layout());
        assert_eq!(g.ticks_since_epoch(), Some(10));
    }
}
