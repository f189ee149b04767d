//! Codec and extractor behavior over generated and random identifiers

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{expect_id, manual_generator, no_wait_config, ManualClock};
    use crate::*;
    use rand::Rng;

    const PRESETS: [Preset; 3] = [Preset::SnowflakeMs, Preset::MicroflakeV1, Preset::MicroflakeV2];

    #[test]
    fn test_random_fields_roundtrip() {
        let mut rng = rand::rng();
        for preset in PRESETS {
            let layout = preset.layout();
            for _ in 0..1_000 {
                let t = rng.random_range(0..=layout.max_timestamp());
                let i = rng.random_range(0..=layout.max_instance());
                let s = rng.random_range(0..=layout.max_sequence());
                let id = layout.pack(t, i, s).unwrap();
                assert_eq!(decode(id, &layout), (t, i, s));
            }
        }
    }

    #[test]
    fn test_known_snowflake_encoding() {
        let layout = Preset::SnowflakeMs.layout();
        let id = layout.pack(1000, 5, 3).unwrap();
        assert_eq!(id, (1000 << 22) | (5 << 12) | 3);
        assert_eq!(id, 4_194_324_483);
        assert_eq!(decode(4_194_324_483, &layout), (1000, 5, 3));
    }

    #[test]
    fn test_bit_positions_per_preset() {
        for preset in PRESETS {
            let layout = preset.layout();
            let seq_bits = layout.sequence_bits();
            let shift = layout.shift();

            let id = layout.pack(1, 1, 1).unwrap();
            assert_eq!(id, (1 << shift) | (1 << seq_bits) | 1);
        }
    }

    #[test]
    fn test_generated_ids_decode_with_layout_only() {
        let clock = ManualClock::new(1_234);
        let g = manual_generator(77, no_wait_config(), &clock);

        let id = expect_id(&g);
        let layout = Preset::SnowflakeMs.layout();
        assert_eq!(layout.unpack(id), (1_234, 77, 0));
        assert_eq!(g.extract.decompose(id), layout.unpack(id));
        assert_eq!(g.extract.unix_ticks(id), 1_234);
    }

    #[test]
    fn test_extractor_individual_components() {
        let layout = Preset::MicroflakeV1.layout();
        let extract = MicroflakeExtractor::new(layout, 0);
        let id = layout.pack(0xABCDEF, 0xA5, 0x9).unwrap();

        assert_eq!(extract.timestamp(id), 0xABCDEF);
        assert_eq!(extract.instance(id), 0xA5);
        assert_eq!(extract.sequence(id), 0x9);
    }
}
