use microflake::{Microflake, MicroflakeConfig, MicroflakeError, Preset};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Microsecond layout: 8 instance bits, 4 sequence bits
    let config = MicroflakeConfig::builder()
        .preset(Preset::MicroflakeV1)
        .starting_sequence(1)
        .build()?;

    let generator = Microflake::with_config(42, config)?;
    let layout = config.layout();

    println!("Generator configuration:");
    println!("  Instance bits: {}", layout.instance_bits());
    println!("  Sequence bits: {}", layout.sequence_bits());
    println!("  Timestamp bits: {}", layout.timestamp_bits());
    println!("  Max instance ID: {}", layout.max_instance());
    println!("  Max sequence per us: {}", layout.max_sequence());
    if let Some(expiry) = layout.expires_at(config.epoch()) {
        println!("  Layout expires: {expiry}");
    }

    // Pull IDs explicitly, handling each outcome
    let mut issued = 0;
    while issued < 40 {
        match generator.next_id() {
            Ok(id) => {
                let (ts, instance, seq) = generator.extract.decompose(id);
                println!("ID {id}: ts={ts}us instance={instance} seq={seq}");
                issued += 1;
            }
            Err(MicroflakeError::Pending { yield_until }) => {
                println!("tick exhausted, retry at {yield_until}");
            }
            Err(MicroflakeError::ClockRegressed { last, current }) => {
                println!("clock moved back from {last} to {current}, retrying");
                std::thread::yield_now();
            }
            Err(MicroflakeError::ClockBeforeEpoch { reading, epoch }) => {
                println!("clock reads {reading}, before epoch {epoch}, retrying");
                std::thread::yield_now();
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
