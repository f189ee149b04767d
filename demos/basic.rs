use microflake::Microflake;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Create a generator with instance ID 1 (snowflake-ms layout)
    let generator = Microflake::new(1).unwrap();

    // Generate some IDs
    let id1 = generator.generate(Duration::from_secs(1)).unwrap();
    let id2 = generator.generate(Duration::from_secs(1)).unwrap();
    let id3 = generator.generate(Duration::from_secs(1)).unwrap();

    println!("Generated IDs (guaranteed to be monotonic):");
    print_id(id1, &generator);
    print_id(id2, &generator);
    print_id(id3, &generator);

    // Or extract components individually
    let ts = generator.extract.timestamp(id2);
    let instance = generator.extract.instance(id2);
    let seq = generator.extract.sequence(id2);
    println!("\nComponents of ID2 (extracted individually):");
    println!("  Timestamp: {ts} ms since epoch");
    println!("  Instance ID: {instance}");
    println!("  Sequence: {seq}");
}

fn print_id(id: u64, generator: &Microflake) {
    let (_, instance, sequence) = generator.extract.decompose(id);
    let unix_ms = generator.extract.unix_ticks(id);
    match generator.extract.datetime(id) {
        Some(datetime) => println!(
            "  ID: {id}, Timestamp: {unix_ms}, Human date: {datetime}, Instance ID: {instance}, Sequence: {sequence}"
        ),
        None => println!("  ID: {id}, Timestamp: {unix_ms}, Instance ID: {instance}, Sequence: {sequence}"),
    }
}
