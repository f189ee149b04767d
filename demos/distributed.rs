use microflake::{Microflake, MicroflakeConfig, Preset};
use rand::{rng, Rng};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = MicroflakeConfig::builder()
        .preset(Preset::MicroflakeV2)
        .build()
        .unwrap();

    // One generator per instance ID, each shared by several worker threads
    let mut handles = vec![];
    for instance_id in 0..3u64 {
        let generator = Arc::new(Microflake::with_config(instance_id, config).unwrap());
        for worker in 0..2 {
            let generator = Arc::clone(&generator);
            handles.push(thread::spawn(move || {
                let mut ids = HashSet::new();
                let mut rng = rng();

                for i in 0..5 {
                    let id = generator.generate(Duration::from_secs(1)).unwrap();
                    let (ts, instance, seq) = generator.extract.decompose(id);

                    println!(
                        "Instance {instance_id} worker {worker} generated ID {i}: {id} (ts={ts}, instance={instance}, seq={seq})"
                    );
                    assert!(ids.insert(id), "Duplicate ID generated!");

                    // Random delay to simulate work
                    let delay = rng.random_range(0..=900);
                    thread::sleep(Duration::from_micros(delay));
                }
                ids
            }));
        }
    }

    let mut all_ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all_ids.insert(id), "Duplicate ID across instances!");
        }
    }

    println!("\nTotal unique IDs generated: {}", all_ids.len());
    println!("All IDs are unique across instances and workers!");
}
