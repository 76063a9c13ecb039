use env_logger::{Builder, Env};
use log::error;
use sorted_skiplist::{client, SkipListConfig};
use std::env;
use std::process;

fn main() {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    // Optional JSON config path as the first argument
    let config = match env::args().nth(1) {
        Some(path) => match SkipListConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Could not load config {}: {}", path, e);
                process::exit(1);
            }
        },
        None => SkipListConfig::default(),
    };

    println!("Skip list free test");
    if let Err(e) = client::start(&config) {
        error!("Session ended with error: {}", e);
        process::exit(1);
    }
}
