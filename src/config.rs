use std::{env, path::PathBuf};

/// Runtime settings shared by every subcommand. All values come from
/// environment variables with defaults suitable for a local deployment.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string.
    pub uri: String,
    /// Database holding the seeded corpus and benchmark collections.
    pub db_name: String,
    /// Number of documents seeded into each collection.
    pub seed_count: u64,
    /// Batch size for seeding inserts.
    pub batch_size: usize,
    /// Directory chart files are written to.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            db_name: env::var("ODM_BENCH_DB").unwrap_or_else(|_| "odm_bench".to_string()),
            seed_count: parse_env("ODM_BENCH_SEED_COUNT", 100_000),
            batch_size: parse_env("ODM_BENCH_BATCH_SIZE", 5_000),
            output_dir: env::var("ODM_BENCH_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
        }
    }
}

fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
