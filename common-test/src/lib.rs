//! Randomness for the workspace's property tests.
//!
//! Tests that attach a random number of observers or push random values
//! through a model draw them from a [`StdRng`] seeded per scope. The seed of a
//! scope is printed on first use; export it under the scope name (by default
//! `DEFAULT_TEST_SEED`) to replay the exact same observers and values.

use std::{
    collections::HashMap,
    env,
    error::Error,
    ops::RangeInclusive,
    sync::{OnceLock, RwLock},
};

use rand::{random, rngs::StdRng, Rng, SeedableRng};

pub const DEFAULT_TEST_SEED_ENV: &str = "DEFAULT_TEST_SEED";

static SEEDS: OnceLock<RwLock<HashMap<&'static str, u64>>> = OnceLock::new();

fn seeds() -> &'static RwLock<HashMap<&'static str, u64>> {
    SEEDS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Seed shared by every test drawing from the `key` scope. Fixed for the
/// whole test binary so tests of one run see a single replayable seed.
fn seed_for(key: &'static str) -> Result<u64, Box<dyn Error>> {
    let mut seeds = seeds().write()?;
    Ok(*seeds.entry(key).or_insert_with(|| {
        let seed = env::var(key)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or_else(random);
        println!("Using seed {seed} for {key}");
        seed
    }))
}

/// Generator for the default scope, driven by `DEFAULT_TEST_SEED`.
pub fn get_seeded_rng() -> Result<StdRng, Box<dyn Error>> {
    get_seeded_rng_from_scope(DEFAULT_TEST_SEED_ENV)
}

pub fn get_seeded_rng_from_scope(key: &'static str) -> Result<StdRng, Box<dyn Error>> {
    Ok(StdRng::seed_from_u64(seed_for(key)?))
}

/// A random sequence of values to feed through `set_value`: between one and
/// `max_count` of them, each inside `range`.
pub fn random_values(rng: &mut impl Rng, max_count: usize, range: RangeInclusive<i32>) -> Vec<i32> {
    let count = rng.gen_range(1..=max_count.max(1));
    (0..count).map(|_| rng.gen_range(range.clone())).collect()
}
