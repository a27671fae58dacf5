//! Determinism tests
//!
//! The same seed and configuration must reproduce the same draws and the same
//! result series, byte for byte.

use community_moderation_sim::{run_simulation, RngManager, SimulationConfig};

fn reintegration_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        initial_member_count: 500,
        iterations: 24,
        rng_seed: seed,
        reintegration_enabled: true,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_rng_same_seed_same_sequence() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..1000 {
        assert_eq!(rng1.next(), rng2.next());
    }
}

#[test]
fn test_rng_different_seeds_diverge() {
    let mut rng1 = RngManager::new(1);
    let mut rng2 = RngManager::new(2);

    let a: Vec<u64> = (0..16).map(|_| rng1.next()).collect();
    let b: Vec<u64> = (0..16).map(|_| rng2.next()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_rng_state_resume() {
    let mut rng = RngManager::new(999);
    for _ in 0..10 {
        rng.next();
    }

    let mut resumed = RngManager::new(rng.get_state());
    for _ in 0..100 {
        assert_eq!(rng.next(), resumed.next());
    }
}

#[test]
fn test_identical_runs_identical_series() {
    let a = run_simulation(&reintegration_config(2024)).unwrap();
    let b = run_simulation(&reintegration_config(2024)).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn test_config_hash_survives_json_reload() {
    let config = reintegration_config(2024);
    let json = serde_json::to_string(&config).unwrap();
    let reloaded = SimulationConfig::from_json(&json).unwrap();

    assert_eq!(config.config_hash().unwrap(), reloaded.config_hash().unwrap());
    assert_ne!(
        config.config_hash().unwrap(),
        reintegration_config(2025).config_hash().unwrap()
    );
}

#[test]
fn test_different_seeds_different_series() {
    let a = run_simulation(&reintegration_config(1)).unwrap();
    let b = run_simulation(&reintegration_config(2)).unwrap();

    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn test_rate_based_runs_deterministic() {
    let config = SimulationConfig {
        base_ban_rate: Some(0.01),
        ..reintegration_config(77)
    };
    assert_eq!(
        run_simulation(&config).unwrap(),
        run_simulation(&config).unwrap()
    );
}
