//! ModerationPolicy tests: variant selection, clamping, fairness of the lottery

use community_moderation_sim::policy::{DEFAULT_DURATION_WEIGHTS, DEFAULT_SANCTION_DURATIONS};
use community_moderation_sim::{
    DurationDistribution, MemberId, MemberStatus, ModerationPolicy, PopulationState, RngManager,
    Sanction, SanctionMode, SimulationConfig,
};

#[test]
fn test_fixed_count_selected_without_rate() {
    let policy = ModerationPolicy::from_config(&SimulationConfig::default()).unwrap();
    assert!(matches!(
        policy,
        ModerationPolicy::FixedCount {
            ban_count_range: (3, 12),
            mode: SanctionMode::Permanent,
        }
    ));
    assert!(!policy.reintegration_enabled());
    assert_eq!(policy.effective_rate(), None);
}

#[test]
fn test_fixed_count_reintegration_draws_uniformly() {
    let config = SimulationConfig::default().with_reintegration();
    let policy = ModerationPolicy::from_config(&config).unwrap();

    match policy.mode() {
        SanctionMode::Temporary(DurationDistribution::Uniform { durations }) => {
            assert_eq!(durations, &DEFAULT_SANCTION_DURATIONS.to_vec());
        }
        other => panic!("expected uniform durations, got {:?}", other),
    }
}

#[test]
fn test_rate_based_uses_default_weights() {
    let config = SimulationConfig {
        base_ban_rate: Some(0.05),
        ..SimulationConfig::default().with_reintegration()
    };
    let policy = ModerationPolicy::from_config(&config).unwrap();

    assert_eq!(policy.effective_rate(), Some(0.05));
    match policy.mode() {
        SanctionMode::Temporary(DurationDistribution::Weighted { durations, weights }) => {
            assert_eq!(durations, &vec![1, 6, 12]);
            assert_eq!(weights, &DEFAULT_DURATION_WEIGHTS.to_vec());
        }
        other => panic!("expected weighted durations, got {:?}", other),
    }
}

#[test]
fn test_rate_based_custom_durations_draw_uniformly() {
    let config = SimulationConfig {
        base_ban_rate: Some(0.05),
        sanction_durations: vec![2, 4, 8],
        ..SimulationConfig::default().with_reintegration()
    };
    let policy = ModerationPolicy::from_config(&config).unwrap();

    match policy.mode() {
        SanctionMode::Temporary(DurationDistribution::Uniform { durations }) => {
            assert_eq!(durations, &vec![2, 4, 8]);
        }
        other => panic!("expected uniform durations, got {:?}", other),
    }
}

#[test]
fn test_explicit_weights_override_defaults() {
    let config = SimulationConfig {
        base_ban_rate: Some(0.05),
        sanction_durations: vec![2, 4],
        duration_weights: Some(vec![0.25, 0.75]),
        ..SimulationConfig::default().with_reintegration()
    };
    let policy = ModerationPolicy::from_config(&config).unwrap();

    assert!(matches!(
        policy.mode(),
        SanctionMode::Temporary(DurationDistribution::Weighted { .. })
    ));
}

#[test]
fn test_exclusion_doubles_rate() {
    let config = SimulationConfig {
        base_ban_rate: Some(0.05),
        ..SimulationConfig::default()
    };
    let policy = ModerationPolicy::from_config(&config).unwrap();
    assert_eq!(policy.effective_rate(), Some(0.1));
}

#[test]
fn test_clamps_to_ten_active_members() {
    let policy = ModerationPolicy::FixedCount {
        ban_count_range: (1000, 1000),
        mode: SanctionMode::Permanent,
    };
    let mut population = PopulationState::with_active_members(10);
    let mut rng = RngManager::new(1);

    let decisions = policy.decide(&population, 0, &mut rng);
    assert_eq!(decisions.len(), 10);
    for d in &decisions {
        population.apply_ban(d.member).unwrap();
    }
    assert_eq!(population.count(MemberStatus::Banned), 10);
    assert_eq!(population.count(MemberStatus::Active), 0);
}

#[test]
fn test_selection_gives_equal_inclusion_probability() {
    let policy = ModerationPolicy::FixedCount {
        ban_count_range: (3, 3),
        mode: SanctionMode::Permanent,
    };
    let population = PopulationState::with_active_members(10);
    let mut rng = RngManager::new(8675309);
    let mut hits = [0usize; 10];

    for _ in 0..20_000 {
        for d in policy.decide(&population, 0, &mut rng) {
            hits[d.member.index()] += 1;
        }
    }

    // Expected 20_000 × 3/10 = 6000 per member
    for (idx, count) in hits.iter().enumerate() {
        assert!(
            (5600..6400).contains(count),
            "member {} selected {} times",
            idx,
            count
        );
    }
}

#[test]
fn test_decisions_are_distinct() {
    let policy = ModerationPolicy::FixedCount {
        ban_count_range: (12, 12),
        mode: SanctionMode::Permanent,
    };
    let population = PopulationState::with_active_members(15);
    let mut rng = RngManager::new(3);

    let mut members: Vec<MemberId> = policy
        .decide(&population, 0, &mut rng)
        .iter()
        .map(|d| d.member)
        .collect();
    members.sort();
    members.dedup();
    assert_eq!(members.len(), 12);
}

#[test]
fn test_suspension_durations_come_from_configured_set() {
    let config = SimulationConfig {
        sanction_durations: vec![2, 5],
        ..SimulationConfig::default().with_reintegration()
    };
    let policy = ModerationPolicy::from_config(&config).unwrap();
    let population = PopulationState::with_active_members(200);
    let mut rng = RngManager::new(10);

    for _ in 0..50 {
        for d in policy.decide(&population, 0, &mut rng) {
            match d.sanction {
                Sanction::Suspend { duration } => assert!(duration == 2 || duration == 5),
                Sanction::Ban => panic!("reintegration policy issued a ban"),
            }
        }
    }
}

#[test]
fn test_rate_based_proportional_term_dominates_large_population() {
    let policy = ModerationPolicy::RateBased {
        base_rate: 0.05,
        ban_count_range: (3, 12),
        mode: SanctionMode::Temporary(DurationDistribution::uniform(vec![1]).unwrap()),
    };
    let population = PopulationState::with_active_members(1000);
    let mut rng = RngManager::new(2);

    assert_eq!(policy.decide(&population, 0, &mut rng).len(), 50);
}
