//! Integration tests for reward selection, gating and milestones.

use habitpool_core::analytics::DayPart;
use habitpool_core::reward::MILESTONE_LADDER;
use habitpool_core::{
    check_milestone, RewardCategory, RewardConfig, RewardContext, RewardGate, RewardSelector,
    UserData,
};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use std::collections::HashMap;

fn context() -> RewardContext {
    RewardContext {
        streak: 12,
        habit_name: "Meditate".into(),
        time_of_day: Some(DayPart::Morning),
    }
}

#[test]
fn test_distribution_matches_weights() {
    let selector = RewardSelector::new();
    let mut rng = Mcg128Xsl64::seed_from_u64(2024);
    let mut counts: HashMap<RewardCategory, u32> = HashMap::new();
    for _ in 0..1000 {
        let reward = selector.select(&context(), &[], &mut rng);
        *counts.entry(reward.category).or_default() += 1;
    }

    let expected = [
        (RewardCategory::Acknowledgment, 550.0_f64),
        (RewardCategory::Identity, 200.0),
        (RewardCategory::Pattern, 150.0),
        (RewardCategory::Neuroscience, 70.0),
        (RewardCategory::RareDelight, 30.0),
    ];
    for (category, mean) in expected {
        let got = *counts.get(&category).unwrap_or(&0) as f64;
        // Five binomial standard deviations
        let tolerance = 5.0 * (mean * (1.0 - mean / 1000.0)).sqrt();
        assert!(
            (got - mean).abs() <= tolerance,
            "{category:?}: got {got}, expected about {mean}"
        );
    }
}

#[test]
fn test_pattern_messages_are_filled_in() {
    let selector = RewardSelector::new();
    let mut rng = Mcg128Xsl64::seed_from_u64(5);
    for _ in 0..300 {
        let reward = selector.select(&context(), &[], &mut rng);
        assert!(!reward.message.contains('{'), "unrendered: {}", reward.message);
    }
}

#[test]
fn test_recent_category_shows_less_often() {
    let selector = RewardSelector::new();
    let recent = [RewardCategory::Acknowledgment; 3];
    let mut rng = Mcg128Xsl64::seed_from_u64(77);
    let ack = (0..2000)
        .filter(|_| selector.select(&context(), &recent, &mut rng).category == RewardCategory::Acknowledgment)
        .count();
    // 27.5 / 72.5 of the mass, about 38%
    let rate = ack as f64 / 2000.0;
    assert!((0.33..0.43).contains(&rate), "rate was {rate}");
}

#[test]
fn test_completion_flow_updates_document() {
    let gate = RewardGate::with_config(RewardConfig::default());
    let selector = RewardSelector::with_recent_window(3);
    let mut rng = Mcg128Xsl64::seed_from_u64(9);
    let mut doc = UserData::default();

    for today_count in 1..=3 {
        assert!(gate.should_show(today_count, today_count as u64, &mut rng));
        let reward = selector.select(&context(), &doc.recent_rewards, &mut rng);
        doc.push_recent_reward(reward.category);
    }
    assert_eq!(doc.recent_rewards.len(), 3);
}

#[test]
fn test_milestones() {
    assert_eq!(check_milestone(14, &[3, 7]).map(|m| m.days), Some(14));
    assert_eq!(check_milestone(14, &[3, 7, 14]), None);
    assert_eq!(check_milestone(2, &[]), None);

    let mut doc = UserData::default();
    let mut unlocked_in_order = Vec::new();
    while let Some(m) = check_milestone(100, &doc.unlocked_milestones) {
        assert!(doc.unlock_milestone(m.days));
        unlocked_in_order.push(m.days);
    }
    assert_eq!(unlocked_in_order, MILESTONE_LADDER.to_vec());
}
