use std::collections::BTreeSet;

use crate::matching::skills::{
    availability_score, complementary_score, skill_overlap, timezone_score,
};

fn skill_set(skills: &[&str]) -> BTreeSet<String> {
    skills.iter().map(|skill| skill.to_string()).collect()
}

fn required(skills: &[&str]) -> Vec<String> {
    skills.iter().map(|skill| skill.to_string()).collect()
}

#[test]
fn overlap_is_full_without_requirements() {
    let (score, matched, missing) = skill_overlap(&skill_set(&["rust"]), &[]);
    assert_eq!(score, 100);
    assert!(matched.is_empty());
    assert!(missing.is_empty());
}

#[test]
fn overlap_is_zero_without_skills() {
    let wanted = required(&["rust", "go"]);
    let (score, matched, missing) = skill_overlap(&BTreeSet::new(), &wanted);
    assert_eq!(score, 0);
    assert!(matched.is_empty());
    assert_eq!(missing, wanted);
}

#[test]
fn overlap_matches_case_insensitively() {
    let (score, matched, missing) = skill_overlap(
        &skill_set(&["react", "node"]),
        &required(&["React", "Node", "Python"]),
    );
    assert_eq!(score, 67);
    assert_eq!(matched, vec!["React".to_string(), "Node".to_string()]);
    assert_eq!(missing, vec!["Python".to_string()]);
}

#[test]
fn complementary_full_credit_for_direct_match() {
    assert_eq!(
        complementary_score(&skill_set(&["react"]), &required(&["react"])),
        100
    );
}

#[test]
fn complementary_partial_credit_for_related_skills() {
    // Two related skills at 20 points each.
    assert_eq!(
        complementary_score(&skill_set(&["typescript", "javascript"]), &required(&["react"])),
        40
    );
}

#[test]
fn complementary_related_credit_caps_at_sixty() {
    let adjacent = skill_set(&["typescript", "javascript", "redux", "nextjs"]);
    assert_eq!(complementary_score(&adjacent, &required(&["react"])), 60);
}

#[test]
fn complementary_zero_without_skills() {
    assert_eq!(complementary_score(&BTreeSet::new(), &required(&["react"])), 0);
}

#[test]
fn availability_tiers() {
    assert_eq!(availability_score(Some("full-time"), Some("part-time")), 100);
    assert_eq!(availability_score(Some("part-time"), Some("full-time")), 70);
    assert_eq!(availability_score(Some("weekends"), Some("full-time")), 40);
    assert_eq!(availability_score(None, Some("full-time")), 100);
    assert_eq!(availability_score(Some("evenings"), None), 100);
    // Unknown strings rank as the middle tier.
    assert_eq!(availability_score(Some("sometimes"), Some("full-time")), 40);
}

#[test]
fn timezone_bands() {
    assert_eq!(timezone_score(Some("UTC+1:00"), Some("UTC+2:00")), 100);
    assert_eq!(timezone_score(Some("UTC-3:00"), Some("UTC+1:00")), 75);
    assert_eq!(timezone_score(Some("UTC+0:00"), Some("UTC+7:00")), 50);
    assert_eq!(timezone_score(Some("UTC-5:00"), Some("UTC+9:00")), 25);
    assert_eq!(timezone_score(None, Some("UTC+9:00")), 100);
    assert_eq!(timezone_score(Some("UTC+9:00"), None), 100);
}

#[test]
fn timezone_handles_half_hour_offsets() {
    assert_eq!(timezone_score(Some("UTC+5:30"), Some("UTC+8:00")), 75);
}

#[test]
fn malformed_timezones_read_as_utc() {
    assert_eq!(timezone_score(Some("EST"), Some("UTC+2:00")), 100);
    assert_eq!(timezone_score(Some("EST"), Some("UTC+9:00")), 25);
    // Identical strings are compatible even when unparseable.
    assert_eq!(timezone_score(Some("EST"), Some("EST")), 100);
}
