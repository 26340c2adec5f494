use std::collections::BTreeMap;

use crate::credibility::{CredibilityLabel, CredibilitySummary};
use crate::matching::domain::{
    MatchCandidate, MatchLabel, RankingInput, RANK_WEIGHTS, RANK_WEIGHTS_WITH_CREDIBILITY,
};
use crate::matching::engine::{rank_candidates, score_candidate};
use crate::store::{ProjectId, UserId};

fn candidate(id: &str, skills: &[&str]) -> MatchCandidate {
    MatchCandidate {
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        ..MatchCandidate::bare(UserId::new(id))
    }
}

fn ranking_input(required: &[&str], keywords: &[&str]) -> RankingInput {
    RankingInput {
        target_id: ProjectId::new("p1"),
        required_skills: required.iter().map(|skill| skill.to_string()).collect(),
        description: String::new(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

fn summary(final_rank_score: u8) -> CredibilitySummary {
    CredibilitySummary {
        credibility_score: final_rank_score,
        final_rank_score,
        label: CredibilityLabel::from_score(final_rank_score),
        confidence_multiplier: 1.0,
    }
}

#[test]
fn rank_weight_tables_sum_to_one() {
    assert!((RANK_WEIGHTS.sum() - 1.0).abs() < 1e-6);
    assert!((RANK_WEIGHTS_WITH_CREDIBILITY.sum() - 1.0).abs() < 1e-6);
}

#[test]
fn credibility_joins_as_fifth_component() {
    // Half the requirements covered, no repository data attached.
    let mut with_credibility = candidate("u1", &["rust", "go"]);
    with_credibility.credibility = Some(summary(60));
    let input = ranking_input(&["rust", "go", "figma", "design"], &[]);

    let result = score_candidate(&with_credibility, &input);

    // 50*0.35 + 0*0.15 + 0*0.10 + 50*0.15 + 60*0.25 = 40.
    assert_eq!(result.details.skill_overlap_score, 50);
    assert_eq!(result.details.language_score, 0);
    assert_eq!(result.details.repo_relevance_score, 0);
    assert_eq!(result.details.complementary_score, 50);
    assert_eq!(result.details.credibility_score, Some(60));
    assert_eq!(result.score, 40);
    assert_eq!(result.label, MatchLabel::Fair);
}

#[test]
fn base_weights_apply_without_credibility() {
    let plain = candidate("u1", &["rust", "go"]);
    let input = ranking_input(&["rust", "go", "figma"], &[]);

    let result = score_candidate(&plain, &input);

    // 67*0.45 + 0 + 0 + 67*0.20 = 44 (rounded).
    assert_eq!(result.details.skill_overlap_score, 67);
    assert_eq!(result.details.credibility_score, None);
    assert_eq!(result.score, 44);
}

#[test]
fn repository_data_extends_the_effective_skill_set() {
    let mut enriched = candidate("u1", &[]);
    enriched.languages = BTreeMap::from([("Rust".to_string(), 9_000_u64)]);
    enriched.topics = vec!["cli".to_string()];
    let input = ranking_input(&["rust", "cli"], &[]);

    let result = score_candidate(&enriched, &input);

    assert_eq!(result.details.skill_overlap_score, 100);
    assert_eq!(
        result.matched_skills,
        vec!["rust".to_string(), "cli".to_string()]
    );
    // One language matching of two requirements: 85/2 + diversity 2.
    assert_eq!(result.details.language_score, 45);
}

#[test]
fn repo_relevance_counts_keyword_hits() {
    let mut enriched = candidate("u1", &[]);
    enriched.repo_names = vec!["rust-cli-tool".to_string(), "sandbox".to_string()];
    let input = ranking_input(&[], &["cli", "tool"]);

    let result = score_candidate(&enriched, &input);

    // Two keyword hits in one repository name at 20 points each.
    assert_eq!(result.details.repo_relevance_score, 40);
    assert_eq!(result.details.skill_overlap_score, 100);
}

#[test]
fn confidence_tracks_data_availability() {
    let input = ranking_input(&["rust"], &[]);

    let bare = score_candidate(&MatchCandidate::bare(UserId::new("u0")), &input);
    assert!(bare.confidence.abs() < f32::EPSILON);

    let skilled = score_candidate(&candidate("u1", &["rust"]), &input);
    assert!((skilled.confidence - 0.5).abs() < 1e-6);

    let mut full = candidate("u2", &["rust"]);
    full.github_handle = Some("octocat".to_string());
    full.topics = vec!["cli".to_string()];
    let complete = score_candidate(&full, &input);
    assert!((complete.confidence - 1.0).abs() < 1e-6);
}

#[test]
fn ranking_sorts_by_score_then_confidence() {
    let input = ranking_input(&["rust", "go"], &[]);

    let strong = candidate("u-strong", &["rust", "go"]);
    let weak = candidate("u-weak", &["figma"]);
    let tied_low = candidate("u-tied-low", &["rust"]);
    let mut tied_high = candidate("u-tied-high", &["rust"]);
    tied_high.github_handle = Some("octocat".to_string());

    let results = rank_candidates(&[weak, tied_low, strong, tied_high], &input);

    let order: Vec<&str> = results
        .iter()
        .map(|result| result.user_id.0.as_str())
        .collect();
    assert_eq!(order, vec!["u-strong", "u-tied-high", "u-tied-low", "u-weak"]);

    for pair in results.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score
                    && pair[0].confidence >= pair[1].confidence)
        );
    }
}

#[test]
fn ranking_is_idempotent() {
    let input = ranking_input(&["rust", "react"], &["game"]);
    let candidates = vec![
        candidate("u1", &["rust"]),
        candidate("u2", &["react", "rust"]),
        candidate("u3", &[]),
    ];

    let first = rank_candidates(&candidates, &input);
    let second = rank_candidates(&candidates, &input);
    assert_eq!(first, second);
}
