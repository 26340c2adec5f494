//! Candidate ranking engine.
//!
//! Scores many candidates against one target by combining skill overlap,
//! repository-language evidence, repository-name relevance, complementary
//! skills, and (when attached) the candidate's credibility, then sorts
//! deterministically: score descending, confidence descending on ties.

use std::collections::BTreeSet;

use super::domain::{
    MatchCandidate, MatchDetails, MatchLabel, MatchResult, RankingInput, RANK_WEIGHTS,
    RANK_WEIGHTS_WITH_CREDIBILITY,
};
use super::skills::{complementary_score, normalize, skill_overlap};

/// Tokens ignored during keyword extraction.
const STOP_WORDS: &[&str] = &[
    "the", "and", "are", "was", "were", "been", "being", "have", "has", "had", "does", "did",
    "will", "would", "could", "should", "may", "might", "shall", "can", "need", "dare", "ought",
    "used", "for", "with", "into", "through", "during", "before", "after", "above", "below",
    "between", "out", "off", "over", "under", "again", "further", "then", "but", "nor", "not",
    "yet", "both", "either", "neither", "each", "every", "all", "any", "few", "more", "most",
    "other", "some", "such", "only", "own", "same", "than", "too", "very", "just", "because",
    "also", "this", "that", "these", "those", "its", "our", "you", "your", "they", "their",
    "them", "she", "him", "her", "his", "hers", "who", "which", "what", "where", "when", "how",
    "why", "project", "team", "build", "create", "using", "use", "want", "looking", "help",
];

const KEYWORD_LIMIT: usize = 20;
const MIN_KEYWORD_LEN: usize = 3;
const MIN_REPO_KEYWORD_LEN: usize = 3;

/// Deterministic, order-preserving keyword extraction: lowercase, strip
/// everything outside `[a-z0-9\s\-+#]`, tokenize on whitespace, drop short
/// tokens and stop words, cap at 20.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '-' | '+' | '#')
            {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(word))
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}

/// Repository-language evidence: overlap with required skills scaled to 85
/// plus a diversity bonus of 2 per distinct language capped at 15, summed
/// then clamped. No language data scores 0; no requirements score a
/// neutral 50.
fn language_score(candidate: &MatchCandidate, required_skills: &[String]) -> u8 {
    if candidate.languages.is_empty() {
        return 0;
    }
    if required_skills.is_empty() {
        return 50;
    }

    let languages: BTreeSet<String> = candidate
        .languages
        .keys()
        .map(|language| language.to_lowercase())
        .collect();
    let match_count = required_skills
        .iter()
        .filter(|skill| languages.contains(&normalize(skill)))
        .count() as f32;

    let overlap = (match_count / required_skills.len() as f32) * 85.0;
    let diversity_bonus = (candidate.languages.len() as f32 * 2.0).min(15.0);
    (overlap + diversity_bonus).round().min(100.0) as u8
}

/// Repository-name relevance: every keyword of length ≥3 found as a
/// substring of any repository name counts 20 points, clamped at 100.
/// No repository names score 0; no keywords score a neutral 50.
fn repo_relevance_score(candidate: &MatchCandidate, keywords: &[String]) -> u8 {
    if candidate.repo_names.is_empty() {
        return 0;
    }
    if keywords.is_empty() {
        return 50;
    }

    let mut match_count = 0u32;
    for repo_name in &candidate.repo_names {
        let name = repo_name.to_lowercase();
        for keyword in keywords {
            if keyword.len() >= MIN_REPO_KEYWORD_LEN && name.contains(&keyword.to_lowercase()) {
                match_count += 1;
            }
        }
    }

    ((match_count * 20).min(100)) as u8
}

/// Score one candidate against the target.
pub fn score_candidate(candidate: &MatchCandidate, input: &RankingInput) -> MatchResult {
    // Effective skill set: declared skills plus repository-derived
    // languages and topics, case-folded and deduplicated.
    let mut effective_skills: BTreeSet<String> =
        candidate.skills.iter().map(|skill| normalize(skill)).collect();
    effective_skills.extend(candidate.topics.iter().map(|topic| normalize(topic)));
    effective_skills.extend(
        candidate
            .languages
            .keys()
            .map(|language| language.to_lowercase()),
    );

    let (overlap, matched_skills, missing_skills) =
        skill_overlap(&effective_skills, &input.required_skills);
    let language = language_score(candidate, &input.required_skills);
    let repo_relevance = repo_relevance_score(candidate, &input.keywords);
    let complementary = complementary_score(&effective_skills, &input.required_skills);

    let credibility_component = candidate
        .credibility
        .as_ref()
        .map(|summary| summary.final_rank_score);
    let weights = if credibility_component.is_some() {
        RANK_WEIGHTS_WITH_CREDIBILITY
    } else {
        RANK_WEIGHTS
    };

    let weighted = f32::from(overlap) * weights.skill_overlap
        + f32::from(language) * weights.language
        + f32::from(repo_relevance) * weights.repo_relevance
        + f32::from(complementary) * weights.complementary
        + f32::from(credibility_component.unwrap_or(0)) * weights.credibility;
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    let has_handle = if candidate.github_handle.is_some() { 1.0 } else { 0.0 };
    let has_skills = if candidate.skills.is_empty() { 0.0 } else { 1.0 };
    let has_topics = if candidate.topics.is_empty() { 0.0 } else { 1.0 };
    let confidence = has_handle * 0.3 + has_skills * 0.5 + has_topics * 0.2;

    MatchResult {
        user_id: candidate.id.clone(),
        score,
        matched_skills,
        confidence,
        label: MatchLabel::from_score(score),
        details: MatchDetails {
            skill_overlap_score: overlap,
            language_score: language,
            repo_relevance_score: repo_relevance,
            complementary_score: complementary,
            credibility_score: credibility_component,
            missing_skills,
        },
        credibility: candidate.credibility,
    }
}

/// Score and order all candidates: final score descending, confidence
/// descending on ties. Idempotent for identical inputs.
pub fn rank_candidates(candidates: &[MatchCandidate], input: &RankingInput) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = candidates
        .iter()
        .map(|candidate| score_candidate(candidate, input))
        .collect();

    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.confidence.total_cmp(&a.confidence))
    });
    results
}
