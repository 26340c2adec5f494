//! Composite credibility scorer.
//!
//! Combines the five pillar scores into a weighted credibility score,
//! discounts it by a data-volume confidence multiplier, and derives the
//! final rank score used everywhere candidates are ordered.

use chrono::{DateTime, Utc};

use super::domain::{
    CredibilityBreakdown, CredibilityInput, CredibilityLabel, CredibilitySummary,
    PillarBreakdowns, PILLAR_WEIGHTS,
};
use super::pillars::{
    score_consistency, score_execution_proof, score_reliability, score_skill_evidence,
    score_social_validation,
};

/// Maximum number of signal strings surfaced on a breakdown.
const TOP_SIGNAL_LIMIT: usize = 5;

/// Compute the full credibility breakdown for one user, evaluated at the
/// current wall-clock instant.
pub fn compute_credibility(input: &CredibilityInput) -> CredibilityBreakdown {
    compute_credibility_at(input, Utc::now())
}

/// Compute the full credibility breakdown relative to an explicit `now`.
/// Pure and deterministic; a zero-data input yields the baseline breakdown
/// rather than an error.
pub fn compute_credibility_at(
    input: &CredibilityInput,
    now: DateTime<Utc>,
) -> CredibilityBreakdown {
    let skill_evidence = score_skill_evidence(&input.skill_evidence);
    let execution_proof = score_execution_proof(&input.execution_proof);
    let social_validation = score_social_validation(&input.social_validation);
    let reliability = score_reliability(&input.reliability, now);
    let consistency = score_consistency(&input.consistency);

    let weighted = f32::from(skill_evidence.score) * PILLAR_WEIGHTS.skill_evidence
        + f32::from(execution_proof.score) * PILLAR_WEIGHTS.execution_proof
        + f32::from(social_validation.score) * PILLAR_WEIGHTS.social_validation
        + f32::from(reliability.score) * PILLAR_WEIGHTS.reliability
        + f32::from(consistency.score) * PILLAR_WEIGHTS.consistency;
    let credibility_score = weighted.round().clamp(0.0, 100.0) as u8;

    let (confidence_multiplier, data_points) = confidence_multiplier(input, now);
    let final_rank_score = (f32::from(credibility_score) * confidence_multiplier).round() as u8;

    // Execution carries the strongest evidence, so its signals lead.
    let mut top_signals: Vec<String> = Vec::new();
    for pillar_signals in [
        &execution_proof.signals,
        &skill_evidence.signals,
        &reliability.signals,
        &social_validation.signals,
        &consistency.signals,
    ] {
        for signal in pillar_signals {
            if top_signals.len() == TOP_SIGNAL_LIMIT {
                break;
            }
            top_signals.push(signal.clone());
        }
    }

    CredibilityBreakdown {
        credibility_score,
        confidence_multiplier,
        final_rank_score,
        data_points,
        pillars: PillarBreakdowns {
            skill_evidence,
            execution_proof,
            social_validation,
            reliability,
            consistency,
        },
        label: CredibilityLabel::from_score(final_rank_score),
        top_signals,
        computed_at: now,
    }
}

/// Summary variant for callers that only need the ranking fields.
pub fn compute_summary(input: &CredibilityInput) -> CredibilitySummary {
    compute_credibility(input).summary()
}

/// Data-volume confidence in [0.1, 1.0], rounded to two decimals, plus the
/// count of contributing data points. Sparse profiles are discounted so they
/// cannot outrank well-evidenced ones on pillar scores alone.
fn confidence_multiplier(input: &CredibilityInput, now: DateTime<Utc>) -> (f32, u32) {
    let mut confidence = 0.0_f32;
    let mut data_points = 0_u32;

    if !input.skill_evidence.declared_skills.is_empty() {
        confidence += 0.15;
        data_points += input.skill_evidence.declared_skills.len() as u32;
    }
    if !input.skill_evidence.verified_skills.is_empty() {
        confidence += 0.15;
        data_points += input.skill_evidence.verified_skills.len() as u32;
    }
    if !input.skill_evidence.languages.is_empty() || !input.skill_evidence.topics.is_empty() {
        confidence += 0.15;
        data_points +=
            (input.skill_evidence.languages.len() + input.skill_evidence.topics.len()) as u32;
    }

    // Completed work earns the full execution credit; active-only profiles
    // get partial credit instead, never both.
    if !input.execution_proof.completed_projects.is_empty() {
        confidence += 0.20;
        data_points += input.execution_proof.completed_projects.len() as u32;
    } else if !input.execution_proof.active_projects.is_empty() {
        confidence += 0.10;
        data_points += input.execution_proof.active_projects.len() as u32;
    }

    if !input.social_validation.endorsements.is_empty() {
        confidence += 0.10;
        data_points += input.social_validation.endorsements.len() as u32;
    }
    if !input.social_validation.unique_collaborators.is_empty() {
        confidence += 0.05;
        data_points += input.social_validation.unique_collaborators.len() as u32;
    }

    if !input.consistency.activity_log.is_empty() {
        confidence += 0.10;
        data_points += input.consistency.activity_log.len() as u32;
    }

    if input.execution_proof.has_portfolio {
        confidence += 0.05;
        data_points += 1;
    }

    let account_age_days = (now - input.reliability.account_created_at).num_days();
    if account_age_days > 7 {
        confidence += 0.05;
    }

    let multiplier = confidence.clamp(0.1, 1.0);
    (((multiplier * 100.0).round()) / 100.0, data_points)
}
