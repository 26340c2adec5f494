use std::collections::BTreeSet;

use super::{clamp_score, plural};
use crate::credibility::domain::{SocialValidationBreakdown, SocialValidationInput};
use crate::store::UserId;

/// Endorsers whose own credibility reaches this bar count as high-quality.
const CREDIBLE_ENDORSER_THRESHOLD: u8 = 60;

/// Social Validation pillar: endorsements with diminishing returns, endorser
/// quality, and collaborator breadth.
pub fn score_social_validation(input: &SocialValidationInput) -> SocialValidationBreakdown {
    let mut signals = Vec::new();

    let endorsement_count = input.endorsements.len() as u32;
    let unique_endorsers = input
        .endorsements
        .iter()
        .map(|endorsement| &endorsement.endorser_id)
        .collect::<BTreeSet<&UserId>>()
        .len() as u32;

    // Tiered credit: 8 pts each for the first five endorsers, 4 for the next
    // five, 2 thereafter.
    let diminishing_returns = unique_endorsers > 5;
    let mut endorsement_score = 0.0_f32;
    for index in 0..unique_endorsers {
        endorsement_score += match index {
            0..=4 => 8.0,
            5..=9 => 4.0,
            _ => 2.0,
        };
    }
    endorsement_score = endorsement_score.min(50.0);

    if endorsement_count > 0 {
        signals.push(format!(
            "{endorsement_count} endorsement{} from {unique_endorsers} unique peer{}",
            plural(endorsement_count),
            plural(unique_endorsers)
        ));
    }
    if diminishing_returns {
        signals.push("Endorsement diminishing returns applied".to_string());
    }

    let credible_endorsements = input
        .endorsements
        .iter()
        .filter(|endorsement| {
            endorsement.endorser_credibility.unwrap_or(0) >= CREDIBLE_ENDORSER_THRESHOLD
        })
        .count() as u32;
    let endorser_quality_bonus = ((credible_endorsements * 5).min(15)) as u8;
    if credible_endorsements > 0 {
        signals.push(format!(
            "{credible_endorsements} endorsement{} from credible users (+{endorser_quality_bonus} pts)",
            plural(credible_endorsements)
        ));
    }

    let repeat_collaborator_count = input.repeat_collaborators;
    let collab_score = ((repeat_collaborator_count * 7).min(20)) as u8;
    if repeat_collaborator_count > 0 {
        signals.push(format!(
            "{repeat_collaborator_count} repeat collaborator{} (+{collab_score} pts)",
            plural(repeat_collaborator_count)
        ));
    }

    let unique_collaborator_count = input.unique_collaborators.len() as u32;
    let diversity_score = ((unique_collaborator_count * 3).min(15)) as u8;
    if unique_collaborator_count > 0 {
        signals.push(format!(
            "Worked with {unique_collaborator_count} unique collaborator{}",
            plural(unique_collaborator_count)
        ));
    }

    let score = clamp_score(
        endorsement_score
            + f32::from(endorser_quality_bonus)
            + f32::from(collab_score)
            + f32::from(diversity_score),
    );

    SocialValidationBreakdown {
        score,
        endorsement_count,
        unique_endorsers,
        repeat_collaborator_count,
        endorser_quality_bonus,
        diminishing_returns,
        signals,
    }
}
