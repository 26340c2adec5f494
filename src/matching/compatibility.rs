use std::collections::BTreeSet;

use super::domain::{
    CompatibilityDetails, CompatibilityScore, CompatibilityTarget, CompatibilityUser, MatchLabel,
    COMPATIBILITY_WEIGHTS,
};
use super::skills::{
    availability_score, complementary_score, normalize, skill_overlap, timezone_score,
};

/// Pairwise compatibility between one user and one target profile.
/// Deterministic, pure, and independent of the candidate-ranking engine.
pub fn calculate_compatibility(
    user: &CompatibilityUser,
    target: &CompatibilityTarget,
) -> CompatibilityScore {
    let user_skills: BTreeSet<String> = user.skills.iter().map(|skill| normalize(skill)).collect();

    let (overlap, _, missing_skills) = skill_overlap(&user_skills, &target.required_skills);
    let complementary = complementary_score(&user_skills, &target.required_skills);
    let availability = availability_score(
        user.availability.as_deref(),
        target.availability_required.as_deref(),
    );
    let timezone = timezone_score(
        user.timezone.as_deref(),
        target.timezone_preferred.as_deref(),
    );

    let weighted = f32::from(overlap) * COMPATIBILITY_WEIGHTS.skill_overlap
        + f32::from(complementary) * COMPATIBILITY_WEIGHTS.complementary
        + f32::from(availability) * COMPATIBILITY_WEIGHTS.availability
        + f32::from(timezone) * COMPATIBILITY_WEIGHTS.timezone;
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    CompatibilityScore {
        target_id: target.id.clone(),
        score,
        label: MatchLabel::from_score(score),
        details: CompatibilityDetails {
            skill_overlap: overlap,
            complementary,
            availability,
            timezone,
            missing_skills,
        },
    }
}
