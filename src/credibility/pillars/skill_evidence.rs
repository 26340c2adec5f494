use super::{clamp_score, plural};
use crate::credibility::domain::{SkillEvidenceBreakdown, SkillEvidenceInput};

/// Weight given to purely self-declared skills. Unverified claims only ever
/// count at half strength.
const DECLARED_DECAY: f32 = 0.5;

/// Skill Evidence pillar: declared skills, verified skills, and
/// repository-derived language/topic signals.
pub fn score_skill_evidence(input: &SkillEvidenceInput) -> SkillEvidenceBreakdown {
    let mut signals = Vec::new();

    let declared_count = input.declared_skills.len() as u32;
    let mut declared_score = 0.0;
    if declared_count > 0 {
        // Cap at 8 skills to prevent gaming.
        let capped = declared_count.min(8) as f32;
        declared_score = (capped / 8.0) * 40.0 * DECLARED_DECAY;
        signals.push(format!(
            "{declared_count} self-declared skill{}",
            plural(declared_count)
        ));
    }

    let verified_count = input.verified_skills.len() as u32;
    let mut verification_bonus = 0.0_f32;
    if verified_count > 0 {
        for verified in &input.verified_skills {
            verification_bonus +=
                verified.verification.confidence() * verified.proficiency.multiplier() * 12.0;
        }
        verification_bonus = verification_bonus.min(45.0);
        signals.push(format!(
            "{verified_count} verified skill{} (+{} pts)",
            plural(verified_count),
            verification_bonus.round() as u8
        ));
    }

    let language_count = input.languages.len() as u32;
    let topic_count = input.topics.len() as u32;
    let repo_signal_count = language_count + topic_count;

    let mut repo_score = 0.0_f32;
    if language_count > 0 {
        repo_score += language_count.min(10) as f32 * 1.5;
        signals.push(format!(
            "{language_count} repository language{} detected",
            plural(language_count)
        ));
    }
    if topic_count > 0 {
        repo_score += topic_count.min(8) as f32;
        signals.push(format!(
            "{topic_count} repository topic{} found",
            plural(topic_count)
        ));
    }
    repo_score = repo_score.min(25.0);

    // Declared skills without a matching verification erode confidence.
    let verified_names: std::collections::BTreeSet<String> = input
        .verified_skills
        .iter()
        .map(|verified| verified.skill.to_lowercase())
        .collect();
    let unverified_count = input
        .declared_skills
        .iter()
        .filter(|skill| !verified_names.contains(&skill.to_lowercase()))
        .count() as u32;
    let confidence_decay = if unverified_count > 0 {
        (unverified_count * 2).min(15) as u8
    } else {
        0
    };
    if confidence_decay > 0 {
        signals.push(format!(
            "-{confidence_decay} pts: {unverified_count} unverified skill{}",
            plural(unverified_count)
        ));
    }

    let score = clamp_score(
        declared_score + verification_bonus + repo_score - f32::from(confidence_decay),
    );

    SkillEvidenceBreakdown {
        score,
        declared_count,
        verified_count,
        repo_signal_count,
        verification_bonus: verification_bonus.round() as u8,
        confidence_decay,
        signals,
    }
}
