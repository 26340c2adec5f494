use std::collections::BTreeSet;

use chrono::Datelike;

use super::{clamp_score, plural};
use crate::credibility::domain::{ConsistencyBreakdown, ConsistencyInput};

/// Consistency pillar: rewards steady month-over-month activity and a stable
/// skill profile, penalizes burst-only activity patterns.
pub fn score_consistency(input: &ConsistencyInput) -> ConsistencyBreakdown {
    let mut signals = Vec::new();

    // Months since account creation, minimum 1 so ratios stay defined.
    let total_months = (input.account_age_days as f32 / 30.0).ceil().max(1.0) as u32;

    let active_month_set: BTreeSet<(i32, u32)> = input
        .activity_log
        .iter()
        .map(|entry| (entry.at.year(), entry.at.month()))
        .collect();
    let active_months = active_month_set.len() as u32;

    let activity_ratio = (active_months as f32 / total_months as f32).min(1.0);
    let ratio_score = (activity_ratio * 40.0).round();
    signals.push(format!(
        "Active in {active_months}/{total_months} month{}",
        plural(total_months)
    ));

    let mut steadiness_bonus: u8 = 0;
    if active_months >= 3 {
        let mut max_streak: u32 = 1;
        let mut current_streak: u32 = 1;
        let months: Vec<(i32, u32)> = active_month_set.iter().copied().collect();
        for pair in months.windows(2) {
            let (prev_year, prev_month) = pair[0];
            let (year, month) = pair[1];
            let (expected_year, expected_month) = if prev_month == 12 {
                (prev_year + 1, 1)
            } else {
                (prev_year, prev_month + 1)
            };
            if year == expected_year && month == expected_month {
                current_streak += 1;
                max_streak = max_streak.max(current_streak);
            } else {
                current_streak = 1;
            }
        }
        steadiness_bonus = ((max_streak * 6).min(30)) as u8;
        if max_streak >= 3 {
            signals.push(format!(
                "{max_streak}-month activity streak (+{steadiness_bonus} pts)"
            ));
        }
    }

    // Heavy activity concentrated in one or two months of a longer account
    // lifetime reads as a burst, not a habit.
    let entry_count = input.activity_log.len() as u32;
    let mut burst_penalty: u8 = 0;
    if active_months <= 2 && active_months > 0 && entry_count > 10 && total_months > 3 {
        burst_penalty = ((entry_count as f32 / active_months as f32) * 0.5)
            .round()
            .min(20.0) as u8;
        signals.push(format!("-{burst_penalty} pts: burst activity pattern"));
    }

    let mut skill_consistency: u8 = 15;
    if input.skill_changes > 5 {
        skill_consistency = 15u32.saturating_sub((input.skill_changes - 5) * 3) as u8;
        if input.skill_changes > 8 {
            signals.push(format!(
                "Frequent skill changes (-{} pts)",
                15 - skill_consistency
            ));
        }
    }

    let age_bonus = ((total_months as f32 * 1.5).round()).min(15.0) as u8;

    let score = clamp_score(
        ratio_score
            + f32::from(steadiness_bonus)
            + f32::from(skill_consistency)
            + f32::from(age_bonus)
            - f32::from(burst_penalty),
    );

    ConsistencyBreakdown {
        score,
        active_months,
        total_months,
        activity_ratio: (activity_ratio * 100.0).round() / 100.0,
        steadiness_bonus,
        burst_penalty,
        signals,
    }
}
