use super::{clamp_score, plural};
use crate::credibility::domain::{ExecutionProofBreakdown, ExecutionProofInput};
use crate::store::ProjectRole;

/// Diminishing per-project credit for completions: 1st = 15, 2nd = 12,
/// 3rd = 8, every later one = 5.
const COMPLETION_VALUES: [f32; 3] = [15.0, 12.0, 8.0];

/// Execution Proof pillar: completed and active projects, leadership roles,
/// project complexity, and portfolio presence.
pub fn score_execution_proof(input: &ExecutionProofInput) -> ExecutionProofBreakdown {
    let mut signals = Vec::new();

    let completed_count = input.completed_projects.len() as u32;
    let leader_count = input
        .all_projects
        .iter()
        .filter(|project| project.role == ProjectRole::Leader)
        .count() as u32;
    let member_count = input
        .all_projects
        .iter()
        .filter(|project| project.role == ProjectRole::Member)
        .count() as u32;

    let mut completion_score = 0.0_f32;
    for index in 0..completed_count as usize {
        completion_score += COMPLETION_VALUES.get(index).copied().unwrap_or(5.0);
    }
    completion_score = completion_score.min(40.0);
    if completed_count > 0 {
        signals.push(format!(
            "{completed_count} completed project{} (+{} pts)",
            plural(completed_count),
            completion_score as u8
        ));
    }

    let active_count = input.active_projects.len() as u32;
    let active_score = (active_count as f32 * 5.0).min(10.0);
    if active_count > 0 {
        signals.push(format!(
            "{active_count} active project{}",
            plural(active_count)
        ));
    }

    let mut role_bonus = 0.0_f32;
    if leader_count > 0 {
        role_bonus = (leader_count as f32 * 7.0).min(20.0);
        signals.push(format!(
            "Led {leader_count} project{} (+{} pts)",
            plural(leader_count),
            role_bonus as u8
        ));
    }
    if member_count > 0 {
        role_bonus += (member_count as f32 * 3.0).min(10.0);
    }
    role_bonus = role_bonus.min(25.0);

    // Complexity proxy: more required skills and larger teams mean harder
    // projects. Averaged over completed projects only.
    let avg_complexity = if input.completed_projects.is_empty() {
        0
    } else {
        let total: f32 = input
            .completed_projects
            .iter()
            .map(|project| {
                let skills = (project.required_skill_count as f32 * 6.0).min(30.0);
                let team = (project.team_size.max(1) as f32 * 5.0).min(30.0);
                (skills + team).min(100.0)
            })
            .sum();
        (total / input.completed_projects.len() as f32).round() as u8
    };
    let complexity_score = ((f32::from(avg_complexity) * 0.15).round()).min(15.0);

    let portfolio_bonus: u8 = if input.has_portfolio { 10 } else { 0 };
    if input.has_portfolio {
        signals.push("Portfolio link provided (+10 pts)".to_string());
    }

    let score = clamp_score(
        completion_score + active_score + role_bonus + complexity_score
            + f32::from(portfolio_bonus),
    );

    ExecutionProofBreakdown {
        score,
        completed_count,
        leader_count,
        avg_complexity,
        role_bonus: role_bonus.round() as u8,
        portfolio_bonus,
        signals,
    }
}
