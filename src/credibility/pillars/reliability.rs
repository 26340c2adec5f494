use chrono::{DateTime, Utc};

use super::{clamp_score, plural};
use crate::credibility::domain::{ReliabilityBreakdown, ReliabilityInput};

fn days_since(moment: DateTime<Utc>, now: DateTime<Utc>) -> f32 {
    let seconds = (now - moment).num_seconds().max(0);
    seconds as f32 / 86_400.0
}

/// Reliability pillar: completion rate, invite responsiveness, abandonment
/// penalties, and recency of activity. Evaluated relative to `now` so the
/// result is deterministic under test.
pub fn score_reliability(input: &ReliabilityInput, now: DateTime<Utc>) -> ReliabilityBreakdown {
    let mut signals = Vec::new();

    let completion_rate: u8 = if input.projects_joined > 0 {
        ((input.projects_completed as f32 / input.projects_joined as f32) * 100.0).round() as u8
    } else {
        // Neutral for users who have not joined anything yet.
        50
    };
    let completion_score = (f32::from(completion_rate) * 0.4).round();
    signals.push(format!("Project completion rate: {completion_rate}%"));

    let mut invite_response_rate: u8 = 100;
    let invite_actions = input.invites_accepted + input.invites_rejected + input.invites_ignored;
    if input.invites_received > 0 && invite_actions > 0 {
        // Accepting and rejecting both count as responding.
        let responded = input.invites_accepted + input.invites_rejected;
        invite_response_rate =
            ((responded as f32 / input.invites_received as f32) * 100.0).round() as u8;
    }
    let response_score = (f32::from(invite_response_rate) * 0.2).round();
    if input.invites_received > 0 {
        signals.push(format!("Invite response rate: {invite_response_rate}%"));
    }

    let mut dropout_penalty: u8 = 0;
    if input.projects_abandoned > 0 {
        dropout_penalty = ((input.projects_abandoned * 10).min(30)) as u8;
        signals.push(format!(
            "-{dropout_penalty} pts: {} abandoned project{}",
            input.projects_abandoned,
            plural(input.projects_abandoned)
        ));
    }

    let mut recency_bonus: u8 = 0;
    if let Some(last_active) = input.last_active_at {
        let days_inactive = days_since(last_active, now);
        recency_bonus = if days_inactive <= 1.0 {
            20
        } else if days_inactive <= 7.0 {
            15
        } else if days_inactive <= 14.0 {
            10
        } else if days_inactive <= 30.0 {
            5
        } else {
            0
        };
        if recency_bonus > 0 {
            let when = if days_inactive <= 1.0 {
                "today".to_string()
            } else {
                format!("{} days ago", days_inactive.round() as u32)
            };
            signals.push(format!("Active {when} (+{recency_bonus})"));
        }
    }

    let mut inactivity_penalty: u8 = 0;
    match input.last_active_at {
        Some(last_active) => {
            let days_inactive = days_since(last_active, now);
            if days_inactive > 60.0 {
                inactivity_penalty = ((days_inactive - 60.0) * 0.3).round().min(20.0) as u8;
                signals.push(format!(
                    "-{inactivity_penalty} pts: inactive for {} days",
                    days_inactive.round() as u32
                ));
            }
        }
        None => {
            // Account exists but never produced any activity.
            if days_since(input.account_created_at, now) > 7.0 {
                inactivity_penalty = 10;
                signals.push("-10 pts: no recorded activity".to_string());
            }
        }
    }

    let score = clamp_score(
        completion_score + response_score + f32::from(recency_bonus)
            - f32::from(dropout_penalty)
            - f32::from(inactivity_penalty),
    );

    ReliabilityBreakdown {
        score,
        completion_rate,
        invite_response_rate,
        dropout_penalty,
        recency_bonus,
        inactivity_penalty,
        signals,
    }
}
