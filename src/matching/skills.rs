//! Skill-level scoring primitives shared by the pairwise compatibility
//! scorer and the candidate-ranking engine. All heuristics are deterministic
//! and operate on case-folded skill names.

use std::collections::BTreeSet;

/// Fixed relationship table mapping a skill to related/adjacent skills.
/// Used to award partial credit when a requirement has no direct match.
pub fn related_skills(skill: &str) -> &'static [&'static str] {
    match skill {
        "react" => &[
            "typescript",
            "javascript",
            "redux",
            "react-query",
            "nextjs",
            "vite",
            "tailwind",
            "css",
        ],
        "vue" => &["typescript", "javascript", "vuex", "nuxt", "css"],
        "angular" => &["typescript", "javascript", "rxjs", "ngrx"],
        "typescript" => &["javascript", "react", "node", "express", "nestjs"],
        "javascript" => &["typescript", "react", "vue", "angular", "node", "express"],
        "python" => &[
            "django",
            "fastapi",
            "flask",
            "ml",
            "ai",
            "tensorflow",
            "pytorch",
            "pandas",
            "numpy",
        ],
        "machine learning" => &[
            "python",
            "tensorflow",
            "pytorch",
            "scikit-learn",
            "data science",
            "ai",
        ],
        "ai" => &["python", "machine learning", "tensorflow", "pytorch", "nlp"],
        "node" => &["javascript", "typescript", "express", "nestjs", "mongodb"],
        "express" => &["node", "javascript", "typescript", "mongodb", "postgresql"],
        "postgresql" => &["sql", "node", "python", "supabase", "prisma"],
        "mongodb" => &["node", "javascript", "express", "mongoose"],
        "rust" => &["systems programming", "webassembly", "c++"],
        "go" => &["microservices", "docker", "kubernetes", "backend"],
        "docker" => &["kubernetes", "devops", "ci/cd", "linux"],
        "kubernetes" => &["docker", "devops", "cloud", "aws", "gcp"],
        "design" => &["figma", "ui/ux", "css", "tailwind", "sketch"],
        "figma" => &["design", "ui/ux", "prototyping"],
        _ => &[],
    }
}

pub(crate) fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Percentage of required skills the user covers, with the matched and
/// missing requirement lists. An empty requirement set is a full match;
/// an empty skill set against real requirements scores zero.
pub fn skill_overlap(
    user_skills: &BTreeSet<String>,
    required_skills: &[String],
) -> (u8, Vec<String>, Vec<String>) {
    if required_skills.is_empty() {
        return (100, Vec::new(), Vec::new());
    }
    if user_skills.is_empty() {
        return (0, Vec::new(), required_skills.to_vec());
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for skill in required_skills {
        if user_skills.contains(&normalize(skill)) {
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }

    let score =
        ((matched.len() as f32 / required_skills.len() as f32) * 100.0).round() as u8;
    (score, matched, missing)
}

/// Credit for related-but-not-identical skills: a direct match counts 100
/// per requirement, otherwise up to 60 from related skills (20 each),
/// averaged across all requirements.
pub fn complementary_score(user_skills: &BTreeSet<String>, required_skills: &[String]) -> u8 {
    if required_skills.is_empty() {
        return 100;
    }
    if user_skills.is_empty() {
        return 0;
    }

    let mut total = 0.0_f32;
    for skill in required_skills {
        let required = normalize(skill);
        if user_skills.contains(&required) {
            total += 100.0;
            continue;
        }
        let matching_related = related_skills(required.as_str())
            .iter()
            .filter(|related| user_skills.contains(**related))
            .count() as f32;
        if matching_related > 0.0 {
            total += (matching_related * 20.0).min(60.0);
        }
    }

    (total / required_skills.len() as f32).round() as u8
}

fn availability_rank(availability: &str) -> u8 {
    match availability.to_lowercase().as_str() {
        "full-time" => 4,
        "part-time" => 3,
        "weekends" => 2,
        "evenings" => 1,
        _ => 2,
    }
}

/// Availability compatibility: full score when the user's tier meets the
/// target's, 70 one tier below, 40 otherwise. No constraint means no
/// penalty.
pub fn availability_score(user: Option<&str>, required: Option<&str>) -> u8 {
    let (Some(user), Some(required)) = (user, required) else {
        return 100;
    };

    let user_rank = availability_rank(user);
    let required_rank = availability_rank(required);
    if user_rank >= required_rank {
        100
    } else if user_rank + 1 == required_rank {
        70
    } else {
        40
    }
}

/// Parse a "UTC±H:MM" offset into fractional hours. Malformed values read
/// as UTC+0, matching the tolerant behavior of the rest of the pipeline.
fn parse_utc_offset(timezone: &str) -> f32 {
    let Some(rest) = timezone.strip_prefix("UTC") else {
        return 0.0;
    };
    let (sign, rest) = match rest.as_bytes().first() {
        Some(b'+') => (1.0, &rest[1..]),
        Some(b'-') => (-1.0, &rest[1..]),
        _ => return 0.0,
    };
    let Some((hours, minutes)) = rest.split_once(':') else {
        return 0.0;
    };
    let (Ok(hours), Ok(minutes)) = (hours.parse::<f32>(), minutes.parse::<f32>()) else {
        return 0.0;
    };
    sign * (hours + minutes / 60.0)
}

/// Timezone compatibility from absolute offset difference: ≤2h → 100,
/// ≤5h → 75, ≤8h → 50, else 25. Unspecified or identical zones score 100.
pub fn timezone_score(user: Option<&str>, preferred: Option<&str>) -> u8 {
    let (Some(user), Some(preferred)) = (user, preferred) else {
        return 100;
    };
    if user == preferred {
        return 100;
    }

    let diff = (parse_utc_offset(user) - parse_utc_offset(preferred)).abs();
    if diff <= 2.0 {
        100
    } else if diff <= 5.0 {
        75
    } else if diff <= 8.0 {
        50
    } else {
        25
    }
}
