//! The five pillar scorers. Each is a pure function from a typed input
//! snapshot to a 0-100 score with an explainable breakdown; none performs
//! I/O, so every pillar can be replaced or tested in isolation.

mod consistency;
mod execution_proof;
mod reliability;
mod skill_evidence;
mod social_validation;

pub use consistency::score_consistency;
pub use execution_proof::score_execution_proof;
pub use reliability::score_reliability;
pub use skill_evidence::score_skill_evidence;
pub use social_validation::score_social_validation;

/// Round, then clamp into the 0-100 scoring range.
pub(crate) fn clamp_score(value: f32) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Suffix for pluralizing signal strings.
pub(crate) fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
