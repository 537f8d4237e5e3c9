//! Ranking candidate regions against a reference glyph.

use crate::{BinaryMask, CandidateRegion, ReferenceMask};

/// A candidate paired with its distance to the reference.
///
/// Lower scores are better; 0 means pixel-identical.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub score: f64,
    pub region: CandidateRegion,
}

/// Mean absolute pixel difference between two masks.
///
/// Ink counts as 0.0 and background as 1.0, so for binary masks this is the
/// fraction of cells that disagree.
///
/// # Panics
///
/// Panics if the masks have different dimensions. Windows are sampled at the
/// reference box size, so this only happens on misuse.
pub fn similarity(candidate: &BinaryMask, reference: &BinaryMask) -> f64 {
    assert_eq!(
        candidate.dimensions(),
        reference.dimensions(),
        "candidate and reference must be the same size"
    );
    let area = candidate.width() as usize * candidate.height() as usize;
    if area == 0 {
        return 0.0;
    }
    let mismatched = candidate.cells().zip(reference.cells()).filter(|(a, b)| a != b).count();
    mismatched as f64 / area as f64
}

/// Scores every candidate and orders them best first.
///
/// The sort is stable, so candidates with equal scores keep their sampling
/// order.
pub fn rank(candidates: Vec<CandidateRegion>, reference: &ReferenceMask) -> Vec<ScoredCandidate> {
    let mut scored: Vec<_> = candidates
        .into_iter()
        .map(|region| ScoredCandidate { score: similarity(region.mask(), reference.mask()), region })
        .collect();
    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored
}

/// The best scoring candidate, or `None` if there are no candidates.
pub fn best_match(
    candidates: Vec<CandidateRegion>,
    reference: &ReferenceMask,
) -> Option<ScoredCandidate> {
    rank(candidates, reference).into_iter().next()
}
