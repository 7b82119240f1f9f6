//! Sliding-window pairing over the sorted candidate sequence.

use log::debug;

use crate::candidate::CandidateTarget;
use crate::params::PairParams;
use crate::resolve::{resolve_pair, TargetPair};

/// Why a pairing attempt between two adjacent candidates was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    /// Angle signs do not match the configured lean convention.
    Lean,
    /// Mirror-angle mismatch at or above the tolerance.
    Tolerance,
}

/// Outcome of feeding one candidate to the engine.
#[derive(Clone, Debug)]
pub enum PairStep {
    /// First candidate of the scan; there is nothing to compare against.
    First,
    /// Attempt against the previous candidate rejected; the scan continues.
    Rejected(RejectReason),
    /// Attempt accepted and resolved.
    Paired(Box<TargetPair>),
}

/// Pairing state machine: awaiting the first candidate, then holding a
/// previous one.
///
/// Every candidate after the first is one pairing attempt against the
/// immediately preceding candidate, and then becomes the new previous
/// regardless of the attempt's outcome. The window never widens: candidates
/// are never compared to anything but their direct left neighbor, and never
/// to themselves.
pub struct PairingEngine<'a> {
    params: &'a PairParams,
    frame_width: f32,
    previous: Option<CandidateTarget>,
}

impl<'a> PairingEngine<'a> {
    pub fn new(params: &'a PairParams, frame_width: f32) -> Self {
        Self {
            params,
            frame_width,
            previous: None,
        }
    }

    /// Feed the next candidate of the left-to-right sequence.
    pub fn step(&mut self, current: CandidateTarget) -> PairStep {
        let outcome = match &self.previous {
            None => PairStep::First,
            Some(previous) => self.attempt(previous, &current),
        };
        self.previous = Some(current);
        outcome
    }

    fn attempt(&self, previous: &CandidateTarget, current: &CandidateTarget) -> PairStep {
        if !self
            .params
            .lean
            .accepts(previous.angle_deg, current.angle_deg)
        {
            debug!(
                "pair rejected on lean: {:.1} deg vs {:.1} deg",
                previous.angle_deg, current.angle_deg
            );
            return PairStep::Rejected(RejectReason::Lean);
        }

        let mismatch = (previous.angle_deg.abs() - current.angle_deg.abs()).abs();
        if mismatch >= self.params.angle_tolerance_deg {
            debug!("pair rejected on mirror mismatch: {mismatch:.1} deg");
            return PairStep::Rejected(RejectReason::Tolerance);
        }

        PairStep::Paired(Box::new(resolve_pair(previous, current, self.frame_width)))
    }
}

/// Run the whole scan as a fold over the sorted candidates, collecting the
/// accepted pairs. Zero or one candidates produce zero pairs; that is a
/// quiet frame, not an error.
pub fn pair_candidates(
    candidates: &[CandidateTarget],
    frame_width: f32,
    params: &PairParams,
) -> Vec<TargetPair> {
    let mut engine = PairingEngine::new(params, frame_width);
    candidates
        .iter()
        .filter_map(|candidate| match engine.step(candidate.clone()) {
            PairStep::Paired(pair) => Some(*pair),
            PairStep::First | PairStep::Rejected(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LeanConvention;
    use nalgebra::Point2;
    use retrotape_core::{Side, SidePair};

    /// Candidate with a fixed midline angle and unremarkable side geometry
    /// at the given x position.
    fn candidate(min_x: f32, angle_deg: f32) -> CandidateTarget {
        CandidateTarget {
            area: 1500.0,
            min_x,
            sides: SidePair {
                first: Side {
                    a: Point2::new(min_x, 100.0),
                    b: Point2::new(min_x + 20.0, 100.0),
                },
                second: Side {
                    a: Point2::new(min_x, 200.0),
                    b: Point2::new(min_x + 20.0, 200.0),
                },
            },
            angle_deg,
        }
    }

    #[test]
    fn four_candidates_mean_exactly_three_attempts() {
        let params = PairParams::default();
        let mut engine = PairingEngine::new(&params, 640.0);

        let outcomes: Vec<PairStep> = [
            candidate(0.0, -10.0),
            candidate(100.0, 12.0),
            candidate(200.0, -11.0),
            candidate(300.0, 9.0),
        ]
        .into_iter()
        .map(|c| engine.step(c))
        .collect();

        assert!(matches!(outcomes[0], PairStep::First));
        let attempts = outcomes
            .iter()
            .filter(|o| !matches!(o, PairStep::First))
            .count();
        assert_eq!(attempts, 3);
        // (1 vs 0) and (3 vs 2) pair up; (2 vs 1) fails the lean rule.
        assert!(matches!(outcomes[1], PairStep::Paired(_)));
        assert!(matches!(
            outcomes[2],
            PairStep::Rejected(RejectReason::Lean)
        ));
        assert!(matches!(outcomes[3], PairStep::Paired(_)));
    }

    #[test]
    fn near_mirror_angles_pair_and_wide_ones_do_not() {
        let params = PairParams::default();

        let accepted = pair_candidates(
            &[candidate(0.0, -10.0), candidate(100.0, 12.0)],
            640.0,
            &params,
        );
        assert_eq!(accepted.len(), 1);

        let rejected = pair_candidates(
            &[candidate(0.0, -10.0), candidate(100.0, 40.0)],
            640.0,
            &params,
        );
        assert!(rejected.is_empty());
    }

    #[test]
    fn mismatch_equal_to_tolerance_is_rejected() {
        let params = PairParams::default();
        let pairs = pair_candidates(
            &[candidate(0.0, -10.0), candidate(100.0, 25.0)],
            640.0,
            &params,
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn outward_convention_flips_the_sign_rule() {
        let params = PairParams {
            lean: LeanConvention::Outward,
            ..PairParams::default()
        };
        let pairs = pair_candidates(
            &[candidate(0.0, 10.0), candidate(100.0, -12.0)],
            640.0,
            &params,
        );
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn lone_candidate_produces_no_pairs() {
        let params = PairParams::default();
        assert!(pair_candidates(&[], 640.0, &params).is_empty());
        assert!(pair_candidates(&[candidate(0.0, -10.0)], 640.0, &params).is_empty());
    }

    #[test]
    fn rejection_does_not_break_the_sliding_window() {
        // A rejected middle candidate still becomes the previous for the
        // next attempt.
        let params = PairParams::default();
        let pairs = pair_candidates(
            &[
                candidate(0.0, -10.0),
                candidate(100.0, -9.0), // rejected against 0
                candidate(200.0, 10.0), // pairs against 100
            ],
            640.0,
            &params,
        );
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].previous_top.x, 120.0);
    }
}
