//! Stateless classification and transition detection

use crate::EngineError;
use geodrop_domain::traits::SpatialIndex;
use geodrop_domain::{
    DistanceMethod, GeoError, LiveLocation, ProximityResult, Target, TargetId, Tier, Transition,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why a target was left out of a classification
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// The target's coordinate is out of range or not finite
    #[error("{0}")]
    InvalidCoordinate(GeoError),

    /// An earlier target in the same set already uses this id
    #[error("duplicate target id")]
    DuplicateId,
}

/// A target excluded from a classification
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Excluded target
    pub target_id: TargetId,
    /// Why it was excluded
    pub reason: RejectReason,
}

impl Rejection {
    /// Convert into the engine-level error
    pub fn into_error(self) -> EngineError {
        match self.reason {
            RejectReason::InvalidCoordinate(source) => EngineError::InvalidCoordinate {
                target_id: self.target_id,
                source,
            },
            RejectReason::DuplicateId => EngineError::DuplicateTarget(self.target_id),
        }
    }
}

/// Results of classifying one fix against a target set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// One result per valid target, in input order
    pub results: Vec<ProximityResult>,
    /// Targets excluded from `results`
    pub rejected: Vec<Rejection>,
}

impl Classification {
    /// Look up the result for a target
    pub fn get(&self, id: &TargetId) -> Option<&ProximityResult> {
        self.results.iter().find(|r| &r.target_id == id)
    }

    /// Results closest first; ties keep input order
    pub fn sorted_by_distance(&self) -> Vec<&ProximityResult> {
        let mut sorted: Vec<&ProximityResult> = self.results.iter().collect();
        sorted.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        sorted
    }

    /// Results in exactly `tier`
    pub fn in_tier(&self, tier: Tier) -> impl Iterator<Item = &ProximityResult> {
        self.results.iter().filter(move |r| r.tier == tier)
    }

    /// Results no farther than `max_m`, in input order
    pub fn within(&self, max_m: f64) -> Vec<&ProximityResult> {
        self.results.iter().filter(|r| r.distance_m <= max_m).collect()
    }

    /// The closest result no farther than `max_m`
    ///
    /// On equal distances the earlier target wins.
    pub fn nearest_within(&self, max_m: f64) -> Option<&ProximityResult> {
        self.results
            .iter()
            .filter(|r| r.distance_m <= max_m)
            .fold(None, |best: Option<&ProximityResult>, r| match best {
                Some(b) if b.distance_m <= r.distance_m => Some(b),
                _ => Some(r),
            })
    }

    /// Rejections as engine errors
    pub fn errors(&self) -> Vec<EngineError> {
        self.rejected.iter().cloned().map(Rejection::into_error).collect()
    }

    /// Reorder results closest first
    pub(crate) fn sort_by_distance(&mut self) {
        // Vec::sort_by is stable, so ties keep input order
        self.results.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    }
}

/// Classify every target against a fix using haversine distances
///
/// Fails only when the fix itself is invalid. A target with a bad coordinate,
/// or one repeating an id already seen earlier in `targets`, is reported in
/// [`Classification::rejected`] and the rest are still classified. Result ids
/// are therefore unique.
///
/// # Examples
///
/// ```
/// use geodrop_domain::{GeoPoint, LiveLocation, Target, Tier, TierRadii};
/// use geodrop_engine::classify;
///
/// let here = LiveLocation::new(GeoPoint::new(12.979272, 77.727549).unwrap(), 1);
/// let targets = vec![
///     Target::new("near", GeoPoint::new(12.979171, 77.727667).unwrap(), TierRadii::new(50.0, 10.0)),
///     Target::new("bad", GeoPoint::new_unchecked(200.0, 0.0), TierRadii::new(50.0, 10.0)),
/// ];
///
/// let classification = classify(&here, &targets).unwrap();
/// assert_eq!(classification.results.len(), 1);
/// assert_eq!(classification.results[0].tier, Tier::Nearby);
/// assert_eq!(classification.rejected.len(), 1);
/// ```
pub fn classify(location: &LiveLocation, targets: &[Target]) -> Result<Classification, EngineError> {
    classify_with(location, targets, DistanceMethod::Haversine)
}

/// Classify every target against a fix using the given distance formula
pub fn classify_with(
    location: &LiveLocation,
    targets: &[Target],
    method: DistanceMethod,
) -> Result<Classification, EngineError> {
    location.point.validate().map_err(EngineError::InvalidLocation)?;
    Ok(classify_each(location, targets, method, |_, target, distance_m| {
        target.radii.tier_for(distance_m)
    }))
}

/// Classify with a spatial index narrowing the candidates
///
/// `index` must have been rebuilt from `targets`. Candidates are taken within
/// the largest nearby radius of the set; every other target is reported `Far`.
/// With a correct index the result equals [`classify_with`].
///
/// The index decides tiers only. Distances are still measured for every target
/// so results stay complete and sortable, which means this costs as much as a
/// linear pass and does not speed up large sets.
pub fn classify_indexed<I: SpatialIndex + ?Sized>(
    location: &LiveLocation,
    targets: &[Target],
    index: &I,
    method: DistanceMethod,
) -> Result<Classification, EngineError> {
    location.point.validate().map_err(EngineError::InvalidLocation)?;

    let reach_m = targets
        .iter()
        .map(|t| t.radii.nearby_m)
        .filter(|r| r.is_finite())
        .fold(0.0_f64, f64::max);
    let mut candidate = vec![false; targets.len()];
    for i in index.candidates(location.point, reach_m) {
        if let Some(slot) = candidate.get_mut(i) {
            *slot = true;
        }
    }

    Ok(classify_each(location, targets, method, |i, target, distance_m| {
        if candidate[i] {
            target.radii.tier_for(distance_m)
        } else {
            Tier::Far
        }
    }))
}

fn classify_each<F>(location: &LiveLocation, targets: &[Target], method: DistanceMethod, tier_of: F) -> Classification
where
    F: Fn(usize, &Target, f64) -> Tier,
{
    let mut classification = Classification {
        results: Vec::with_capacity(targets.len()),
        rejected: Vec::new(),
    };
    let mut seen: HashSet<&TargetId> = HashSet::with_capacity(targets.len());

    for (i, target) in targets.iter().enumerate() {
        let reject = |reason| Rejection {
            target_id: target.id.clone(),
            reason,
        };
        if !seen.insert(&target.id) {
            classification.rejected.push(reject(RejectReason::DuplicateId));
            continue;
        }
        match measure(location, target, method) {
            Ok(distance_m) => classification.results.push(ProximityResult {
                target_id: target.id.clone(),
                distance_m,
                tier: tier_of(i, target, distance_m),
            }),
            Err(error) => classification
                .rejected
                .push(reject(RejectReason::InvalidCoordinate(error))),
        }
    }
    classification
}

fn measure(location: &LiveLocation, target: &Target, method: DistanceMethod) -> Result<f64, GeoError> {
    target.location.validate()?;
    Ok(method.measure(location.point, target.location))
}

/// Tier changes between two consecutive classifications
///
/// A target seen for the first time counts as coming from `Far`. A target
/// missing from `current` (removed after a claim) produces nothing. Output
/// follows the order of `current`; unchanged tiers produce nothing.
pub fn diff_tiers(previous: &[ProximityResult], current: &[ProximityResult]) -> Vec<Transition> {
    let before: HashMap<&TargetId, Tier> = previous.iter().map(|r| (&r.target_id, r.tier)).collect();

    current
        .iter()
        .filter_map(|r| {
            let from = before.get(&r.target_id).copied().unwrap_or(Tier::Far);
            (from != r.tier).then(|| Transition {
                target_id: r.target_id.clone(),
                from,
                to: r.tier,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodrop_domain::{GeoPoint, LatitudeBands, LinearScan, TierRadii};

    fn fix(lat: f64, lon: f64) -> LiveLocation {
        LiveLocation::new(GeoPoint::new_unchecked(lat, lon), 1)
    }

    fn target(id: &str, lat: f64, lon: f64) -> Target {
        Target::new(id, GeoPoint::new_unchecked(lat, lon), TierRadii::new(50.0, 10.0))
    }

    fn result(id: &str, distance_m: f64, tier: Tier) -> ProximityResult {
        ProximityResult {
            target_id: id.into(),
            distance_m,
            tier,
        }
    }

    fn dcrew_targets() -> Vec<Target> {
        vec![
            target("4", 12.979025, 77.728035),
            target("5", 12.978735, 77.727962),
            target("7", 12.979232, 77.728069),
            target("here", 12.979171, 77.727667),
        ]
    }

    #[test]
    fn test_classify_preserves_input_order() {
        let classification = classify(&fix(12.979272, 77.727549), &dcrew_targets()).unwrap();
        let ids: Vec<&str> = classification.results.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(ids, vec!["4", "5", "7", "here"]);
        assert_eq!(classification.get(&"here".into()).unwrap().tier, Tier::Nearby);
        assert_eq!(classification.get(&"5".into()).unwrap().tier, Tier::Far);
    }

    #[test]
    fn test_per_target_radii() {
        let mut targets = vec![target("wide", 0.0, 0.0005), target("tight", 0.0, 0.0005)];
        targets[0].radii = TierRadii::new(100.0, 60.0);
        targets[1].radii = TierRadii::new(20.0, 5.0);

        let classification = classify(&fix(0.0, 0.0), &targets).unwrap();
        assert_eq!(classification.results[0].tier, Tier::Claimable);
        assert_eq!(classification.results[1].tier, Tier::Far);
    }

    #[test]
    fn test_invalid_target_is_isolated() {
        let mut targets = dcrew_targets();
        targets.insert(1, target("broken", 200.0, 77.728035));

        let classification = classify(&fix(12.979272, 77.727549), &targets).unwrap();
        assert_eq!(classification.results.len(), 4);
        assert_eq!(classification.rejected.len(), 1);
        assert_eq!(classification.rejected[0].target_id.as_str(), "broken");
        assert!(matches!(
            classification.errors()[0],
            EngineError::InvalidCoordinate { .. }
        ));
    }

    #[test]
    fn test_invalid_location_fails_whole_call() {
        let result = classify(&fix(f64::NAN, 0.0), &dcrew_targets());
        assert!(matches!(result, Err(EngineError::InvalidLocation(_))));
    }

    #[test]
    fn test_views() {
        let classification = Classification {
            results: vec![
                result("a", 30.0, Tier::Nearby),
                result("b", 8.0, Tier::Claimable),
                result("c", 8.0, Tier::Claimable),
                result("d", 25_000.0, Tier::Far),
            ],
            rejected: Vec::new(),
        };

        let sorted: Vec<&str> = classification
            .sorted_by_distance()
            .iter()
            .map(|r| r.target_id.as_str())
            .collect();
        assert_eq!(sorted, vec!["b", "c", "a", "d"]);

        assert_eq!(classification.in_tier(Tier::Claimable).count(), 2);
        assert_eq!(classification.within(20_000.0).len(), 3);
        assert_eq!(classification.nearest_within(20.0).unwrap().target_id.as_str(), "b");
        assert!(classification.nearest_within(5.0).is_none());
    }

    #[test]
    fn test_indexed_matches_linear() {
        let targets = dcrew_targets();
        let here = fix(12.979272, 77.727549);
        let plain = classify(&here, &targets).unwrap();

        let mut linear = LinearScan::default();
        linear.rebuild(&targets);
        assert_eq!(
            classify_indexed(&here, &targets, &linear, DistanceMethod::Haversine).unwrap(),
            plain
        );

        let mut bands = LatitudeBands::new(0.001);
        bands.rebuild(&targets);
        assert_eq!(
            classify_indexed(&here, &targets, &bands, DistanceMethod::Haversine).unwrap(),
            plain
        );
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let targets = vec![target("dup", 0.0, 0.0), target("dup", 0.0, 1.0)];

        let classification = classify(&fix(0.0, 0.0), &targets).unwrap();
        assert_eq!(classification.results.len(), 1);
        assert_eq!(classification.results[0].tier, Tier::Claimable);
        assert_eq!(
            classification.rejected,
            vec![Rejection {
                target_id: "dup".into(),
                reason: RejectReason::DuplicateId,
            }]
        );
        assert!(matches!(
            classification.errors()[0],
            EngineError::DuplicateTarget(ref id) if id.as_str() == "dup"
        ));
        assert!(diff_tiers(&classification.results, &classification.results).is_empty());

        let mut bands = LatitudeBands::new(0.001);
        bands.rebuild(&targets);
        let indexed = classify_indexed(&fix(0.0, 0.0), &targets, &bands, DistanceMethod::Haversine).unwrap();
        assert_eq!(indexed, classification);
    }

    #[test]
    fn test_indexed_still_measures_non_candidates() {
        let targets = vec![target("near", 0.0, 0.0), target("far", 1.0, 0.0)];
        let mut bands = LatitudeBands::new(0.001);
        bands.rebuild(&targets);

        let indexed = classify_indexed(&fix(0.0, 0.0), &targets, &bands, DistanceMethod::Haversine).unwrap();
        let far = indexed.get(&"far".into()).unwrap();
        assert_eq!(far.tier, Tier::Far);
        assert!((far.distance_m - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn test_diff_tiers_edges() {
        let previous = vec![result("a", 30.0, Tier::Nearby), result("gone", 5.0, Tier::Claimable)];
        let current = vec![
            result("a", 8.0, Tier::Claimable),
            result("new_far", 900.0, Tier::Far),
            result("new_near", 20.0, Tier::Nearby),
        ];

        let transitions = diff_tiers(&previous, &current);
        assert_eq!(
            transitions,
            vec![
                Transition {
                    target_id: "a".into(),
                    from: Tier::Nearby,
                    to: Tier::Claimable
                },
                Transition {
                    target_id: "new_near".into(),
                    from: Tier::Far,
                    to: Tier::Nearby
                },
            ]
        );
    }

    #[test]
    fn test_diff_tiers_idempotent() {
        let previous = vec![result("a", 30.0, Tier::Nearby)];
        let current = vec![result("a", 8.0, Tier::Claimable)];

        assert_eq!(diff_tiers(&previous, &current).len(), 1);
        // `current` becomes the new `previous`
        assert!(diff_tiers(&current, &current).is_empty());
    }
}
