use log::debug;

use super::{
    rule::{DecisionRule, Placement},
    score::{Accuracy, ClassificationResult},
};
use crate::{
    boundary::BoundaryModel,
    data::{Label, Observation},
    geometry::{CoordinateMapper, DataPoint},
};

/// Label whose first training observation anchors the side/parity mapping.
pub const ANCHOR_LABEL: Label = Label::A;

/// Classifies data points against a drawn boundary.
///
/// Whatever side (line) or parity (curve) the anchor lands on is class A,
/// the other one is class B. The engine only borrows its inputs and keeps no
/// mutable state, so it is `Sync` and can be shared across threads, e.g. by
/// the region renderer. Each query is a linear scan over the boundary's
/// vertices; nothing is indexed.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationEngine<'a> {
    mapper: &'a CoordinateMapper,
    rule: Option<DecisionRule<'a>>,
    anchor: Option<Placement>,
}

impl<'a> ClassificationEngine<'a> {
    /// Creates a new engine.
    ///
    /// # Args
    /// * `boundary` - The drawn boundary, display space.
    /// * `mapper` - The current data/display transform; must be up to date.
    /// * `training` - Where the anchor observation is searched for.
    pub fn new(
        boundary: &'a BoundaryModel,
        mapper: &'a CoordinateMapper,
        training: &[Observation],
    ) -> Self {
        let rule = DecisionRule::from_boundary(boundary);
        let anchor = training.iter().find(|o| o.label == ANCHOR_LABEL);

        if rule.is_some() && anchor.is_none() {
            debug!("no {ANCHOR_LABEL} observation in training data, points stay undetermined");
        }

        let anchor = rule
            .zip(anchor)
            .map(|(rule, obs)| rule.place(mapper.to_display(obs.point())));

        Self {
            mapper,
            rule,
            anchor,
        }
    }

    /// Whether `classify` can give an answer at all.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.anchor.is_some()
    }

    #[inline]
    pub fn mapper(&self) -> &CoordinateMapper {
        self.mapper
    }

    /// Predicts the label of a data-space point.
    ///
    /// # Returns
    /// `None` if the boundary is not ready or there is no anchor.
    pub fn classify(&self, point: DataPoint) -> Option<Label> {
        let (rule, anchor) = self.rule.zip(self.anchor)?;
        let placement = rule.place(self.mapper.to_display(point));

        Some(if placement.shares_region(&anchor) {
            ANCHOR_LABEL
        } else {
            ANCHOR_LABEL.other()
        })
    }

    #[inline]
    pub fn classify_observation(&self, observation: &Observation) -> Option<Label> {
        self.classify(observation.point())
    }

    /// Share of `subset` whose predicted label matches the true one.
    pub fn accuracy(&self, subset: &[Observation]) -> Accuracy {
        if !self.is_resolved() {
            return Accuracy::Undefined;
        }

        let correct = subset
            .iter()
            .filter(|o| self.classify_observation(o) == Some(o.label))
            .count();

        ClassificationResult::new(correct, subset.len()).into()
    }
}

/// One-shot form of [`ClassificationEngine::classify`].
pub fn classify(
    observation: &Observation,
    boundary: &BoundaryModel,
    mapper: &CoordinateMapper,
    training: &[Observation],
) -> Option<Label> {
    ClassificationEngine::new(boundary, mapper, training).classify_observation(observation)
}

/// One-shot form of [`ClassificationEngine::accuracy`].
pub fn accuracy(
    subset: &[Observation],
    boundary: &BoundaryModel,
    mapper: &CoordinateMapper,
    training: &[Observation],
) -> Accuracy {
    ClassificationEngine::new(boundary, mapper, training).accuracy(subset)
}
