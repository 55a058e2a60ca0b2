use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;

use super::observation::Observation;
use crate::geometry::DataRange;

/// Share of observations held out for evaluation by default.
pub const DEFAULT_EVALUATION_FRACTION: f64 = 0.2;

/// Which half of the split an observation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    Training,
    Evaluation,
}

/// Labelled observations split once into training and evaluation halves.
///
/// The split is frozen for the lifetime of the value; getting a different
/// split means building a new `Dataset`.
#[derive(Debug, Clone)]
pub struct Dataset {
    training: Vec<Observation>,
    evaluation: Vec<Observation>,
    range: DataRange,
}

impl Dataset {
    /// Shuffles `observations` with `rng` and holds out `floor(n * fraction)` of them.
    ///
    /// # Returns
    /// `None` if `observations` is empty, since no range can be derived.
    pub fn split<R: Rng + ?Sized>(
        mut observations: Vec<Observation>,
        evaluation_fraction: f64,
        rng: &mut R,
    ) -> Option<Self> {
        let range = DataRange::enclosing(observations.iter().map(Observation::point))?;

        observations.shuffle(rng);
        let fraction = evaluation_fraction.clamp(0.0, 1.0);
        let held_out = (observations.len() as f64 * fraction).floor() as usize;
        let training = observations.split_off(held_out);
        let evaluation = observations;

        info!(
            "dataset split: {} training, {} evaluation",
            training.len(),
            evaluation.len()
        );

        Some(Self {
            training,
            evaluation,
            range,
        })
    }

    /// Same as [`Dataset::split`], seeded for reproducibility when `seed` is set.
    pub fn split_seeded(
        observations: Vec<Observation>,
        evaluation_fraction: f64,
        seed: Option<u64>,
    ) -> Option<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::split(observations, evaluation_fraction, &mut rng)
    }

    /// Builds a dataset from an already decided split, keeping the given order.
    ///
    /// # Returns
    /// `None` if both halves are empty.
    pub fn from_parts(training: Vec<Observation>, evaluation: Vec<Observation>) -> Option<Self> {
        let range =
            DataRange::enclosing(training.iter().chain(&evaluation).map(Observation::point))?;

        Some(Self {
            training,
            evaluation,
            range,
        })
    }

    #[inline]
    pub fn training(&self) -> &[Observation] {
        &self.training
    }

    #[inline]
    pub fn evaluation(&self) -> &[Observation] {
        &self.evaluation
    }

    pub fn subset(&self, subset: Subset) -> &[Observation] {
        match subset {
            Subset::Training => &self.training,
            Subset::Evaluation => &self.evaluation,
        }
    }

    /// Bounds over every observation, both halves included.
    #[inline]
    pub fn range(&self) -> DataRange {
        self.range
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.training.len() + self.evaluation.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Label;

    fn observations(n: usize) -> Vec<Observation> {
        (0..n)
            .map(|i| {
                let label = if i % 3 == 0 { Label::B } else { Label::A };
                Observation::new(label, 30.0 + i as f64, 12.0 + (i % 10) as f64)
            })
            .collect()
    }

    #[test]
    fn split_is_disjoint_and_covering() {
        let obs = observations(50);
        let ds = Dataset::split_seeded(obs.clone(), 0.2, Some(7)).unwrap();

        assert_eq!(ds.evaluation().len(), 10);
        assert_eq!(ds.training().len(), 40);
        assert_eq!(ds.len(), 50);

        let mut all: Vec<f64> = ds
            .training()
            .iter()
            .chain(ds.evaluation())
            .map(|o| o.x)
            .collect();
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = obs.iter().map(|o| o.x).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn held_out_count_is_floored() {
        let ds = Dataset::split_seeded(observations(9), 0.2, Some(1)).unwrap();
        assert_eq!(ds.evaluation().len(), 1);
        assert_eq!(ds.training().len(), 8);
    }

    #[test]
    fn same_seed_same_split() {
        let a = Dataset::split_seeded(observations(30), 0.2, Some(42)).unwrap();
        let b = Dataset::split_seeded(observations(30), 0.2, Some(42)).unwrap();
        assert_eq!(a.training(), b.training());
        assert_eq!(a.evaluation(), b.evaluation());
    }

    #[test]
    fn range_spans_both_halves() {
        let training = vec![Observation::new(Label::A, 35.0, 14.0)];
        let evaluation = vec![Observation::new(Label::B, 52.0, 19.5)];
        let ds = Dataset::from_parts(training, evaluation).unwrap();
        assert_eq!(ds.range(), DataRange::new(35.0, 52.0, 14.0, 19.5));
    }

    #[test]
    fn empty_input_has_no_dataset() {
        assert!(Dataset::split_seeded(Vec::new(), 0.2, Some(0)).is_none());
        assert!(Dataset::from_parts(Vec::new(), Vec::new()).is_none());
    }
}
