use std::fmt;

use serde::Serialize;

/// Correct predictions over a non-empty subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// `correct / total`, in `[0, 1]`.
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
}

impl ClassificationResult {
    /// # Returns
    /// `None` when `total` is zero, so no 0/0 is ever computed.
    pub fn new(correct: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }

        Some(Self {
            accuracy: correct as f64 / total as f64,
            correct,
            total,
        })
    }
}

/// Accuracy of a boundary over a subset, or the undefined sentinel.
///
/// Undefined covers an empty subset, an unfinished boundary and a training
/// set without any class-A anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Accuracy {
    #[default]
    Undefined,
    Scored(ClassificationResult),
}

impl Accuracy {
    #[inline]
    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Accuracy::Scored(r) => Some(r),
            Accuracy::Undefined => None,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.result().map(|r| r.accuracy)
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Accuracy::Undefined)
    }
}

impl From<Option<ClassificationResult>> for Accuracy {
    fn from(value: Option<ClassificationResult>) -> Self {
        value.map_or(Accuracy::Undefined, Accuracy::Scored)
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Scored(r) => write!(f, "{:.1}%", r.accuracy * 100.0),
            Accuracy::Undefined => write!(f, "-"),
        }
    }
}
