use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::DataPoint;

/// One of the two classes a boundary separates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
}

impl Label {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Label::A => Label::B,
            Label::B => Label::A,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::A => write!(f, "A"),
            Label::B => write!(f, "B"),
        }
    }
}

/// Names of the two classes as they appear in the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSet {
    pub a: String,
    pub b: String,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            a: "Adelie".into(),
            b: "Chinstrap".into(),
        }
    }
}

impl LabelSet {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Maps a raw class name to a label, `None` for anything outside the pair.
    pub fn parse(&self, raw: &str) -> Option<Label> {
        let raw = raw.trim();
        if raw == self.a {
            Some(Label::A)
        } else if raw == self.b {
            Some(Label::B)
        } else {
            None
        }
    }

    pub fn name(&self, label: Label) -> &str {
        match label {
            Label::A => &self.a,
            Label::B => &self.b,
        }
    }
}

/// A labelled measurement. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: Label,
    pub x: f64,
    pub y: f64,
}

impl Observation {
    #[inline]
    pub fn new(label: Label, x: f64, y: f64) -> Self {
        Self { label, x, y }
    }

    #[inline]
    pub fn point(&self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }
}
