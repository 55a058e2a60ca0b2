pub mod actor;
pub mod event;

use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

pub use actor::{Classify, Input, Regions, SessionActor, Snapshot};
pub use event::{InputEvent, StrokePreview};

use crate::{
    boundary::{BoundaryKind, BoundaryModel, LineEquation, StrokeError, StrokePhase},
    classify::{Accuracy, ClassificationEngine},
    config::SessionConfig,
    data::{self, DataLoadError, Dataset, Label, LabelSet, Subset},
    error::Result,
    geometry::{CoordinateMapper, DataPoint, DisplayExtent, DisplayPoint},
    region::{RegionCell, RegionRenderer},
};

/// Vertex count from which a curve gets scored on pointer release.
const CURVE_SCORE_VERTICES: usize = 3;

/// Accuracy per subset, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Scoreboard {
    pub training: Accuracy,
    pub evaluation: Accuracy,
}

/// Which subsets the user asked to score since the last clear.
#[derive(Debug, Clone, Copy, Default)]
struct ScoreRequests {
    training: bool,
    evaluation: bool,
}

/// An observation as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisiblePoint {
    pub position: DisplayPoint,
    pub label: Label,
    pub class_name: String,
    pub subset: Subset,
}

/// Everything a front-end needs to redraw, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub kind: BoundaryKind,
    pub phase: StrokePhase,
    pub vertices: Vec<DisplayPoint>,
    pub line_equation: Option<LineEquation>,
    pub line_equation_text: String,
    pub scores: Scoreboard,
    pub training_accuracy_text: String,
    pub evaluation_accuracy_text: String,
    pub show_training: bool,
    pub show_evaluation: bool,
    pub training_size: usize,
    pub evaluation_size: usize,
}

/// State of one interactive session: the frozen dataset, the mapper, the
/// boundary being drawn and the view toggles.
///
/// A session only exists once its dataset has loaded, so no drawing or
/// classification can happen before that. Scores are never cached; they are
/// recomputed from the current boundary and mapper whenever asked for.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    labels: LabelSet,
    mapper: CoordinateMapper,
    boundary: BoundaryModel,
    renderer: RegionRenderer,
    requests: ScoreRequests,
    show_training: bool,
    show_evaluation: bool,
}

impl Session {
    /// Creates a session over an already loaded dataset.
    ///
    /// # Errors
    /// Returns an `Error` if `config` does not validate.
    pub fn new(dataset: Dataset, config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let range = dataset.range();
        if range.is_degenerate() {
            debug!("data range {range:?} collapses on an axis, using a unit span there");
        }
        let mapper = CoordinateMapper::with_margin(range, config.extent()?, config.display.margin);

        info!(
            "session started: {} training, {} evaluation observation(s)",
            dataset.training().len(),
            dataset.evaluation().len()
        );

        Ok(Self {
            dataset,
            labels: config.dataset.labels.clone(),
            mapper,
            boundary: BoundaryModel::new(config.boundary_kind),
            renderer: RegionRenderer::new(config.cell_size()),
            requests: ScoreRequests::default(),
            show_training: config.show_training,
            show_evaluation: config.show_evaluation,
        })
    }

    /// Loads `path` once, splits it, and starts a session on it.
    ///
    /// There is no retry: on failure the caller reports the error and the
    /// user starts over.
    ///
    /// # Errors
    /// `Error::DataLoad` if the file cannot be read or yields no rows, or any
    /// configuration error.
    pub async fn load(path: impl AsRef<Path>, config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let rows = data::load_path(path, &config.dataset.columns, &config.dataset.labels).await?;
        let dropped = rows.dropped;
        let dataset = Dataset::split_seeded(
            rows.observations,
            config.dataset.evaluation_fraction,
            config.dataset.seed,
        )
        .ok_or(DataLoadError::NoUsableRows { dropped })?;

        Self::new(dataset, config)
    }

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[inline]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[inline]
    pub fn boundary(&self) -> &BoundaryModel {
        &self.boundary
    }

    /// An engine over the current boundary, anchored in the training subset.
    pub fn engine(&self) -> ClassificationEngine<'_> {
        ClassificationEngine::new(&self.boundary, &self.mapper, self.dataset.training())
    }

    pub fn classify(&self, point: DataPoint) -> Option<Label> {
        self.engine().classify(point)
    }

    pub fn accuracy(&self, subset: Subset) -> Accuracy {
        self.engine().accuracy(self.dataset.subset(subset))
    }

    /// Scores of the subsets that have been requested, undefined otherwise.
    pub fn scores(&self) -> Scoreboard {
        let engine = self.engine();
        let score = |requested: bool, subset: Subset| {
            if requested {
                engine.accuracy(self.dataset.subset(subset))
            } else {
                Accuracy::Undefined
            }
        };

        Scoreboard {
            training: score(self.requests.training, Subset::Training),
            evaluation: score(self.requests.evaluation, Subset::Evaluation),
        }
    }

    pub fn line_equation(&self) -> Option<LineEquation> {
        self.boundary.line_equation(&self.mapper)
    }

    /// The equation as shown to the user, `"-"` when there is no line.
    pub fn line_equation_text(&self) -> String {
        self.line_equation()
            .map_or_else(|| "-".to_string(), |eq| eq.to_string())
    }

    /// Background shading for the current boundary.
    pub fn regions(&self) -> Vec<RegionCell> {
        if !self.boundary.is_ready() {
            return Vec::new();
        }
        self.renderer.shade(&self.engine(), self.mapper.extent())
    }

    /// Observations of the subsets currently toggled on, in display space.
    pub fn visible_points(&self) -> Vec<VisiblePoint> {
        let toggles = [
            (Subset::Training, self.show_training),
            (Subset::Evaluation, self.show_evaluation),
        ];

        let mut points = Vec::new();
        for (subset, visible) in toggles {
            if !visible {
                continue;
            }
            points.extend(self.dataset.subset(subset).iter().map(|o| VisiblePoint {
                position: self.mapper.to_display(o.point()),
                label: o.label,
                class_name: self.labels.name(o.label).to_string(),
                subset,
            }));
        }
        points
    }

    pub fn pointer_down(&mut self, p: DisplayPoint) {
        let outcome = match self.boundary.kind() {
            BoundaryKind::Line => {
                self.boundary.reset(BoundaryKind::Line);
                self.boundary.start_stroke(p)
            }
            BoundaryKind::Curve if self.boundary.is_drawing() => self.boundary.append_point(p),
            BoundaryKind::Curve => self.boundary.start_stroke(p),
        };
        self.report(outcome);
    }

    /// Preview segment while a line is being dragged out.
    pub fn pointer_move(&self, p: DisplayPoint) -> Option<StrokePreview> {
        match (self.boundary.kind(), self.boundary.vertices()) {
            (BoundaryKind::Line, [start]) if self.boundary.is_drawing() => Some(StrokePreview {
                start: *start,
                end: p,
            }),
            _ => None,
        }
    }

    pub fn pointer_up(&mut self, p: DisplayPoint) {
        if !self.boundary.is_drawing() {
            return;
        }

        match self.boundary.kind() {
            BoundaryKind::Line => {
                let outcome = self.boundary.append_point(p);
                self.report(outcome);
                self.request_training_score();
            }
            BoundaryKind::Curve => {
                if self.boundary.vertices().len() >= CURVE_SCORE_VERTICES {
                    self.request_training_score();
                }
            }
        }
    }

    pub fn finish_stroke(&mut self) {
        self.boundary.finalize_stroke();
    }

    /// Switches the boundary kind, dropping the boundary and its scores.
    pub fn set_kind(&mut self, kind: BoundaryKind) {
        info!("boundary kind set to {kind:?}");
        self.boundary.reset(kind);
        self.requests = ScoreRequests::default();
    }

    pub fn clear(&mut self) {
        self.boundary.reset(self.boundary.kind());
        self.requests = ScoreRequests::default();
    }

    /// Refits the mapper to a new display size before anything else is queried.
    pub fn resize(&mut self, extent: DisplayExtent) {
        self.mapper.set_extent(extent);
    }

    /// Scores the held-out subset and switches the view to it.
    pub fn evaluate_held_out(&mut self) -> Accuracy {
        self.requests.evaluation = true;
        self.show_training = false;
        self.show_evaluation = true;

        let accuracy = self.accuracy(Subset::Evaluation);
        info!("evaluation accuracy: {accuracy}");
        accuracy
    }

    pub fn set_show_training(&mut self, visible: bool) {
        self.show_training = visible;
    }

    pub fn set_show_evaluation(&mut self, visible: bool) {
        self.show_evaluation = visible;
    }

    /// Dispatches one input event.
    ///
    /// # Returns
    /// A preview segment for pointer moves during a line stroke.
    pub fn apply(&mut self, event: InputEvent) -> Option<StrokePreview> {
        debug!("input: {event:?}");
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(DisplayPoint::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                return self.pointer_move(DisplayPoint::new(x, y));
            }
            InputEvent::PointerUp { x, y } => self.pointer_up(DisplayPoint::new(x, y)),
            InputEvent::FinishStroke => self.finish_stroke(),
            InputEvent::SetKind { kind } => self.set_kind(kind),
            InputEvent::Clear => self.clear(),
            InputEvent::Resize { width, height } => match DisplayExtent::new(width, height) {
                Ok(extent) => self.resize(extent),
                Err(e) => warn!("ignoring resize: {e}"),
            },
            InputEvent::EvaluateHeldOut => {
                self.evaluate_held_out();
            }
            InputEvent::ShowTraining { visible } => self.set_show_training(visible),
            InputEvent::ShowEvaluation { visible } => self.set_show_evaluation(visible),
        }
        None
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let scores = self.scores();
        SessionSnapshot {
            kind: self.boundary.kind(),
            phase: self.boundary.phase(),
            vertices: self.boundary.vertices().to_vec(),
            line_equation: self.line_equation(),
            line_equation_text: self.line_equation_text(),
            scores,
            training_accuracy_text: scores.training.to_string(),
            evaluation_accuracy_text: scores.evaluation.to_string(),
            show_training: self.show_training,
            show_evaluation: self.show_evaluation,
            training_size: self.dataset.training().len(),
            evaluation_size: self.dataset.evaluation().len(),
        }
    }

    fn request_training_score(&mut self) {
        self.requests.training = true;
        info!("training accuracy: {}", self.accuracy(Subset::Training));
    }

    fn report(&self, outcome: std::result::Result<(), StrokeError>) {
        if let Err(e) = outcome {
            warn!("ignoring stroke input: {e}");
        }
    }
}
