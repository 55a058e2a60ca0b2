use serde::{Deserialize, Serialize};

use crate::{boundary::BoundaryKind, geometry::DisplayPoint};

/// A discrete input coming from the display surface or its controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Closes an open curve stroke.
    FinishStroke,
    SetKind { kind: BoundaryKind },
    Clear,
    Resize { width: f64, height: f64 },
    /// Scores the held-out subset and switches the view to it.
    EvaluateHeldOut,
    ShowTraining { visible: bool },
    ShowEvaluation { visible: bool },
}

impl InputEvent {
    pub fn pointer_down(p: DisplayPoint) -> Self {
        InputEvent::PointerDown { x: p.x, y: p.y }
    }

    pub fn pointer_move(p: DisplayPoint) -> Self {
        InputEvent::PointerMove { x: p.x, y: p.y }
    }

    pub fn pointer_up(p: DisplayPoint) -> Self {
        InputEvent::PointerUp { x: p.x, y: p.y }
    }
}

/// Rubber-band segment shown while a line is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokePreview {
    pub start: DisplayPoint,
    pub end: DisplayPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_read_from_tagged_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                { "type": "set_kind", "kind": "curve" },
                { "type": "pointer_down", "x": 10, "y": 20.5 },
                { "type": "finish_stroke" },
                { "type": "show_evaluation", "visible": true }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                InputEvent::SetKind {
                    kind: BoundaryKind::Curve
                },
                InputEvent::pointer_down(DisplayPoint::new(10.0, 20.5)),
                InputEvent::FinishStroke,
                InputEvent::ShowEvaluation { visible: true },
            ]
        );
    }
}
