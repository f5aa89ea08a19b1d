//! Replay scripts: a JSON list of steps applied to a fresh board.
//!
//! Elements are referred to by the order in which the script added them
//! (`0` is the first `add` step), since real ids are only known at runtime.
//!
//! ```json
//! { "steps": [
//!     { "step": "add", "content": { "type": "color", "color": "#112233" } },
//!     { "step": "press_at", "x": 600, "y": 400 },
//!     { "step": "pointer_move", "x": 650, "y": 420 },
//!     { "step": "release", "x": 650, "y": 420 },
//!     { "step": "arrange", "element": 0, "direction": "front" }
//! ] }
//! ```

use std::path::Path;

use anyhow::{bail, Context};
use moodboard_core::{
    ArrangeDirection, BoardCommand, BoardDimensions, BoardStore, CanvasEvent, ElementContent,
    ElementId, ElementUpdate, InteractionEngine, PlacementOverrides, Point, PointerButton,
    PointerTarget,
};
use serde::Deserialize;

/// Pointer target written with script indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRef {
    /// Empty canvas.
    Background,
    /// Body of the n-th added element.
    Element(usize),
    /// Resize handle of the n-th added element.
    Handle(usize),
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Add {
        content: ElementContent,
        #[serde(default)]
        placement: PlacementOverrides,
    },
    Update {
        element: usize,
        update: ElementUpdate,
    },
    Remove {
        element: usize,
    },
    Select {
        #[serde(default)]
        element: Option<usize>,
    },
    Move {
        element: usize,
        x: f32,
        y: f32,
    },
    Resize {
        element: usize,
        width: f32,
        height: f32,
    },
    Arrange {
        element: usize,
        direction: ArrangeDirection,
    },
    Lock {
        element: usize,
        #[serde(default = "default_locked")]
        locked: bool,
    },
    SetDimensions {
        width: f32,
        height: f32,
    },
    SetScale {
        scale: f32,
    },
    SetOffset {
        x: f32,
        y: f32,
    },
    ZoomIn,
    ZoomOut,
    ResetView,
    Press {
        target: TargetRef,
        x: f32,
        y: f32,
        #[serde(default)]
        button: PointerButton,
    },
    /// Press on whatever the board's hit test finds at the point.
    PressAt {
        x: f32,
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    Release {
        x: f32,
        y: f32,
    },
    Click {
        target: TargetRef,
    },
    Wheel {
        delta_y: f32,
    },
}

const fn default_locked() -> bool {
    true
}

/// What a step turns into.
enum Action {
    Command(BoardCommand),
    Event(CanvasEvent),
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// Totals reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    pub revisions: u64,
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse replay script")
    }

    /// Read and parse a script file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Apply every step in order.
    pub fn run(
        &self,
        store: &mut BoardStore,
        engine: &mut InteractionEngine,
    ) -> anyhow::Result<ReplayReport> {
        let mut added: Vec<ElementId> = Vec::new();
        let start = store.revision();

        for (index, step) in self.steps.iter().enumerate() {
            let action = resolve(step, &added, store)
                .with_context(|| format!("Step {index} is invalid"))?;
            match action {
                Action::Command(command) => {
                    if let Some(id) = store.apply(command) {
                        added.push(id);
                    }
                }
                Action::Event(event) => engine.handle(store, &event),
            }
            tracing::debug!(index, revision = store.revision(), gesture = ?engine.gesture(), "Step applied");
        }

        Ok(ReplayReport {
            steps: self.steps.len(),
            revisions: store.revision() - start,
        })
    }
}

fn element(added: &[ElementId], index: usize) -> anyhow::Result<ElementId> {
    match added.get(index) {
        Some(&id) => Ok(id),
        None => bail!("element {index} has not been added (only {} so far)", added.len()),
    }
}

fn target(added: &[ElementId], target: TargetRef) -> anyhow::Result<PointerTarget> {
    Ok(match target {
        TargetRef::Background => PointerTarget::Background,
        TargetRef::Element(index) => PointerTarget::Element(element(added, index)?),
        TargetRef::Handle(index) => PointerTarget::ResizeHandle(element(added, index)?),
    })
}

fn resolve(step: &Step, added: &[ElementId], store: &BoardStore) -> anyhow::Result<Action> {
    let command = match step {
        Step::Add { content, placement } => BoardCommand::AddElement {
            content: content.clone(),
            placement: *placement,
        },
        Step::Update { element: e, update } => BoardCommand::UpdateElement {
            id: element(added, *e)?,
            update: update.clone(),
        },
        Step::Remove { element: e } => BoardCommand::RemoveElement {
            id: element(added, *e)?,
        },
        Step::Select { element: e } => BoardCommand::SelectElement {
            id: e.map(|e| element(added, e)).transpose()?,
        },
        Step::Move { element: e, x, y } => BoardCommand::MoveElement {
            id: element(added, *e)?,
            x: *x,
            y: *y,
        },
        Step::Resize {
            element: e,
            width,
            height,
        } => BoardCommand::ResizeElement {
            id: element(added, *e)?,
            width: *width,
            height: *height,
        },
        Step::Arrange {
            element: e,
            direction,
        } => BoardCommand::ArrangeElement {
            id: element(added, *e)?,
            direction: *direction,
        },
        Step::Lock { element: e, locked } => BoardCommand::LockElement {
            id: element(added, *e)?,
            locked: *locked,
        },
        Step::SetDimensions { width, height } => BoardCommand::SetBoardDimensions {
            dimensions: BoardDimensions {
                width: *width,
                height: *height,
            },
        },
        Step::SetScale { scale } => BoardCommand::SetScale { scale: *scale },
        Step::SetOffset { x, y } => BoardCommand::SetOffset {
            offset: Point::new(*x, *y),
        },
        Step::ZoomIn => BoardCommand::ZoomIn,
        Step::ZoomOut => BoardCommand::ZoomOut,
        Step::ResetView => BoardCommand::ResetView,
        Step::Press {
            target: t,
            x,
            y,
            button,
        } => {
            return Ok(Action::Event(CanvasEvent::PointerDown {
                target: target(added, *t)?,
                x: *x,
                y: *y,
                button: *button,
            }))
        }
        Step::PressAt { x, y } => {
            let hit = store.board().hit_test(*x, *y);
            return Ok(Action::Event(CanvasEvent::press(hit, *x, *y)));
        }
        Step::PointerMove { x, y } => {
            return Ok(Action::Event(CanvasEvent::PointerMove { x: *x, y: *y }))
        }
        Step::Release { x, y } => {
            return Ok(Action::Event(CanvasEvent::PointerUp { x: *x, y: *y }))
        }
        Step::Click { target: t } => {
            return Ok(Action::Event(CanvasEvent::Click {
                target: target(added, *t)?,
            }))
        }
        Step::Wheel { delta_y } => {
            return Ok(Action::Event(CanvasEvent::Wheel { delta_y: *delta_y }))
        }
    };
    Ok(Action::Command(command))
}
