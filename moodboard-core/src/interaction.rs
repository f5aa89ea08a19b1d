//! Pointer interaction engine: turns canvas events into store mutations.
//!
//! ```text
//!            press element (unlocked)           release anywhere
//!   Idle ──────────────────────────▶ Dragging ─────────────────▶ Idle
//!     │  press handle (selected, unlocked)      release anywhere
//!     ├────────────────────────────▶ Resizing ─────────────────▶ Idle
//!     │  press background (nothing selected)    release anywhere
//!     └────────────────────────────▶ Panning  ─────────────────▶ Idle
//! ```
//!
//! A single gesture slot enforces that drag and resize never run at the same
//! time. Locked elements never start a gesture: the engine is the only place
//! where the lock flag is enforced.

use serde::{Deserialize, Serialize};

use crate::view::{CursorHint, Point};
use crate::{BoardStore, CanvasEvent, ElementId, PointerButton, PointerTarget};

/// Size and pointer position captured when a resize starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeStart {
    /// Pointer position at press, in board units.
    pub pointer: Point,
    /// Element width at press.
    pub width: f32,
    /// Element height at press.
    pub height: f32,
}

/// The gesture in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Gesture {
    /// No gesture.
    #[default]
    Idle,
    /// Moving an element.
    Dragging {
        /// Element being moved.
        id: ElementId,
        /// Pointer position relative to the element's top-left corner, in
        /// board units.
        grab_offset: Point,
    },
    /// Resizing an element from its bottom-right corner.
    Resizing {
        /// Element being resized.
        id: ElementId,
        /// Snapshot taken at press.
        start: ResizeStart,
    },
    /// Panning the canvas.
    Panning {
        /// Pointer position at the previous move, in screen pixels.
        last: Point,
    },
}

impl Gesture {
    /// The element this gesture manipulates, if any.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        match self {
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}

/// Interprets pointer events against a [`BoardStore`].
///
/// Event positions are screen pixels; drag and resize convert them to board
/// units through the current view transform, pan works on raw pixels.
/// Events must be fed in delivery order: drag and pan updates are relative to
/// state recorded by earlier events.
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine {
    gesture: Gesture,
}

impl InteractionEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture in progress.
    #[must_use]
    pub const fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    /// Cursor the host should show over the canvas background.
    #[must_use]
    pub fn canvas_cursor(&self, store: &BoardStore) -> CursorHint {
        match self.gesture {
            Gesture::Panning { .. } => CursorHint::Grabbing,
            Gesture::Resizing { .. } => CursorHint::NwseResize,
            Gesture::Dragging { .. } => CursorHint::Move,
            Gesture::Idle if store.board().selected_id().is_none() => CursorHint::Grab,
            Gesture::Idle => CursorHint::Default,
        }
    }

    /// Handle one canvas event.
    pub fn handle(&mut self, store: &mut BoardStore, event: &CanvasEvent) {
        match *event {
            CanvasEvent::PointerDown {
                target,
                x,
                y,
                button,
            } => self.pointer_down(store, target, Point::new(x, y), button),
            CanvasEvent::PointerMove { x, y } => self.pointer_move(store, Point::new(x, y)),
            CanvasEvent::PointerUp { .. } => self.pointer_up(),
            CanvasEvent::Click { target } => Self::click(store, target),
            CanvasEvent::Wheel { delta_y } => Self::wheel(store, delta_y),
        }
    }

    fn pointer_down(
        &mut self,
        store: &mut BoardStore,
        target: PointerTarget,
        pointer: Point,
        button: PointerButton,
    ) {
        if button != PointerButton::Primary {
            return;
        }
        if !self.is_idle() {
            // The release of the previous gesture never arrived.
            tracing::debug!(gesture = ?self.gesture, "Dropping stale gesture on new press");
            self.gesture = Gesture::Idle;
        }

        match target {
            PointerTarget::Element(id) => self.begin_drag(store, id, pointer),
            PointerTarget::ResizeHandle(id) => self.begin_resize(store, id, pointer),
            PointerTarget::Background => {
                if store.board().selected_id().is_none() {
                    tracing::debug!(x = pointer.x, y = pointer.y, "Pan started");
                    self.gesture = Gesture::Panning { last: pointer };
                }
            }
        }
    }

    fn begin_drag(&mut self, store: &mut BoardStore, id: ElementId, pointer: Point) {
        let Some(element) = store.board().get_element(id) else {
            return;
        };
        if element.locked {
            tracing::debug!(%id, "Drag refused: element is locked");
            return;
        }
        let pointer = store.board().screen_to_board(pointer);
        let grab_offset = pointer - Point::new(element.placement.x, element.placement.y);
        store.select_element(Some(id));
        tracing::debug!(%id, "Drag started");
        self.gesture = Gesture::Dragging { id, grab_offset };
    }

    fn begin_resize(&mut self, store: &BoardStore, id: ElementId, pointer: Point) {
        let Some(element) = store.board().get_element(id) else {
            return;
        };
        // The handle only exists on the selected, unlocked element.
        if element.locked || !store.board().is_selected(id) {
            tracing::debug!(%id, locked = element.locked, "Resize refused");
            return;
        }
        let start = ResizeStart {
            pointer: store.board().screen_to_board(pointer),
            width: element.placement.width,
            height: element.placement.height,
        };
        tracing::debug!(%id, width = start.width, height = start.height, "Resize started");
        self.gesture = Gesture::Resizing { id, start };
    }

    fn pointer_move(&mut self, store: &mut BoardStore, pointer: Point) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { id, grab_offset } => {
                if !Self::is_movable(store, id) {
                    return;
                }
                let top_left = store.board().screen_to_board(pointer) - grab_offset;
                tracing::trace!(%id, x = top_left.x, y = top_left.y, "Drag move");
                store.move_element(id, top_left.x, top_left.y);
            }
            Gesture::Resizing { id, start } => {
                if !Self::is_movable(store, id) {
                    return;
                }
                let delta = store.board().screen_to_board(pointer) - start.pointer;
                let config = store.board().config();
                let width = config.floor_size(start.width + delta.x);
                let height = config.floor_size(start.height + delta.y);
                tracing::trace!(%id, width, height, "Resize move");
                store.resize_element(id, width, height);
            }
            Gesture::Panning { last } => {
                let delta = pointer - last;
                let offset = store.board().offset() + delta;
                store.set_offset(offset);
                self.gesture = Gesture::Panning { last: pointer };
            }
        }
    }

    /// Whether an element still exists and is unlocked.
    fn is_movable(store: &BoardStore, id: ElementId) -> bool {
        store.board().get_element(id).is_some_and(|e| !e.locked)
    }

    fn pointer_up(&mut self) {
        if !self.is_idle() {
            tracing::debug!(gesture = ?self.gesture, "Gesture ended");
        }
        self.gesture = Gesture::Idle;
    }

    fn click(store: &mut BoardStore, target: PointerTarget) {
        match target {
            PointerTarget::Element(id) | PointerTarget::ResizeHandle(id) => {
                store.select_element(Some(id));
            }
            PointerTarget::Background => {
                if store.board().selected_id().is_some() {
                    store.select_element(None);
                }
            }
        }
    }

    fn wheel(store: &mut BoardStore, delta_y: f32) {
        let step = store.board().config().wheel_zoom_step;
        let delta = if delta_y > 0.0 {
            -step
        } else if delta_y < 0.0 {
            step
        } else {
            return;
        };
        let scale = store.board().scale() + delta;
        store.set_scale(scale);
    }
}
