//! Serializable board commands, one per store operation.
//!
//! Hosts that talk to the store over a message boundary (the browser bridge,
//! the replay CLI) send these instead of calling methods directly.

use serde::{Deserialize, Serialize};

use crate::view::Point;
use crate::{ArrangeDirection, BoardDimensions, ElementContent, ElementId, ElementUpdate, PlacementOverrides};

/// A store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoardCommand {
    /// Add an element.
    AddElement {
        /// Element content.
        content: ElementContent,
        /// Placement fields overriding the default placement.
        #[serde(default)]
        placement: PlacementOverrides,
    },
    /// Merge a partial update into an element.
    UpdateElement {
        /// Target element.
        id: ElementId,
        /// Fields to merge.
        update: ElementUpdate,
    },
    /// Remove an element.
    RemoveElement {
        /// Target element.
        id: ElementId,
    },
    /// Set or clear the selection.
    SelectElement {
        /// Element to select, or `None` to clear.
        #[serde(default)]
        id: Option<ElementId>,
    },
    /// Move an element.
    MoveElement {
        /// Target element.
        id: ElementId,
        /// New x.
        x: f32,
        /// New y.
        y: f32,
    },
    /// Resize an element.
    ResizeElement {
        /// Target element.
        id: ElementId,
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// Replace the board size.
    SetBoardDimensions {
        /// New size.
        dimensions: BoardDimensions,
    },
    /// Set the zoom factor.
    SetScale {
        /// New scale.
        scale: f32,
    },
    /// Replace the pan offset.
    SetOffset {
        /// New offset.
        offset: Point,
    },
    /// Change stacking order.
    ArrangeElement {
        /// Target element.
        id: ElementId,
        /// Where to move it.
        direction: ArrangeDirection,
    },
    /// Lock or unlock an element.
    LockElement {
        /// Target element.
        id: ElementId,
        /// New lock state.
        locked: bool,
    },
    /// Zoom in by one button step.
    ZoomIn,
    /// Zoom out by one button step.
    ZoomOut,
    /// Reset scale and pan.
    ResetView,
}
