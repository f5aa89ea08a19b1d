//! The board: placed elements, selection and the pan/zoom view transform.
//!
//! [`Board`] owns the mutation rules (default placement, size floors, scale
//! clamping, stacking arithmetic). Every mutator returns `true` when it
//! changed the board and `false` when it was a no-op (unknown id, or a value
//! equal to the current one), which [`crate::BoardStore`] uses to decide
//! whether to publish a new snapshot.

use serde::{Deserialize, Serialize};

use crate::view::{self, Point};
use crate::{
    BoardConfig, BoardResult, Element, ElementContent, ElementId, ElementUpdate, Placement,
    PlacementOverrides, PointerTarget,
};

/// Board canvas size in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardDimensions {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Direction for [`Board::arrange_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrangeDirection {
    /// Above every other element.
    Front,
    /// Below every other element.
    Back,
    /// Exchange places with the next element up.
    Forward,
    /// Exchange places with the next element down.
    Backward,
}

/// A mood board.
///
/// Deserializing (directly or through [`Board::from_json`]) drops a
/// selection that names no element and re-clamps the scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BoardSnapshot")]
pub struct Board {
    /// Elements in insertion order (independent of stacking order).
    elements: Vec<Element>,
    /// Currently selected element, always one that exists.
    selected: Option<ElementId>,
    /// Board canvas size.
    dimensions: BoardDimensions,
    /// Zoom factor, kept within the configured range.
    scale: f32,
    /// Pan offset in screen pixels.
    offset: Point,
    #[serde(skip)]
    config: BoardConfig,
}

/// Wire shape of a board before its invariants are restored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardSnapshot {
    elements: Vec<Element>,
    #[serde(default)]
    selected: Option<ElementId>,
    dimensions: BoardDimensions,
    scale: f32,
    offset: Point,
}

impl From<BoardSnapshot> for Board {
    fn from(snapshot: BoardSnapshot) -> Self {
        let config = BoardConfig::default();
        let selected = snapshot
            .selected
            .filter(|id| snapshot.elements.iter().any(|e| e.id == *id));
        Self {
            elements: snapshot.elements,
            selected,
            dimensions: snapshot.dimensions,
            scale: config.clamp_scale(snapshot.scale),
            offset: snapshot.offset,
            config,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            dimensions: BoardDimensions {
                width: config.board_width,
                height: config.board_height,
            },
            scale: 1.0,
            offset: Point::ZERO,
            config,
        }
    }

    /// The configuration this board clamps against.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// The selected element's ID.
    #[must_use]
    pub const fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get_element(id))
    }

    /// Whether `id` is the selected element.
    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Board canvas size.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Current pan offset.
    #[must_use]
    pub const fn offset(&self) -> Point {
        self.offset
    }

    /// Zoom factor as a rounded percentage, e.g. `100` at scale 1.0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        // scale is clamped to a small positive range
        (self.scale * 100.0).round() as u32
    }

    /// Number of elements on the board.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Layer an element is painted on: the selected element is lifted to the
    /// configured selection layer, all others use their stacking order.
    #[must_use]
    pub fn paint_layer(&self, element: &Element) -> i32 {
        if self.is_selected(element.id) {
            self.config.selected_layer
        } else {
            element.placement.z_index
        }
    }

    /// Elements from bottom to top as they are painted. Equal layers keep
    /// insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| self.paint_layer(e));
        ordered
    }

    /// Indices into `elements` sorted by stacking order (stable).
    fn stacking_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.elements.len()).collect();
        order.sort_by_key(|&i| self.elements[i].placement.z_index);
        order
    }

    /// Find the topmost element at the given board coordinates.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|e| e.placement.contains_point(x, y))
            .map(|e| e.id)
    }

    /// Resolve a screen point to what a pointer press there would hit.
    ///
    /// The resize hotspot of the selected, unlocked element wins over
    /// element bodies, which win over the background.
    #[must_use]
    pub fn hit_test(&self, screen_x: f32, screen_y: f32) -> PointerTarget {
        let p = self.screen_to_board(Point::new(screen_x, screen_y));

        if let Some(selected) = self.selected_element().filter(|e| !e.locked) {
            let handle = view::resize_handle_rect(&selected.placement, self.config.resize_handle_size);
            if handle.contains_point(p.x, p.y) {
                return PointerTarget::ResizeHandle(selected.id);
            }
        }

        self.element_at(p.x, p.y)
            .map_or(PointerTarget::Background, PointerTarget::Element)
    }

    /// Convert board coordinates to screen coordinates.
    #[must_use]
    pub fn board_to_screen(&self, p: Point) -> Point {
        view::board_to_screen(p, self.offset, self.scale)
    }

    /// Convert screen coordinates to board coordinates.
    #[must_use]
    pub fn screen_to_board(&self, p: Point) -> Point {
        view::screen_to_board(p, self.offset, self.scale)
    }

    // -----------------------------------------------------------------------
    // Element mutations
    // -----------------------------------------------------------------------

    /// The placement a new element gets before overrides: centered on the
    /// board at the default size, on top of the current element count.
    #[must_use]
    pub fn default_placement(&self) -> Placement {
        let size = self.config.default_element_size;
        Placement {
            x: self.dimensions.width / 2.0 - size / 2.0,
            y: self.dimensions.height / 2.0 - size / 2.0,
            width: size,
            height: size,
            z_index: i32::try_from(self.elements.len())
                .unwrap_or(i32::MAX)
                .saturating_add(1),
        }
    }

    /// Add an element and return its ID.
    pub fn add_element(
        &mut self,
        content: ElementContent,
        overrides: &PlacementOverrides,
    ) -> ElementId {
        let mut placement = self.default_placement();
        placement.merge(overrides);
        let element = Element::new(content, placement);
        let id = element.id;
        tracing::debug!(%id, kind = %element.kind(), z_index = placement.z_index, "Element added");
        self.elements.push(element);
        id
    }

    /// Merge a partial update into an element.
    pub fn update_element(&mut self, id: ElementId, update: &ElementUpdate) -> bool {
        let Some(element) = self.get_element_mut(id) else {
            tracing::debug!(%id, "Update ignored: unknown element");
            return false;
        };
        let before = element.clone();
        element.apply(update);
        *element != before
    }

    /// Remove an element, clearing the selection if it was selected.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(%id, "Remove ignored: unknown element");
            return false;
        };
        self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::debug!(%id, "Element removed");
        true
    }

    /// Set or clear the selection. Selecting an unknown element is ignored.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        if self.selected == id {
            return false;
        }
        if let Some(id) = id {
            if self.get_element(id).is_none() {
                tracing::debug!(%id, "Select ignored: unknown element");
                return false;
            }
        }
        self.selected = id;
        tracing::debug!(selected = ?id, "Selection changed");
        true
    }

    /// Overwrite an element's position, leaving size and stacking untouched.
    ///
    /// The lock flag is not consulted here; pointer gestures enforce it.
    pub fn move_element(&mut self, id: ElementId, x: f32, y: f32) -> bool {
        let Some(element) = self.get_element_mut(id) else {
            return false;
        };
        let before = element.placement;
        element.placement.x = x;
        element.placement.y = y;
        element.placement != before
    }

    /// Overwrite an element's size, each dimension floored at the minimum.
    ///
    /// The lock flag is not consulted here; pointer gestures enforce it.
    pub fn resize_element(&mut self, id: ElementId, width: f32, height: f32) -> bool {
        let width = self.config.floor_size(width);
        let height = self.config.floor_size(height);
        let Some(element) = self.get_element_mut(id) else {
            return false;
        };
        let before = element.placement;
        element.placement.width = width;
        element.placement.height = height;
        element.placement != before
    }

    /// Change an element's stacking order.
    ///
    /// `Forward` gives the element its upper neighbour's order plus one and
    /// hands the element's old order to that neighbour; `Backward` mirrors
    /// this downwards. Both are no-ops at the respective end of the stack.
    pub fn arrange_element(&mut self, id: ElementId, direction: ArrangeDirection) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(%id, "Arrange ignored: unknown element");
            return false;
        };
        let current = self.elements[index].placement.z_index;

        match direction {
            ArrangeDirection::Front => {
                let top = self
                    .elements
                    .iter()
                    .map(|e| e.placement.z_index)
                    .max()
                    .unwrap_or(current);
                self.elements[index].placement.z_index = top.saturating_add(1);
            }
            ArrangeDirection::Back => {
                let bottom = self
                    .elements
                    .iter()
                    .map(|e| e.placement.z_index)
                    .min()
                    .unwrap_or(current);
                self.elements[index].placement.z_index = bottom.saturating_sub(1);
            }
            ArrangeDirection::Forward | ArrangeDirection::Backward => {
                let order = self.stacking_order();
                let Some(pos) = order.iter().position(|&i| i == index) else {
                    return false;
                };
                let neighbour = if direction == ArrangeDirection::Forward {
                    order.get(pos + 1)
                } else {
                    pos.checked_sub(1).and_then(|p| order.get(p))
                };
                let Some(&neighbour) = neighbour else {
                    tracing::debug!(%id, ?direction, "Arrange ignored: already at end of stack");
                    return false;
                };
                let neighbour_z = self.elements[neighbour].placement.z_index;
                self.elements[index].placement.z_index = if direction == ArrangeDirection::Forward {
                    neighbour_z.saturating_add(1)
                } else {
                    neighbour_z.saturating_sub(1)
                };
                self.elements[neighbour].placement.z_index = current;
            }
        }

        tracing::debug!(
            %id,
            ?direction,
            z_index = self.elements[index].placement.z_index,
            "Element arranged"
        );
        true
    }

    /// Set an element's lock flag.
    pub fn lock_element(&mut self, id: ElementId, locked: bool) -> bool {
        let Some(element) = self.get_element_mut(id) else {
            return false;
        };
        if element.locked == locked {
            return false;
        }
        element.locked = locked;
        tracing::debug!(%id, locked, "Lock changed");
        true
    }

    // -----------------------------------------------------------------------
    // View mutations
    // -----------------------------------------------------------------------

    /// Replace the board canvas size.
    pub fn set_dimensions(&mut self, dimensions: BoardDimensions) -> bool {
        if self.dimensions == dimensions {
            return false;
        }
        self.dimensions = dimensions;
        true
    }

    /// Set the zoom factor, clamped to the configured range.
    #[allow(clippy::float_cmp)]
    pub fn set_scale(&mut self, scale: f32) -> bool {
        let scale = self.config.clamp_scale(scale);
        if scale == self.scale {
            return false;
        }
        self.scale = scale;
        true
    }

    /// Replace the pan offset.
    pub fn set_offset(&mut self, offset: Point) -> bool {
        if self.offset == offset {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Change the zoom factor by `delta`, clamped. Zoom is anchored at the
    /// canvas origin, not at the pointer.
    pub fn zoom_by(&mut self, delta: f32) -> bool {
        self.set_scale(self.scale + delta)
    }

    /// Back to scale 1.0 with no pan.
    pub fn reset_view(&mut self) -> bool {
        let scale_changed = self.set_scale(1.0);
        let offset_changed = self.set_offset(Point::ZERO);
        scale_changed || offset_changed
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Serialize the board to JSON for a renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a board snapshot. The board uses the default configuration
    /// and drops a selection that names no element.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
