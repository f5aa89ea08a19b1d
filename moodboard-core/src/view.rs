//! View-transform math and render helpers.
//!
//! The board is drawn translated by the pan offset and scaled about the
//! canvas origin: `screen = offset + board * scale`.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::{Board, ElementContent, ElementId, Placement};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Check if a point is within this rectangle (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Convert board coordinates to screen coordinates.
#[must_use]
pub fn board_to_screen(p: Point, offset: Point, scale: f32) -> Point {
    Point::new(offset.x + p.x * scale, offset.y + p.y * scale)
}

/// Convert screen coordinates to board coordinates.
#[must_use]
pub fn screen_to_board(p: Point, offset: Point, scale: f32) -> Point {
    Point::new((p.x - offset.x) / scale, (p.y - offset.y) / scale)
}

/// The resize hotspot inside an element's bottom-right corner, in board units.
///
/// The hotspot never grows beyond the element itself.
#[must_use]
pub fn resize_handle_rect(placement: &Placement, handle_size: f32) -> Rect {
    let width = handle_size.min(placement.width);
    let height = handle_size.min(placement.height);
    Rect {
        x: placement.x + placement.width - width,
        y: placement.y + placement.height - height,
        width,
        height,
    }
}

/// Screen rectangle of a placement under the board's view transform.
#[must_use]
pub fn screen_rect(board: &Board, placement: &Placement) -> Rect {
    let origin = board.board_to_screen(Point::new(placement.x, placement.y));
    Rect {
        x: origin.x,
        y: origin.y,
        width: placement.width * board.scale(),
        height: placement.height * board.scale(),
    }
}

/// Mouse cursor a host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    /// Platform default arrow.
    Default,
    /// Open hand: the canvas can be panned.
    Grab,
    /// Closed hand: the canvas is being panned.
    Grabbing,
    /// Four-way arrow over a draggable element.
    Move,
    /// Over a locked element.
    NotAllowed,
    /// Over a resize handle.
    NwseResize,
}

/// Everything a renderer needs to paint one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    /// Element id.
    pub id: ElementId,
    /// Element content.
    pub content: ElementContent,
    /// Image alt text, with the default filled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Texture tile size, with the default filled in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<String>,
    /// Specimen line under a typography sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    /// Bounds on screen.
    pub screen_rect: Rect,
    /// Paint layer (the selected element is lifted).
    pub layer: i32,
    /// Draw the selection ring.
    pub selected: bool,
    /// Draw the lock indicator.
    pub locked: bool,
    /// Draw the resize handle.
    pub show_resize_handle: bool,
    /// Cursor over the element body.
    pub cursor: CursorHint,
}

/// Build the paint list for a board, bottom to top.
#[must_use]
pub fn render_list(board: &Board) -> Vec<RenderItem> {
    board
        .paint_order()
        .into_iter()
        .map(|element| {
            let selected = board.is_selected(element.id);
            RenderItem {
                id: element.id,
                content: element.content.clone(),
                alt: element.content.alt_text().map(str::to_string),
                tile_size: element.content.tile_size().map(str::to_string),
                sample: element.content.sample_text().map(str::to_string),
                screen_rect: screen_rect(board, &element.placement),
                layer: board.paint_layer(element),
                selected,
                locked: element.locked,
                show_resize_handle: selected && !element.locked,
                cursor: if element.locked {
                    CursorHint::NotAllowed
                } else {
                    CursorHint::Move
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlacementOverrides;

    #[test]
    fn test_board_screen_round_trip() {
        let offset = Point::new(40.0, -20.0);
        let p = Point::new(100.0, 50.0);
        let screen = board_to_screen(p, offset, 0.5);
        assert_eq!(screen, Point::new(90.0, 5.0));
        assert_eq!(screen_to_board(screen, offset, 0.5), p);
    }

    #[test]
    fn test_resize_handle_is_bottom_right() {
        let placement = Placement {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 60.0,
            z_index: 1,
        };
        let handle = resize_handle_rect(&placement, 24.0);
        assert_eq!(
            handle,
            Rect {
                x: 86.0,
                y: 46.0,
                width: 24.0,
                height: 24.0
            }
        );
    }

    #[test]
    fn test_render_list_marks_selection_and_lock() {
        let mut board = Board::default();
        let a = board.add_element(
            ElementContent::color("#111"),
            &PlacementOverrides::at(0.0, 0.0).with_size(100.0, 100.0),
        );
        let b = board.add_element(
            ElementContent::image("mood.jpg"),
            &PlacementOverrides::at(200.0, 0.0).with_size(100.0, 100.0),
        );
        board.select_element(Some(a));
        board.lock_element(b, true);
        board.set_scale(2.0);

        let items = render_list(&board);
        assert_eq!(items.len(), 2);

        let top = &items[1];
        assert_eq!(top.id, a);
        assert_eq!(top.layer, 999);
        assert!(top.show_resize_handle);
        assert_eq!(top.cursor, CursorHint::Move);
        assert!((top.screen_rect.width - 200.0).abs() < f32::EPSILON);

        let bottom = &items[0];
        assert_eq!(bottom.id, b);
        assert!(bottom.locked);
        assert!(!bottom.show_resize_handle);
        assert_eq!(bottom.cursor, CursorHint::NotAllowed);
        assert!((bottom.screen_rect.x - 400.0).abs() < f32::EPSILON);
        assert_eq!(bottom.alt.as_deref(), Some(ElementContent::DEFAULT_IMAGE_ALT));
        assert_eq!(top.alt, None);
    }

    #[test]
    fn test_render_list_fills_content_defaults() {
        let mut board = Board::default();
        board.add_element(
            ElementContent::Texture {
                src: "paper.png".to_string(),
                scale: None,
            },
            &PlacementOverrides::default(),
        );
        board.add_element(
            ElementContent::Typography {
                font_family: "Inter".to_string(),
            },
            &PlacementOverrides::default(),
        );

        let items = render_list(&board);
        assert_eq!(
            items[0].tile_size.as_deref(),
            Some(ElementContent::DEFAULT_TEXTURE_SCALE)
        );
        assert_eq!(items[0].sample, None);
        assert_eq!(
            items[1].sample.as_deref(),
            Some(ElementContent::TYPOGRAPHY_SAMPLE)
        );

        let json = serde_json::to_value(&items[0]).expect("serialize");
        assert_eq!(json["tileSize"], "100px");
        assert!(json.get("alt").is_none());
    }
}
