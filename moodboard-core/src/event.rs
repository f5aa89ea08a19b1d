//! Pointer input delivered to the interaction engine.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Mouse button of a press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Left button, or a touch / pen contact.
    #[default]
    Primary,
    /// Wheel button.
    Middle,
    /// Right button.
    Secondary,
}

/// What a pointer event landed on, as resolved by the host (see
/// [`crate::Board::hit_test`]).
///
/// Targets do not bubble: a press on a resize handle is never also a press on
/// its element, and a press on an element is never a press on the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PointerTarget {
    /// Empty canvas.
    Background,
    /// An element body.
    Element(ElementId),
    /// The resize handle of an element.
    ResizeHandle(ElementId),
}

/// Canvas input events.
///
/// Positions are in the host's pointer coordinate space. Move and up events
/// are global: hosts must forward them even when the pointer has left the
/// element or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Button pressed.
    PointerDown {
        /// What was pressed.
        target: PointerTarget,
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
        /// Which button.
        #[serde(default)]
        button: PointerButton,
    },

    /// Pointer moved.
    PointerMove {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// Button released, anywhere.
    PointerUp {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// A completed click (press and release on the same target).
    Click {
        /// What was clicked.
        target: PointerTarget,
    },

    /// Wheel scrolled.
    Wheel {
        /// Vertical scroll amount; positive scrolls down (zooms out).
        delta_y: f32,
    },
}

impl CanvasEvent {
    /// Primary-button press at a point.
    #[must_use]
    pub const fn press(target: PointerTarget, x: f32, y: f32) -> Self {
        Self::PointerDown {
            target,
            x,
            y,
            button: PointerButton::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let id = ElementId::new();
        let event = CanvasEvent::press(PointerTarget::Element(id), 3.0, 4.0);
        let json = serde_json::to_value(event).expect("serialize");
        assert_eq!(json["type"], "pointer_down");
        assert_eq!(json["data"]["target"]["kind"], "element");
        assert_eq!(json["data"]["target"]["id"], id.to_string());
        assert_eq!(json["data"]["button"], "primary");
    }

    #[test]
    fn test_button_defaults_to_primary() {
        let event: CanvasEvent = serde_json::from_str(
            r#"{"type":"pointer_down","data":{"target":{"kind":"background"},"x":1,"y":2}}"#,
        )
        .expect("parse");
        assert_eq!(
            event,
            CanvasEvent::press(PointerTarget::Background, 1.0, 2.0)
        );
    }
}
