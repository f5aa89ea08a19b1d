//! # Moodboard Core
//!
//! Element model and direct-manipulation engine for the mood-board editor.
//! Compiles to WASM for the browser canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  pointer / wheel / click events (host)       │
//! ├──────────────────────────────────────────────┤
//! │  InteractionEngine                           │
//! │  - drag, resize, pan gestures                │
//! │  - wheel zoom, click selection               │
//! │  - lock enforcement                          │
//! ├──────────────────────────────────────────────┤
//! │  BoardStore                                  │
//! │  - add / update / remove / arrange / lock    │
//! │  - selection, scale, pan offset              │
//! │  - Arc<Board> snapshots on a watch channel   │
//! ├──────────────────────────────────────────────┤
//! │  renderers (read-only): view::render_list    │
//! └──────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod command;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod interaction;
pub mod store;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::{ArrangeDirection, Board, BoardDimensions};
pub use command::BoardCommand;
pub use config::BoardConfig;
pub use element::{
    Element, ElementContent, ElementId, ElementKind, ElementUpdate, Placement, PlacementOverrides,
};
pub use error::{BoardError, BoardResult};
pub use event::{CanvasEvent, PointerButton, PointerTarget};
pub use interaction::{Gesture, InteractionEngine, ResizeStart};
pub use store::{BoardStore, SnapshotReceiver};
pub use view::{CursorHint, Point, Rect, RenderItem};

/// Moodboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
