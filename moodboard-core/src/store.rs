//! Board state store with snapshot notification.
//!
//! [`BoardStore`] is the single writer of a [`Board`]. Each applied mutation
//! publishes an immutable `Arc<Board>` snapshot on a `tokio::sync::watch`
//! channel; renderers hold a receiver and always see the latest board.
//! No-ops (unknown ids or values equal to the current state) publish nothing.

use std::sync::Arc;

use tokio::sync::watch;

use crate::view::Point;
use crate::{
    ArrangeDirection, Board, BoardCommand, BoardConfig, BoardDimensions, ElementContent, ElementId,
    ElementUpdate, PlacementOverrides,
};

/// Receiver half handed to board subscribers.
pub type SnapshotReceiver = watch::Receiver<Arc<Board>>;

/// The board state store.
///
/// # Example
///
/// ```
/// use moodboard_core::{BoardStore, ElementContent, PlacementOverrides};
///
/// let mut store = BoardStore::new();
/// let mut snapshots = store.subscribe();
///
/// let id = store.add_element(ElementContent::color("#112233"), PlacementOverrides::default());
///
/// assert!(snapshots.has_changed().unwrap());
/// assert!(snapshots.borrow_and_update().get_element(id).is_some());
/// ```
#[derive(Debug)]
pub struct BoardStore {
    board: Board,
    snapshots: watch::Sender<Arc<Board>>,
    revision: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Create a store with the default configuration (1200x800 board).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create a store with a custom configuration.
    ///
    /// The configuration should have passed [`BoardConfig::validate`].
    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "unvalidated board config");
        let board = Board::new(config);
        let (snapshots, _) = watch::channel(Arc::new(board.clone()));
        Self {
            board,
            snapshots,
            revision: 0,
        }
    }

    /// The current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&*self.snapshots.borrow())
    }

    /// Subscribe to board snapshots. The current snapshot counts as seen.
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.snapshots.subscribe()
    }

    /// Number of snapshots published since creation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Publish the board if `applied`, and pass `applied` through.
    fn commit(&mut self, applied: bool, operation: &'static str) -> bool {
        if !applied {
            return false;
        }
        debug_assert!(
            self.board.selected_id().is_none() || self.board.selected_element().is_some(),
            "selection names a missing element"
        );
        self.revision += 1;
        self.snapshots.send_replace(Arc::new(self.board.clone()));
        tracing::trace!(revision = self.revision, operation, "Board snapshot published");
        true
    }

    // -----------------------------------------------------------------------
    // Element operations
    // -----------------------------------------------------------------------

    /// Add an element at the default placement merged with `overrides`.
    pub fn add_element(
        &mut self,
        content: ElementContent,
        overrides: PlacementOverrides,
    ) -> ElementId {
        let id = self.board.add_element(content, &overrides);
        self.commit(true, "add_element");
        id
    }

    /// Merge a partial update into an element. Unknown ids are ignored.
    pub fn update_element(&mut self, id: ElementId, update: &ElementUpdate) -> bool {
        let applied = self.board.update_element(id, update);
        self.commit(applied, "update_element")
    }

    /// Remove an element; clears the selection if it was selected.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let applied = self.board.remove_element(id);
        self.commit(applied, "remove_element")
    }

    /// Set or clear the selection. Unknown ids are ignored.
    pub fn select_element(&mut self, id: Option<ElementId>) -> bool {
        let applied = self.board.select_element(id);
        self.commit(applied, "select_element")
    }

    /// Overwrite an element's position.
    ///
    /// Locked elements are moved too; lock enforcement belongs to
    /// [`crate::InteractionEngine`].
    pub fn move_element(&mut self, id: ElementId, x: f32, y: f32) -> bool {
        let applied = self.board.move_element(id, x, y);
        self.commit(applied, "move_element")
    }

    /// Overwrite an element's size, floored at the minimum element size.
    pub fn resize_element(&mut self, id: ElementId, width: f32, height: f32) -> bool {
        let applied = self.board.resize_element(id, width, height);
        self.commit(applied, "resize_element")
    }

    /// Change an element's stacking order.
    pub fn arrange_element(&mut self, id: ElementId, direction: ArrangeDirection) -> bool {
        let applied = self.board.arrange_element(id, direction);
        self.commit(applied, "arrange_element")
    }

    /// Set an element's lock flag.
    pub fn lock_element(&mut self, id: ElementId, locked: bool) -> bool {
        let applied = self.board.lock_element(id, locked);
        self.commit(applied, "lock_element")
    }

    // -----------------------------------------------------------------------
    // View operations
    // -----------------------------------------------------------------------

    /// Replace the board size.
    pub fn set_board_dimensions(&mut self, dimensions: BoardDimensions) -> bool {
        let applied = self.board.set_dimensions(dimensions);
        self.commit(applied, "set_board_dimensions")
    }

    /// Set the zoom factor, clamped to the configured range.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        let applied = self.board.set_scale(scale);
        self.commit(applied, "set_scale")
    }

    /// Replace the pan offset.
    pub fn set_offset(&mut self, offset: Point) -> bool {
        let applied = self.board.set_offset(offset);
        self.commit(applied, "set_offset")
    }

    /// Zoom in by one button step.
    pub fn zoom_in(&mut self) -> bool {
        let step = self.board.config().button_zoom_step;
        let applied = self.board.zoom_by(step);
        self.commit(applied, "zoom_in")
    }

    /// Zoom out by one button step.
    pub fn zoom_out(&mut self) -> bool {
        let step = self.board.config().button_zoom_step;
        let applied = self.board.zoom_by(-step);
        self.commit(applied, "zoom_out")
    }

    /// Reset scale to 1.0 and pan to the origin.
    pub fn reset_view(&mut self) -> bool {
        let applied = self.board.reset_view();
        self.commit(applied, "reset_view")
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Apply a command. Returns the new element's id for
    /// [`BoardCommand::AddElement`], `None` otherwise.
    pub fn apply(&mut self, command: BoardCommand) -> Option<ElementId> {
        tracing::debug!(?command, "Applying board command");
        match command {
            BoardCommand::AddElement { content, placement } => {
                return Some(self.add_element(content, placement));
            }
            BoardCommand::UpdateElement { id, update } => {
                self.update_element(id, &update);
            }
            BoardCommand::RemoveElement { id } => {
                self.remove_element(id);
            }
            BoardCommand::SelectElement { id } => {
                self.select_element(id);
            }
            BoardCommand::MoveElement { id, x, y } => {
                self.move_element(id, x, y);
            }
            BoardCommand::ResizeElement { id, width, height } => {
                self.resize_element(id, width, height);
            }
            BoardCommand::SetBoardDimensions { dimensions } => {
                self.set_board_dimensions(dimensions);
            }
            BoardCommand::SetScale { scale } => {
                self.set_scale(scale);
            }
            BoardCommand::SetOffset { offset } => {
                self.set_offset(offset);
            }
            BoardCommand::ArrangeElement { id, direction } => {
                self.arrange_element(id, direction);
            }
            BoardCommand::LockElement { id, locked } => {
                self.lock_element(id, locked);
            }
            BoardCommand::ZoomIn => {
                self.zoom_in();
            }
            BoardCommand::ZoomOut => {
                self.zoom_out();
            }
            BoardCommand::ResetView => {
                self.reset_view();
            }
        }
        None
    }
}
