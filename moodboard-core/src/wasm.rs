//! WebAssembly bindings for moodboard-core.
//!
//! The browser editor owns one [`WasmBoard`]. The sidebar calls `addElement`,
//! toolbar buttons call `dispatch`, and canvas DOM listeners forward pointer
//! input to `handleEvent` (move and up listeners live on `window`). The
//! renderer re-reads `renderListJson` whenever the `onChange` callback fires.

use wasm_bindgen::prelude::*;

use crate::view::{self, Point};
use crate::{
    BoardCommand, BoardConfig, BoardStore, CanvasEvent, ElementContent, InteractionEngine,
    PlacementOverrides,
};

/// Install the panic hook when the module loads.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Board instance for WASM.
#[wasm_bindgen]
pub struct WasmBoard {
    store: BoardStore,
    engine: InteractionEngine,
    on_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a board with the default configuration.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(BoardStore::new())
    }

    /// Create a board from a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error string if the configuration is malformed or invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WasmBoard, String> {
        let config = BoardConfig::from_json(json).map_err(|e| e.to_string())?;
        Ok(Self::from_store(BoardStore::with_config(config)))
    }

    /// Register a callback invoked after every applied mutation.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.on_change = Some(callback);
    }

    /// Add an element from its content JSON and optional placement JSON.
    /// Returns the new element's id.
    ///
    /// # Errors
    ///
    /// Returns an error string if either JSON document is malformed.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(
        &mut self,
        content_json: &str,
        placement_json: Option<String>,
    ) -> Result<String, String> {
        let content: ElementContent =
            serde_json::from_str(content_json).map_err(|e| e.to_string())?;
        let placement: PlacementOverrides = match placement_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| e.to_string())?,
            None => PlacementOverrides::default(),
        };
        let revision = self.store.revision();
        let id = self.store.add_element(content, placement);
        self.notify_if_changed(revision);
        Ok(id.to_string())
    }

    /// Apply a store command given as JSON. Returns the new element id for
    /// `add_element` commands.
    ///
    /// # Errors
    ///
    /// Returns an error string if the command JSON is malformed.
    pub fn dispatch(&mut self, command_json: &str) -> Result<Option<String>, String> {
        let command: BoardCommand =
            serde_json::from_str(command_json).map_err(|e| e.to_string())?;
        let revision = self.store.revision();
        let created = self.store.apply(command);
        self.notify_if_changed(revision);
        Ok(created.map(|id| id.to_string()))
    }

    /// Feed a canvas event given as JSON to the interaction engine.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event JSON is malformed.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<(), String> {
        let event: CanvasEvent = serde_json::from_str(event_json).map_err(|e| e.to_string())?;
        let revision = self.store.revision();
        self.engine.handle(&mut self.store, &event);
        self.notify_if_changed(revision);
        Ok(())
    }

    /// Resolve a screen point to a pointer target, as JSON.
    #[wasm_bindgen(js_name = hitTest)]
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> String {
        let target = self.store.board().hit_test(x, y);
        serde_json::to_string(&target).unwrap_or_default()
    }

    /// Get the current board as JSON.
    #[wasm_bindgen(js_name = snapshotJson)]
    #[must_use]
    pub fn snapshot_json(&self) -> String {
        self.store.board().to_json().unwrap_or_default()
    }

    /// Get the paint list (bottom to top) as JSON.
    #[wasm_bindgen(js_name = renderListJson)]
    #[must_use]
    pub fn render_list_json(&self) -> String {
        serde_json::to_string(&view::render_list(self.store.board())).unwrap_or_default()
    }

    /// CSS transform for the board container.
    #[wasm_bindgen(js_name = cssTransform)]
    #[must_use]
    pub fn css_transform(&self) -> String {
        let board = self.store.board();
        let Point { x, y } = board.offset();
        format!("translate({x}px, {y}px) scale({})", board.scale())
    }

    /// Cursor for the canvas background, e.g. `grab`.
    #[wasm_bindgen(js_name = canvasCursor)]
    #[must_use]
    pub fn canvas_cursor(&self) -> String {
        serde_json::to_value(self.engine.canvas_cursor(&self.store))
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Zoom as a rounded percentage.
    #[wasm_bindgen(js_name = zoomPercent)]
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.store.board().zoom_percent()
    }
}

impl WasmBoard {
    fn from_store(store: BoardStore) -> Self {
        Self {
            store,
            engine: InteractionEngine::new(),
            on_change: None,
        }
    }

    fn notify_if_changed(&self, revision: u64) {
        if self.store.revision() == revision {
            return;
        }
        if let Some(callback) = &self.on_change {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                tracing::warn!("onChange callback failed: {e:?}");
            }
        }
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}
