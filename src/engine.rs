use tracing::debug;

use crate::bounds::{BoundsRegistry, ElementBounds};
use crate::config::EditorConfig;
use crate::element::{ElementId, LayoutElement};
use crate::error::LayoutError;
use crate::flow::{measured_at, resolve_element, stored_y};
use crate::geometry::{Canvas, Point, Rect};
use crate::input::{FrameThrottle, InteractionState, ResizeHandle};
use crate::layout::{ElementPatch, Layout, PositionPatch, clamp_origin, clamp_rect};
use crate::measure::MeasuredHeights;
use crate::snap::{ResizeSnapResult, SnapGuide, SnapResult, compute_resize_snap, compute_snap};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectionChanged(ElementId),
    GuidesChanged(Vec<SnapGuide>),
    PositionCommitted { id: ElementId, patch: PositionPatch },
    RenderNeeded,
}

/// Editor state and the drag/resize state machine.
///
/// Pointer positions are in editor pixels (the scaled canvas preview). Stored
/// geometry is only touched on release; moves update the preview and guides.
pub struct EditorCore {
    pub layout: Layout,
    pub heights: MeasuredHeights,
    pub canvas: Canvas,
    /// Editor pixels per external-display pixel.
    pub render_scale: f64,
    pub config: EditorConfig,
    pub input: InteractionState,
    selected: Option<ElementId>,
    guides: Vec<SnapGuide>,
    /// Sibling bounds captured when the active gesture started.
    snap_targets: Vec<ElementBounds>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            layout: Layout::new(),
            heights: MeasuredHeights::new(),
            canvas: Canvas::default(),
            render_scale: 1.0,
            config,
            input: InteractionState::default(),
            selected: None,
            guides: Vec::new(),
            snap_targets: Vec::new(),
        }
    }

    // --- Data inputs ---

    /// Replace the layout with a snapshot from the settings store.
    ///
    /// Auto-height elements are queued for measurement. Out-of-range geometry
    /// is clamped only when `sanitize_on_load` is set.
    pub fn load_snapshot(&mut self, elements: Vec<LayoutElement>) {
        self.layout.load_snapshot(elements);
        self.after_load();
    }

    /// Parse and load a settings payload.
    ///
    /// # Errors
    ///
    /// Returns `Payload` if the JSON is malformed; the current layout is kept.
    pub fn load_json(&mut self, json: &str) -> Result<(), LayoutError> {
        self.layout = Layout::from_json(json)?;
        self.after_load();
        Ok(())
    }

    fn after_load(&mut self) {
        if self.config.sanitize_on_load {
            self.layout.sanitize();
        }
        for element in self.layout.iter().filter(|e| e.auto_height) {
            self.heights.request(element.id);
        }
        if let Some(active) = self.input.active_element() {
            if self.layout.get(active).is_none() {
                debug!(element = %active, "gesture target dropped by snapshot");
                self.end_gesture();
            }
        }
    }

    /// Apply an immediate field edit from the properties panel.
    ///
    /// # Errors
    ///
    /// Returns `UnknownElement` if no element has this id.
    pub fn apply_patch(&mut self, id: ElementId, patch: &ElementPatch) -> Result<Vec<Action>, LayoutError> {
        self.layout.apply_patch(id, patch)?;
        match patch.auto_height {
            Some(true) => self.heights.request(id),
            Some(false) => self.heights.forget(id),
            None => {}
        }
        Ok(vec![Action::RenderNeeded])
    }

    /// Feed back a rendered pixel height for an auto-height element.
    pub fn record_measurement(&mut self, id: ElementId, pixels: f64) -> Vec<Action> {
        self.heights.record_pixels(id, pixels, &self.canvas);
        vec![Action::RenderNeeded]
    }

    /// Drain the elements awaiting measurement on the next frame.
    pub fn pending_measurements(&mut self) -> Vec<ElementId> {
        self.heights.pending()
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    pub fn set_render_scale(&mut self, render_scale: f64) {
        self.render_scale = render_scale;
    }

    // --- Queries ---

    /// Resolved bounds of every visible element.
    #[must_use]
    pub fn bounds(&self) -> BoundsRegistry {
        BoundsRegistry::rebuild(&self.layout, &self.heights)
    }

    /// Resolved rectangle of one element, visible or not.
    #[must_use]
    pub fn resolved(&self, id: ElementId) -> Option<Rect> {
        resolve_element(&self.layout, id, &self.heights)
    }

    /// Guides of the last processed move.
    #[must_use]
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected
    }

    /// The element under an active gesture and its current preview rectangle.
    #[must_use]
    pub fn preview(&self) -> Option<(ElementId, Rect)> {
        match &self.input {
            InteractionState::Idle => None,
            InteractionState::Dragging { id, preview, .. } | InteractionState::Resizing { id, preview, .. } => {
                Some((*id, *preview))
            }
        }
    }

    // --- Drag ---

    /// Begin moving an element from `pointer`.
    ///
    /// # Errors
    ///
    /// Returns `GestureInProgress` if a gesture is active, `UnknownElement`
    /// or `ElementHidden` if the element cannot be dragged.
    pub fn on_drag_start(&mut self, id: ElementId, pointer: Point) -> Result<Vec<Action>, LayoutError> {
        let origin = self.begin_gesture(id)?;
        self.input = InteractionState::Dragging {
            id,
            origin,
            start_pointer: pointer,
            preview: origin,
            throttle: FrameThrottle::new(self.config.move_throttle_ms),
        };
        debug!(element = %id, x = origin.x, y = origin.y, "drag started");
        Ok(self.select(id))
    }

    /// Update the drag preview. Skipped when within the frame throttle.
    pub fn on_drag_move(&mut self, pointer: Point, now_ms: f64) -> Vec<Action> {
        let (id, origin, start) = match &mut self.input {
            InteractionState::Dragging { id, origin, start_pointer, throttle, .. } => {
                if !throttle.ready(now_ms) {
                    return Vec::new();
                }
                (*id, *origin, *start_pointer)
            }
            _ => return Vec::new(),
        };

        let snapped = self.drag_candidate(origin, start, pointer);
        if let InteractionState::Dragging { preview, .. } = &mut self.input {
            preview.x = snapped.x;
            preview.y = snapped.y;
        }
        debug!(element = %id, x = snapped.x, y = snapped.y, "drag preview");
        self.show_guides(snapped.guides)
    }

    /// Finish the drag at `pointer` and commit the clamped origin.
    ///
    /// Always processed, regardless of the throttle.
    ///
    /// # Errors
    ///
    /// Returns `UnknownElement` if the element was removed mid-gesture. The
    /// gesture still ends.
    pub fn on_drag_stop(&mut self, pointer: Point) -> Result<Vec<Action>, LayoutError> {
        let (id, origin, start) = match &self.input {
            InteractionState::Dragging { id, origin, start_pointer, .. } => (*id, *origin, *start_pointer),
            _ => return Ok(Vec::new()),
        };

        let snapped = self.drag_candidate(origin, start, pointer);
        let (x, y) = clamp_origin(snapped.x, snapped.y, origin.width, origin.height);
        self.end_gesture();

        // `origin` is measured geometry; grow-up elements store their bottom edge.
        let y = match self.layout.get(id) {
            Some(element) => stored_y(element, element.position.height, y, &self.heights),
            None => y,
        };
        let patch = PositionPatch::origin(x, y);
        self.layout.commit_position(id, &patch)?;
        debug!(element = %id, x, y, "drag committed");
        Ok(vec![Action::PositionCommitted { id, patch }, Action::GuidesChanged(Vec::new()), Action::RenderNeeded])
    }

    // --- Resize ---

    /// Begin resizing an element from one of its handles.
    ///
    /// # Errors
    ///
    /// Same as [`EditorCore::on_drag_start`].
    pub fn on_resize_start(
        &mut self,
        id: ElementId,
        handle: ResizeHandle,
        pointer: Point,
    ) -> Result<Vec<Action>, LayoutError> {
        let origin = self.begin_gesture(id)?;
        self.input = InteractionState::Resizing {
            id,
            handle,
            origin,
            start_pointer: pointer,
            preview: origin,
            throttle: FrameThrottle::new(self.config.move_throttle_ms),
        };
        debug!(element = %id, ?handle, "resize started");
        Ok(self.select(id))
    }

    /// Update the resize preview. Skipped when within the frame throttle.
    pub fn on_resize_move(&mut self, pointer: Point, now_ms: f64) -> Vec<Action> {
        let (id, handle, origin, start) = match &mut self.input {
            InteractionState::Resizing { id, handle, origin, start_pointer, throttle, .. } => {
                if !throttle.ready(now_ms) {
                    return Vec::new();
                }
                (*id, *handle, *origin, *start_pointer)
            }
            _ => return Vec::new(),
        };

        let snapped = self.resize_candidate(handle, origin, start, pointer);
        if let InteractionState::Resizing { preview, .. } = &mut self.input {
            *preview = snapped.rect;
        }
        debug!(element = %id, width = snapped.rect.width, height = snapped.rect.height, "resize preview");
        self.show_guides(snapped.guides)
    }

    /// Finish the resize at `pointer` and commit the clamped rectangle.
    ///
    /// # Errors
    ///
    /// Returns `UnknownElement` if the element was removed mid-gesture. The
    /// gesture still ends.
    pub fn on_resize_stop(&mut self, pointer: Point) -> Result<Vec<Action>, LayoutError> {
        let (id, handle, origin, start) = match &self.input {
            InteractionState::Resizing { id, handle, origin, start_pointer, .. } => {
                (*id, *handle, *origin, *start_pointer)
            }
            _ => return Ok(Vec::new()),
        };

        let candidate = clamp_rect(self.resize_candidate(handle, origin, start, pointer).rect);
        let rect = self.settle_on_canvas(id, candidate);
        self.end_gesture();

        let patch = PositionPatch::rect(rect);
        self.layout.commit_position(id, &patch)?;
        if self.layout.get(id).is_some_and(|e| e.auto_height) {
            self.heights.request(id);
        }
        debug!(element = %id, x = rect.x, y = rect.y, width = rect.width, height = rect.height, "resize committed");
        Ok(vec![Action::PositionCommitted { id, patch }, Action::GuidesChanged(Vec::new()), Action::RenderNeeded])
    }

    // --- Internal ---

    /// Validate a gesture target and return its resolved rectangle.
    fn begin_gesture(&mut self, id: ElementId) -> Result<Rect, LayoutError> {
        if let Some(active) = self.input.active_element() {
            return Err(LayoutError::GestureInProgress(active));
        }
        let element = self.layout.get(id).ok_or(LayoutError::UnknownElement(id))?;
        if !element.visible {
            return Err(LayoutError::ElementHidden(id));
        }
        let origin = resolve_element(&self.layout, id, &self.heights).unwrap_or(element.position);
        self.snap_targets = self.bounds().excluding(id);
        Ok(origin)
    }

    /// Shift a stored rectangle so its measured geometry stays on the canvas.
    fn settle_on_canvas(&self, id: ElementId, stored: Rect) -> Rect {
        let Some(element) = self.layout.get(id) else {
            return stored;
        };
        let measured = measured_at(element, stored, &self.heights);
        let (x, y) = clamp_origin(measured.x, measured.y, measured.width, measured.height);
        Rect { x, y: stored_y(element, stored.height, y, &self.heights), ..stored }
    }

    fn end_gesture(&mut self) {
        self.input = InteractionState::Idle;
        self.guides.clear();
        self.snap_targets.clear();
    }

    fn select(&mut self, id: ElementId) -> Vec<Action> {
        if self.selected == Some(id) {
            return Vec::new();
        }
        self.selected = Some(id);
        vec![Action::SelectionChanged(id)]
    }

    fn show_guides(&mut self, guides: Vec<SnapGuide>) -> Vec<Action> {
        let mut actions = Vec::new();
        if guides != self.guides {
            self.guides.clone_from(&guides);
            actions.push(Action::GuidesChanged(guides));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn pointer_delta(&self, start: Point, pointer: Point) -> (f64, f64) {
        self.canvas.delta_to_percent(pointer.x - start.x, pointer.y - start.y, self.render_scale)
    }

    fn drag_candidate(&self, origin: Rect, start: Point, pointer: Point) -> SnapResult {
        let (dx, dy) = self.pointer_delta(start, pointer);
        let (x, y) = (origin.x + dx, origin.y + dy);
        if !self.config.snap_enabled {
            return SnapResult { x, y, guides: Vec::new() };
        }
        compute_snap(x, y, origin.width, origin.height, &self.snap_targets, self.config.snap_threshold)
    }

    fn resize_candidate(&self, handle: ResizeHandle, origin: Rect, start: Point, pointer: Point) -> ResizeSnapResult {
        let (dx, dy) = self.pointer_delta(start, pointer);
        let rect = handle.resize(origin, dx, dy);
        if !self.config.snap_enabled {
            return ResizeSnapResult { rect, guides: Vec::new() };
        }
        compute_resize_snap(rect, handle, &self.snap_targets, self.config.snap_threshold)
    }
}
