//! The row collection: authoritative row set, pipeline execution, and
//! mutation operations.
//!
//! The collection owns three structures that must stay in sync: the full row
//! set, the active subset produced by data-phase stages, and the chain of
//! display projections produced by display-phase stages. Mutations patch all
//! three directly; a full pipeline run is only needed when stage logic
//! itself changes.

use serde_json::{Map, Value};

use crate::config::{AddRowPos, GridConfig};
use crate::error::{GridError, RendererError, json_kind};
use crate::event::{GridEvent, Subscribers};
use crate::pipeline::{
    DataHandler, DisplayHandler, PipelinePhase, StageId, StageRegistry,
};
use crate::redraw::{PendingRefresh, RedrawState};
use crate::render::{
    RowRenderer, ScrollAlign, ScrollDirection, Viewport, VirtualRenderer,
};
use crate::row::{Row, index_of};

/// Which row sequence a query addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowScope {
    /// Every row in the collection, in load/add order.
    #[default]
    All,
    /// Rows remaining after data-phase stages.
    Active,
    /// The current (last) display projection.
    Display,
    /// Rows currently intersecting the viewport.
    Visible,
}

/// Owns the row dataset and reconciles it against the viewport renderer.
///
/// Single-threaded by design: all operations are synchronous with respect
/// to the caller and the pipeline never yields mid-cascade. Stage handlers
/// receive fresh copies of row sequences and must return new sequences
/// rather than mutating in place.
pub struct RowCollection {
    config: GridConfig,

    /// Every row, in load/add order unless explicitly moved.
    rows: Vec<Row>,
    /// Rows remaining after data-phase stages.
    active_rows: Vec<Row>,
    active_count: usize,
    /// Stage-by-stage data-phase outputs; slot 0 is a copy of `rows`.
    /// Kept so a refresh can resume at an arbitrary data stage.
    active_pipeline: Vec<Vec<Row>>,
    /// Display projections; slot 0 is the post-data-phase seed, the last
    /// slot is the current display.
    display_rows: Vec<Vec<Row>>,
    display_count: usize,

    data_stages: StageRegistry<DataHandler>,
    display_stages: StageRegistry<DisplayHandler>,

    redraw: RedrawState,
    renderer: Box<dyn RowRenderer + Send>,
    subscribers: Subscribers,

    viewport: Viewport,
    visible: bool,
    scroll_top: u32,
}

impl RowCollection {
    /// Create a collection with the default virtualized renderer.
    pub fn new(config: GridConfig) -> Self {
        Self::with_renderer(config, VirtualRenderer::new())
    }

    /// Create a collection with a specific renderer implementation.
    pub fn with_renderer(config: GridConfig, renderer: impl RowRenderer + Send + 'static) -> Self {
        Self {
            config,
            rows: Vec::new(),
            active_rows: Vec::new(),
            active_count: 0,
            active_pipeline: Vec::new(),
            display_rows: Vec::new(),
            display_count: 0,
            data_stages: StageRegistry::new(),
            display_stages: StageRegistry::new(),
            redraw: RedrawState::new(),
            renderer: Box::new(renderer),
            subscribers: Subscribers::new(),
            viewport: Viewport::default(),
            visible: true,
            scroll_top: 0,
        }
    }

    /// Get the collection configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Subscribe to lifecycle notifications.
    pub fn subscribe(&mut self, handler: impl FnMut(&GridEvent) + Send + 'static) {
        self.subscribers.subscribe(handler);
    }

    fn dispatch(&mut self, event: GridEvent) {
        self.subscribers.dispatch(&event);
    }

    // -------------------------------------------------------------------------
    // Stage registration
    // -------------------------------------------------------------------------

    /// Register a data-phase stage.
    ///
    /// Stages run in ascending priority order, ties broken by registration
    /// order. The returned id can be passed to [`refresh_from`](Self::refresh_from)
    /// when the stage's own configuration changes.
    pub fn register_data_stage(
        &mut self,
        priority: i32,
        handler: impl FnMut(Vec<Row>) -> Option<Vec<Row>> + Send + 'static,
    ) -> StageId {
        self.data_stages.register(priority, Box::new(handler))
    }

    /// Register a display-phase stage.
    ///
    /// The handler additionally receives a preserve-scroll-position hint.
    pub fn register_display_stage(
        &mut self,
        priority: i32,
        handler: impl FnMut(Vec<Row>, bool) -> Option<Vec<Row>> + Send + 'static,
    ) -> StageId {
        self.display_stages.register(priority, Box::new(handler))
    }

    // -------------------------------------------------------------------------
    // Data loading
    // -------------------------------------------------------------------------

    /// Replace the full row set from a JSON dataset.
    ///
    /// Non-object entries are skipped with a logged warning. A non-array
    /// dataset is a configuration error: it is reported and prior state is
    /// left untouched. Resets scroll and triggers a full pipeline run.
    pub fn load(&mut self, data: Value) -> Result<(), GridError> {
        let records = Self::expect_array(data)?;
        self.reset_scroll();
        self.set_data_actual(records, false);
        Ok(())
    }

    /// Replace the row set, re-rendering in place when a display exists.
    ///
    /// With pagination configured, the in-place re-render is suppressed in
    /// favour of page-boundary semantics.
    pub fn reload_in_place(&mut self, data: Value) -> Result<(), GridError> {
        let records = Self::expect_array(data)?;
        if self.display_count > 0 {
            self.set_data_actual(records, !self.config.pagination);
        } else {
            self.reset_scroll();
            self.set_data_actual(records, false);
        }
        Ok(())
    }

    /// Replace the full row set from typed records.
    pub fn load_records(&mut self, records: Vec<Map<String, Value>>) {
        self.dispatch(GridEvent::RowsReplaced);
        self.wipe();
        let count = records.len();
        for record in records {
            self.ingest(record);
        }
        self.refresh_request(PendingRefresh {
            phase: PipelinePhase::All,
            index: 0,
            stage: None,
            skip_stage: false,
            render_in_place: false,
        });
        self.dispatch(GridEvent::DataProcessed { count });
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.load_records(Vec::new());
    }

    fn expect_array(data: Value) -> Result<Vec<Value>, GridError> {
        match data {
            Value::Array(records) => Ok(records),
            other => {
                let kind = json_kind(&other);
                log::error!(
                    "data loading error: unable to process data, expected an array of records, received {kind}"
                );
                Err(GridError::InvalidDataset { kind })
            }
        }
    }

    fn set_data_actual(&mut self, records: Vec<Value>, render_in_place: bool) {
        self.dispatch(GridEvent::RowsReplaced);
        self.wipe();

        let mut count = 0;
        for value in records {
            match value {
                Value::Object(record) => {
                    self.ingest(record);
                    count += 1;
                }
                other => {
                    log::warn!(
                        "data loading warning: invalid row data ignored, expected an object but received {}",
                        json_kind(&other)
                    );
                }
            }
        }

        self.refresh_request(PendingRefresh {
            phase: PipelinePhase::All,
            index: 0,
            stage: None,
            skip_stage: false,
            render_in_place,
        });
        self.dispatch(GridEvent::DataProcessed { count });
    }

    fn ingest(&mut self, record: Map<String, Value>) {
        let row = Row::new(record);
        row.set_height(self.config.row_height);
        self.rows.push(row);
    }

    fn wipe(&mut self) {
        for row in &self.rows {
            row.wipe();
        }
        self.rows.clear();
        self.active_rows.clear();
        self.active_pipeline.clear();
        self.active_count = 0;
        self.display_rows.clear();
        self.display_count = 0;
    }

    // -------------------------------------------------------------------------
    // Row mutation
    // -------------------------------------------------------------------------

    /// Insert a new row, splicing it into every structure it belongs in.
    ///
    /// With an anchor, the row lands before (`Top`) or after (`Bottom`) the
    /// anchor's position in each structure independently; where the anchor
    /// is absent from a derived structure the row is simply omitted there
    /// until the next pipeline run. Without an anchor the row goes to the
    /// head or tail per `pos` (default from configuration).
    pub fn add(
        &mut self,
        record: Map<String, Value>,
        pos: Option<AddRowPos>,
        anchor: Option<&Row>,
    ) -> Row {
        self.add_actual(record, pos, anchor, false)
    }

    /// Insert several rows, running one pipeline refresh at the end.
    ///
    /// The final order of the inserted block matches the input order
    /// regardless of insert position.
    pub fn add_many(
        &mut self,
        mut records: Vec<Map<String, Value>>,
        pos: Option<AddRowPos>,
        anchor: Option<&Row>,
    ) -> Vec<Row> {
        let top = matches!(pos.unwrap_or(self.config.add_row_pos), AddRowPos::Top);

        // Head inserts and anchored after-inserts land one-by-one at the same
        // position, so the input is reversed to keep the block in order.
        if (anchor.is_none() && top) || (anchor.is_some() && !top) {
            records.reverse();
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(self.add_actual(record, pos, anchor, true));
        }

        self.refresh_request(PendingRefresh {
            phase: PipelinePhase::All,
            index: 0,
            stage: None,
            skip_stage: false,
            render_in_place: true,
        });

        rows
    }

    fn add_actual(
        &mut self,
        record: Map<String, Value>,
        pos: Option<AddRowPos>,
        anchor: Option<&Row>,
        block_redraw: bool,
    ) -> Row {
        let row = Row::new(record);
        row.set_height(self.config.row_height);
        let top = matches!(pos.unwrap_or(self.config.add_row_pos), AddRowPos::Top);

        let anchor_index = anchor.and_then(|a| index_of(&self.rows, a));

        if let (Some(anchor), Some(all_index)) = (anchor, anchor_index) {
            let splice = |rows: &mut Vec<Row>, at: usize| {
                rows.insert(if top { at } else { at + 1 }, row.clone());
            };

            let inserted = row.clone();
            self.display_row_iterator(|rows| {
                if let Some(i) = index_of(rows, anchor) {
                    rows.insert(if top { i } else { i + 1 }, inserted.clone());
                }
            });

            if let Some(i) = index_of(&self.active_rows, anchor) {
                splice(&mut self.active_rows, i);
            }
            splice(&mut self.rows, all_index);
        } else if top {
            let inserted = row.clone();
            self.display_row_iterator(|rows| rows.insert(0, inserted.clone()));
            self.active_rows.insert(0, row.clone());
            self.rows.insert(0, row.clone());
        } else {
            let inserted = row.clone();
            self.display_row_iterator(|rows| rows.push(inserted.clone()));
            self.active_rows.push(row.clone());
            self.rows.push(row.clone());
        }

        self.active_count = self.active_rows.len();

        self.dispatch(GridEvent::RowAdded { row: row.clone() });
        self.dispatch(GridEvent::DataChanged);

        if !block_redraw {
            self.rerender_in_place();
        }

        row
    }

    /// Remove a row from every structure it appears in, by identity.
    ///
    /// Absence from a derived structure is not an error; that structure is
    /// left unchanged. Triggers an in-place re-render unless redraw is
    /// suspended, and signals the empty placeholder when the display
    /// projection becomes empty.
    pub fn remove(&mut self, row: &Row) {
        if let Some(i) = index_of(&self.active_rows, row) {
            self.active_rows.remove(i);
        }
        if let Some(i) = index_of(&self.rows, row) {
            self.rows.remove(i);
        }
        self.active_count = self.active_rows.len();

        self.display_row_iterator(|rows| {
            if let Some(i) = index_of(rows, row) {
                rows.remove(i);
            }
        });

        self.rerender_in_place();

        row.wipe();
        self.dispatch(GridEvent::RowDeleted { row: row.clone() });

        if self.display_count == 0 {
            self.renderer.show_placeholder(self.viewport);
            self.dispatch(GridEvent::DisplayEmpty);
        }

        self.dispatch(GridEvent::DataChanged);
    }

    /// Relocate a row next to an anchor, per structure independently.
    ///
    /// A structure that does not contain the anchor keeps the row in its
    /// original position there. Only the affected index range of the
    /// current display projection is re-striped.
    pub fn move_row(&mut self, row: &Row, anchor: &Row, after: bool) {
        move_row_in_vec(&mut self.rows, row, anchor, after);
        move_row_in_vec(&mut self.active_rows, row, anchor, after);

        for rows in &mut self.active_pipeline {
            move_row_in_vec(rows, row, anchor, after);
        }

        let last = self.display_rows.len().checked_sub(1);
        for (i, rows) in self.display_rows.iter_mut().enumerate() {
            let moved = move_row_in_vec(rows, row, anchor, after);
            if Some(i) == last
                && let Some((from, to)) = moved
            {
                restripe_range(rows, from, to);
            }
        }
        self.display_count = self.display_rows.last().map(Vec::len).unwrap_or(0);

        self.dispatch(GridEvent::RowMoved { row: row.clone() });
    }

    fn display_row_iterator(&mut self, mut f: impl FnMut(&mut Vec<Row>)) {
        for rows in &mut self.active_pipeline {
            f(rows);
        }
        for rows in &mut self.display_rows {
            f(rows);
        }
        self.display_count = self.display_rows.last().map(Vec::len).unwrap_or(0);
    }

    // -------------------------------------------------------------------------
    // Pipeline execution
    // -------------------------------------------------------------------------

    /// Run the full pipeline from scratch and re-render.
    pub fn refresh(&mut self) {
        self.refresh_phase(PipelinePhase::All, false);
    }

    /// Run the cascade from the given phase onward.
    pub fn refresh_phase(&mut self, phase: PipelinePhase, render_in_place: bool) {
        self.refresh_request(PendingRefresh {
            phase,
            index: 0,
            stage: None,
            skip_stage: false,
            render_in_place,
        });
    }

    /// Resume the cascade at a previously-registered stage.
    ///
    /// Used when a stage's own configuration changes. With `skip_stage`,
    /// the cascade starts after the named stage; resuming past the last
    /// stage of a phase advances to the next phase. Naming an unknown
    /// stage is a configuration error: reported, and a no-op.
    pub fn refresh_from(
        &mut self,
        stage: StageId,
        skip_stage: bool,
        render_in_place: bool,
    ) -> Result<(), GridError> {
        let request = self.resolve_stage(stage, skip_stage, render_in_place)?;
        self.refresh_request(request);
        Ok(())
    }

    fn resolve_stage(
        &self,
        stage: StageId,
        skip_stage: bool,
        render_in_place: bool,
    ) -> Result<PendingRefresh, GridError> {
        let (phase, index) = if let Some(i) = self.data_stages.index_of(stage) {
            if skip_stage {
                if i + 1 == self.data_stages.len() {
                    (PipelinePhase::ResetDisplay, 0)
                } else {
                    (PipelinePhase::DataStages, i + 1)
                }
            } else {
                (PipelinePhase::DataStages, i)
            }
        } else if let Some(i) = self.display_stages.index_of(stage) {
            if skip_stage {
                if i + 1 == self.display_stages.len() {
                    (PipelinePhase::End, 0)
                } else {
                    (PipelinePhase::DisplayStages, i + 1)
                }
            } else {
                (PipelinePhase::DisplayStages, i)
            }
        } else {
            log::error!("unable to refresh data, unknown pipeline stage {stage}");
            return Err(GridError::UnknownStage { stage });
        };

        Ok(PendingRefresh {
            phase,
            index,
            stage: Some(stage),
            skip_stage,
            render_in_place,
        })
    }

    fn refresh_request(&mut self, request: PendingRefresh) {
        if self.redraw.is_suspended() {
            self.redraw.capture(request);
            return;
        }
        self.run_cascade(request);
    }

    fn run_cascade(&mut self, request: PendingRefresh) {
        self.dispatch(GridEvent::Refreshing);
        log::debug!(
            "pipeline refresh from {:?}[{}], render_in_place: {}",
            request.phase,
            request.index,
            request.render_in_place
        );

        // A from-scratch refresh reseeds stage zero from the full row set.
        if request.stage.is_none() && request.phase == PipelinePhase::All {
            self.set_pipeline_slot(0, self.rows.clone());
        }

        let mut phase = request.phase;
        let mut index = request.index;

        if phase == PipelinePhase::All {
            phase = PipelinePhase::DataStages;
            index = 0;
        }

        if phase == PipelinePhase::DataStages {
            for i in index..self.data_stages.len() {
                let input = self.pipeline_input(i);
                let result = (self.data_stages.handler_mut(i))(input);
                let next = match result {
                    Some(rows) => rows,
                    None => self.pipeline_input(i),
                };
                self.set_pipeline_slot(i + 1, next);
            }
            let active = self.pipeline_input(self.data_stages.len());
            self.active_count = active.len();
            self.active_rows = active;

            phase = PipelinePhase::ResetDisplay;
            index = 0;
        }

        if phase == PipelinePhase::ResetDisplay {
            self.reset_display_rows();
            phase = PipelinePhase::DisplayStages;
            index = 0;
        }

        if phase == PipelinePhase::DisplayStages {
            for i in index..self.display_stages.len() {
                let input = self.display_input(i);
                let result = (self.display_stages.handler_mut(i))(input, request.render_in_place);
                let next = match result {
                    Some(rows) => rows,
                    None => self.display_input(i),
                };
                self.set_display_slot(i + 1, next);
            }
        }

        // PipelinePhase::End runs nothing further.

        if self.visible {
            if request.render_in_place {
                self.rerender_in_place();
            } else {
                self.render();
            }
        }

        self.dispatch(GridEvent::Refreshed);
    }

    fn pipeline_input(&mut self, index: usize) -> Vec<Row> {
        if self.active_pipeline.is_empty() {
            self.active_pipeline.push(self.rows.clone());
        }
        while self.active_pipeline.len() <= index {
            let prev = self.active_pipeline.last().cloned().unwrap_or_default();
            self.active_pipeline.push(prev);
        }
        self.active_pipeline[index].clone()
    }

    fn set_pipeline_slot(&mut self, index: usize, rows: Vec<Row>) {
        while self.active_pipeline.len() <= index {
            let prev = self.active_pipeline.last().cloned().unwrap_or_default();
            self.active_pipeline.push(prev);
        }
        self.active_pipeline[index] = rows;
    }

    fn reset_display_rows(&mut self) {
        self.display_rows.clear();
        self.display_rows.push(self.active_rows.clone());
        self.display_count = self.active_rows.len();
    }

    fn display_input(&mut self, index: usize) -> Vec<Row> {
        if self.display_rows.is_empty() {
            self.reset_display_rows();
        }
        while self.display_rows.len() <= index {
            let prev = self.display_rows.last().cloned().unwrap_or_default();
            self.display_rows.push(prev);
        }
        self.display_rows[index].clone()
    }

    fn set_display_slot(&mut self, index: usize, rows: Vec<Row>) {
        while self.display_rows.len() <= index {
            let prev = self.display_rows.last().cloned().unwrap_or_default();
            self.display_rows.push(prev);
        }
        self.display_rows[index] = rows;
        self.display_count = self.display_rows.last().map(Vec::len).unwrap_or(0);
    }

    // -------------------------------------------------------------------------
    // Redraw coordination
    // -------------------------------------------------------------------------

    /// Suspend pipeline recomputation so mutations can be batched.
    ///
    /// Any stale pending request from a previous suspension is cleared.
    pub fn suspend_redraw(&mut self) {
        self.redraw.suspend();
    }

    /// Resume recomputation.
    ///
    /// If a refresh was captured while suspended, it is executed now from
    /// the earliest requested pipeline position; otherwise a bare in-place
    /// re-render is performed if one was requested.
    pub fn resume_redraw(&mut self) {
        let (pending, in_place) = self.redraw.resume();

        if let Some(request) = pending {
            // Stage-pinned requests are re-resolved so registry changes made
            // while suspended are honoured.
            match request.stage {
                Some(stage) => {
                    let _ = self.refresh_from(stage, request.skip_stage, request.render_in_place);
                }
                None => self.run_cascade(request),
            }
        } else if in_place {
            self.rerender_in_place();
        }
    }

    /// Whether redraw is currently suspended.
    pub fn redraw_suspended(&self) -> bool {
        self.redraw.is_suspended()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn render(&mut self) {
        self.dispatch(GridEvent::RenderStarted);

        self.scroll_top = 0;
        self.renderer.clear_rows();

        if self.display_count > 0 {
            let rows = self.current_display().to_vec();
            self.renderer.render_rows(&rows, self.viewport);
        } else {
            self.renderer.show_placeholder(self.viewport);
            self.dispatch(GridEvent::DisplayEmpty);
        }

        self.dispatch(GridEvent::RenderComplete);
    }

    fn rerender_in_place(&mut self) {
        if self.redraw.is_suspended() {
            self.redraw.request_in_place();
            return;
        }
        let rows = self.current_display().to_vec();
        self.renderer.rerender_rows(&rows, self.viewport);
    }

    /// Forward a vertical scroll to the renderer.
    pub fn scroll_vertical(&mut self, offset: u32) {
        let upward = offset < self.scroll_top;
        self.scroll_top = offset;
        let rows = self.current_display().to_vec();
        let direction = if upward {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        self.renderer.scroll_rows(&rows, offset, direction);
        self.dispatch(GridEvent::ScrollVertical { offset, upward });
    }

    /// Scroll a row into view at the requested alignment.
    ///
    /// Fails with a row-not-found condition when the row is absent from the
    /// current display projection.
    pub fn scroll_to_row(
        &mut self,
        row: &Row,
        position: ScrollAlign,
        only_if_visible: bool,
    ) -> Result<(), RendererError> {
        let rows = self.current_display().to_vec();
        self.renderer
            .scroll_to_row_position(&rows, row, position, only_if_visible, self.viewport)?;
        self.scroll_top = self.renderer.scroll_offset();
        Ok(())
    }

    /// Update the viewport dimensions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.resize(viewport);
    }

    /// Set whether the container is visible. Invisible collections skip
    /// render side effects; pipeline state still updates.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Current viewport dimensions.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current vertical scroll offset, as reported by the renderer.
    pub fn scroll_offset(&self) -> u32 {
        self.renderer.scroll_offset()
    }

    fn reset_scroll(&mut self) {
        self.scroll_top = 0;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Rows for the given scope, in order.
    pub fn rows(&self, scope: RowScope) -> Vec<Row> {
        match scope {
            RowScope::All => self.rows.clone(),
            RowScope::Active => self.active_rows.clone(),
            RowScope::Display => self.current_display().to_vec(),
            RowScope::Visible => self.visible_rows(true),
        }
    }

    /// Exported records for the given scope (data rows only).
    pub fn data(&self, scope: RowScope) -> Vec<Map<String, Value>> {
        self.rows(scope)
            .iter()
            .filter(|row| row.is_data())
            .map(Row::data)
            .collect()
    }

    /// Row count for the given scope.
    pub fn row_count(&self, scope: RowScope) -> usize {
        match scope {
            RowScope::All => self.rows.len(),
            RowScope::Active => self.active_count,
            RowScope::Display => self.display_count,
            RowScope::Visible => self.visible_rows(true).len(),
        }
    }

    /// Find a row by the configured identity field.
    pub fn get_row(&self, key: &Value) -> Option<Row> {
        self.rows
            .iter()
            .find(|row| row.field(&self.config.index_field).as_ref() == Some(key))
            .cloned()
    }

    /// Find the first row whose record matches a predicate.
    pub fn find_row(&self, predicate: impl Fn(&Map<String, Value>) -> bool) -> Option<Row> {
        self.rows
            .iter()
            .find(|row| predicate(&row.data()))
            .cloned()
    }

    /// Row at a position within the given scope.
    pub fn row_at(&self, position: usize, scope: RowScope) -> Option<Row> {
        match scope {
            RowScope::All => self.rows.get(position).cloned(),
            RowScope::Active => self.active_rows.get(position).cloned(),
            RowScope::Display => self.current_display().get(position).cloned(),
            RowScope::Visible => self.visible_rows(true).get(position).cloned(),
        }
    }

    /// Position of a row within the given scope.
    pub fn row_position(&self, row: &Row, scope: RowScope) -> Option<usize> {
        match scope {
            RowScope::All => index_of(&self.rows, row),
            RowScope::Active => index_of(&self.active_rows, row),
            RowScope::Display => index_of(self.current_display(), row),
            RowScope::Visible => index_of(&self.visible_rows(true), row),
        }
    }

    /// The next row after `row` in the current display projection.
    ///
    /// With `data_only`, display-only nodes (group headers, spacers) are
    /// skipped.
    pub fn next_display_row(&self, row: &Row, data_only: bool) -> Option<Row> {
        let display = self.current_display();
        let mut index = index_of(display, row)?;
        loop {
            index += 1;
            let next = display.get(index)?;
            if !data_only || next.is_data() {
                return Some(next.clone());
            }
        }
    }

    /// The row before `row` in the current display projection.
    pub fn prev_display_row(&self, row: &Row, data_only: bool) -> Option<Row> {
        let display = self.current_display();
        let mut index = index_of(display, row)?;
        while index > 0 {
            index -= 1;
            let prev = &display[index];
            if !data_only || prev.is_data() {
                return Some(prev.clone());
            }
        }
        None
    }

    /// The current (last) display projection.
    pub fn current_display(&self) -> &[Row] {
        self.display_rows.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// A specific display projection; index 0 is the post-data-phase seed.
    pub fn display_projection(&self, index: usize) -> Option<&[Row]> {
        self.display_rows.get(index).map(Vec::as_slice)
    }

    /// Number of display projections currently held.
    pub fn projection_count(&self) -> usize {
        self.display_rows.len()
    }

    /// Rows currently intersecting the viewport.
    pub fn visible_rows(&self, include_partial: bool) -> Vec<Row> {
        self.renderer
            .visible_rows(self.current_display(), include_partial)
    }
}

/// Relocate `from` next to `to` within one sequence.
///
/// Returns the `(removed, inserted)` indices when the move happened, `None`
/// when the anchor was absent (the sequence is left unchanged).
fn move_row_in_vec(rows: &mut Vec<Row>, from: &Row, to: &Row, after: bool) -> Option<(usize, usize)> {
    if from == to {
        return None;
    }

    let from_index = index_of(rows, from)?;
    rows.remove(from_index);

    match index_of(rows, to) {
        Some(to_index) => {
            let insert = if after { to_index + 1 } else { to_index };
            rows.insert(insert, from.clone());
            Some((from_index, insert))
        }
        None => {
            rows.insert(from_index, from.clone());
            None
        }
    }
}

/// Reassign stripe parity for the index range touched by a move.
fn restripe_range(rows: &[Row], from: usize, to: usize) {
    let start = from.min(to);
    let end = from.max(to).min(rows.len().saturating_sub(1));
    for (i, row) in rows.iter().enumerate().take(end + 1).skip(start) {
        row.set_even(i % 2 == 1);
    }
}
