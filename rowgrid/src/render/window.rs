//! Virtualized renderer: only a sliding window of rows stays attached.

use crate::error::RendererError;
use crate::row::Row;

use super::{
    RowRenderer, ScrollAlign, ScrollDirection, Viewport, layout_rows, scroll_target, visible_slice,
};

/// Renderer that keeps only the rows around the scrolled viewport attached.
///
/// The window covers the viewport plus `buffer` extra rows above and below,
/// so small scrolls reuse already-attached rows.
#[derive(Debug)]
pub struct VirtualRenderer {
    scroll_top: u32,
    viewport: Viewport,
    buffer: u16,
    placeholder: bool,
}

impl Default for VirtualRenderer {
    fn default() -> Self {
        Self {
            scroll_top: 0,
            viewport: Viewport::default(),
            buffer: 2,
            placeholder: false,
        }
    }
}

impl VirtualRenderer {
    /// Create a virtual renderer with the default window buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of extra rows kept attached above and below the
    /// viewport.
    pub fn with_buffer(mut self, buffer: u16) -> Self {
        self.buffer = buffer;
        self
    }

    /// Whether the empty placeholder is currently shown.
    pub fn placeholder_shown(&self) -> bool {
        self.placeholder
    }

    /// Attach rows intersecting the buffered window, detach the rest.
    fn reattach(&self, rows: &[Row]) {
        let pad = u32::from(self.buffer);
        let window_top = self.scroll_top.saturating_sub(pad);
        let window_end = self.scroll_top + u32::from(self.viewport.height) + pad;
        for row in rows {
            let state = row.render_state();
            let bottom = state.top + u32::from(state.height);
            row.set_attached(state.top < window_end && bottom > window_top);
        }
    }
}

impl RowRenderer for VirtualRenderer {
    fn render_rows(&mut self, rows: &[Row], viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_top = 0;
        self.placeholder = false;
        layout_rows(rows);
        self.reattach(rows);
    }

    fn rerender_rows(&mut self, rows: &[Row], viewport: Viewport) {
        self.viewport = viewport;
        self.placeholder = false;
        let total = layout_rows(rows);
        self.scroll_top = self
            .scroll_top
            .min(total.saturating_sub(u32::from(viewport.height)));
        self.reattach(rows);
    }

    fn scroll_rows(&mut self, rows: &[Row], offset: u32, _direction: ScrollDirection) {
        self.scroll_top = offset;
        self.reattach(rows);
    }

    fn scroll_to_row_position(
        &mut self,
        rows: &[Row],
        row: &Row,
        position: ScrollAlign,
        only_if_visible: bool,
        viewport: Viewport,
    ) -> Result<(), RendererError> {
        if let Some(offset) =
            scroll_target(rows, row, position, only_if_visible, self.scroll_top, viewport)?
        {
            self.scroll_top = offset;
            self.reattach(rows);
        }
        Ok(())
    }

    fn visible_rows(&self, rows: &[Row], include_partial: bool) -> Vec<Row> {
        visible_slice(rows, self.scroll_top, self.viewport.height, include_partial)
    }

    fn clear_rows(&mut self) {
        self.scroll_top = 0;
        self.placeholder = false;
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn show_placeholder(&mut self, _viewport: Viewport) {
        self.placeholder = true;
    }

    fn scroll_offset(&self) -> u32 {
        self.scroll_top
    }
}
