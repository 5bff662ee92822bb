//! Non-virtualized renderer: every row stays attached.

use crate::error::RendererError;
use crate::row::Row;

use super::{
    RowRenderer, ScrollAlign, ScrollDirection, Viewport, layout_rows, scroll_target, visible_slice,
};

/// Renderer that keeps every display row attached.
///
/// Suitable for small datasets where windowing overhead is not worth it.
/// Visibility queries still answer from the scrolled viewport.
#[derive(Debug, Default)]
pub struct BasicRenderer {
    scroll_top: u32,
    viewport: Viewport,
    placeholder: bool,
}

impl BasicRenderer {
    /// Create a basic renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the empty placeholder is currently shown.
    pub fn placeholder_shown(&self) -> bool {
        self.placeholder
    }
}

impl RowRenderer for BasicRenderer {
    fn render_rows(&mut self, rows: &[Row], viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_top = 0;
        self.placeholder = false;
        layout_rows(rows);
        for row in rows {
            row.set_attached(true);
        }
    }

    fn rerender_rows(&mut self, rows: &[Row], viewport: Viewport) {
        let scroll_top = self.scroll_top;
        self.render_rows(rows, viewport);
        self.scroll_top = scroll_top;
    }

    fn scroll_rows(&mut self, _rows: &[Row], offset: u32, _direction: ScrollDirection) {
        self.scroll_top = offset;
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
