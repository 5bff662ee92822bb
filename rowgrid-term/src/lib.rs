//! Terminal renderer for `rowgrid` collections.
//!
//! [`TermRenderer`] paints the visible window of a collection's display
//! projection to any [`Write`] sink using crossterm commands. It draws a
//! header line followed by `viewport.height` row lines, so callers should
//! size the viewport to the row area, not the full terminal.

pub mod text;

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};

use rowgrid::render::{layout_rows, scroll_target, visible_slice};
use rowgrid::{RendererError, Row, RowRenderer, ScrollAlign, ScrollDirection, Viewport};

use crate::text::{pad_to_width, truncate_to_width};

/// One rendered column: which record field it shows and how wide it is.
#[derive(Debug, Clone)]
pub struct Column {
    /// Record field to read the cell value from.
    pub key: String,
    /// Header label.
    pub header: String,
    /// Column width in terminal cells.
    pub width: u16,
}

impl Column {
    /// Create a column definition.
    pub fn new(key: impl Into<String>, header: impl Into<String>, width: u16) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width,
        }
    }
}

/// Crossterm-backed viewport renderer.
///
/// Generic over the output sink so tests can render into a byte buffer.
/// Draw failures are logged and swallowed: a paint error must never poison
/// collection state.
pub struct TermRenderer<W: Write> {
    out: W,
    columns: Vec<Column>,
    placeholder_text: String,
    scroll_top: u32,
    viewport: Viewport,
}

impl<W: Write> TermRenderer<W> {
    /// Create a renderer writing to `out` with the given column layout.
    pub fn new(out: W, columns: Vec<Column>) -> Self {
        Self {
            out,
            columns,
            placeholder_text: "No data".to_string(),
            scroll_top: 0,
            viewport: Viewport::default(),
        }
    }

    /// Set the text shown when the display projection is empty.
    pub fn placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    /// Consume the renderer, returning the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, rows: &[Row]) {
        if let Err(err) = self.try_draw(rows) {
            log::error!("terminal draw failed: {err}");
        }
    }

    fn try_draw(&mut self, rows: &[Row]) -> std::io::Result<()> {
        self.draw_header()?;

        let visible = visible_slice(rows, self.scroll_top, self.viewport.height, true);
        let mut line = 1u16;
        for row in &visible {
            queue!(self.out, MoveTo(0, line), Clear(ClearType::UntilNewLine))?;
            if row.render_state().even {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
            let formatted = self.format_row(row);
            queue!(self.out, Print(formatted))?;
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            line += 1;
        }

        // Blank out viewport lines past the end of the content.
        while line <= self.viewport.height {
            queue!(self.out, MoveTo(0, line), Clear(ClearType::UntilNewLine))?;
            line += 1;
        }

        self.out.flush()
    }

    fn draw_header(&mut self) -> std::io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::UntilNewLine),
            SetAttribute(Attribute::Bold)
        )?;
        let header = self
            .columns
            .iter()
            .map(|col| pad_to_width(&col.header, col.width as usize))
            .collect::<Vec<_>>()
            .join(" ");
        queue!(self.out, Print(header), SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn format_row(&self, row: &Row) -> String {
        self.columns
            .iter()
            .map(|col| pad_to_width(&self.cell_text(row, col), col.width as usize))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn cell_text(&self, row: &Row, col: &Column) -> String {
        let value = match row.field(&col.key) {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        truncate_to_width(&value, col.width as usize)
    }
}

impl<W: Write> RowRenderer for TermRenderer<W> {
    fn render_rows(&mut self, rows: &[Row], viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_top = 0;
        layout_rows(rows);
        self.draw(rows);
    }

    fn rerender_rows(&mut self, rows: &[Row], viewport: Viewport) {
        self.viewport = viewport;
        let total = layout_rows(rows);
        self.scroll_top = self
            .scroll_top
            .min(total.saturating_sub(u32::from(viewport.height)));
        self.draw(rows);
    }

    fn scroll_rows(&mut self, rows: &[Row], offset: u32, _direction: ScrollDirection) {
        self.scroll_top = offset;
        self.draw(rows);
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
            self.draw(rows);
        }
        Ok(())
    }

    fn visible_rows(&self, rows: &[Row], include_partial: bool) -> Vec<Row> {
        visible_slice(rows, self.scroll_top, self.viewport.height, include_partial)
    }

    fn clear_rows(&mut self) {
        self.scroll_top = 0;
        if let Err(err) = queue!(self.out, Clear(ClearType::All)).and_then(|_| self.out.flush()) {
            log::error!("terminal clear failed: {err}");
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn show_placeholder(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let result = self
            .draw_header()
            .and_then(|_| {
                queue!(
                    self.out,
                    MoveTo(0, 1),
                    Clear(ClearType::UntilNewLine),
                    SetAttribute(Attribute::Dim),
                    Print(self.placeholder_text.clone()),
                    SetAttribute(Attribute::Reset)
                )
            })
            .and_then(|_| self.out.flush());
        if let Err(err) = result {
            log::error!("terminal draw failed: {err}");
        }
    }

    fn scroll_offset(&self) -> u32 {
        self.scroll_top
    }
}
