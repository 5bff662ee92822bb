//! The viewport renderer contract and built-in implementations.
//!
//! The pipeline depends on, but does not prescribe, a renderer: any type
//! implementing [`RowRenderer`] can be plugged into a collection.
//! Implementations may keep every row attached ([`BasicRenderer`]) or only a
//! sliding window ([`VirtualRenderer`]); pipeline correctness does not depend
//! on which.

mod basic;
mod window;

pub use basic::BasicRenderer;
pub use window::VirtualRenderer;

use crate::error::RendererError;
use crate::row::{Row, index_of};

/// Viewport dimensions, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl Viewport {
    /// Create a viewport with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical alignment for scroll-to-row requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    /// Align the row with the top of the viewport.
    #[default]
    Top,
    /// Center the row in the viewport.
    Center,
    /// Align the row with the bottom of the viewport.
    Bottom,
}

/// Direction of a vertical scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards the top of the content.
    Up,
    /// Towards the bottom of the content.
    Down,
}

/// Contract a viewport renderer must fulfil.
///
/// `rows` is always the current display projection, in display order. The
/// renderer owns the scroll offset and the attached/detached state of each
/// row's rendered representation; it must never mutate the sequence itself.
pub trait RowRenderer {
    /// Paint the rows currently within the scrolled viewport, attaching and
    /// detaching row representations as needed. Invoked on full re-render;
    /// resets the scroll position to the top.
    fn render_rows(&mut self, rows: &[Row], viewport: Viewport);

    /// Re-render preserving the current scroll offset.
    fn rerender_rows(&mut self, rows: &[Row], viewport: Viewport) {
        self.render_rows(rows, viewport);
    }

    /// Reposition the rendered window after a vertical scroll.
    fn scroll_rows(&mut self, rows: &[Row], offset: u32, direction: ScrollDirection);

    /// Scroll a row into view at the requested alignment.
    ///
    /// Fails with [`RendererError::RowNotFound`] if the row is absent from
    /// the current display projection. When `only_if_visible` is set and the
    /// row is already fully visible, no movement occurs.
    fn scroll_to_row_position(
        &mut self,
        rows: &[Row],
        row: &Row,
        position: ScrollAlign,
        only_if_visible: bool,
        viewport: Viewport,
    ) -> Result<(), RendererError>;

    /// Ordered rows currently intersecting the viewport.
    ///
    /// With `include_partial` unset, only rows fully inside the viewport are
    /// returned.
    fn visible_rows(&self, rows: &[Row], include_partial: bool) -> Vec<Row>;

    /// Lifecycle hook invoked before a full re-render.
    fn clear_rows(&mut self);

    /// Lifecycle hook invoked on container-size change.
    fn resize(&mut self, viewport: Viewport);

    /// The display projection became empty; show the empty placeholder.
    fn show_placeholder(&mut self, _viewport: Viewport) {}

    /// Current vertical scroll offset in terminal rows.
    fn scroll_offset(&self) -> u32 {
        0
    }
}

/// Assign cached top positions and stripe parity from display order.
///
/// Returns the total content height. Row heights must already be set.
pub fn layout_rows(rows: &[Row]) -> u32 {
    let mut top = 0u32;
    for (i, row) in rows.iter().enumerate() {
        row.set_top(top);
        row.set_even(i % 2 == 1);
        top += u32::from(row.render_state().height);
    }
    top
}

/// Rows intersecting the window `[scroll_top, scroll_top + height)`.
///
/// With `include_partial` unset, only rows fully contained in the window
/// are returned.
pub fn visible_slice(
    rows: &[Row],
    scroll_top: u32,
    height: u16,
    include_partial: bool,
) -> Vec<Row> {
    let window_end = scroll_top + u32::from(height);
    rows.iter()
        .filter(|row| {
            let state = row.render_state();
            let bottom = state.top + u32::from(state.height);
            if include_partial {
                state.top < window_end && bottom > scroll_top
            } else {
                state.top >= scroll_top && bottom <= window_end
            }
        })
        .cloned()
        .collect()
}

/// Resolve a scroll-to-row request to a new scroll offset.
///
/// Returns `Ok(None)` when `only_if_visible` is set and the row is already
/// fully visible. Row layout must be current (see [`layout_rows`]).
pub fn scroll_target(
    rows: &[Row],
    row: &Row,
    position: ScrollAlign,
    only_if_visible: bool,
    scroll_top: u32,
    viewport: Viewport,
) -> Result<Option<u32>, RendererError> {
    if index_of(rows, row).is_none() {
        return Err(RendererError::RowNotFound { row: row.id() });
    }

    let state = row.render_state();
    let height = u32::from(state.height);
    let view_height = u32::from(viewport.height);
    let bottom = state.top + height;

    if only_if_visible && state.top >= scroll_top && bottom <= scroll_top + view_height {
        return Ok(None);
    }

    let target = match position {
        ScrollAlign::Top => state.top,
        ScrollAlign::Center => (state.top + height / 2).saturating_sub(view_height / 2),
        ScrollAlign::Bottom => bottom.saturating_sub(view_height),
    };

    let total = rows
        .last()
        .map(|r| {
            let s = r.render_state();
            s.top + u32::from(s.height)
        })
        .unwrap_or(0);

    Ok(Some(target.min(total.saturating_sub(view_height))))
}
