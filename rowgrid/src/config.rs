//! Collection configuration.

use serde::{Deserialize, Serialize};

/// Where new rows land when no anchor row is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddRowPos {
    /// Insert at the head of the row set.
    Top,
    /// Append at the tail of the row set.
    #[default]
    Bottom,
}

/// Configuration for a [`RowCollection`](crate::RowCollection).
///
/// Each table instance owns its own collection and configuration; there is
/// no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Record field used for lookup-by-key.
    pub index_field: String,
    /// When set, in-place re-renders are suppressed in favour of
    /// page-boundary semantics.
    pub pagination: bool,
    /// Default insert position for anchorless adds.
    pub add_row_pos: AddRowPos,
    /// Default row height in terminal rows.
    pub row_height: u16,
    /// Column count, used for placeholder sizing.
    pub column_count: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            index_field: "id".to_string(),
            pagination: false,
            add_row_pos: AddRowPos::Bottom,
            row_height: 1,
            column_count: 0,
        }
    }
}

impl GridConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record field used for lookup-by-key.
    pub fn index_field(mut self, field: impl Into<String>) -> Self {
        self.index_field = field.into();
        self
    }

    /// Enable page-boundary semantics for reloads.
    pub fn pagination(mut self) -> Self {
        self.pagination = true;
        self
    }

    /// Set the default insert position for anchorless adds.
    pub fn add_row_pos(mut self, pos: AddRowPos) -> Self {
        self.add_row_pos = pos;
        self
    }

    /// Set the default row height in terminal rows.
    pub fn row_height(mut self, height: u16) -> Self {
        self.row_height = height.max(1);
        self
    }

    /// Set the column count used for placeholder sizing.
    pub fn column_count(mut self, count: usize) -> Self {
        self.column_count = count;
        self
    }
}
