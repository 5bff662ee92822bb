//! Lifecycle notifications emitted by the row collection.
//!
//! Other modules (selection, editing, grouping) subscribe to these; the
//! pipeline never depends on a subscriber being present.

use crate::row::Row;

/// Named lifecycle notifications.
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// The full row set is about to be replaced.
    RowsReplaced,
    /// A dataset finished processing; `count` rows were ingested.
    DataProcessed {
        /// Number of rows created from the dataset.
        count: usize,
    },
    /// A row was added to the collection.
    RowAdded {
        /// The created row.
        row: Row,
    },
    /// A row was removed from the collection.
    RowDeleted {
        /// The removed row.
        row: Row,
    },
    /// A row was relocated.
    RowMoved {
        /// The moved row.
        row: Row,
    },
    /// Row data changed in a way visible to exported datasets.
    DataChanged,
    /// A pipeline refresh is starting.
    Refreshing,
    /// A pipeline refresh finished.
    Refreshed,
    /// The viewport scrolled vertically.
    ScrollVertical {
        /// New scroll offset in terminal rows.
        offset: u32,
        /// Whether the scroll moved towards the top.
        upward: bool,
    },
    /// A full render is starting.
    RenderStarted,
    /// A full render finished.
    RenderComplete,
    /// The display projection became empty.
    DisplayEmpty,
}

type Handler = Box<dyn FnMut(&GridEvent) + Send>;

/// Subscriber list for [`GridEvent`] notifications.
#[derive(Default)]
pub(crate) struct Subscribers {
    handlers: Vec<Handler>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&GridEvent) + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn dispatch(&mut self, event: &GridEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }
}
