//! Row entities and their cached rendering state.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

/// Unique identifier for a row entity.
///
/// Identity follows the data record, never the index: a row keeps its id
/// across moves and pipeline reruns, and ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__row_{}", self.0)
    }
}

/// Discriminates data rows from display-only nodes.
///
/// Display-phase stages may inject non-data nodes (group headers, spacers)
/// into a projection. The pipeline and renderers branch on this discriminant
/// rather than on type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowKind {
    /// A row backed by a data record.
    #[default]
    Data,
    /// A group header injected by a display stage.
    GroupHeader,
    /// A display-only spacer node.
    Spacer,
}

/// Rendering state cached on each row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    /// Whether the row is currently attached to the rendered window.
    pub attached: bool,
    /// Row height in terminal rows.
    pub height: u16,
    /// Cached top position within the full content, in terminal rows.
    pub top: u32,
    /// Even/odd stripe parity assigned from display order.
    pub even: bool,
}

#[derive(Debug)]
struct RowInner {
    data: Map<String, Value>,
    kind: RowKind,
    render: RenderState,
}

/// A single data record plus its rendering state.
///
/// `Row` is a cheap cloneable handle; all clones share the same record and
/// render state. Equality compares identity, not content, so the same entity
/// can be located in every pipeline structure it appears in.
#[derive(Debug, Clone)]
pub struct Row {
    id: RowId,
    inner: Arc<RwLock<RowInner>>,
}

impl Row {
    /// Create a data row owning the given record.
    pub fn new(data: Map<String, Value>) -> Self {
        Self::with_kind(data, RowKind::Data)
    }

    /// Create a display-only node (group header, spacer).
    ///
    /// Used by display-phase stages to inject non-data rows into a
    /// projection. The record typically carries the node's label.
    pub fn display_node(data: Map<String, Value>, kind: RowKind) -> Self {
        Self::with_kind(data, kind)
    }

    fn with_kind(data: Map<String, Value>, kind: RowKind) -> Self {
        Self {
            id: RowId::new(),
            inner: Arc::new(RwLock::new(RowInner {
                data,
                kind,
                render: RenderState::default(),
            })),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Get the row kind discriminant.
    pub fn kind(&self) -> RowKind {
        self.inner
            .read()
            .map(|g| g.kind)
            .unwrap_or_default()
    }

    /// Whether this is a data row (not a group header or spacer).
    pub fn is_data(&self) -> bool {
        self.kind() == RowKind::Data
    }

    /// Get a copy of the owning record.
    pub fn data(&self) -> Map<String, Value> {
        self.inner
            .read()
            .map(|g| g.data.clone())
            .unwrap_or_default()
    }

    /// Get a copy of a single record field.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.data.get(name).cloned())
    }

    /// Get the cached rendering state.
    pub fn render_state(&self) -> RenderState {
        self.inner
            .read()
            .map(|g| g.render)
            .unwrap_or_default()
    }

    /// Mark the row attached to or detached from the rendered window.
    pub fn set_attached(&self, attached: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.render.attached = attached;
        }
    }

    /// Set the cached row height.
    pub fn set_height(&self, height: u16) {
        if let Ok(mut guard) = self.inner.write() {
            guard.render.height = height;
        }
    }

    /// Set the cached top position within the full content.
    pub fn set_top(&self, top: u32) {
        if let Ok(mut guard) = self.inner.write() {
            guard.render.top = top;
        }
    }

    /// Set the even/odd stripe parity.
    pub fn set_even(&self, even: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.render.even = even;
        }
    }

    /// Reset rendering state when the row leaves the collection.
    pub(crate) fn wipe(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.render = RenderState {
                height: guard.render.height,
                ..RenderState::default()
            };
        }
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Row {}

/// Find a row's index in a sequence by identity.
pub(crate) fn index_of(rows: &[Row], row: &Row) -> Option<usize> {
    rows.iter().position(|r| r.id() == row.id())
}
