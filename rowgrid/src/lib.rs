pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
mod redraw;
pub mod render;
pub mod row;

pub use collection::{RowCollection, RowScope};
pub use config::{AddRowPos, GridConfig};
pub use error::{GridError, RendererError};
pub use event::GridEvent;
pub use pipeline::{DataHandler, DisplayHandler, PipelinePhase, StageId};
pub use render::{
    BasicRenderer, RowRenderer, ScrollAlign, ScrollDirection, Viewport, VirtualRenderer,
};
pub use row::{RenderState, Row, RowId, RowKind};

pub mod prelude {
    pub use crate::collection::{RowCollection, RowScope};
    pub use crate::config::{AddRowPos, GridConfig};
    pub use crate::error::{GridError, RendererError};
    pub use crate::event::GridEvent;
    pub use crate::pipeline::{PipelinePhase, StageId};
    pub use crate::render::{
        BasicRenderer, RowRenderer, ScrollAlign, ScrollDirection, Viewport, VirtualRenderer,
    };
    pub use crate::row::{Row, RowId, RowKind};
}
