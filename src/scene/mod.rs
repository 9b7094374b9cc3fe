//! Retained scene nodes and the keyed selection join that maintains them.

mod arena;
mod nodes;
mod selection;

pub use arena::{NodeArena, NodeHandle};
pub use nodes::{
    DropShadow, FontStyle, FontWeight, LineDash, NodeTag, PointerEvents, RectNode, TextBaseline,
    TextNode, solid_line_dash,
};
pub use selection::{JoinKey, JoinSlot, JoinSummary, Selection, SelectionPlan, positional_key};
