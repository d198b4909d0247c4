//! Spatial layout and navigation engine.
//!
//! Every layout pass rewrites position and scale state for the whole node set;
//! [`EngineState`] decides which pass runs for each navigation input and keeps
//! the undo/redo ledger.

pub mod history;
pub mod honeycomb;
pub mod liminal;
pub mod node;
pub mod scale;
pub mod sphere;
mod state;

pub use history::{Command, CommandKind, History};
pub use node::{Node, NodeId, NodeMetadata, Placement};
pub use scale::{Camera, ScaleRange, Viewport};
pub use state::{EngineState, Input, LayoutMode, LayoutSettings};
