//! Off-screen network rendering: edge routing, label stacking, planning and rasterization.

pub mod edges;
pub mod labels;
pub mod plan;
pub mod renderer;

pub use edges::{Arrow, EdgeKind, EdgeShape};
pub use labels::{LabelShape, LabelStacker};
pub use plan::{NetworkPlan, PointMarker};
pub use renderer::{GraphRenderer, NetworkSurface};
