//! The visible part: scroll state, chrome, pointer interaction and frame scheduling.

pub mod chrome;
pub mod focus;
pub mod interaction;
pub mod network_view;
pub mod scheduler;
pub mod tooltip;
pub mod viewport;

pub use focus::{FocusCommit, FocusLane};
pub use interaction::{InteractionController, PointerUp, hit_test};
pub use network_view::NetworkView;
pub use scheduler::FrameScheduler;
pub use tooltip::TooltipLayout;
pub use viewport::{BlitRects, ScrollBounds, Selection, Viewport, VisibleRange};
