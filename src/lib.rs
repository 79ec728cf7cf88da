//! gitnet renders a commit network (branches and merges across forks) and lets a host pan and
//! hover across it.
//!
//! The whole graph is painted once onto a tiled off-screen surface; every frame then blits the
//! visible part into a bounded viewport between the axis chrome:
//!
//! - Load a [`Dataset`] through a [`DataSource`]
//! - Hand it to a [`NetworkView`] together with a [`Host`]
//! - Forward pointer events and frame callbacks, read back [`NetworkView::frame`]
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod data;
pub mod geometry;
pub mod host;
pub mod network;
pub mod render;
pub mod source;
pub mod text;
pub mod view;

pub use crate::foundation::color::ColorDef;
pub use crate::foundation::core::{Affine, BezPath, PixelRect, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{GitnetError, GitnetResult};

pub use crate::config::Config;
pub use crate::data::index::{DatasetIndex, IndexedDataset};
pub use crate::data::model::{Block, Commit, Dataset, DatasetMeta, Head, ParentRef, User};
pub use crate::geometry::CoordinateMapper;
pub use crate::host::{
    AvatarImage, FrameRequester, Host, ImageLoader, ImageRequest, ImageTicket, Navigator, NullHost,
    decode_avatar,
};
pub use crate::network::{GraphRenderer, NetworkSurface};
pub use crate::render::{FrameRGBA, TiledSurface};
pub use crate::source::{DataSource, JsonFileSource};
pub use crate::text::{FontSource, TextEngine};
pub use crate::view::{FocusCommit, FocusLane, NetworkView, Selection, Viewport};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
