//! CPU rasterization: draw lists, tiled surfaces and premultiplied compositing.

pub mod composite;
pub mod painter;
pub mod surface;

pub use painter::{DrawKind, DrawList, DrawOp, ImagePaint};
pub use surface::{FrameRGBA, TILE_SIZE, TiledSurface};
