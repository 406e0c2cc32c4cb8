//! The timeline canvas: mapping, layout, input, scene building and painting.

pub mod geometry;
pub mod interaction;
pub mod mapper;
pub mod raster;
pub mod render;
pub mod scene;
pub mod units;

pub use interaction::{reduce, DragPhase, InputEvent, Transition, ViewState, WheelInput};
pub use mapper::CoordinateMapper;
pub use raster::RasterSurface;
pub use render::{paint, FrameScheduler, RenderLoop, Surface};
pub use scene::{build_scene, DrawCommand, Scene, Snapshot};
