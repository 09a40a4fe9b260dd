/// isocube Core Library - Isometric cube geometry and animation
///
/// This library provides the stateless core of the hero illustration:
/// the fixed isometric projection, the cube topology tables, keyframe
/// animation sampling, and the presentation palette kept apart from geometry.

pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod style;
pub mod topology;

// Re-export commonly used types
pub use animation::{Easing, Timing, Track};
pub use clock::{CountUp, FrameClock};
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use geometry::{build_cube, Accent, Cube, DotPath, Edge, EdgeBand, Extents, Face, FaceKey, Point2D, Point3D, ProjectedCube};
pub use projection::{project, IsoProjection};
pub use scene::{EdgeStyle, Frame, HeroScene};
pub use style::{Gradient, Palette, Rgb};
