/// Geometry primitives for the isometric cube illustration
use nalgebra::{Point2, Point3};

use crate::projection::IsoProjection;

/// Object-space point, axis aligned and centered at the origin
pub type Point3D = Point3<f64>;

/// Screen-space point produced by the projector
pub type Point2D = Point2<f64>;

/// Number of corners on a box
pub const CUBE_VERTEX_COUNT: usize = 8;

/// Half-extents of a rectangular box along each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Extents {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            z: self.z * scale,
        }
    }
}

/// The eight object-space corners of a box centered at the origin.
///
/// Corner order is fixed: the `z = -z` plane as (-x,-y), (+x,-y), (+x,+y),
/// (-x,+y), then the `z = +z` plane in the same order. Every index table in
/// [`crate::topology`] is written against this order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    pub corners: [Point3D; CUBE_VERTEX_COUNT],
}

impl Cube {
    pub fn new(extents: Extents, scale: f64) -> Self {
        let Extents { x: sx, y: sy, z: sz } = extents.scaled(scale);
        Self {
            corners: [
                Point3::new(-sx, -sy, -sz),
                Point3::new(sx, -sy, -sz),
                Point3::new(sx, sy, -sz),
                Point3::new(-sx, sy, -sz),
                Point3::new(-sx, -sy, sz),
                Point3::new(sx, -sy, sz),
                Point3::new(sx, sy, sz),
                Point3::new(-sx, sy, sz),
            ],
        }
    }

    pub fn project(&self, projection: &IsoProjection) -> ProjectedCube {
        ProjectedCube {
            vertices: projection.project_all(&self.corners),
        }
    }
}

/// Screen-space images of a [`Cube`]'s corners, in corner order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCube {
    pub vertices: [Point2D; CUBE_VERTEX_COUNT],
}

impl ProjectedCube {
    pub fn vertex(&self, index: usize) -> Point2D {
        self.vertices[index]
    }

    /// Endpoints of an edge
    pub fn segment(&self, edge: &Edge) -> (Point2D, Point2D) {
        (self.vertices[edge.a], self.vertices[edge.b])
    }

    /// Corners of a face, in the face's winding order
    pub fn quad(&self, face: &Face) -> [Point2D; 4] {
        face.indices.map(|i| self.vertices[i])
    }
}

/// Build a box of the given half-extents at `scale` and project it
pub fn build_cube(size_x: f64, size_y: f64, size_z: f64, scale: f64, projection: &IsoProjection) -> ProjectedCube {
    Cube::new(Extents::new(size_x, size_y, size_z), scale).project(projection)
}

/// Position of an edge in the topology, used only to pick a rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeBand {
    /// Ring on the `z = -z` plane
    NearRing = 0,
    /// Ring on the `z = +z` plane
    FarRing = 1,
    /// Edges joining corresponding corners of the two rings
    Connecting = 2,
}

impl EdgeBand {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// An undirected pair of corner indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub band: EdgeBand,
}

impl Edge {
    pub const fn new(a: usize, b: usize, band: EdgeBand) -> Self {
        Self { a, b, band }
    }
}

/// Which of the three visible outer faces a quad is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKey {
    PositiveZ,
    PositiveX,
    PositiveY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
    pub key: FaceKey,
}

impl Face {
    pub const fn new(indices: [usize; 4], key: FaceKey) -> Self {
        Self { indices, key }
    }
}

/// Stable color key shared by dots and vertex markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Emerald,
    Violet,
    Cyan,
}

/// A dot that travels from `start` to `end` and back, forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotPath {
    pub start: usize,
    pub end: usize,
    pub accent: Accent,
    /// Seconds before the first cycle begins
    pub delay: f64,
}

impl DotPath {
    pub const fn new(start: usize, end: usize, accent: Accent, delay: f64) -> Self {
        Self {
            start,
            end,
            accent,
            delay,
        }
    }
}
