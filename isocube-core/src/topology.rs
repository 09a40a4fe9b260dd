/// Static cube topology: edges, visible faces and dot paths
use crate::geometry::{Accent, DotPath, Edge, EdgeBand, Face, FaceKey, CUBE_VERTEX_COUNT};

/// Seconds for a dot to travel start -> end -> start
pub const DOT_PERIOD: f64 = 8.0;

/// The 12 edges of a box, grouped into three bands of four
pub const EDGES: [Edge; 12] = [
    Edge::new(0, 1, EdgeBand::NearRing),
    Edge::new(1, 2, EdgeBand::NearRing),
    Edge::new(2, 3, EdgeBand::NearRing),
    Edge::new(3, 0, EdgeBand::NearRing),
    Edge::new(4, 5, EdgeBand::FarRing),
    Edge::new(5, 6, EdgeBand::FarRing),
    Edge::new(6, 7, EdgeBand::FarRing),
    Edge::new(7, 4, EdgeBand::FarRing),
    Edge::new(0, 4, EdgeBand::Connecting),
    Edge::new(1, 5, EdgeBand::Connecting),
    Edge::new(2, 6, EdgeBand::Connecting),
    Edge::new(3, 7, EdgeBand::Connecting),
];

/// The three faces of the outer cube visible under the fixed tilt
pub const FACES: [Face; 3] = [
    Face::new([4, 5, 6, 7], FaceKey::PositiveZ),
    Face::new([1, 2, 6, 5], FaceKey::PositiveX),
    Face::new([2, 3, 7, 6], FaceKey::PositiveY),
];

/// One dot per corner, each running along a connecting edge
pub const DOT_PATHS: [DotPath; 8] = [
    DotPath::new(4, 0, Accent::Emerald, 0.0),
    DotPath::new(5, 1, Accent::Violet, 0.5),
    DotPath::new(6, 2, Accent::Cyan, 1.0),
    DotPath::new(7, 3, Accent::Emerald, 1.5),
    DotPath::new(0, 4, Accent::Violet, 2.0),
    DotPath::new(1, 5, Accent::Cyan, 2.5),
    DotPath::new(2, 6, Accent::Emerald, 3.0),
    DotPath::new(3, 7, Accent::Violet, 3.5),
];

/// Band for the edge at `index` in [`EDGES`]
pub fn edge_band(index: usize) -> EdgeBand {
    match index {
        0..=3 => EdgeBand::NearRing,
        4..=7 => EdgeBand::FarRing,
        _ => EdgeBand::Connecting,
    }
}

/// Accent of the marker drawn on corner `index`
pub fn vertex_accent(index: usize) -> Accent {
    if index % 2 == 0 {
        Accent::Emerald
    } else {
        Accent::Violet
    }
}

/// Check that every table only references corners that exist
pub fn indices_in_range() -> bool {
    let valid = |i: usize| i < CUBE_VERTEX_COUNT;
    EDGES.iter().all(|e| valid(e.a) && valid(e.b) && e.a != e.b)
        && FACES.iter().all(|f| f.indices.iter().all(|&i| valid(i)))
        && DOT_PATHS.iter().all(|d| valid(d.start) && valid(d.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_in_range() {
        assert!(indices_in_range());
    }

    #[test]
    fn test_band_table_matches_index() {
        for (i, edge) in EDGES.iter().enumerate() {
            assert_eq!(edge.band, edge_band(i), "edge {}", i);
        }
    }

    #[test]
    fn test_rings_share_z_sign() {
        // corners 0..4 sit on the negative z plane, 4..8 on the positive
        for edge in &EDGES[0..4] {
            assert!(edge.a < 4 && edge.b < 4);
        }
        for edge in &EDGES[4..8] {
            assert!(edge.a >= 4 && edge.b >= 4);
        }
        for (i, edge) in EDGES[8..].iter().enumerate() {
            assert_eq!((edge.a, edge.b), (i, i + 4));
        }
    }

    #[test]
    fn test_dot_delays_are_staggered() {
        for (i, dot) in DOT_PATHS.iter().enumerate() {
            assert_eq!(dot.delay, i as f64 * 0.5);
            assert!(dot.delay < DOT_PERIOD);
        }
    }

    #[test]
    fn test_vertex_accent_alternates() {
        assert_eq!(vertex_accent(0), Accent::Emerald);
        assert_eq!(vertex_accent(3), Accent::Violet);
    }
}
