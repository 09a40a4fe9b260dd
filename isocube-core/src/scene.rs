/// The animated hero illustration: two nested cubes sampled at a point in time
use crate::animation::{Easing, Timing, Track};
use crate::config::SceneConfig;
use crate::geometry::{Accent, Cube, DotPath, EdgeBand, FaceKey, Point2D, ProjectedCube};
use crate::topology::{vertex_accent, DOT_PATHS, DOT_PERIOD, EDGES, FACES};

/// Backdrop glow pulse period in seconds
const GLOW_PERIOD: f64 = 6.0;
/// Halo ring full turn in seconds
const HALO_PERIOD: f64 = 40.0;
const FACE_PERIOD: f64 = 4.0;
const EDGE_DRAW_DURATION: f64 = 1.5;
const EDGE_FADE_DURATION: f64 = 0.8;
const EDGE_STAGGER: f64 = 0.1;
const INNER_EDGE_PERIOD: f64 = 6.0;
const VERTEX_PULSE_PERIOD: f64 = 3.0;
const VERTEX_POP_DURATION: f64 = 0.8;
/// Corner brackets fade in with the motion library's default 0.3 s tween
const BRACKET_FADE_DURATION: f64 = 0.3;
/// Bracket distance from the canvas edges
const BRACKET_INSET: f64 = 32.0;
const BRACKET_ARM: f64 = 20.0;

/// Which stroke style an edge takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Outer(EdgeBand),
    Inner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFrame {
    pub from: Point2D,
    pub to: Point2D,
    pub style: EdgeStyle,
    /// Fraction of the edge drawn from `from` toward `to`
    pub drawn: f64,
    pub opacity: f64,
}

impl EdgeFrame {
    /// End point of the visible part of the stroke
    pub fn drawn_to(&self) -> Point2D {
        self.from + (self.to - self.from) * self.drawn
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    pub key: FaceKey,
    pub corners: [Point2D; 4],
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotFrame {
    pub position: Point2D,
    pub accent: Accent,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexFrame {
    pub position: Point2D,
    pub accent: Accent,
    pub ring_scale: f64,
    pub ring_opacity: f64,
    pub core_scale: f64,
    pub core_opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub scale: f64,
    pub opacity: f64,
}

/// Which corner of the canvas a bracket marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BracketCorner {
    pub const ALL: [BracketCorner; 4] = [
        BracketCorner::TopLeft,
        BracketCorner::TopRight,
        BracketCorner::BottomLeft,
        BracketCorner::BottomRight,
    ];

    /// Polyline of the bracket: vertical arm end, corner, horizontal arm end
    pub fn outline(self, width: f64, height: f64) -> [Point2D; 3] {
        let (x, dx) = match self {
            BracketCorner::TopLeft | BracketCorner::BottomLeft => (BRACKET_INSET, BRACKET_ARM),
            BracketCorner::TopRight | BracketCorner::BottomRight => (width - BRACKET_INSET, -BRACKET_ARM),
        };
        let (y, dy) = match self {
            BracketCorner::TopLeft | BracketCorner::TopRight => (BRACKET_INSET, BRACKET_ARM),
            BracketCorner::BottomLeft | BracketCorner::BottomRight => (height - BRACKET_INSET, -BRACKET_ARM),
        };
        [Point2D::new(x, y + dy), Point2D::new(x, y), Point2D::new(x + dx, y)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketFrame {
    pub corner: BracketCorner,
    pub outline: [Point2D; 3],
    pub opacity: f64,
}

/// Everything needed to draw one instant of the illustration.
///
/// Items are listed back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub glow: Pulse,
    pub faces: Vec<FaceFrame>,
    pub edges: Vec<EdgeFrame>,
    pub inner_edges: Vec<EdgeFrame>,
    pub dots: Vec<DotFrame>,
    pub vertices: Vec<VertexFrame>,
    /// Halo rotation in degrees
    pub halo_rotation: f64,
    pub brackets: Vec<BracketFrame>,
}

#[derive(Debug, Clone, PartialEq)]
struct StrokeTracks {
    drawn: Track<f64>,
    opacity: Track<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct DotTracks {
    accent: Accent,
    position: Track<Point2D>,
    opacity: Track<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct VertexTracks {
    ring_scale: Track<f64>,
    ring_opacity: Track<f64>,
    core_scale: Track<f64>,
    core_opacity: Track<f64>,
}

/// Projected geometry for both cubes plus every keyframe track, built once
#[derive(Debug, Clone, PartialEq)]
pub struct HeroScene {
    outer: ProjectedCube,
    inner: ProjectedCube,
    canvas: (f64, f64),
    glow_scale: Track<f64>,
    glow_opacity: Track<f64>,
    halo: Track<f64>,
    faces: Vec<Track<f64>>,
    edges: Vec<StrokeTracks>,
    inner_edges: Vec<StrokeTracks>,
    dots: Vec<DotTracks>,
    vertices: Vec<VertexTracks>,
    brackets: Vec<Track<f64>>,
}

impl HeroScene {
    pub fn new(config: &SceneConfig) -> Self {
        let projection = config.projection();
        let extents = config.extents();
        let outer = Cube::new(extents, 1.0).project(&projection);
        let inner = Cube::new(extents, config.inner_scale).project(&projection);
        log::debug!(
            "Built hero scene: extents {:?}, inner scale {}, center ({}, {})",
            extents,
            config.inner_scale,
            config.center_x,
            config.center_y
        );

        let glow = Timing::forever(GLOW_PERIOD);
        Self {
            canvas: (config.canvas_width, config.canvas_height),
            glow_scale: Track::new([1.0, 1.15, 1.0], glow),
            glow_opacity: Track::new([0.15, 0.25, 0.15], glow),
            halo: Track::tween(0.0, 360.0, Timing::forever(HALO_PERIOD)).with_easing(Easing::Linear),
            faces: face_tracks(),
            edges: outer_edge_tracks(),
            inner_edges: inner_edge_tracks(),
            dots: DOT_PATHS
                .iter()
                .map(|dot| DotTracks {
                    accent: dot.accent,
                    position: dot_track(&outer, dot),
                    opacity: Track::new([0.5, 1.0, 0.5], dot_timing(dot)),
                })
                .collect(),
            vertices: (0..outer.vertices.len()).map(vertex_tracks).collect(),
            brackets: (0..BracketCorner::ALL.len())
                .map(|i| {
                    Track::tween(0.0, 1.0, Timing::once(BRACKET_FADE_DURATION).with_delay(1.5 + i as f64 * 0.1))
                })
                .collect(),
            outer,
            inner,
        }
    }

    pub fn outer(&self) -> &ProjectedCube {
        &self.outer
    }

    pub fn inner(&self) -> &ProjectedCube {
        &self.inner
    }

    /// Sample every animated element at `t` seconds
    pub fn frame(&self, t: f64) -> Frame {
        Frame {
            time: t,
            glow: Pulse {
                scale: self.glow_scale.sample(t),
                opacity: self.glow_opacity.sample(t),
            },
            faces: FACES
                .iter()
                .zip(&self.faces)
                .map(|(face, opacity)| FaceFrame {
                    key: face.key,
                    corners: self.outer.quad(face),
                    opacity: opacity.sample(t),
                })
                .collect(),
            edges: stroke_frames(&self.outer, &self.edges, t, EdgeStyle::Outer),
            inner_edges: stroke_frames(&self.inner, &self.inner_edges, t, |_| EdgeStyle::Inner),
            dots: self
                .dots
                .iter()
                .map(|dot| DotFrame {
                    position: dot.position.sample(t),
                    accent: dot.accent,
                    opacity: dot.opacity.sample(t),
                })
                .collect(),
            vertices: self
                .outer
                .vertices
                .iter()
                .zip(&self.vertices)
                .enumerate()
                .map(|(i, (&position, tracks))| VertexFrame {
                    position,
                    accent: vertex_accent(i),
                    ring_scale: tracks.ring_scale.sample(t),
                    ring_opacity: tracks.ring_opacity.sample(t),
                    core_scale: tracks.core_scale.sample(t),
                    core_opacity: tracks.core_opacity.sample(t),
                })
                .collect(),
            halo_rotation: self.halo.sample(t),
            brackets: BracketCorner::ALL
                .iter()
                .zip(&self.brackets)
                .map(|(&corner, opacity)| BracketFrame {
                    corner,
                    outline: corner.outline(self.canvas.0, self.canvas.1),
                    opacity: opacity.sample(t),
                })
                .collect(),
        }
    }

    /// Position of a dot travelling start -> end -> start along the outer cube
    pub fn dot_position(&self, dot: &DotPath, t: f64) -> Point2D {
        dot_track(&self.outer, dot).sample(t)
    }
}

impl Default for HeroScene {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

fn dot_timing(dot: &DotPath) -> Timing {
    Timing::forever(DOT_PERIOD).with_delay(dot.delay)
}

fn dot_track(cube: &ProjectedCube, dot: &DotPath) -> Track<Point2D> {
    let start = cube.vertex(dot.start);
    let end = cube.vertex(dot.end);
    Track::new([start, end, start], dot_timing(dot))
}

fn face_tracks() -> Vec<Track<f64>> {
    (0..FACES.len())
        .map(|i| {
            let timing = Timing::forever(FACE_PERIOD).with_delay(0.5 + i as f64 * 0.2);
            Track::new([0.8, 0.5, 0.8], timing).with_initial(0.0)
        })
        .collect()
}

fn outer_edge_tracks() -> Vec<StrokeTracks> {
    (0..EDGES.len())
        .map(|i| {
            let delay = i as f64 * EDGE_STAGGER;
            StrokeTracks {
                drawn: Track::tween(0.0, 1.0, Timing::once(EDGE_DRAW_DURATION).with_delay(delay))
                    .with_easing(Easing::EaseOut),
                opacity: Track::tween(0.0, 1.0, Timing::once(EDGE_FADE_DURATION).with_delay(delay)),
            }
        })
        .collect()
}

fn inner_edge_tracks() -> Vec<StrokeTracks> {
    (0..EDGES.len())
        .map(|i| {
            let timing = Timing::forever(INNER_EDGE_PERIOD).with_delay(2.0 + i as f64 * 0.3);
            StrokeTracks {
                drawn: Track::new([0.0, 1.0, 1.0, 0.0], timing),
                opacity: Track::new([0.0, 0.6, 0.6, 0.0], timing),
            }
        })
        .collect()
}

fn vertex_tracks(i: usize) -> VertexTracks {
    let pulse = Timing::forever(VERTEX_PULSE_PERIOD).with_delay(i as f64 * 0.2);
    let pop = Timing::once(VERTEX_POP_DURATION).with_delay(0.5 + i as f64 * 0.1);
    VertexTracks {
        ring_scale: Track::new([0.8, 1.2, 0.8], pulse),
        ring_opacity: Track::new([0.4, 0.1, 0.4], pulse),
        core_scale: Track::tween(0.0, 1.0, pop).with_easing(Easing::BackOut),
        core_opacity: Track::tween(0.0, 0.9, pop).with_easing(Easing::BackOut),
    }
}

fn stroke_frames(
    cube: &ProjectedCube,
    tracks: &[StrokeTracks],
    t: f64,
    style: impl Fn(EdgeBand) -> EdgeStyle,
) -> Vec<EdgeFrame> {
    EDGES
        .iter()
        .zip(tracks)
        .map(|(edge, stroke)| {
            let (from, to) = cube.segment(edge);
            EdgeFrame {
                from,
                to,
                style: style(edge.band),
                drawn: stroke.drawn.sample(t),
                opacity: stroke.opacity.sample(t),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_counts() {
        let frame = HeroScene::default().frame(5.0);
        assert_eq!(frame.faces.len(), 3);
        assert_eq!(frame.edges.len(), 12);
        assert_eq!(frame.inner_edges.len(), 12);
        assert_eq!(frame.dots.len(), 8);
        assert_eq!(frame.vertices.len(), 8);
        assert_eq!(frame.brackets.len(), 4);
    }

    #[test]
    fn test_everything_hidden_at_start() {
        let frame = HeroScene::default().frame(0.0);
        assert!(frame.faces.iter().all(|f| f.opacity == 0.0));
        assert!(frame.edges.iter().all(|e| e.drawn == 0.0 && e.opacity == 0.0));
        assert!(frame.inner_edges.iter().all(|e| e.opacity == 0.0));
        assert!(frame.vertices.iter().all(|v| v.core_scale == 0.0));
    }

    #[test]
    fn test_edge_draw_in_completes() {
        let scene = HeroScene::default();
        let last = 11.0 * EDGE_STAGGER + EDGE_DRAW_DURATION;
        let frame = scene.frame(last + 0.01);
        for edge in &frame.edges {
            assert_eq!(edge.drawn, 1.0);
            assert_eq!(edge.opacity, 1.0);
            assert_relative_eq!(edge.drawn_to(), edge.to, epsilon = 1e-9);
        }
        let early = scene.frame(last - 0.5);
        assert!(early.edges[11].drawn < 1.0);
        assert_eq!(early.edges[0].drawn, 1.0);
    }

    #[test]
    fn test_edge_styles_follow_bands() {
        let frame = HeroScene::default().frame(3.0);
        assert_eq!(frame.edges[0].style, EdgeStyle::Outer(EdgeBand::NearRing));
        assert_eq!(frame.edges[7].style, EdgeStyle::Outer(EdgeBand::FarRing));
        assert_eq!(frame.edges[8].style, EdgeStyle::Outer(EdgeBand::Connecting));
        assert!(frame.inner_edges.iter().all(|e| e.style == EdgeStyle::Inner));
    }

    #[test]
    fn test_dot_rests_at_start_before_delay() {
        let scene = HeroScene::default();
        let dot = &DOT_PATHS[7];
        assert_eq!(scene.dot_position(dot, 1.0), scene.outer().vertex(dot.start));
    }

    #[test]
    fn test_dot_reaches_end_mid_cycle() {
        let scene = HeroScene::default();
        let dot = &DOT_PATHS[2];
        let mid = dot.delay + DOT_PERIOD / 2.0;
        assert_relative_eq!(scene.dot_position(dot, mid), scene.outer().vertex(dot.end), epsilon = 1e-9);
    }

    #[test]
    fn test_vertex_core_pops_in() {
        let scene = HeroScene::default();
        let frame = scene.frame(10.0);
        for vertex in &frame.vertices {
            assert_eq!(vertex.core_scale, 1.0);
            assert_relative_eq!(vertex.core_opacity, 0.9);
        }
        assert_eq!(frame.vertices[1].accent, Accent::Violet);
    }

    #[test]
    fn test_halo_turns_linearly() {
        let scene = HeroScene::default();
        assert_relative_eq!(scene.frame(10.0).halo_rotation, 90.0);
        assert_relative_eq!(scene.frame(50.0).halo_rotation, 90.0);
    }

    #[test]
    fn test_glow_pulse_range() {
        let scene = HeroScene::default();
        assert_relative_eq!(scene.frame(0.0).glow.scale, 1.0);
        assert_relative_eq!(scene.frame(3.0).glow.scale, 1.15);
        assert_relative_eq!(scene.frame(3.0).glow.opacity, 0.25);
    }

    #[test]
    fn test_brackets_fade_in_staggered() {
        let scene = HeroScene::default();
        let before = scene.frame(1.5);
        assert_eq!(before.brackets.len(), 4);
        assert!(before.brackets.iter().all(|b| b.opacity == 0.0));

        // 1.65 s: first bracket half way, second just started, the rest pending
        let mid = scene.frame(1.65);
        assert_relative_eq!(mid.brackets[0].opacity, 0.5, epsilon = 1e-3);
        assert!(mid.brackets[1].opacity > 0.0 && mid.brackets[1].opacity < 0.5);
        assert_eq!(mid.brackets[2].opacity, 0.0);
        assert_eq!(mid.brackets[3].opacity, 0.0);

        let settled = scene.frame(2.5);
        assert!(settled.brackets.iter().all(|b| b.opacity == 1.0));
    }

    #[test]
    fn test_bracket_outlines_hug_canvas_corners() {
        let frame = HeroScene::default().frame(3.0);
        assert_eq!(frame.brackets[0].corner, BracketCorner::TopLeft);
        assert_eq!(frame.brackets[0].outline[1], Point2D::new(32.0, 32.0));
        assert_eq!(frame.brackets[0].outline[0], Point2D::new(32.0, 52.0));
        assert_eq!(frame.brackets[3].corner, BracketCorner::BottomRight);
        assert_eq!(frame.brackets[3].outline[1], Point2D::new(568.0, 568.0));
        assert_eq!(frame.brackets[3].outline[2], Point2D::new(548.0, 568.0));
    }

    #[test]
    fn test_prebuilt_dots_match_on_demand_position() {
        let scene = HeroScene::default();
        let frame = scene.frame(9.25);
        for (dot, path) in frame.dots.iter().zip(DOT_PATHS.iter()) {
            assert_eq!(dot.position, scene.dot_position(path, 9.25));
        }
    }
}
