/// SVG document writer for hero cube frames
use isocube_core::scene::{BracketFrame, EdgeFrame, EdgeStyle, Frame};
use isocube_core::{Gradient, Palette, Point2D};

const FACE_STROKE: &str = "none";
const OUTER_STROKE_WIDTH: f64 = 2.5;
const INNER_STROKE_WIDTH: f64 = 1.5;
const DOT_HALO_RADIUS: f64 = 6.0;
const DOT_HALO_OPACITY: f64 = 0.15;
const DOT_RADIUS: f64 = 2.5;
const VERTEX_RING_RADIUS: f64 = 8.0;
const VERTEX_CORE_RADIUS: f64 = 3.5;
const GLOW_RADIUS: f64 = 200.0;
const GLOW_FILTER_ID: &str = "glow";
const BACKDROP_BLUR_ID: &str = "backdropBlur";
/// Matches a 64px CSS blur
const BACKDROP_BLUR_DEVIATION: f64 = 32.0;
const DROP_SHADOW_ID: &str = "dropShadow";
const DROP_SHADOW_DEVIATION: f64 = 15.0;
const DROP_SHADOW_OPACITY: f64 = 0.3;
const BRACKET_STROKE_WIDTH: f64 = 2.0;
const BRACKET_STROKE_OPACITY: f64 = 0.6;

/// Format a coordinate with at most three decimals and no trailing zeros
fn num(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn gradient_markup(gradient: &Gradient) -> String {
    let (x1, y1, x2, y2) = gradient.axis.endpoints();
    let mut markup = format!(
        "<linearGradient id=\"{}\" x1=\"{}%\" y1=\"{}%\" x2=\"{}%\" y2=\"{}%\">\n",
        gradient.id, x1, y1, x2, y2
    );
    for stop in &gradient.stops {
        markup.push_str(&format!(
            "<stop offset=\"{}%\" stop-color=\"{}\" stop-opacity=\"{}\"/>\n",
            num(stop.offset),
            stop.color,
            num(stop.opacity)
        ));
    }
    markup.push_str("</linearGradient>\n");
    markup
}

fn defs_markup(palette: &Palette) -> String {
    let mut markup = String::from("<defs>\n");
    for gradient in palette.gradients() {
        markup.push_str(&gradient_markup(gradient));
    }
    markup.push_str(&format!(
        concat!(
            r#"<filter id="{}">"#,
            r#"<feGaussianBlur stdDeviation="2.5" result="coloredBlur"/>"#,
            r#"<feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
            "</filter>\n"
        ),
        GLOW_FILTER_ID
    ));
    markup.push_str(&format!(
        concat!(
            r#"<filter id="{}" x="-50%" y="-50%" width="200%" height="200%">"#,
            r#"<feGaussianBlur stdDeviation="{}"/>"#,
            "</filter>\n"
        ),
        BACKDROP_BLUR_ID,
        num(BACKDROP_BLUR_DEVIATION)
    ));
    markup.push_str(&format!(
        concat!(
            r#"<filter id="{}" x="-20%" y="-20%" width="140%" height="140%">"#,
            r#"<feDropShadow dx="0" dy="0" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/>"#,
            "</filter>\n"
        ),
        DROP_SHADOW_ID,
        num(DROP_SHADOW_DEVIATION),
        palette.backdrop,
        num(DROP_SHADOW_OPACITY)
    ));
    markup.push_str("</defs>\n");
    markup
}

fn path_data(corners: &[Point2D], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in corners.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        d.push_str(&format!("{} {} {}", cmd, num(p.x), num(p.y)));
    }
    if closed {
        d.push_str(" Z");
    }
    d
}

/// Markup for one stroke, or `None` while it is invisible
fn edge_markup(edge: &EdgeFrame, palette: &Palette) -> Option<String> {
    if edge.drawn <= 0.0 || edge.opacity <= 0.0 {
        return None;
    }
    let (gradient, width) = match edge.style {
        EdgeStyle::Outer(band) => (palette.edge_gradient(band), OUTER_STROKE_WIDTH),
        EdgeStyle::Inner => (palette.inner_gradient(), INNER_STROKE_WIDTH),
    };
    let end = edge.drawn_to();
    Some(format!(
        "<line class=\"edge\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"url(#{})\" stroke-width=\"{}\" stroke-linecap=\"round\" opacity=\"{}\"/>\n",
        num(edge.from.x),
        num(edge.from.y),
        num(end.x),
        num(end.y),
        gradient.id,
        num(width),
        num(edge.opacity)
    ))
}

fn bracket_markup(bracket: &BracketFrame, palette: &Palette) -> String {
    format!(
        "<path class=\"bracket\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\" opacity=\"{}\"/>\n",
        path_data(&bracket.outline, false),
        palette.bracket,
        num(BRACKET_STROKE_WIDTH),
        num(BRACKET_STROKE_OPACITY),
        num(bracket.opacity)
    )
}

/// Render one frame as a standalone SVG document
pub fn render_frame(frame: &Frame, palette: &Palette, width: f64, height: f64) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = num(width),
        h = num(height)
    ));
    out.push_str(&defs_markup(palette));

    let cx = num(width / 2.0);
    let cy = num(height / 2.0);
    out.push_str(&format!(
        "<circle class=\"backdrop\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"url(#{})\" filter=\"url(#{})\" opacity=\"{}\"/>\n",
        cx,
        cy,
        num(GLOW_RADIUS * frame.glow.scale),
        palette.glow.id,
        BACKDROP_BLUR_ID,
        num(frame.glow.opacity)
    ));

    out.push_str(&format!("<g class=\"cube\" filter=\"url(#{})\">\n", DROP_SHADOW_ID));
    for face in &frame.faces {
        out.push_str(&format!(
            "<path class=\"face\" d=\"{}\" fill=\"url(#{})\" stroke=\"{}\" opacity=\"{}\"/>\n",
            path_data(&face.corners, true),
            palette.face_gradient(face.key).id,
            FACE_STROKE,
            num(face.opacity)
        ));
    }

    for edge in frame.edges.iter().chain(frame.inner_edges.iter()) {
        if let Some(markup) = edge_markup(edge, palette) {
            out.push_str(&markup);
        }
    }

    for dot in &frame.dots {
        let color = palette.accent(dot.accent);
        let (x, y) = (num(dot.position.x), num(dot.position.y));
        out.push_str(&format!(
            "<g class=\"dot\"><circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" fill=\"{c}\" opacity=\"{}\" filter=\"url(#{f})\"/><circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" fill=\"{c}\" opacity=\"{}\" filter=\"url(#{f})\"/></g>\n",
            num(DOT_HALO_RADIUS),
            num(DOT_HALO_OPACITY),
            num(DOT_RADIUS),
            num(dot.opacity),
            x = x,
            y = y,
            c = color,
            f = GLOW_FILTER_ID
        ));
    }

    for vertex in &frame.vertices {
        let color = palette.accent(vertex.accent);
        let (x, y) = (num(vertex.position.x), num(vertex.position.y));
        out.push_str(&format!(
            "<g class=\"vertex\"><circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" fill=\"none\" stroke=\"{c}\" stroke-width=\"1.5\" opacity=\"{}\"/><circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" fill=\"{c}\" opacity=\"{}\" filter=\"url(#{f})\"/></g>\n",
            num(VERTEX_RING_RADIUS * vertex.ring_scale),
            num(vertex.ring_opacity),
            num(VERTEX_CORE_RADIUS * vertex.core_scale),
            num(vertex.core_opacity),
            x = x,
            y = y,
            c = color,
            f = GLOW_FILTER_ID
        ));
    }
    out.push_str("</g>\n");

    out.push_str(&format!(
        "<circle class=\"halo\" cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"0.1\" transform=\"rotate({} {cx} {cy})\"/>\n",
        num(GLOW_RADIUS),
        palette.backdrop,
        num(frame.halo_rotation),
        cx = cx,
        cy = cy
    ));

    for bracket in &frame.brackets {
        out.push_str(&bracket_markup(bracket, palette));
    }

    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use isocube_core::HeroScene;

    const EDGE_CLASS: &str = r#"class="edge""#;

    fn settled_svg() -> String {
        let frame = HeroScene::default().frame(12.0);
        render_frame(&frame, &Palette::default(), 600.0, 600.0)
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(300.0), "300");
        assert_eq!(num(0.15), "0.15");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(12.34567), "12.346");
    }

    #[test]
    fn test_document_shape() {
        let svg = settled_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 600 600""#));
    }

    #[test]
    fn test_all_gradients_defined() {
        let svg = settled_svg();
        for gradient in Palette::default().gradients() {
            assert!(svg.contains(&format!(r#"id="{}""#, gradient.id)), "{}", gradient.id);
        }
        assert!(svg.contains(r#"<filter id="glow">"#));
        assert!(svg.contains(r#"<filter id="backdropBlur""#));
        assert!(svg.contains(r#"<filter id="dropShadow""#));
    }

    #[test]
    fn test_backdrop_is_blurred_gradient() {
        let svg = settled_svg();
        assert!(svg.contains(r#"class="backdrop""#));
        assert!(svg.contains(r#"fill="url(#glowGradient)" filter="url(#backdropBlur)""#));
        assert!(svg.contains(r#"<g class="cube" filter="url(#dropShadow)">"#));
        assert!(svg.contains(r##"flood-color="#8b5cf6""##));
    }

    #[test]
    fn test_element_counts() {
        let svg = settled_svg();
        assert_eq!(svg.matches(r#"class="face""#).count(), 3);
        assert_eq!(svg.matches(r#"class="dot""#).count(), 8);
        assert_eq!(svg.matches(r#"class="vertex""#).count(), 8);
        assert_eq!(svg.matches(r#"class="bracket""#).count(), 4);
        // outer edges are fully drawn by now; inner edges depend on their cycle
        assert_eq!(svg.matches(r#"stroke-width="2.5""#).count(), 12);
    }

    #[test]
    fn test_all_strokes_once_inner_edges_visible() {
        let scene = HeroScene::default();
        // every inner edge is mid-cycle at 6.5 s
        let frame = scene.frame(6.5);
        assert!(frame.inner_edges.iter().all(|e| e.drawn > 0.0 && e.opacity > 0.0));
        let svg = render_frame(&frame, &Palette::default(), 600.0, 600.0);
        assert_eq!(svg.matches(EDGE_CLASS).count(), 24);
        assert_eq!(svg.matches("<line ").count(), 24);
    }

    #[test]
    fn test_hidden_edges_skipped() {
        let frame = HeroScene::default().frame(0.0);
        let svg = render_frame(&frame, &Palette::default(), 600.0, 600.0);
        assert_eq!(svg.matches(EDGE_CLASS).count(), 0);
        assert_eq!(svg.matches("<line ").count(), 0);
    }

    #[test]
    fn test_brackets_follow_their_fade() {
        let scene = HeroScene::default();
        let palette = Palette::default();
        let hidden = render_frame(&scene.frame(1.0), &palette, 600.0, 600.0);
        assert_eq!(hidden.matches(r#"stroke-opacity="0.6" opacity="0""#).count(), 4);
        let shown = render_frame(&scene.frame(5.0), &palette, 600.0, 600.0);
        assert_eq!(shown.matches(r#"stroke-opacity="0.6" opacity="1""#).count(), 4);
        assert!(shown.contains(r#"d="M 32 52 L 32 32 L 52 32""#));
    }

    #[test]
    fn test_path_data() {
        let corners = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), Point2D::new(1.0, 1.5)];
        assert_eq!(path_data(&corners, true), "M 0 0 L 1 0 L 1 1.5 Z");
        assert_eq!(path_data(&corners, false), "M 0 0 L 1 0 L 1 1.5");
    }
}
