/// isocube Web - SVG rendering of the hero cube for browsers
///
/// The frame sampling happens in `isocube-core`; this crate turns frames into
/// SVG markup and exposes the result to JavaScript through wasm-bindgen.

use isocube_core::{HeroScene, Palette, ProjectedCube, SceneConfig};
use wasm_bindgen::prelude::*;

pub mod svg;

pub use svg::render_frame;

fn flatten(cube: &ProjectedCube) -> Vec<f64> {
    cube.vertices.iter().flat_map(|v| [v.x, v.y]).collect()
}

#[wasm_bindgen]
pub struct HeroCube {
    scene: HeroScene,
    palette: Palette,
    width: f64,
    height: f64,
}

impl HeroCube {
    fn from_scene_config(config: &SceneConfig) -> Self {
        Self {
            scene: HeroScene::new(config),
            palette: config.palette.clone(),
            width: config.canvas_width,
            height: config.canvas_height,
        }
    }
}

#[wasm_bindgen]
impl HeroCube {
    #[wasm_bindgen(constructor)]
    pub fn new() -> HeroCube {
        Self::from_scene_config(&SceneConfig::default())
    }

    /// Build from a JSON scene config; missing fields use the defaults
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<HeroCube, JsValue> {
        let config = SceneConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_scene_config(&config))
    }

    /// SVG markup for the illustration `time` seconds into the animation
    pub fn svg(&self, time: f64) -> String {
        render_frame(&self.scene.frame(time), &self.palette, self.width, self.height)
    }

    /// Outer cube screen coordinates as `[x0, y0, x1, y1, ...]`
    pub fn vertices(&self) -> Vec<f64> {
        flatten(self.scene.outer())
    }

    /// Inner cube screen coordinates as `[x0, y0, x1, y1, ...]`
    #[wasm_bindgen(js_name = innerVertices)]
    pub fn inner_vertices(&self) -> Vec<f64> {
        flatten(self.scene.inner())
    }

    /// Replace the contents of the element with id `element_id` with the frame at `time`
    pub fn mount(&self, element_id: &str, time: f64) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", element_id)))?;
        log::debug!("Mounting hero cube into #{} at t={}", element_id, time);
        element.set_inner_html(&self.svg(time));
        Ok(())
    }
}

impl Default for HeroCube {
    fn default() -> Self {
        Self::new()
    }
}
