use shock_engine::ShockConfig;
use shock_web::{Page, PageElements};

/// Tuning shipped with the page. Keys left out fall back to the defaults.
const TUNING: &str = include_str!("../shock.json");

pub struct ShockText {
    config: ShockConfig,
}

impl ShockText {
    pub fn new() -> Self {
        let config = ShockConfig::from_json(TUNING).unwrap_or_else(|err| {
            log::warn!("bad shock.json, using defaults: {}", err);
            ShockConfig::default()
        });
        Self { config }
    }
}

impl Page for ShockText {
    fn config(&self) -> ShockConfig {
        self.config.clone()
    }

    fn elements(&self) -> PageElements {
        PageElements {
            text_id: "text".to_string(),
            particles_canvas_id: "particles".to_string(),
            arcs_canvas_id: "arcs".to_string(),
            flash_selector: ".flash".to_string(),
        }
    }
}
