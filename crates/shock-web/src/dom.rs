//! DOM side of the effect: per-letter spans and the flash overlay.

use glam::Vec2;
use shock_engine::{AnchorSource, GlyphPose};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// The headline text split into one `<span>` per character.
pub struct DomGlyphs {
    letters: Vec<HtmlElement>,
}

impl DomGlyphs {
    /// Replace the children of `#text_id` with one span per character of its
    /// current text content.
    pub fn split(document: &Document, text_id: &str) -> Result<Self, JsValue> {
        let text = document
            .get_element_by_id(text_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", text_id)))?;
        let content = text.text_content().unwrap_or_default();
        text.set_text_content(None);

        let mut letters = Vec::with_capacity(content.len());
        for ch in content.chars() {
            let span = document.create_element("span")?.dyn_into::<HtmlElement>()?;
            span.set_text_content(Some(&ch.to_string()));
            span.style().set_property("display", "inline-block")?;
            text.append_child(&span)?;
            letters.push(span);
        }
        log::debug!("split '{}' into {} letters", content, letters.len());
        Ok(Self { letters })
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Write poses and the text glow onto the spans.
    pub fn apply(&self, poses: &[GlyphPose], glow: f32) -> Result<(), JsValue> {
        let shadow = text_shadow(glow);
        for (span, pose) in self.letters.iter().zip(poses) {
            let style = span.style();
            style.set_property(
                "transform",
                &format!(
                    "translate({:.2}px, {:.2}px) scale({:.3})",
                    pose.offset.x, pose.offset.y, pose.scale
                ),
            )?;
            style.set_property("opacity", &format!("{:.3}", pose.opacity))?;
            style.set_property("text-shadow", &shadow)?;
        }
        Ok(())
    }
}

impl AnchorSource for DomGlyphs {
    /// Centres of the letters' current bounding boxes, in viewport pixels.
    fn glyph_anchors(&self) -> Vec<Vec2> {
        self.letters
            .iter()
            .map(|span| {
                let rect = span.get_bounding_client_rect();
                Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                )
            })
            .collect()
    }
}

/// Blur of the text glow at full strength.
const GLOW_BLUR_PX: f32 = 40.0;

/// `0 0 40px rgba(160,200,255,1)` at full glow, scaled down towards none.
fn text_shadow(glow: f32) -> String {
    if glow <= 0.0 {
        return "none".to_string();
    }
    let g = glow.min(1.0);
    format!("0 0 {:.1}px rgba(160,200,255,{:.3})", GLOW_BLUR_PX * g, g)
}

/// Full-screen element whose opacity follows the flash envelope.
pub struct FlashOverlay {
    element: HtmlElement,
}

impl FlashOverlay {
    /// `Ok(None)` when the page has no element matching `selector`.
    pub fn find(document: &Document, selector: &str) -> Result<Option<Self>, JsValue> {
        match document.query_selector(selector)? {
            Some(el) => Ok(Some(Self {
                element: el.dyn_into::<HtmlElement>()?,
            })),
            None => {
                log::warn!("no flash element matches '{}'", selector);
                Ok(None)
            }
        }
    }

    pub fn set_opacity(&self, opacity: f32) -> Result<(), JsValue> {
        self.element
            .style()
            .set_property("opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_glow_clears_text_shadow() {
        assert_eq!(text_shadow(0.0), "none");
        assert_eq!(text_shadow(-1.0), "none");
    }

    #[test]
    fn full_glow_is_a_single_40px_shadow() {
        assert_eq!(text_shadow(1.0), "0 0 40.0px rgba(160,200,255,1.000)");
        assert_eq!(text_shadow(2.0), text_shadow(1.0));
    }

    #[test]
    fn partial_glow_scales_blur_and_alpha() {
        assert_eq!(text_shadow(0.5), "0 0 20.0px rgba(160,200,255,0.500)");
    }
}
