//! Full-screen flash requested by every pulse.
//! The engine only tracks the opacity; the host paints the overlay.

use crate::api::config::FlashConfig;
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Tween, TweenLoop};

#[derive(Debug, Clone)]
pub struct Flash {
    half_period: f32,
    tween: Option<Tween>,
}

impl Flash {
    pub fn new(config: &FlashConfig) -> Self {
        Flash {
            half_period: config.half_period,
            tween: None,
        }
    }

    /// Start a 0 -> 1 -> 0 flash, restarting one already in progress.
    pub fn request(&mut self) {
        let tween = Tween::new(0.0, 1.0, self.half_period, Easing::QuadOut)
            .yoyo()
            .with_loop(TweenLoop::Repeat(1));
        self.tween = Some(tween);
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(tween) = self.tween.as_mut() {
            if tween.advance(dt).completed {
                self.tween = None;
            }
        }
    }

    /// Overlay opacity in [0, 1].
    pub fn opacity(&self) -> f32 {
        self.tween.as_ref().map_or(0.0, |t| t.value().clamp(0.0, 1.0))
    }

    pub fn is_active(&self) -> bool {
        self.tween.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_rises_and_falls() {
        let mut flash = Flash::new(&FlashConfig::default());
        assert_eq!(flash.opacity(), 0.0);

        flash.request();
        flash.advance(0.03);
        let rising = flash.opacity();
        assert!(rising > 0.5 && rising < 1.0, "rising = {}", rising);

        flash.advance(0.06);
        let falling = flash.opacity();
        assert!(falling > 0.0 && falling < 1.0, "falling = {}", falling);

        flash.advance(0.1);
        assert!(!flash.is_active());
        assert_eq!(flash.opacity(), 0.0);
    }

    #[test]
    fn request_restarts() {
        let mut flash = Flash::new(&FlashConfig::default());
        flash.request();
        flash.advance(0.1);
        flash.request();
        assert_eq!(flash.opacity(), 0.0);
        assert!(flash.is_active());
    }
}
