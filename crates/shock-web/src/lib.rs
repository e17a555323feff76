pub mod canvas;
pub mod dom;
pub mod frame_loop;
pub mod runner;

pub use canvas::CanvasSurface;
pub use dom::{DomGlyphs, FlashOverlay};
pub use frame_loop::FrameLoop;
pub use runner::{Page, PageElements, ShockRunner};

/// Generate the `#[wasm_bindgen]` exports for a page hosting the effect.
///
/// Generates:
/// - `thread_local!` storage for the [`ShockRunner`] and its [`FrameLoop`]
/// - `with_runner()` helper function
/// - `shock_start`, `shock_stop`, `shock_pulse` and `shock_frame_count`
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// struct Landing;
/// impl Landing { fn new() -> Self { Landing } }
/// impl shock_web::Page for Landing {}
///
/// shock_web::export_page!(Landing, "landing");
/// ```
///
/// # Arguments
///
/// - `$page_type`: a type with `fn new() -> Self` that implements [`Page`]
/// - `$page_name`: a string literal used as the log prefix
#[macro_export]
macro_rules! export_page {
    ($page_type:ty, $page_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ShockRunner>> = RefCell::new(None);
            static FRAME_LOOP: RefCell<Option<$crate::FrameLoop>> = RefCell::new(None);
        }

        /// `None` when the effect has not been started.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::ShockRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Split the text, size the canvases and start the frame loop.
        /// Restarts from scratch if already running.
        #[wasm_bindgen]
        pub fn shock_start() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            shock_stop();

            let page = <$page_type>::new();
            let runner = $crate::ShockRunner::attach(
                $crate::Page::config(&page),
                &$crate::Page::elements(&page),
            )?;
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            let frame_loop = $crate::FrameLoop::start(|now| match with_runner(|r| r.frame(now)) {
                Some(Ok(running)) => running,
                Some(Err(err)) => {
                    log::error!("{}: frame failed, stopping: {:?}", $page_name, err);
                    with_runner(|r| r.stop());
                    false
                }
                None => false,
            })?;
            FRAME_LOOP.with(|cell| {
                *cell.borrow_mut() = Some(frame_loop);
            });

            log::info!("{}: started", $page_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn shock_stop() {
            if let Some(frame_loop) = FRAME_LOOP.with(|cell| cell.borrow_mut().take()) {
                frame_loop.stop();
            }
            if let Some(mut runner) = RUNNER.with(|cell| cell.borrow_mut().take()) {
                runner.stop();
                log::info!("{}: stopped after {} frames", $page_name, runner.frames());
            }
        }

        /// Fire a pulse on the next frame, as if the timeline had cued one.
        #[wasm_bindgen]
        pub fn shock_pulse() {
            with_runner(|r| r.pulse());
        }

        #[wasm_bindgen]
        pub fn shock_frame_count() -> u32 {
            with_runner(|r| r.frames() as u32).unwrap_or(0)
        }
    };
}
