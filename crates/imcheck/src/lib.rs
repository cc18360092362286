//! # imcheck
//!
//! Immediate-mode GUI whose widgets can be driven by name. Single umbrella
//! crate that re-exports the core engine, the backends and the test engine.
//!
//! ## Feature flags
//!
//! | Flag          | Provides                                        |
//! |---------------|-------------------------------------------------|
//! | `soft`        | CPU rasterizer + built-in bitmap font (default) |
//! | `winit`       | Desktop window presenting the soft framebuffer  |
//! | `test-engine` | Scripted interaction runner                     |
//! | `full`        | All of the above                                |
//!
//! ## Minimal example
//!
//! ```rust
//! use imcheck::prelude::*;
//!
//! let mut ctx = Context::new();
//! ctx.set_display_size(Vec2::new(1280.0, 720.0));
//! let renderer = imcheck::soft::SoftRenderer::new(1280, 720).unwrap();
//! ctx.frame(renderer.font(), 1.0, |ui| {
//!     if ui.begin("Hello", None, WindowFlags::empty()) {
//!         ui.text("imcheck");
//!     }
//!     ui.end();
//! });
//! assert!(ctx.find_item("Hello").is_some());
//! ```

// ─── Core re-exports ─────────────────────────────────────────────────────────

pub use imcheck_core::*;
pub use imcheck_core as core;

// ─── Backend modules ─────────────────────────────────────────────────────────

#[cfg(feature = "soft")]
pub mod soft {
    //! CPU rasterizer backend.
    pub use imcheck_soft::*;
}

#[cfg(feature = "winit")]
pub mod winit {
    //! Desktop window backend.
    pub use imcheck_winit::*;
}

#[cfg(feature = "test-engine")]
pub mod test_engine {
    //! Scripted interaction runner.
    pub use imcheck_test_engine::*;
}

// ─── Prelude ─────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::{
        Color,
        Context,
        Rect,
        Vec2,
        WindowFlags,
        draw_list::TextureId,
        id::Id,
        input::{InputState, Key, Modifiers, MouseButton},
        item::{ItemInfo, ItemKind, ItemStatus},
        renderer::{FontAtlas, Renderer},
        style::{Style, StyleColor},
        ui::Ui,
    };

    #[cfg(feature = "test-engine")]
    pub use imcheck_test_engine::prelude::*;
}
