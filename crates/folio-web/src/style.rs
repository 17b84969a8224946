//! Inline styles for the background layer and canvas sizing math.
//! Kept free of browser bindings so it can be tested natively.

/// Full-viewport layer behind all page content.
pub const ROOT_STYLE: &str =
    "position:fixed;inset:0;z-index:-1;background:#000;pointer-events:none;";

pub const OVERLAY_BASE: &str = "position:absolute;inset:0;pointer-events:none;";

/// Static fallback: faint emerald glow on black.
pub const STATIC_GLOW: &str =
    "background:radial-gradient(circle at center,rgba(5,150,105,0.05) 0%,#000000 100%);";

/// Static fallback: darken top and bottom edges.
pub const STATIC_SHADE: &str =
    "background:linear-gradient(to bottom,rgba(0,0,0,0.2),transparent,rgba(0,0,0,0.8));";

/// Animated variant: vignette over the canvas.
pub const VIGNETTE: &str =
    "background:radial-gradient(circle at center,transparent 0%,#000000 100%);opacity:0.7;";

/// Animated variant: lighter edge shading than the static look.
pub const ANIMATED_SHADE: &str =
    "background:linear-gradient(to bottom,rgba(0,0,0,0.1),transparent,rgba(0,0,0,0.8));";

pub const CANVAS_STYLE: &str = "position:absolute;inset:0;width:100%;height:100%;display:block;";

/// Backing-store size for a canvas of `css_width` x `css_height` CSS pixels
/// at `pixel_ratio`. Never zero, so the surface can always be configured.
pub fn backing_size(css_width: f32, css_height: f32, pixel_ratio: f32) -> (u32, u32) {
    let scale = |css: f32| {
        let px = (css.max(0.0) * pixel_ratio).round();
        if px.is_finite() {
            (px as u32).max(1)
        } else {
            1
        }
    };
    (scale(css_width), scale(css_height))
}

/// CSS opacity value, clamped and trimmed for `style.opacity`.
pub fn opacity_value(opacity: f32) -> String {
    format!("{:.3}", opacity.clamp(0.0, 1.0))
}
