//! Visual style / theming.

use crate::Color;

// ─── StyleColor indices ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum StyleColor {
    WindowBg = 0,
    WindowBorder,
    TitleBar,
    TitleBarText,
    MenuBarBg,
    PopupBg,
    Border,
    FrameBg,
    FrameBgHovered,
    FrameBgActive,
    Text,
    TextDisabled,
    TextSelectedBg,
    Button,
    ButtonHovered,
    ButtonActive,
    CheckMark,
    SliderGrab,
    SliderGrabActive,
    Header,
    HeaderHovered,
    HeaderActive,
    Separator,
    Tab,
    TabHovered,
    TabActive,
    ResizeGrip,
    ProgressBar,
    // Sentinel, always last
    COUNT,
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Colours, spacing and rounding for every widget.
#[derive(Debug, Clone)]
pub struct Style {
    pub colors: [Color; StyleColor::COUNT as usize],

    pub window_padding:      (f32, f32),
    pub window_rounding:     f32,
    pub window_title_height: f32,
    pub item_spacing:        (f32, f32),
    pub frame_padding:       (f32, f32),
    pub frame_rounding:      f32,
    pub grab_min_size:       f32,
    pub font_size:           f32,
}

impl Default for Style {
    fn default() -> Self { Self::dark() }
}

impl Style {
    /// Dark slate theme.
    pub fn dark() -> Self {
        use StyleColor as SC;
        let accent = Color::from_hex(0x2a9d8f);
        let mut colors = [Color::TRANSPARENT; SC::COUNT as usize];
        let table = [
            (SC::WindowBg,         Color::from_hex(0x15181d).with_alpha(0.96)),
            (SC::WindowBorder,     Color::from_hex(0x3a4049)),
            (SC::TitleBar,         Color::from_hex(0x1f2a36)),
            (SC::TitleBarText,     Color::from_hex(0xf2f4f7)),
            (SC::MenuBarBg,        Color::from_hex(0x20252c)),
            (SC::PopupBg,          Color::from_hex(0x1a1e24).with_alpha(0.98)),
            (SC::Border,           Color::from_hex(0x3a4049)),
            (SC::FrameBg,          Color::from_hex(0x262c34)),
            (SC::FrameBgHovered,   Color::from_hex(0x323a45)),
            (SC::FrameBgActive,    Color::from_hex(0x1d4a52)),
            (SC::Text,             Color::from_hex(0xe6e9ee)),
            (SC::TextDisabled,     Color::from_hex(0x7d8590)),
            (SC::TextSelectedBg,   accent.with_alpha(0.45)),
            (SC::Button,           Color::from_hex(0x23706a)),
            (SC::ButtonHovered,    accent),
            (SC::ButtonActive,     Color::from_hex(0x1b5953)),
            (SC::CheckMark,        Color::from_hex(0x62d2c3)),
            (SC::SliderGrab,       Color::from_hex(0x4fbfb0)),
            (SC::SliderGrabActive, Color::from_hex(0x8ae3d7)),
            (SC::Header,           accent.with_alpha(0.55)),
            (SC::HeaderHovered,    accent.with_alpha(0.8)),
            (SC::HeaderActive,     accent),
            (SC::Separator,        Color::from_hex(0x3a4049)),
            (SC::Tab,              Color::from_hex(0x1f2a36)),
            (SC::TabHovered,       accent.with_alpha(0.8)),
            (SC::TabActive,        Color::from_hex(0x23706a)),
            (SC::ResizeGrip,       accent.with_alpha(0.4)),
            (SC::ProgressBar,      Color::from_hex(0x2f8f6f)),
        ];
        for (slot, col) in table { colors[slot as usize] = col; }

        Self {
            colors,
            window_padding:      (8.0, 8.0),
            window_rounding:     3.0,
            window_title_height: 22.0,
            item_spacing:        (8.0, 4.0),
            frame_padding:       (4.0, 3.0),
            frame_rounding:      2.0,
            grab_min_size:       10.0,
            font_size:           13.0,
        }
    }

    #[inline] pub fn color(&self, c: StyleColor) -> Color { self.colors[c as usize] }

    /// Height of a framed single-line widget.
    #[inline] pub fn frame_height(&self) -> f32 { self.font_size + self.frame_padding.1 * 2.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_fills_every_slot() {
        let style = Style::dark();
        assert!(style.colors.iter().all(|c| c.a > 0.0));
        assert_eq!(style.frame_height(), 19.0);
    }
}
