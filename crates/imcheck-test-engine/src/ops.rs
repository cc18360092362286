//! Low-level synthetic input. One op is written into the context per frame so
//! every edge (hover, press, release, key press) is seen by exactly one frame.

use imcheck_core::{
    input::{Key, Modifiers, MouseButton},
    Context, Vec2,
};

#[derive(Debug, Clone, PartialEq)]
pub enum InputOp {
    MouseMove(Vec2),
    MouseDown,
    MouseUp,
    KeyDown { key: Key, mods: Modifiers },
    KeyUp(Key),
    Text(String),
}

impl InputOp {
    pub fn apply(&self, ctx: &mut Context) {
        let input = ctx.input_mut();
        match self {
            Self::MouseMove(p) => input.set_mouse_pos(*p),
            Self::MouseDown    => input.set_mouse_button(MouseButton::Left, true),
            Self::MouseUp      => input.set_mouse_button(MouseButton::Left, false),
            Self::KeyDown { key, mods } => {
                input.set_modifiers(*mods);
                input.set_key(*key, true);
            }
            Self::KeyUp(key) => {
                input.set_key(*key, false);
                input.set_modifiers(Modifiers::empty());
            }
            Self::Text(s) => input.add_text_str(s),
        }
    }
}

/// Hover, press, release at `at`.
pub fn click(at: Vec2) -> [InputOp; 3] {
    [InputOp::MouseMove(at), InputOp::MouseDown, InputOp::MouseUp]
}

pub fn key_press(key: Key, mods: Modifiers) -> [InputOp; 2] {
    [InputOp::KeyDown { key, mods }, InputOp::KeyUp(key)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_reaches_exactly_one_frame() {
        let mut ctx = Context::new();
        let [down, up] = key_press(Key::A, Modifiers::CTRL);

        down.apply(&mut ctx);
        ctx.new_frame();
        assert!(ctx.input().key_pressed(Key::A) && ctx.input().ctrl());
        ctx.finish_frame();

        up.apply(&mut ctx);
        ctx.new_frame();
        assert!(!ctx.input().key_pressed(Key::A));
        assert!(!ctx.input().ctrl());
        ctx.finish_frame();
    }

    #[test]
    fn click_yields_one_press_and_one_release_edge() {
        let mut ctx = Context::new();
        let (mut clicks, mut releases) = (0, 0);
        for op in click(Vec2::new(5.0, 5.0)) {
            op.apply(&mut ctx);
            ctx.new_frame();
            clicks   += ctx.input().mouse_clicked(MouseButton::Left) as u32;
            releases += ctx.input().mouse_released(MouseButton::Left) as u32;
            ctx.finish_frame();
        }
        assert_eq!((clicks, releases), (1, 1));
        assert_eq!(ctx.input().mouse_pos, Vec2::new(5.0, 5.0));
    }
}
