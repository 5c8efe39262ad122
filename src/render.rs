//! Per-tick drawing of countdown rings and round results.

use std::f64::consts::PI;

use crate::model::{Color, Mode, Touch};

const BACKGROUND_RADIUS: f64 = 25.0;
const INNER_RADIUS: f64 = 15.0;
const RING_RADIUS: f64 = 18.0;
const RING_WIDTH: f64 = 2.0;

/// 2D drawing capability the renderer writes into.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Device pixels per layout pixel.
    fn pixel_ratio(&self) -> f64;
    fn clear(&mut self);
    fn fill_all(&mut self, color: Color);
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);
    fn stroke_arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        line_width: f64,
        color: Color,
    );
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub elapsed_ms: f64,
    pub countdown_ms: f64,
    /// Mode of the completed round; `None` while counting down.
    pub result: Option<Mode>,
}

impl Frame {
    /// Ring sweep; keeps growing past a full turn after expiry.
    pub fn sweep(&self) -> f64 {
        if self.countdown_ms <= 0.0 {
            return 2.0 * PI;
        }
        2.0 * PI * (self.elapsed_ms / self.countdown_ms)
    }

    fn fingers_result(&self) -> bool {
        self.result == Some(Mode::Fingers)
    }
}

pub fn is_visible(touch: &Touch, frame: &Frame) -> bool {
    !frame.fingers_result() || touch.is_selected()
}

/// Clears the surface and draws one frame.
pub fn draw_frame<'a, S, I>(surface: &mut S, touches: I, frame: &Frame)
where
    S: Surface,
    I: IntoIterator<Item = &'a Touch>,
{
    surface.clear();
    let touches: Vec<&Touch> = touches.into_iter().collect();
    if frame.fingers_result() {
        let winners: Vec<&&Touch> = touches.iter().filter(|t| t.is_selected()).collect();
        match winners.as_slice() {
            [only] => surface.fill_all(only.color),
            _ => surface.fill_all(Color::BLACK),
        }
    }
    let sweep = frame.sweep();
    for touch in touches.into_iter().filter(|t| is_visible(t, frame)) {
        draw_touch(surface, touch, sweep);
    }
}

fn draw_touch<S: Surface>(surface: &mut S, touch: &Touch, sweep: f64) {
    let ratio = surface.pixel_ratio();
    surface.fill_disc(touch.x, touch.y, BACKGROUND_RADIUS * ratio, Color::WHITE);
    surface.fill_disc(touch.x, touch.y, INNER_RADIUS * ratio, touch.color);
    surface.stroke_arc(
        touch.x,
        touch.y,
        RING_RADIUS * ratio,
        0.0,
        sweep,
        RING_WIDTH * ratio,
        touch.color,
    );
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Surface;
    use crate::model::Color;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Clear,
        FillAll(Color),
        Disc { x: f64, y: f64, radius: f64, color: Color },
        Arc { x: f64, y: f64, radius: f64, end: f64, line_width: f64, color: Color },
    }

    /// Surface that records every primitive.
    #[derive(Debug)]
    pub struct RecordingSurface {
        pub ratio: f64,
        pub ops: Vec<Op>,
    }

    impl Default for RecordingSurface {
        fn default() -> Self {
            Self {
                ratio: 1.0,
                ops: Vec::new(),
            }
        }
    }

    impl RecordingSurface {
        /// Ops since the last clear, the clear included.
        pub fn last_frame(&self) -> &[Op] {
            let start = self.ops.iter().rposition(|op| *op == Op::Clear).unwrap_or(0);
            &self.ops[start..]
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> f64 {
            320.0
        }
        fn height(&self) -> f64 {
            480.0
        }
        fn pixel_ratio(&self) -> f64 {
            self.ratio
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn fill_all(&mut self, color: Color) {
            self.ops.push(Op::FillAll(color));
        }
        fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
            self.ops.push(Op::Disc { x, y, radius, color });
        }
        fn stroke_arc(
            &mut self,
            x: f64,
            y: f64,
            radius: f64,
            _start: f64,
            end: f64,
            line_width: f64,
            color: Color,
        ) {
            self.ops.push(Op::Arc { x, y, radius, end, line_width, color });
        }
    }
}
