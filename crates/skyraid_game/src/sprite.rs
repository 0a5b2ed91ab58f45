use crate::rect::{Rect, Rectf};

/// A drawable element: an atlas source region, a screen destination and a
/// display angle in degrees.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub src: Rect,
    pub dst: Rectf,
    pub angle: f64,
}

impl Sprite {
    pub const fn new(src: Rect, dst: Rectf, angle: f64) -> Self {
        Sprite { src, dst, angle }
    }
}

/// Fixed-interval frame cycling over a horizontal strip of equal-width
/// atlas frames.
#[derive(Clone, Debug)]
pub struct Animation {
    frame: i32,
    frame_count: i32,
    frame_time: f32,
    elapsed: f32,
}

impl Animation {
    pub fn new(frame_count: i32, frame_time: f32) -> Self {
        Animation {
            frame: 0,
            frame_count,
            frame_time,
            elapsed: 0.0,
        }
    }

    /// Accumulate `dt` and step to the next frame once the per-frame duration
    /// is exceeded. The timer keeps the remainder instead of resetting, so
    /// pacing stays even under a variable frame rate. The index wraps to zero
    /// after the last frame.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed > self.frame_time {
            self.elapsed -= self.frame_time;
            self.frame += 1;
            if self.frame == self.frame_count {
                self.frame = 0;
            }
        }
    }

    pub fn frame(&self) -> i32 {
        self.frame
    }

    /// Re-point the sprite's source rectangle at the current frame.
    pub fn apply(&self, sprite: &mut Sprite) {
        sprite.src.x = sprite.src.w * self.frame;
    }
}
