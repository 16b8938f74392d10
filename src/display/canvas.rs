//! Double-buffered trail canvas
//!
//! Particles are painted into the front buffer. `box_blur` then flips the
//! roles so the freshly painted buffer is read and the other one is
//! overwritten with its blurred copy. No pixels are copied between the two.

use tracing::debug;

use super::pixel_buffer::PixelBuffer;
use crate::error::ConfigError;

/// Color for a frame at `elapsed_ms`: three sines with different periods,
/// mapped from [-1, 1] to [0, 255]
pub fn frame_color(elapsed_ms: u64) -> (u8, u8, u8) {
    let t = elapsed_ms as f64;
    // `as u8` saturates, so a sine peak of exactly 1.0 lands on 255
    let channel = |rate: f64| ((t * rate).sin() + 1.0) * 128.0;
    (
        channel(0.0001) as u8,
        channel(0.0002) as u8,
        channel(0.0003) as u8,
    )
}

pub struct Canvas {
    buffers: [PixelBuffer; 2],
    front: usize,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }

        debug!(width, height, "canvas created");
        Ok(Self {
            buffers: [
                PixelBuffer::with_size(width, height),
                PixelBuffer::with_size(width, height),
            ],
            front: 0,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Is this pixel coordinate on screen?
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.front().in_bounds(x, y)
    }

    /// Map a normalized coordinate to a pixel.
    ///
    /// Both axes scale by `width / 2` so circular motion stays circular on a
    /// non-square canvas; y is then centered with an integer `height / 2`.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> (i32, i32) {
        let half_w = self.width as f64 / 2.0;
        let px = (x + 1.0) * half_w;
        let py = y * half_w + (self.height / 2) as f64;
        (px as i32, py as i32)
    }

    /// Index of the buffer currently playing the front role
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Buffer to present (and to paint into)
    pub fn front(&self) -> &PixelBuffer {
        &self.buffers[self.front]
    }

    /// Raw front buffer memory: row-major, 4 bytes per pixel
    pub fn as_bytes(&self) -> &[u8] {
        self.front().as_bytes()
    }

    /// Set a front buffer pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.buffers[self.front].set_pixel(x, y, r, g, b);
    }

    /// Paint every position with one color; off-screen points are dropped
    pub fn paint<I>(&mut self, positions: I, color: (u8, u8, u8))
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (r, g, b) = color;
        for (x, y) in positions {
            let (px, py) = self.to_pixel(x, y);
            self.set_pixel(px, py, r, g, b);
        }
    }

    /// Flip buffer roles and blur the painted buffer into the new front
    pub fn box_blur(&mut self) {
        let painted = self.front;
        self.front ^= 1;

        let [a, b] = &mut self.buffers;
        let (src, dst) = if painted == 0 { (&*a, b) } else { (&*b, a) };
        dst.box_blur_from(src);
    }

    /// Zero both buffers without touching the roles
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }
}
