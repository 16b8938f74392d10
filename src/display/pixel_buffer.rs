// ============================================================================
// Packing helpers
// ============================================================================

/// Pack an opaque color as R8G8B8A8 (SDL `RGBA8888`)
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([r, g, b, 0xFF])
}

/// Split a packed pixel into (r, g, b, a)
#[inline]
pub fn unpack_rgba(color: u32) -> (u8, u8, u8, u8) {
    let [r, g, b, a] = color.to_be_bytes();
    (r, g, b, a)
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major RGBA8888 pixel grid, one packed `u32` per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a zeroed (transparent black) buffer
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fill every pixel with zero
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Set a single opaque pixel (bounds checked, out of range is ignored)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = pack_rgb(r, g, b);
        }
    }

    /// Read the packed value at (x, y)
    #[inline]
    pub fn get_packed(&self, x: i32, y: i32) -> Option<u32> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Read a pixel's color channels
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        self.get_pixel_rgba(x, y).map(|(r, g, b, _)| (r, g, b))
    }

    /// Read all 4 channels of a pixel
    #[inline]
    pub fn get_pixel_rgba(&self, x: i32, y: i32) -> Option<(u8, u8, u8, u8)> {
        self.get_packed(x, y).map(unpack_rgba)
    }

    /// Packed pixels in row-major order
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes for SDL texture upload (native-endian `u32` per pixel)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Bytes per row of `as_bytes`
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    // ========================================================================
    // Post-processing
    // ========================================================================

    /// 3x3 box blur of `src` into `self`, overwriting every pixel.
    ///
    /// The divisor is always 9: neighbors outside the buffer count as black,
    /// so borders fade faster than the interior. Channels are truncated after
    /// the integer division. Alpha comes out opaque.
    pub fn box_blur_from(&mut self, src: &PixelBuffer) {
        debug_assert_eq!(
            (self.width, self.height),
            (src.width, src.height),
            "box_blur_from: buffer sizes differ"
        );

        let w = self.width as i32;
        let h = self.height as i32;

        for y in 0..h {
            for x in 0..w {
                let (mut sr, mut sg, mut sb) = (0u32, 0u32, 0u32);

                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if let Some((r, g, b, _)) = src.get_pixel_rgba(x + dx, y + dy) {
                            sr += r as u32;
                            sg += g as u32;
                            sb += b as u32;
                        }
                    }
                }

                self.set_pixel(x, y, (sr / 9) as u8, (sg / 9) as u8, (sb / 9) as u8);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: u32, height: u32, r: u8, g: u8, b: u8) -> PixelBuffer {
        let mut buffer = PixelBuffer::with_size(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                buffer.set_pixel(x, y, r, g, b);
            }
        }
        buffer
    }

    #[test]
    fn test_pack_channel_order() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x123456FF);
        assert_eq!(unpack_rgba(0x123456FF), (0x12, 0x34, 0x56, 0xFF));
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut buffer = PixelBuffer::with_size(8, 6);
        buffer.set_pixel(3, 4, 1, 128, 255);
        assert_eq!(buffer.get_pixel_rgba(3, 4), Some((1, 128, 255, 255)));
        // Neighbors untouched, no channel bleed
        assert_eq!(buffer.get_packed(2, 4), Some(0));
        assert_eq!(buffer.get_packed(4, 4), Some(0));
        assert_eq!(buffer.get_packed(3, 3), Some(0));
    }

    #[test]
    fn test_out_of_bounds_set_is_noop() {
        let mut buffer = filled(5, 4, 7, 8, 9);
        let before = buffer.clone();

        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 4), (5, 4), (i32::MIN, i32::MAX)] {
            buffer.set_pixel(x, y, 255, 0, 0);
            assert_eq!(buffer.get_pixel(x, y), None);
        }

        assert_eq!(buffer, before);
    }

    #[test]
    fn test_as_bytes_layout() {
        let mut buffer = PixelBuffer::with_size(3, 2);
        buffer.set_pixel(1, 1, 10, 20, 30);

        let bytes = buffer.as_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 4);
        assert_eq!(buffer.pitch(), 12);

        let offset = (3 + 1) * 4; // row 1, column 1
        let word = u32::from_ne_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ]);
        assert_eq!(word, pack_rgb(10, 20, 30));
    }

    #[test]
    fn test_blur_uniform_interior_unchanged() {
        let src = filled(6, 5, 90, 45, 18);
        let mut dst = PixelBuffer::with_size(6, 5);
        dst.box_blur_from(&src);

        for y in 1..4 {
            for x in 1..5 {
                assert_eq!(dst.get_pixel_rgba(x, y), Some((90, 45, 18, 255)));
            }
        }
    }

    #[test]
    fn test_blur_uniform_edges_darken() {
        let src = filled(6, 5, 90, 45, 18);
        let mut dst = PixelBuffer::with_size(6, 5);
        dst.box_blur_from(&src);

        // Corners see 4 samples, edges 6
        for (x, y) in [(0, 0), (5, 0), (0, 4), (5, 4)] {
            assert_eq!(dst.get_pixel(x, y), Some((40, 20, 8)));
        }
        for (x, y) in [(2, 0), (0, 2), (5, 2), (3, 4)] {
            assert_eq!(dst.get_pixel(x, y), Some((60, 30, 12)));
        }
    }

    #[test]
    fn test_blur_single_neighbor_truncates() {
        let mut src = PixelBuffer::with_size(4, 4);
        src.set_pixel(1, 1, 100, 17, 8);
        let mut dst = PixelBuffer::with_size(4, 4);
        dst.box_blur_from(&src);

        // 100/9 = 11.1, 17/9 = 1.9, 8/9 = 0.9
        assert_eq!(dst.get_pixel_rgba(0, 0), Some((11, 1, 0, 255)));
        assert_eq!(dst.get_pixel(3, 3), Some((0, 0, 0)));
    }

    #[test]
    fn test_blur_overwrites_stale_target() {
        let src = PixelBuffer::with_size(3, 3);
        let mut dst = filled(3, 3, 200, 200, 200);
        dst.box_blur_from(&src);

        assert!(dst.pixels().iter().all(|&p| p == pack_rgb(0, 0, 0)));
    }
}
