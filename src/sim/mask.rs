//! Pixel occupancy masks
//!
//! A mask is one bit per pixel, packed into 64-bit words per row, so an
//! overlap test is a word-wise AND of the two rows that share a scanline.

use glam::IVec2;

use crate::consts::MASK_ALPHA_THRESHOLD;

/// Per-pixel opacity bitmap derived from a rendered frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Words per row
    stride: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// All-clear mask
    pub fn empty(width: u32, height: u32) -> Self {
        let stride = width.div_ceil(64) as usize;
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    /// All-set mask (solid rectangle)
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Build from a row-major alpha channel. Pixels with alpha above
    /// `threshold` are solid.
    ///
    /// A buffer that does not match `width * height` yields a zero-size
    /// mask, which never collides.
    pub fn from_alpha_with_threshold(width: u32, height: u32, alpha: &[u8], threshold: u8) -> Self {
        if alpha.len() != width as usize * height as usize {
            log::warn!(
                "alpha buffer of {} bytes does not match {}x{} bitmap; using empty mask",
                alpha.len(),
                width,
                height
            );
            return Self::default();
        }

        let mut mask = Self::empty(width, height);
        for (i, &a) in alpha.iter().enumerate() {
            if a > threshold {
                let x = (i % width as usize) as u32;
                let y = (i / width as usize) as u32;
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Build from an alpha channel with the default threshold
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        Self::from_alpha_with_threshold(width, height, alpha, MASK_ALPHA_THRESHOLD)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True for zero-area masks
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the pixel at (x, y) is solid; out of bounds reads as clear
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.bits[y as usize * self.stride + (x / 64) as usize];
        (word >> (x % 64)) & 1 == 1
    }

    /// Set or clear one pixel; out of bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.stride + (x / 64) as usize;
        let bit = 1u64 << (x % 64);
        if solid {
            self.bits[idx] |= bit;
        } else {
            self.bits[idx] &= !bit;
        }
    }

    /// Number of solid pixels
    #[cfg(test)]
    pub(crate) fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// Mirror left-to-right
    pub fn flipped_horizontal(&self) -> Self {
        let mut out = Self::empty(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.set(self.width - 1 - x, y, true);
                }
            }
        }
        out
    }

    #[inline]
    fn row(&self, y: u32) -> &[u64] {
        let start = y as usize * self.stride;
        &self.bits[start..start + self.stride]
    }

    /// Read `len` (1..=64) bits of a row starting at bit `start`
    #[inline]
    fn window(row: &[u64], start: u32, len: u32) -> u64 {
        let w = (start / 64) as usize;
        let s = start % 64;
        let mut v = row[w] >> s;
        if s != 0 && w + 1 < row.len() {
            v |= row[w + 1] << (64 - s);
        }
        if len < 64 {
            v &= (1u64 << len) - 1;
        }
        v
    }

    /// True if any pixel is solid in both masks when `other`'s top-left
    /// sits at `offset` relative to this mask's top-left.
    ///
    /// Touching edges do not overlap; zero-size masks never overlap.
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            let a_row = self.row(y as u32);
            let b_row = other.row((y - offset.y) as u32);
            let mut x = x0;
            while x < x1 {
                let len = (x1 - x).min(64) as u32;
                let a = Self::window(a_row, x as u32, len);
                let b = Self::window(b_row, (x - offset.x) as u32, len);
                if a & b != 0 {
                    return true;
                }
                x += len as i32;
            }
        }
        false
    }
}
