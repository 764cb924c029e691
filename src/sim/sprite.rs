//! Animation frames and validated sprite tables
//!
//! The asset layer hands over plain alpha bitmaps. Each bitmap becomes a
//! [`Frame`] that carries its own collision mask, so whichever frame is
//! active, the mask an entity collides with is the one derived from it.
//!
//! A [`SpriteSheets`] table is keyed by an enumerated [`SheetKey`] and is
//! checked for completeness once, when it is built. Looking up a frame
//! during a tick cannot miss.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use glam::IVec2;

use super::mask::Mask;
use crate::error::{PlatformerError, Result};

/// Row-major alpha bitmap supplied by the asset layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Self {
        Self {
            width,
            height,
            alpha,
        }
    }

    /// Fully opaque bitmap
    pub fn solid(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![u8::MAX; width as usize * height as usize])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Mirror left-to-right
    pub fn flipped_horizontal(&self) -> Self {
        let w = self.width as usize;
        if w == 0 || self.alpha.len() % w != 0 {
            return self.clone();
        }
        let alpha = self
            .alpha
            .chunks_exact(w)
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Self::new(self.width, self.height, alpha)
    }
}

/// One animation frame and the mask derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bitmap: Bitmap,
    mask: Mask,
}

impl Frame {
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        let mask = Mask::from_alpha(bitmap.width, bitmap.height, &bitmap.alpha);
        Self { bitmap, mask }
    }

    /// Fully opaque frame (terrain tiles, test fixtures)
    pub fn solid(width: u32, height: u32) -> Self {
        Self::from_bitmap(Bitmap::solid(width, height))
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Frame size in pixels
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.bitmap.width as i32, self.bitmap.height as i32)
    }

    /// Mirror left-to-right; the mask is mirrored directly, not rebuilt
    pub fn flipped_horizontal(&self) -> Self {
        Self {
            bitmap: self.bitmap.flipped_horizontal(),
            mask: self.mask.flipped_horizontal(),
        }
    }
}

/// Enumerated key selecting one frame sequence
pub trait SheetKey: Copy + Eq + fmt::Debug + 'static {
    /// Every key that can be reached at runtime, ordered by [`SheetKey::index`]
    const ALL: &'static [Self];

    /// Dense index into the table
    fn index(self) -> usize;

    /// Asset name, e.g. `double_jump_left`
    fn name(self) -> String;
}

/// Frame sequences for every key of `K`, validated at construction
#[derive(Debug, Clone)]
pub struct SpriteSheets<K: SheetKey> {
    sequences: Vec<Vec<Frame>>,
    _key: PhantomData<K>,
}

impl<K: SheetKey> SpriteSheets<K> {
    /// Build the table by asking `source` for each key's frames
    pub fn from_fn<F>(mut source: F) -> Result<Self>
    where
        F: FnMut(K) -> Option<Vec<Frame>>,
    {
        let mut sequences = vec![Vec::new(); K::ALL.len()];
        for &key in K::ALL {
            let frames = source(key).ok_or_else(|| PlatformerError::MissingSequence { key: key.name() })?;
            if frames.is_empty() {
                return Err(PlatformerError::EmptySequence { key: key.name() });
            }
            sequences[key.index()] = frames;
        }
        Ok(Self {
            sequences,
            _key: PhantomData,
        })
    }

    /// Build from sequences keyed by asset name. Extra names are ignored.
    pub fn from_named(mut named: HashMap<String, Vec<Frame>>) -> Result<Self> {
        let table = Self::from_fn(|key| named.remove(&key.name()))?;
        if !named.is_empty() {
            let mut unused: Vec<_> = named.into_keys().collect();
            unused.sort();
            log::debug!("ignoring unused sprite sequences: {}", unused.join(", "));
        }
        Ok(table)
    }

    /// Build from right-facing sequences keyed by base name (`run`,
    /// `jump`, ...). Each base yields `<base>_right` as given and
    /// `<base>_left` mirrored.
    pub fn from_directional(base: HashMap<String, Vec<Frame>>) -> Result<Self> {
        let mut named = HashMap::with_capacity(base.len() * 2);
        for (name, frames) in base {
            let flipped = frames.iter().map(Frame::flipped_horizontal).collect();
            named.insert(format!("{name}_left"), flipped);
            named.insert(format!("{name}_right"), frames);
        }
        Self::from_named(named)
    }

    /// The full sequence for `key` (never empty)
    pub fn sequence(&self, key: K) -> &[Frame] {
        &self.sequences[key.index()]
    }

    /// Number of frames in `key`'s sequence
    pub fn len(&self, key: K) -> usize {
        self.sequences[key.index()].len()
    }

    /// Frame `index` of `key`'s sequence, wrapping around
    pub fn frame(&self, key: K, index: usize) -> &Frame {
        let seq = self.sequence(key);
        &seq[index % seq.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
    }

    impl SheetKey for Light {
        const ALL: &'static [Self] = &[Light::Red, Light::Green];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> String {
            match self {
                Light::Red => "red".into(),
                Light::Green => "green".into(),
            }
        }
    }

    #[test]
    fn test_missing_sequence_is_reported() {
        let mut named = HashMap::new();
        named.insert("red".to_string(), vec![Frame::solid(2, 2)]);
        let err = SpriteSheets::<Light>::from_named(named).unwrap_err();
        assert!(matches!(err, PlatformerError::MissingSequence { key } if key == "green"));
    }

    #[test]
    fn test_empty_sequence_is_reported() {
        let err = SpriteSheets::<Light>::from_fn(|key| match key {
            Light::Red => Some(vec![Frame::solid(1, 1)]),
            Light::Green => Some(Vec::new()),
        })
        .unwrap_err();
        assert!(matches!(err, PlatformerError::EmptySequence { .. }));
    }

    #[test]
    fn test_frame_lookup_wraps() {
        let sheets = SpriteSheets::<Light>::from_fn(|key| match key {
            Light::Red => Some(vec![Frame::solid(1, 1), Frame::solid(2, 2)]),
            Light::Green => Some(vec![Frame::solid(3, 3)]),
        })
        .unwrap();
        assert_eq!(sheets.len(Light::Red), 2);
        assert_eq!(sheets.frame(Light::Red, 3).size(), IVec2::new(2, 2));
        assert_eq!(sheets.frame(Light::Green, 7).size(), IVec2::new(3, 3));
    }

    #[test]
    fn test_frame_mask_follows_bitmap() {
        let frame = Frame::from_bitmap(Bitmap::new(2, 1, vec![255, 0]));
        assert!(frame.mask().get(0, 0));
        assert!(!frame.mask().get(1, 0));

        let flipped = frame.flipped_horizontal();
        assert!(!flipped.mask().get(0, 0));
        assert!(flipped.mask().get(1, 0));
        let rebuilt = Frame::from_bitmap(flipped.bitmap().clone());
        assert_eq!(flipped.mask(), rebuilt.mask());
    }
}
