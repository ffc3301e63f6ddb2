//! Cover-fit cropping and placeholder synthesis for card photos.
//!
//! The fit transform is expressed in normalized UV space (scale + offset)
//! so the renderer can apply it without resampling pixels.

/// Centered "cover" crop of a source image against a target aspect ratio.
///
/// `scale` shrinks the sampled region along the cropped axis, `offset`
/// recenters it. A source that already matches the target aspect maps to
/// the identity transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub scale: (f32, f32),
    pub offset: (f32, f32),
}

impl CoverFit {
    pub const IDENTITY: Self = Self {
        scale: (1.0, 1.0),
        offset: (0.0, 0.0),
    };
}

/// Compute the cover fit for a `src_w` x `src_h` image shown in a frame of
/// aspect ratio `target_aspect` (width / height).
///
/// Wider-than-target sources are cropped horizontally, taller sources
/// vertically; the crop is centered so the middle of the photo survives
/// regardless of source shape.
pub fn cover_fit(src_w: u32, src_h: u32, target_aspect: f32) -> CoverFit {
    let sw = src_w.max(1) as f32;
    let sh = src_h.max(1) as f32;
    let src_aspect = sw / sh;
    if src_aspect > target_aspect {
        let s = target_aspect / src_aspect;
        CoverFit {
            scale: (s, 1.0),
            offset: ((1.0 - s) / 2.0, 0.0),
        }
    } else {
        let s = src_aspect / target_aspect;
        CoverFit {
            scale: (1.0, s),
            offset: (0.0, (1.0 - s) / 2.0),
        }
    }
}

/// A decoded photo ready for the renderer: RGBA8 pixels plus the crop that
/// fits it to the card's photo area.
#[derive(Debug, Clone)]
pub struct CardImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub fit: CoverFit,
}

/// Deterministic fallback color for a card whose photo failed to load.
///
/// Keyed by slot index so the same card always gets the same hue and a
/// failed load never produces a visually empty card.
pub fn placeholder_color(slot: usize) -> [u8; 3] {
    let hue = (slot as f32 * 30.0) % 360.0;
    hsl_to_rgb(hue, 0.55, 0.5)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [u8; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}
