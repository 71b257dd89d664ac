use watchface_common::embedded_graphics::{
    geometry::Size,
    image::ImageRaw,
    mono_font::{mapping::StrGlyphMapping, DecorationDimensions, MonoFont},
};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Icon {
    Battery,
}

impl Icon {
    pub fn as_text(self) -> &'static str {
        match self {
            Icon::Battery => "\u{F240}",
        }
    }
}

const GLYPH_MAPPING: StrGlyphMapping = StrGlyphMapping::new("\u{F240}", 0);

/// 16x12 battery outline, 1 bpp. The charge bar nests into the hollow
/// interior at offset (2, 2), 10x8.
#[rustfmt::skip]
const BATTERY_OUTLINE: [u8; 24] = [
    0b1111_1111, 0b1111_1100,
    0b1000_0000, 0b0000_0100,
    0b1000_0000, 0b0000_0100,
    0b1000_0000, 0b0000_0100,
    0b1000_0000, 0b0000_0111,
    0b1000_0000, 0b0000_0111,
    0b1000_0000, 0b0000_0111,
    0b1000_0000, 0b0000_0111,
    0b1000_0000, 0b0000_0100,
    0b1000_0000, 0b0000_0100,
    0b1000_0000, 0b0000_0100,
    0b1111_1111, 0b1111_1100,
];

/// Single-glyph 16x12 monospace icon raster.
pub const BATTERY_ICON_16X12: MonoFont = MonoFont {
    image: ImageRaw::new_binary(&BATTERY_OUTLINE, 16),
    glyph_mapping: &GLYPH_MAPPING,
    character_size: Size::new(16, 12),
    character_spacing: 0,
    baseline: 11,
    underline: DecorationDimensions::new(12, 1),
    strikethrough: DecorationDimensions::new(6, 1),
};

#[derive(Debug)]
pub struct Icons {
    pub battery: &'static MonoFont<'static>,
}

unsafe impl Send for Icons {}

impl Default for Icons {
    fn default() -> Self {
        Icons {
            battery: &BATTERY_ICON_16X12,
        }
    }
}
