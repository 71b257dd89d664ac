use profont::{PROFONT_12_POINT, PROFONT_24_POINT};
use watchface_common::display::PixelFormat;
use watchface_common::embedded_graphics::{
    mono_font::{MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::RgbColor,
};

#[derive(Debug)]
pub struct FontStyles {
    pub time: MonoTextStyle<'static, PixelFormat>,
    pub percent: MonoTextStyle<'static, PixelFormat>,
}

unsafe impl Send for FontStyles {}

impl Default for FontStyles {
    fn default() -> Self {
        FontStyles {
            time: MonoTextStyleBuilder::new()
                .font(&PROFONT_24_POINT)
                .text_color(PixelFormat::WHITE)
                .build(),
            percent: MonoTextStyleBuilder::new()
                .font(&PROFONT_12_POINT)
                .text_color(PixelFormat::WHITE)
                .build(),
        }
    }
}
