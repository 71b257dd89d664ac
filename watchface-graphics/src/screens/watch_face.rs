use crate::{
    font_styles::FontStyles,
    icons::{Icon, Icons},
    indicators::{BatteryIndicator, TimeIndicator},
    layout,
};
use bitflags::bitflags;
use watchface_common::display::{PixelFormat, BACKGROUND_COLOR};
use watchface_common::embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Size,
    mono_font::MonoTextStyleBuilder,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};

const BAR_TRACK_COLOR: PixelFormat = PixelFormat::WHITE;
const BAR_FILL_COLOR: PixelFormat = PixelFormat::BLACK;

bitflags! {
    /// Dirty-region flags, one per visual element.
    pub struct Redraw: u8 {
        const ALL = 0xFF;
        const TIME = 1 << 0;
        const PERCENT = 1 << 1;
        const BAR = 1 << 2;
        const ICON = 1 << 3;
    }
}

/// Borrowed state the face reads while drawing. The indicators own the
/// text buffers and the charge level; the face only owns placement and
/// dirty flags.
pub struct WatchFaceResources<'a> {
    pub font_styles: &'a FontStyles,
    pub icons: &'a Icons,
    pub time: &'a TimeIndicator,
    pub battery: &'a BatteryIndicator,
}

/// Owns the on-screen elements: their placement (via [`layout`]) and their
/// redraw flags. All elements are created at session start and live until
/// teardown; only their content changes in between.
pub struct WatchFace {
    redraw: Redraw,
}

impl WatchFace {
    pub fn new() -> Self {
        WatchFace { redraw: Redraw::ALL }
    }

    /// Marks regions as needing a redraw on the next refresh pass.
    pub fn invalidate(&mut self, regions: Redraw) {
        self.redraw |= regions;
    }

    pub fn force_redraw(&mut self) {
        self.redraw = Redraw::ALL;
    }

    pub fn is_dirty(&self) -> bool {
        !self.redraw.is_empty()
    }

    /// Redraws the dirty elements, then clears the flags. The icon outline
    /// is drawn before the bar that nests inside it.
    pub fn refresh<D>(
        &mut self,
        target: &mut D,
        res: &WatchFaceResources<'_>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PixelFormat>,
    {
        if self.redraw.contains(Redraw::TIME) {
            self.draw_time(target, res)?;
        }
        if self.redraw.contains(Redraw::PERCENT) {
            self.draw_percent(target, res)?;
        }
        if self.redraw.contains(Redraw::ICON) {
            self.draw_icon(target, res)?;
        }
        if self.redraw.contains(Redraw::BAR) {
            draw_battery_bar(target, layout::BAR_REGION, res.battery.level())?;
        }
        self.redraw = Redraw::empty();
        Ok(())
    }

    fn draw_time<D>(&self, target: &mut D, res: &WatchFaceResources<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PixelFormat>,
    {
        layout::TIME_LABEL
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
            .draw(target)?;

        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            res.time.text(),
            layout::TIME_ANCHOR,
            res.font_styles.time,
            text_style,
        )
        .draw(target)?;
        Ok(())
    }

    fn draw_percent<D>(&self, target: &mut D, res: &WatchFaceResources<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PixelFormat>,
    {
        layout::PERCENT_LABEL
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
            .draw(target)?;

        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(Baseline::Top)
            .build();
        Text::with_text_style(
            res.battery.text(),
            layout::PERCENT_ANCHOR,
            res.font_styles.percent,
            text_style,
        )
        .draw(target)?;
        Ok(())
    }

    fn draw_icon<D>(&self, target: &mut D, res: &WatchFaceResources<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PixelFormat>,
    {
        let icon_style = MonoTextStyleBuilder::new()
            .font(res.icons.battery)
            .text_color(PixelFormat::WHITE)
            .build();
        let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
        Text::with_text_style(
            Icon::Battery.as_text(),
            layout::ICON_REGION.top_left,
            icon_style,
            text_style,
        )
        .draw(target)?;
        Ok(())
    }
}

impl Default for WatchFace {
    fn default() -> Self {
        WatchFace::new()
    }
}

/// Draws the charge bar into `region`: the full track background first,
/// then the filled portion derived from `level`. The fill must come second
/// or the track fill would erase it.
pub fn draw_battery_bar<D>(target: &mut D, region: Rectangle, level: u8) -> Result<(), D::Error>
where
    D: DrawTarget<Color = PixelFormat>,
{
    region
        .into_styled(PrimitiveStyle::with_fill(BAR_TRACK_COLOR))
        .draw(target)?;

    let fill = layout::bar_fill_width(level);
    Rectangle::new(region.top_left, Size::new(fill, region.size.height))
        .into_styled(PrimitiveStyle::with_fill(BAR_FILL_COLOR))
        .draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchface_common::embedded_graphics::{geometry::Point, mock_display::MockDisplay};

    fn bar_region() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(layout::BAR_TRACK_UNITS, 8))
    }

    fn draw_bar(level: u8) -> MockDisplay<PixelFormat> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        draw_battery_bar(&mut display, bar_region(), level).unwrap();
        display
    }

    #[test]
    fn bar_fills_from_the_left() {
        let display = draw_bar(50);
        for y in 0..8 {
            for x in 0..5 {
                assert_eq!(display.get_pixel(Point::new(x, y)), Some(BAR_FILL_COLOR));
            }
            for x in 5..10 {
                assert_eq!(display.get_pixel(Point::new(x, y)), Some(BAR_TRACK_COLOR));
            }
        }
    }

    #[test]
    fn empty_battery_leaves_the_track_bare() {
        let display = draw_bar(0);
        for x in 0..10 {
            assert_eq!(display.get_pixel(Point::new(x, 0)), Some(BAR_TRACK_COLOR));
        }
    }

    #[test]
    fn full_battery_covers_the_track() {
        let display = draw_bar(100);
        for x in 0..10 {
            assert_eq!(display.get_pixel(Point::new(x, 7)), Some(BAR_FILL_COLOR));
        }
    }

    #[test]
    fn nothing_is_drawn_outside_the_region() {
        let display = draw_bar(100);
        assert_eq!(display.get_pixel(Point::new(10, 0)), None);
        assert_eq!(display.get_pixel(Point::new(0, 8)), None);
    }

    #[test]
    fn drawing_is_idempotent() {
        let once = draw_bar(73);

        let mut twice = MockDisplay::new();
        twice.set_allow_overdraw(true);
        draw_battery_bar(&mut twice, bar_region(), 73).unwrap();
        draw_battery_bar(&mut twice, bar_region(), 73).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn refresh_clears_the_dirty_flags() {
        let mut face = WatchFace::new();
        assert!(face.is_dirty());

        let font_styles = FontStyles::default();
        let icons = Icons::default();
        let time = TimeIndicator::new();
        let battery = BatteryIndicator::new();
        let res = WatchFaceResources {
            font_styles: &font_styles,
            icons: &icons,
            time: &time,
            battery: &battery,
        };

        let mut canvas = crate::test_canvas::TestCanvas::new();
        face.refresh(&mut canvas, &res).unwrap();
        assert!(!face.is_dirty());

        face.invalidate(Redraw::BAR);
        assert!(face.is_dirty());
    }
}
