//! SVG rendition of a computed [`ChartLayout`].
//!
//! The renderer only draws what the engine already placed; it does no
//! scaling of its own. Every coordinate in the layout is already a pixel.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::overlay::{Marker, MarkerIcon};
use crate::chart::{Line, Palette, Rect};
use crate::engine::{AxisTick, ChartLayout};
use crate::error::ChartError;

const FONT: &str = "sans-serif";
const LABEL_SIZE: u32 = 10;
const PLACEHOLDER_SIZE: u32 = 14;
const VOLUME_OPACITY: f64 = 0.6;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub fn render(layout: &ChartLayout) -> Result<String, ChartError> {
    let mut out = String::new();
    {
        let size = canvas_size(layout.width, layout.height);
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        draw_layout(&root, layout).map_err(render_error)?;
    }
    Ok(out)
}

/// Stand-in image shown when a series cannot be charted.
pub fn render_placeholder(width: f64, height: f64, message: &str) -> Result<String, ChartError> {
    let mut out = String::new();
    {
        let size = canvas_size(width, height);
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        draw_placeholder(&root, size, message).map_err(render_error)?;
    }
    Ok(out)
}

fn draw_layout<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &ChartLayout,
) -> DrawResult<DB> {
    let palette = &layout.palette;
    let text = rgb(&palette.text);

    root.fill(&rgb(&palette.background))?;

    draw_grid(root, &layout.price.frame, &layout.price.ticks, palette)?;

    let label_style = (FONT, LABEL_SIZE)
        .into_font()
        .color(&text)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let label_y = px(layout.price.frame.y + layout.price.frame.height) + 6;
    for label in &layout.x_labels {
        root.draw(&Text::new(label.text.clone(), (px(label.x), label_y), label_style.clone()))?;
    }

    let wick = rgb(&palette.wick);
    for candle in &layout.candles {
        root.draw(&PathElement::new(line_points(&candle.wick), wick.stroke_width(1)))?;
        root.draw(&Rectangle::new(rect_corners(&candle.body), rgb(&candle.fill).filled()))?;
    }

    for marker in &layout.markers {
        draw_marker(root, marker, palette)?;
    }

    if let Some(volume) = &layout.volume {
        draw_grid(root, &volume.frame, &volume.ticks, palette)?;
        for bar in &volume.bars {
            let style = rgb(&bar.fill).mix(VOLUME_OPACITY).filled();
            root.draw(&Rectangle::new(rect_corners(&bar.rect), style))?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_placeholder<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    (width, height): (u32, u32),
    message: &str,
) -> DrawResult<DB> {
    let palette = Palette::default();
    root.fill(&rgb(&palette.background))?;

    let style = (FONT, PLACEHOLDER_SIZE)
        .into_font()
        .color(&rgb(&palette.text))
        .pos(Pos::new(HPos::Center, VPos::Center));
    let center = ((width / 2) as i32, (height / 2) as i32);
    root.draw(&Text::new(message.to_string(), center, style))?;

    root.present()?;
    Ok(())
}

fn draw_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Rect,
    ticks: &[AxisTick],
    palette: &Palette,
) -> DrawResult<DB> {
    let grid = rgb(&palette.grid);
    let label_style = (FONT, LABEL_SIZE)
        .into_font()
        .color(&rgb(&palette.text))
        .pos(Pos::new(HPos::Right, VPos::Center));

    let (left, right) = (px(frame.x), px(frame.x + frame.width));
    for tick in ticks {
        let y = px(tick.y);
        root.draw(&PathElement::new(vec![(left, y), (right, y)], grid.stroke_width(1)))?;
        root.draw(&Text::new(tick.label.clone(), (left - 6, y), label_style.clone()))?;
    }
    Ok(())
}

fn draw_marker<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    marker: &Marker,
    palette: &Palette,
) -> DrawResult<DB> {
    let (cx, cy) = (px(marker.cx), px(marker.cy));
    let radius = marker.radius.round().max(1.0) as i32;
    let outline = rgb(&palette.background);

    root.draw(&Circle::new((cx, cy), radius, rgb(&marker.fill).filled()))?;
    root.draw(&Circle::new((cx, cy), radius, outline.stroke_width(2)))?;

    let s = (radius / 2).max(1);
    let tail = (s * 3 / 5).max(1);
    match marker.icon {
        MarkerIcon::ArrowUp => root.draw(&Polygon::new(
            vec![(cx, cy - s), (cx + s, cy + tail), (cx - s, cy + tail)],
            outline.filled(),
        ))?,
        MarkerIcon::ArrowDown => root.draw(&Polygon::new(
            vec![(cx, cy + s), (cx + s, cy - tail), (cx - s, cy - tail)],
            outline.filled(),
        ))?,
        MarkerIcon::Minus => root.draw(&PathElement::new(
            vec![(cx - s, cy), (cx + s, cy)],
            outline.stroke_width(2),
        ))?,
    }
    Ok(())
}

fn line_points(line: &Line) -> Vec<(i32, i32)> {
    vec![(px(line.x1), px(line.y1)), (px(line.x2), px(line.y2))]
}

fn rect_corners(rect: &Rect) -> [(i32, i32); 2] {
    [
        (px(rect.x), px(rect.y)),
        (px(rect.x + rect.width), px(rect.y + rect.height)),
    ]
}

#[inline]
fn px(value: f64) -> i32 {
    value.round() as i32
}

fn canvas_size(width: f64, height: f64) -> (u32, u32) {
    (width.round().max(1.0) as u32, height.round().max(1.0) as u32)
}

/// Parses `#rrggbb`; anything else draws black.
fn rgb(hex: &str) -> RGBColor {
    let parsed = hex
        .strip_prefix('#')
        .filter(|digits| digits.len() == 6)
        .and_then(|digits| {
            let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
            Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
        });

    parsed.unwrap_or_else(|| {
        tracing::debug!(color = hex, "unparseable palette color");
        BLACK
    })
}

fn render_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Render(e.to_string())
}
