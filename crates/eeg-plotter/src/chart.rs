//! Raster line charts

use crate::glyphs::{draw_text, draw_text_vertical, put_pixel_clipped, text_height, text_width};
use image::{Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const LINE_COLOR: Rgb<u8> = Rgb([31, 119, 180]);

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 36;
const MARGIN_BOTTOM: u32 = 52;

const TITLE_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 1;
const TICK_LENGTH: i64 = 5;
const TARGET_TICKS: usize = 6;
/// Fraction of the data span added on each side of both axes
const DATA_MARGIN: f32 = 0.05;

/// Titles for a single-series line chart
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Pixel rectangle of the plotting area, inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
}

/// Data interval mapped onto one axis of the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    /// Finite extent of `values` widened by the data margin.
    ///
    /// Degenerate extents are widened to a unit interval first; with no finite
    /// values the range is `[0, 1]`.
    pub fn covering(values: &[f32]) -> Self {
        let (min, max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            return AxisRange { min: 0.0, max: 1.0 };
        }

        let (min, max) = if max - min <= f32::EPSILON * max.abs().max(1.0) {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let pad = (max - min) * DATA_MARGIN;
        AxisRange {
            min: min - pad,
            max: max + pad,
        }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Tick positions on a 1/2/5 grid inside the range, and their step
    pub fn ticks(&self, target: usize) -> (Vec<f32>, f32) {
        let step = nice_step(self.span(), target);
        let first = (self.min / step).ceil();
        let tolerance = step * 1e-4;

        let ticks = (0..=target * 4)
            .map(|k| (first + k as f32) * step)
            .take_while(|&value| value <= self.max + tolerance)
            .collect();

        (ticks, step)
    }
}

/// Smallest 1, 2 or 5 times a power of ten at least `span / target`
pub fn nice_step(span: f32, target: usize) -> f32 {
    let raw = span / target.max(1) as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let residual = raw / magnitude;

    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Tick label with just enough decimals for `step`
pub fn format_tick(value: f32, step: f32) -> String {
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    // avoid printing "-0"
    let value = if value.abs() < step * 1e-3 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

impl<'a> LineChart<'a> {
    pub fn new(title: &'a str, x_label: &'a str, y_label: &'a str) -> Self {
        LineChart { title, x_label, y_label }
    }

    /// Render `ys` against `xs` as a connected polyline.
    ///
    /// Only pairs up to the shorter slice are drawn; segments touching a
    /// non-finite value are skipped.
    pub fn draw(&self, xs: &[f32], ys: &[f32], width: u32, height: u32) -> RgbImage {
        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
        let area = PlotArea {
            left: MARGIN_LEFT as i64,
            right: width.saturating_sub(MARGIN_RIGHT + 1) as i64,
            top: MARGIN_TOP as i64,
            bottom: height.saturating_sub(MARGIN_BOTTOM + 1) as i64,
        };

        let count = xs.len().min(ys.len());
        let x_range = AxisRange::covering(&xs[..count]);
        let y_range = AxisRange::covering(&ys[..count]);

        self.draw_x_ticks(&mut image, &area, x_range);
        self.draw_y_ticks(&mut image, &area, y_range);
        self.draw_series(&mut image, &area, &xs[..count], &ys[..count], x_range, y_range);
        draw_frame(&mut image, &area);
        self.draw_titles(&mut image, &area);

        image
    }

    fn draw_series(
        &self,
        image: &mut RgbImage,
        area: &PlotArea,
        xs: &[f32],
        ys: &[f32],
        x_range: AxisRange,
        y_range: AxisRange,
    ) {
        let points: Vec<Option<(i64, i64)>> = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| {
                if x.is_finite() && y.is_finite() {
                    Some((map_x(area, x_range, x), map_y(area, y_range, y)))
                } else {
                    None
                }
            })
            .collect();

        if let [Some((x, y))] = points.as_slice() {
            draw_line(image, (*x, *y), (*x, *y), LINE_COLOR);
        }

        for pair in points.windows(2) {
            if let [Some(start), Some(end)] = pair {
                draw_line(image, *start, *end, LINE_COLOR);
            }
        }
    }

    fn draw_x_ticks(&self, image: &mut RgbImage, area: &PlotArea, range: AxisRange) {
        let (ticks, step) = range.ticks(TARGET_TICKS);
        for value in ticks {
            let x = map_x(area, range, value);
            draw_line(image, (x, area.bottom), (x, area.bottom + TICK_LENGTH), FOREGROUND);

            let label = format_tick(value, step);
            let label_x = x - text_width(&label, TICK_SCALE) as i64 / 2;
            draw_text(image, &label, label_x, area.bottom + TICK_LENGTH + 3, TICK_SCALE, FOREGROUND);
        }
    }

    fn draw_y_ticks(&self, image: &mut RgbImage, area: &PlotArea, range: AxisRange) {
        let (ticks, step) = range.ticks(TARGET_TICKS);
        for value in ticks {
            let y = map_y(area, range, value);
            draw_line(image, (area.left - TICK_LENGTH, y), (area.left, y), FOREGROUND);

            let label = format_tick(value, step);
            let label_x = area.left - TICK_LENGTH - 3 - text_width(&label, TICK_SCALE) as i64;
            let label_y = y - text_height(TICK_SCALE) as i64 / 2;
            draw_text(image, &label, label_x, label_y, TICK_SCALE, FOREGROUND);
        }
    }

    fn draw_titles(&self, image: &mut RgbImage, area: &PlotArea) {
        let centre_x = (area.left + area.right) / 2;
        let centre_y = (area.top + area.bottom) / 2;

        let title_x = centre_x - text_width(self.title, TITLE_SCALE) as i64 / 2;
        let title_y = (area.top - text_height(TITLE_SCALE) as i64) / 2;
        draw_text(image, self.title, title_x, title_y, TITLE_SCALE, FOREGROUND);

        let x_label_x = centre_x - text_width(self.x_label, LABEL_SCALE) as i64 / 2;
        let x_label_y = area.bottom + TICK_LENGTH + 3 + text_height(TICK_SCALE) as i64 + 8;
        draw_text(image, self.x_label, x_label_x, x_label_y, LABEL_SCALE, FOREGROUND);

        let y_label_x = 8;
        let y_label_y = centre_y + text_width(self.y_label, LABEL_SCALE) as i64 / 2;
        draw_text_vertical(image, self.y_label, y_label_x, y_label_y, LABEL_SCALE, FOREGROUND);
    }
}

fn map_x(area: &PlotArea, range: AxisRange, value: f32) -> i64 {
    let fraction = (value - range.min) / range.span();
    area.left + (fraction * (area.right - area.left) as f32).round() as i64
}

fn map_y(area: &PlotArea, range: AxisRange, value: f32) -> i64 {
    let fraction = (value - range.min) / range.span();
    area.bottom - (fraction * (area.bottom - area.top) as f32).round() as i64
}

fn draw_frame(image: &mut RgbImage, area: &PlotArea) {
    let corners = [
        (area.left, area.top),
        (area.right, area.top),
        (area.right, area.bottom),
        (area.left, area.bottom),
    ];
    for i in 0..corners.len() {
        draw_line(image, corners[i], corners[(i + 1) % corners.len()], FOREGROUND);
    }
}

/// Bresenham line between two pixel positions, clipped to the image
fn draw_line(image: &mut RgbImage, start: (i64, i64), end: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = start;
    let dx = (end.0 - x).abs();
    let dy = -(end.1 - y).abs();
    let sx = if x < end.0 { 1 } else { -1 };
    let sy = if y < end.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel_clipped(image, x, y, color);
        if x == end.0 && y == end.1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_pixels(image: &RgbImage) -> usize {
        image.pixels().filter(|p| **p == LINE_COLOR).count()
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(10.0, 5), 2.0);
        assert!((nice_step(1.0, 4) - 0.5).abs() < 1e-6);
        assert!((nice_step(125.0, 6) - 50.0).abs() < 1e-4);
        assert!((nice_step(0.07, 6) - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.0, 2.0), "2");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(-0.00001, 0.5), "0.0");
        assert_eq!(format_tick(-3.0, 1.0), "-3");
    }

    #[test]
    fn test_axis_range_pads_data() {
        let range = AxisRange::covering(&[0.0, 10.0]);
        assert!((range.min + 0.5).abs() < 1e-5);
        assert!((range.max - 10.5).abs() < 1e-5);
    }

    #[test]
    fn test_axis_range_degenerate() {
        let flat = AxisRange::covering(&[3.0, 3.0, 3.0]);
        assert!(flat.min < 3.0 && flat.max > 3.0);

        let empty = AxisRange::covering(&[]);
        assert_eq!(empty, AxisRange { min: 0.0, max: 1.0 });

        let nan = AxisRange::covering(&[f32::NAN]);
        assert_eq!(nan, AxisRange { min: 0.0, max: 1.0 });
    }

    #[test]
    fn test_ticks_inside_range() {
        let range = AxisRange::covering(&[-3.2, 3.4]);
        let (ticks, step) = range.ticks(TARGET_TICKS);

        assert!(ticks.len() >= 3);
        assert!(ticks.iter().all(|&t| t >= range.min && t <= range.max + step * 1e-4));
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - step).abs() < step * 1e-3));
    }

    #[test]
    fn test_draw_dimensions_and_line() {
        let chart = LineChart::new("Simulated EEG Signal", "Time (s)", "Amplitude");
        let xs: Vec<f32> = (0..100).map(|i| i as f32 * 0.1).collect();
        let ys: Vec<f32> = xs.iter().map(|x| x.sin()).collect();

        let image = chart.draw(&xs, &ys, 1000, 300);
        assert_eq!(image.dimensions(), (1000, 300));
        assert!(line_pixels(&image) > 500);
    }

    #[test]
    fn test_draw_handles_tiny_and_broken_series() {
        let chart = LineChart::new("t", "x", "y");

        let single = chart.draw(&[0.0], &[1.0], 300, 200);
        assert_eq!(line_pixels(&single), 1);

        let broken = chart.draw(&[0.0, 1.0, 2.0], &[1.0, f32::NAN, 2.0], 300, 200);
        assert_eq!(line_pixels(&broken), 0);

        let empty = chart.draw(&[], &[], 300, 200);
        assert_eq!(line_pixels(&empty), 0);
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut image = RgbImage::from_pixel(10, 10, BACKGROUND);
        draw_line(&mut image, (1, 1), (8, 5), LINE_COLOR);
        assert_eq!(*image.get_pixel(1, 1), LINE_COLOR);
        assert_eq!(*image.get_pixel(8, 5), LINE_COLOR);
    }
}
