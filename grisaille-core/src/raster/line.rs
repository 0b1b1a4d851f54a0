//! Line rasterization: integer Bresenham and Xiaolin Wu antialiasing

use libm::{floorf, roundf};

use super::Rasterizer;
use crate::traits::canvas::{plot, Canvas};

/// Endpoints after steep transposition and x-ordering
struct Span {
    steep: bool,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Span {
    /// Swap axes for steep lines, then order so x increases
    fn normalize(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        Self {
            steep,
            x0,
            y0,
            x1,
            y1,
        }
    }

    /// Plot in the original (untransposed) coordinate system
    fn plot<C: Canvas + ?Sized>(&self, canvas: &mut C, x: i32, y: i32, brightness: u8) {
        if self.steep {
            plot(canvas, y, x, brightness);
        } else {
            plot(canvas, x, y, brightness);
        }
    }
}

pub(super) fn bresenham<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    brightness: u8,
) {
    if x0 == x1 {
        canvas.draw_vline(x0, y0, y1, brightness);
        return;
    }
    if y0 == y1 {
        canvas.draw_hline(y0, x0, x1, brightness);
        return;
    }

    let span = Span::normalize(x0, y0, x1, y1);
    let dx = span.x1 - span.x0;
    let dy = (span.y1 - span.y0).abs();
    let ystep = if span.y0 < span.y1 { 1 } else { -1 };

    let mut err = dx / 2;
    let mut y = span.y0;
    for x in span.x0..=span.x1 {
        span.plot(canvas, x, y, brightness);
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

/// Fractional part
fn fpart(v: f32) -> f32 {
    v - floorf(v)
}

/// One minus the fractional part
fn rfpart(v: f32) -> f32 {
    1.0 - fpart(v)
}

/// Scale brightness by a 0..=1 coverage, truncating
fn shade(brightness: u8, coverage: f32) -> u8 {
    (brightness as f32 * coverage) as u8
}

pub(super) fn wu<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    brightness: u8,
) {
    if x0 == x1 {
        canvas.draw_vline(x0, y0, y1, brightness);
        return;
    }
    if y0 == y1 {
        canvas.draw_hline(y0, x0, x1, brightness);
        return;
    }

    let brightness = brightness & 0x0F;
    let span = Span::normalize(x0, y0, x1, y1);
    let (fx0, fy0) = (span.x0 as f32, span.y0 as f32);
    let (fx1, fy1) = (span.x1 as f32, span.y1 as f32);
    let gradient = (fy1 - fy0) / (fx1 - fx0);

    // First endpoint
    let xend = roundf(fx0);
    let yend = fy0 + gradient * (xend - fx0);
    let xgap = rfpart(fx0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = floorf(yend) as i32;
    span.plot(canvas, xpxl1, ypxl1, shade(brightness, rfpart(yend) * xgap));
    span.plot(canvas, xpxl1, ypxl1 + 1, shade(brightness, fpart(yend) * xgap));
    let mut intery = yend + gradient;

    // Second endpoint
    let xend = roundf(fx1);
    let yend = fy1 + gradient * (xend - fx1);
    let xgap = fpart(fx1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = floorf(yend) as i32;
    span.plot(canvas, xpxl2, ypxl2, shade(brightness, rfpart(yend) * xgap));
    span.plot(canvas, xpxl2, ypxl2 + 1, shade(brightness, fpart(yend) * xgap));

    for x in (xpxl1 + 1)..xpxl2 {
        let y = floorf(intery) as i32;
        span.plot(canvas, x, y, shade(brightness, rfpart(intery)));
        span.plot(canvas, x, y + 1, shade(brightness, fpart(intery)));
        intery += gradient;
    }
}
