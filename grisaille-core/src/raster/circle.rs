//! Midpoint circle

use crate::traits::canvas::{plot, Canvas};

pub(super) fn midpoint<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: u16,
    y0: u16,
    r: u16,
    brightness: u8,
) {
    let (cx, cy) = (x0 as i32, y0 as i32);
    let r = r as i32;

    let mut f = 1 - r;
    let mut ddf_x = 1;
    let mut ddf_y = -2 * r;
    let mut x = 0;
    let mut y = r;

    plot(canvas, cx, cy + r, brightness);
    plot(canvas, cx, cy - r, brightness);
    plot(canvas, cx + r, cy, brightness);
    plot(canvas, cx - r, cy, brightness);

    while x < y {
        if f >= 0 {
            y -= 1;
            ddf_y += 2;
            f += ddf_y;
        }
        x += 1;
        ddf_x += 2;
        f += ddf_x;

        plot(canvas, cx + x, cy + y, brightness);
        plot(canvas, cx - x, cy + y, brightness);
        plot(canvas, cx + x, cy - y, brightness);
        plot(canvas, cx - x, cy - y, brightness);
        plot(canvas, cx + y, cy + x, brightness);
        plot(canvas, cx - y, cy + x, brightness);
        plot(canvas, cx + y, cy - x, brightness);
        plot(canvas, cx - y, cy - x, brightness);
    }
}
