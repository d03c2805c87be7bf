//! Line and triangle rasterization against `image` pixel buffers.
//!
//! The color buffer is an [`RgbImage`], the depth buffer a [`GrayImage`]
//! with the closer-is-larger convention: a fragment wins a pixel only when
//! its interpolated depth is strictly greater than the stored value.

use image::{GrayImage, Luma, Rgb, RgbImage};
use rayon::prelude::*;

use crate::vec2::Vec2;
use crate::vec3::Vec3;

/// Triangles whose signed area magnitude falls below this are degenerate
/// and rasterize to nothing.
const AREA_EPSILON: f64 = 1.0;

#[inline]
fn plot(framebuffer: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < framebuffer.width() && (y as u32) < framebuffer.height() {
        framebuffer.put_pixel(x as u32, y as u32, color);
    }
}

/// Draws the segment between `a` and `b` with a symmetric DDA: the sweep
/// runs along the axis of greatest extent, so the line never has gaps, and
/// `line(a, b)` lights exactly the pixels of `line(b, a)`. Pixels outside
/// the canvas are dropped.
pub fn line(a: Vec2<i32>, b: Vec2<i32>, framebuffer: &mut RgbImage, color: Rgb<u8>) {
    let (mut ax, mut ay) = (a.x, a.y);
    let (mut bx, mut by) = (b.x, b.y);

    let steep = (ax - bx).abs() < (ay - by).abs();
    if steep {
        std::mem::swap(&mut ax, &mut ay);
        std::mem::swap(&mut bx, &mut by);
    }
    if ax > bx {
        std::mem::swap(&mut ax, &mut bx);
        std::mem::swap(&mut ay, &mut by);
    }

    for x in ax..=bx {
        let t = if bx == ax {
            0.0
        } else {
            (x - ax) as f64 / (bx - ax) as f64
        };
        let y = (ay as f64 * (1.0 - t) + by as f64 * t).round() as i32;
        if steep {
            plot(framebuffer, y, x, color);
        } else {
            plot(framebuffer, x, y, color);
        }
    }
}

/// Signed area of (a, b, c) by the shoelace formula; positive for
/// counter-clockwise winding.
fn signed_area(a: Vec2<i32>, b: Vec2<i32>, c: Vec2<i32>) -> f64 {
    let twice = a.x as i64 * (b.y - c.y) as i64
        + b.x as i64 * (c.y - a.y) as i64
        + c.x as i64 * (a.y - b.y) as i64;
    0.5 * twice as f64
}

/// Fills `tri` with a single color. Vertex z lands in the depth buffer.
pub fn triangle(
    tri: [Vec3<i32>; 3],
    framebuffer: &mut RgbImage,
    zbuffer: &mut GrayImage,
    color: Rgb<u8>,
) {
    fill(tri, framebuffer, zbuffer, |_, _, _| color);
}

/// Fills `tri` interpolating the three per-vertex colors channelwise with
/// the barycentric weights.
pub fn triangle_interp(
    tri: [Vec3<i32>; 3],
    framebuffer: &mut RgbImage,
    zbuffer: &mut GrayImage,
    colors: [Rgb<u8>; 3],
) {
    fill(tri, framebuffer, zbuffer, move |alpha, beta, gamma| {
        let channel = |i: usize| {
            let c = alpha * colors[0][i] as f64
                + beta * colors[1][i] as f64
                + gamma * colors[2][i] as f64;
            c.round().clamp(0.0, 255.0) as u8
        };
        Rgb([channel(0), channel(1), channel(2)])
    });
}

/// Barycentric fill over the clamped bounding box. A pixel is inside iff
/// all three weights are non-negative; the weights sum to 1 by
/// construction, so depth interpolates as `alpha*za + beta*zb + gamma*zc`.
fn fill<F>(tri: [Vec3<i32>; 3], framebuffer: &mut RgbImage, zbuffer: &mut GrayImage, shade: F)
where
    F: Fn(f64, f64, f64) -> Rgb<u8> + Sync,
{
    let [a, b, c] = tri;
    let pa = Vec2::new(a.x, a.y);
    let pb = Vec2::new(b.x, b.y);
    let pc = Vec2::new(c.x, c.y);

    let area = signed_area(pa, pb, pc);
    if area.abs() < AREA_EPSILON {
        return;
    }

    let min_x = a.x.min(b.x).min(c.x).max(0);
    let min_y = a.y.min(b.y).min(c.y).max(0);
    let max_x = a.x.max(b.x).max(c.x).min(framebuffer.width() as i32 - 1);
    let max_y = a.y.max(b.y).max(c.y).min(framebuffer.height() as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    // Fragments carry no data dependencies on each other, so coverage and
    // depth interpolation run in parallel. The depth-compare-and-write
    // stays serial below: each cell's read-compare-write is one unit.
    let fragments: Vec<(u32, u32, u8, Rgb<u8>)> = (min_y..=max_y)
        .into_par_iter()
        .flat_map_iter(|y| {
            let shade = &shade;
            (min_x..=max_x).filter_map(move |x| {
                let p = Vec2::new(x, y);
                let alpha = signed_area(p, pb, pc) / area;
                let beta = signed_area(pa, p, pc) / area;
                let gamma = signed_area(pa, pb, p) / area;
                if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
                    return None;
                }

                let z = alpha * a.z as f64 + beta * b.z as f64 + gamma * c.z as f64;
                let z = z.round().clamp(0.0, 255.0) as u8;
                Some((x as u32, y as u32, z, shade(alpha, beta, gamma)))
            })
        })
        .collect();

    for (x, y, z, color) in fragments {
        if z > zbuffer.get_pixel(x, y)[0] {
            zbuffer.put_pixel(x, y, Luma([z]));
            framebuffer.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
fn lit(framebuffer: &RgbImage) -> Vec<(u32, u32)> {
    framebuffer
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0 != [0, 0, 0])
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[cfg(test)]
fn draw_line(a: (i32, i32), b: (i32, i32)) -> Vec<(u32, u32)> {
    let mut framebuffer = RgbImage::new(16, 16);
    line(
        Vec2::new(a.0, a.1),
        Vec2::new(b.0, b.1),
        &mut framebuffer,
        Rgb([255, 255, 255]),
    );
    lit(&framebuffer)
}

#[test]
fn line_is_symmetric() {
    let cases = [
        ((0, 0), (10, 4)),
        ((3, 9), (4, 1)),
        ((0, 5), (9, 5)),
        ((5, 0), (5, 9)),
        ((2, 13), (12, 2)),
        ((7, 7), (7, 7)),
    ];

    for (p, q) in cases {
        assert_eq!(draw_line(p, q), draw_line(q, p), "case {:?} -> {:?}", p, q);
    }
}

#[test]
fn shallow_line_lights_one_pixel_per_column() {
    let pixels = draw_line((0, 0), (10, 4));
    assert_eq!(11, pixels.len());
    for x in 0..=10u32 {
        assert_eq!(1, pixels.iter().filter(|(px, _)| *px == x).count());
    }
}

#[test]
fn steep_line_lights_one_pixel_per_row() {
    let pixels = draw_line((4, 1), (6, 12));
    assert_eq!(12, pixels.len());
    for y in 1..=12u32 {
        assert_eq!(1, pixels.iter().filter(|(_, py)| *py == y).count());
    }
}

#[test]
fn line_clips_to_canvas() {
    // must not panic, and only in-canvas pixels may light up
    let pixels = draw_line((-5, -5), (20, 20));
    assert!(pixels.iter().all(|&(x, y)| x < 16 && y < 16));
    assert!(!pixels.is_empty());
}

#[cfg(test)]
fn buffers() -> (RgbImage, GrayImage) {
    (RgbImage::new(16, 16), GrayImage::new(16, 16))
}

#[cfg(test)]
fn tri(a: (i32, i32, i32), b: (i32, i32, i32), c: (i32, i32, i32)) -> [Vec3<i32>; 3] {
    [
        Vec3::new(a.0, a.1, a.2),
        Vec3::new(b.0, b.1, b.2),
        Vec3::new(c.0, c.1, c.2),
    ]
}

#[test]
fn degenerate_triangle_writes_no_pixels() {
    let (mut framebuffer, mut zbuffer) = buffers();

    // colinear
    triangle(
        tri((0, 0, 0), (5, 5, 0), (10, 10, 0)),
        &mut framebuffer,
        &mut zbuffer,
        Rgb([255, 0, 0]),
    );
    // area 0.5, below the threshold
    triangle(
        tri((0, 0, 0), (1, 0, 0), (0, 1, 0)),
        &mut framebuffer,
        &mut zbuffer,
        Rgb([255, 0, 0]),
    );

    assert!(lit(&framebuffer).is_empty());
}

#[test]
fn lit_pixels_have_valid_barycentric_weights() {
    let (mut framebuffer, mut zbuffer) = buffers();
    let t = tri((1, 1, 100), (12, 2, 100), (3, 13, 100));
    triangle(t, &mut framebuffer, &mut zbuffer, Rgb([255, 255, 255]));

    let pixels = lit(&framebuffer);
    assert!(!pixels.is_empty());

    let (pa, pb, pc) = (Vec2::new(1, 1), Vec2::new(12, 2), Vec2::new(3, 13));
    let area = signed_area(pa, pb, pc);
    for (x, y) in pixels {
        let p = Vec2::new(x as i32, y as i32);
        let alpha = signed_area(p, pb, pc) / area;
        let beta = signed_area(pa, p, pc) / area;
        let gamma = signed_area(pa, pb, p) / area;

        assert!(alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0);
        assert!((alpha + beta + gamma - 1.0).abs() < 1e-9);
    }
}

#[test]
fn winding_order_does_not_change_coverage() {
    let (mut ccw_fb, mut ccw_zb) = buffers();
    let (mut cw_fb, mut cw_zb) = buffers();
    let color = Rgb([0, 255, 0]);

    triangle(tri((1, 1, 10), (12, 2, 10), (3, 13, 10)), &mut ccw_fb, &mut ccw_zb, color);
    triangle(tri((3, 13, 10), (12, 2, 10), (1, 1, 10)), &mut cw_fb, &mut cw_zb, color);

    assert_eq!(lit(&ccw_fb), lit(&cw_fb));
}

#[test]
fn depth_buffer_occludes_regardless_of_draw_order() {
    let near = Rgb([255, 0, 0]); // depth 200
    let far = Rgb([0, 0, 255]); // depth 50
    let shape = tri((1, 1, 0), (12, 2, 0), (3, 13, 0));
    let with_depth = |t: [Vec3<i32>; 3], z: i32| t.map(|v| Vec3::new(v.x, v.y, z));

    let (mut fb1, mut zb1) = buffers();
    triangle(with_depth(shape, 200), &mut fb1, &mut zb1, near);
    triangle(with_depth(shape, 50), &mut fb1, &mut zb1, far);

    let (mut fb2, mut zb2) = buffers();
    triangle(with_depth(shape, 50), &mut fb2, &mut zb2, far);
    triangle(with_depth(shape, 200), &mut fb2, &mut zb2, near);

    let pixels = lit(&fb1);
    assert!(!pixels.is_empty());
    assert_eq!(pixels, lit(&fb2));
    for &(x, y) in &pixels {
        assert_eq!(near, *fb1.get_pixel(x, y));
        assert_eq!(near, *fb2.get_pixel(x, y));
    }
}

#[test]
fn equal_depth_does_not_overwrite() {
    let (mut framebuffer, mut zbuffer) = buffers();
    let shape = tri((1, 1, 100), (12, 2, 100), (3, 13, 100));

    triangle(shape, &mut framebuffer, &mut zbuffer, Rgb([255, 0, 0]));
    triangle(shape, &mut framebuffer, &mut zbuffer, Rgb([0, 255, 0]));

    for (x, y) in lit(&framebuffer) {
        assert_eq!(Rgb([255, 0, 0]), *framebuffer.get_pixel(x, y));
    }
}

#[test]
fn interpolated_color_is_exact_at_a_vertex() {
    let (mut framebuffer, mut zbuffer) = buffers();
    let colors = [Rgb([255, 0, 0]), Rgb([0, 255, 0]), Rgb([0, 0, 255])];
    triangle_interp(
        tri((1, 1, 100), (12, 1, 100), (1, 12, 100)),
        &mut framebuffer,
        &mut zbuffer,
        colors,
    );

    // at the first vertex alpha == 1, so the color is pure
    assert_eq!(colors[0], *framebuffer.get_pixel(1, 1));
}

#[test]
fn offscreen_triangle_is_dropped() {
    let (mut framebuffer, mut zbuffer) = buffers();
    triangle(
        tri((20, 20, 10), (30, 20, 10), (20, 30, 10)),
        &mut framebuffer,
        &mut zbuffer,
        Rgb([255, 255, 255]),
    );
    assert!(lit(&framebuffer).is_empty());
}
