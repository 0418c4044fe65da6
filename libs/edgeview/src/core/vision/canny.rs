// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Canny edge detection: 3x3 Sobel with replicated borders, L1 gradient
//! magnitude, four-direction non-maximum suppression, 8-connected
//! hysteresis. No pre-blur.

use image::GrayImage;

/// tan(22.5°) in Q15.
const TG22: i32 = 13573;

const EDGE_VALUE: u8 = 255;

/// Per-pixel classification during hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    NotEdge,
    Candidate,
    Edge,
}

/// Classification map with a one-pixel `NotEdge` border, so neighbour
/// visits never need bounds checks.
struct EdgeMap {
    stride: usize,
    cells: Vec<Class>,
}

impl EdgeMap {
    fn new(width: usize, height: usize) -> Self {
        let stride = width + 2;
        Self {
            stride,
            cells: vec![Class::NotEdge; stride * (height + 2)],
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (y + 1) * self.stride + (x + 1)
    }

    /// Promote every candidate 8-connected to an edge in `seeds`.
    fn trace(&mut self, mut seeds: Vec<usize>) {
        let stride = self.stride as isize;
        let neighbours = [
            -stride - 1,
            -stride,
            -stride + 1,
            -1,
            1,
            stride - 1,
            stride,
            stride + 1,
        ];

        while let Some(idx) = seeds.pop() {
            for offset in neighbours {
                let n = (idx as isize + offset) as usize;
                if self.cells[n] == Class::Candidate {
                    self.cells[n] = Class::Edge;
                    seeds.push(n);
                }
            }
        }
    }
}

/// Sobel derivatives of `src`, row-major, borders replicated.
fn sobel_3x3(src: &GrayImage) -> (Vec<i32>, Vec<i32>) {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let data = src.as_raw();
    let px = |x: usize, y: usize| data[y * width + x] as i32;

    let mut dx = vec![0i32; width * height];
    let mut dy = vec![0i32; width * height];

    for y in 0..height {
        let ya = y.saturating_sub(1);
        let yc = (y + 1).min(height - 1);
        for x in 0..width {
            let xa = x.saturating_sub(1);
            let xc = (x + 1).min(width - 1);

            let i = y * width + x;
            dx[i] = (px(xc, ya) - px(xa, ya))
                + 2 * (px(xc, y) - px(xa, y))
                + (px(xc, yc) - px(xa, yc));
            dy[i] = (px(xa, yc) - px(xa, ya))
                + 2 * (px(x, yc) - px(x, ya))
                + (px(xc, yc) - px(xc, ya));
        }
    }

    (dx, dy)
}

/// Canny edge map of `src`: 255 on edges, 0 elsewhere.
///
/// Thresholds apply to the L1 gradient magnitude `|dx| + |dy|` and are
/// floored; they are swapped if given in the wrong order. A pixel is
/// retained when its magnitude is strictly above `low` and it is a local
/// maximum across the gradient; it seeds an edge when strictly above
/// `high`.
pub fn canny(src: &GrayImage, low_threshold: f64, high_threshold: f64) -> GrayImage {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let mut out = GrayImage::new(src.width(), src.height());
    if width == 0 || height == 0 {
        return out;
    }

    let (low, high) = if low_threshold > high_threshold {
        (high_threshold, low_threshold)
    } else {
        (low_threshold, high_threshold)
    };
    let low = low.floor() as i32;
    let high = high.floor() as i32;

    let (dx, dy) = sobel_3x3(src);
    let magnitude: Vec<i32> = dx.iter().zip(&dy).map(|(x, y)| x.abs() + y.abs()).collect();
    let mag = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    let mut map = EdgeMap::new(width, height);
    let mut seeds = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let m = magnitude[i];
            if m <= low {
                continue;
            }

            let (xi, yi) = (x as isize, y as isize);
            let (xs, ys) = (dx[i], dy[i]);
            let ax = xs.abs();
            let ay = ys.abs() << 15;
            let tg22x = ax * TG22;

            let is_maximum = if ay < tg22x {
                // Mostly horizontal gradient.
                m > mag(xi - 1, yi) && m >= mag(xi + 1, yi)
            } else {
                let tg67x = tg22x + (ax << 16);
                if ay > tg67x {
                    m > mag(xi, yi - 1) && m >= mag(xi, yi + 1)
                } else {
                    let s: isize = if (xs ^ ys) < 0 { -1 } else { 1 };
                    m > mag(xi - s, yi - 1) && m > mag(xi + s, yi + 1)
                }
            };
            if !is_maximum {
                continue;
            }

            let idx = map.index(x, y);
            if m > high {
                map.cells[idx] = Class::Edge;
                seeds.push(idx);
            } else {
                map.cells[idx] = Class::Candidate;
            }
        }
    }

    map.trace(seeds);

    for (i, px) in out.as_mut().iter_mut().enumerate() {
        let idx = map.index(i % width, i / width);
        if map.cells[idx] == Class::Edge {
            *px = EDGE_VALUE;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn vertical_step(size: u32, step_x: u32, low: u8, high: u8) -> GrayImage {
        GrayImage::from_fn(size, size, |x, _| Luma([if x < step_x { low } else { high }]))
    }

    fn edge_count(img: &GrayImage) -> usize {
        img.as_raw().iter().filter(|&&v| v == EDGE_VALUE).count()
    }

    #[test]
    fn test_uniform_image_has_no_edges() {
        let img = GrayImage::from_pixel(32, 32, Luma([128]));
        let edges = canny(&img, 80.0, 100.0);
        assert!(edges.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_vertical_step_marks_single_column() {
        let edges = canny(&vertical_step(16, 8, 0, 255), 80.0, 100.0);
        for y in 0..16 {
            assert_eq!(edges.get_pixel(7, y)[0], EDGE_VALUE, "row {y}");
        }
        assert_eq!(edge_count(&edges), 16);
    }

    #[test]
    fn test_horizontal_step_marks_single_row() {
        let img = GrayImage::from_fn(16, 16, |_, y| Luma([if y < 8 { 0 } else { 255 }]));
        let edges = canny(&img, 80.0, 100.0);
        for x in 0..16 {
            assert_eq!(edges.get_pixel(x, 7)[0], EDGE_VALUE, "column {x}");
        }
        assert_eq!(edge_count(&edges), 16);
    }

    #[test]
    fn test_high_threshold_is_exclusive() {
        // A step of 25 gives |dx| = 100: a candidate, never a seed.
        let edges = canny(&vertical_step(16, 8, 100, 125), 80.0, 100.0);
        assert_eq!(edge_count(&edges), 0);

        let edges = canny(&vertical_step(16, 8, 100, 126), 80.0, 100.0);
        assert_eq!(edge_count(&edges), 16);
    }

    /// Edge pixels of `edges` inside `2..size-2` on both axes, away from
    /// the replicated border.
    fn interior_edges(edges: &GrayImage) -> Vec<(u32, u32)> {
        let size = edges.width();
        let mut found = Vec::new();
        for y in 2..size - 2 {
            for x in 2..size - 2 {
                if edges.get_pixel(x, y)[0] == EDGE_VALUE {
                    found.push((x, y));
                }
            }
        }
        found
    }

    fn interior_where(size: u32, on_edge: impl Fn(u32, u32) -> bool) -> Vec<(u32, u32)> {
        let mut expected = Vec::new();
        for y in 2..size - 2 {
            for x in 2..size - 2 {
                if on_edge(x, y) {
                    expected.push((x, y));
                }
            }
        }
        expected
    }

    #[test]
    fn test_anti_diagonal_step() {
        // dx and dy share a sign: neighbours along (-1,-1)/(+1,+1).
        let img = GrayImage::from_fn(16, 16, |x, y| Luma([if x + y < 16 { 0 } else { 255 }]));
        let edges = canny(&img, 80.0, 100.0);

        let expected = interior_where(16, |x, y| x + y == 15 || x + y == 16);
        assert_eq!(interior_edges(&edges), expected);
    }

    #[test]
    fn test_main_diagonal_step() {
        // dx and dy differ in sign: neighbours along (+1,-1)/(-1,+1).
        let img = GrayImage::from_fn(16, 16, |x, y| Luma([if x > y { 255 } else { 0 }]));
        let edges = canny(&img, 80.0, 100.0);

        let expected = interior_where(16, |x, y| x == y || x == y + 1);
        assert_eq!(interior_edges(&edges), expected);
    }

    #[test]
    fn test_swapped_thresholds() {
        let img = vertical_step(16, 8, 0, 255);
        assert_eq!(canny(&img, 100.0, 80.0), canny(&img, 80.0, 100.0));
    }

    #[test]
    fn test_square_outline() {
        let mut img = GrayImage::new(32, 32);
        for y in 8..24 {
            for x in 8..24 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let edges = canny(&img, 80.0, 100.0);

        assert!(edge_count(&edges) > 0);
        assert_eq!(edges.get_pixel(2, 2)[0], 0);
        assert_eq!(edges.get_pixel(16, 16)[0], 0);
        assert_eq!(edges.get_pixel(29, 29)[0], 0);
    }

    #[test]
    fn test_trace_promotes_connected_candidates_only() {
        let mut map = EdgeMap::new(6, 3);
        let seed = map.index(0, 1);
        map.cells[seed] = Class::Edge;
        for x in 1..3 {
            let i = map.index(x, 1);
            map.cells[i] = Class::Candidate;
        }
        let isolated = map.index(5, 1);
        map.cells[isolated] = Class::Candidate;

        map.trace(vec![seed]);

        assert_eq!(map.cells[map.index(1, 1)], Class::Edge);
        assert_eq!(map.cells[map.index(2, 1)], Class::Edge);
        assert_eq!(map.cells[isolated], Class::Candidate);
    }

    #[test]
    fn test_empty_image() {
        let edges = canny(&GrayImage::new(0, 0), 80.0, 100.0);
        assert_eq!(edges.dimensions(), (0, 0));
    }
}
