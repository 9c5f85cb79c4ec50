//! CPU reference for the ocean fragment shader.
//!
//! The GLSL in [`crate::shaders`] is generated from the constants below, so
//! this module and the GPU agree on every coefficient. All arithmetic is f32
//! to match the shader's `highp float`.

use std::ops::{Add, Mul, Sub};

use crate::config::{Palette, Rgb};

/// Dot-product weights of the sine hash.
pub const HASH_WEIGHTS: Vec2 = Vec2::new(12.9898, 78.233);
/// Post-sine multiplier of the hash.
pub const HASH_SCALE: f32 = 43758.5453;

pub const OCTAVES: usize = 5;
pub const START_AMPLITUDE: f32 = 0.5;

/// Spatial scale of the broad swell layer.
pub const SWELL_SCALE: f32 = 3.0;
/// Drift of the swell layer, in noise units per second.
pub const SWELL_DRIFT: Vec2 = Vec2::new(0.05, 0.02);
/// Spatial scale of the fine ripple layer.
pub const RIPPLE_SCALE: f32 = 6.0;
pub const RIPPLE_DRIFT: Vec2 = Vec2::new(-0.03, 0.04);
/// Weight of the swell layer; the ripple layer gets the remainder.
pub const SWELL_WEIGHT: f32 = 0.6;

pub const DITHER_SCALE: f32 = 1000.0;
pub const DITHER_WEIGHT: f32 = 0.08;

pub const HIGHLIGHT_EDGE: (f32, f32) = (0.65, 0.85);
pub const HIGHLIGHT_WEIGHT: f32 = 0.35;
pub const VIGNETTE_STRENGTH: f32 = 0.7;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn floor(self) -> Vec2 {
        Vec2::new(self.x.floor(), self.y.floor())
    }

    pub fn fract(self) -> Vec2 {
        Vec2::new(fract(self.x), fract(self.y))
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// GLSL `fract`: `x - floor(x)`, always in `[0, 1)`.
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    // x just below an integer can round up to exactly 1.0
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [mix(a[0], b[0], t), mix(a[1], b[1], t), mix(a[2], b[2], t)]
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Cheap sine hash of a 2D point into `[0, 1)`. Not a PRNG.
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(HASH_WEIGHTS).sin() * HASH_SCALE)
}

/// Value noise: smoothstep-eased bilinear blend of the cell's corner hashes.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p.fract();

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    let ux = f.x * f.x * (3.0 - 2.0 * f.x);
    let uy = f.y * f.y * (3.0 - 2.0 * f.y);

    mix(mix(a, b, ux), mix(c, d, ux), uy)
}

/// Fractal Brownian motion over [`OCTAVES`] octaves of [`value_noise`].
pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = START_AMPLITUDE;
    for _ in 0..OCTAVES {
        value += amplitude * value_noise(p);
        p = p * 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Sample coordinates of the swell and ripple layers at `time` seconds.
pub fn layer_coords(st: Vec2, time: f32) -> (Vec2, Vec2) {
    (
        st * SWELL_SCALE + SWELL_DRIFT * time,
        st * RIPPLE_SCALE + RIPPLE_DRIFT * time,
    )
}

/// Scalar wave pattern for a pixel, before colouring.
pub fn pattern(frag: Vec2, resolution: Vec2, time: f32) -> f32 {
    let uv = Vec2::new(frag.x / resolution.x, frag.y / resolution.y);
    let st = Vec2::new(uv.x * resolution.x / resolution.y, uv.y);

    let (swell, ripple) = layer_coords(st, time);
    let waves = mix(fbm(ripple), fbm(swell), SWELL_WEIGHT);

    waves + hash(uv * DITHER_SCALE) * DITHER_WEIGHT
}

/// Final shaded colour of the pixel at `frag` (window coordinates, origin at
/// the bottom left like `gl_FragCoord`).
pub fn ocean_color(frag: Vec2, resolution: Vec2, time: f32, palette: &Palette) -> Rgb {
    let p = pattern(frag, resolution, time);

    let mut color = mix_rgb(palette.deep, palette.mid, (p * 2.0).clamp(0.0, 1.0));
    color = mix_rgb(color, palette.light, ((p - 0.5) * 2.0).clamp(0.0, 1.0));
    let glint = smoothstep(HIGHLIGHT_EDGE.0, HIGHLIGHT_EDGE.1, p) * HIGHLIGHT_WEIGHT;
    color = mix_rgb(color, palette.highlight, glint);

    let uv = Vec2::new(frag.x / resolution.x, frag.y / resolution.y);
    let vignette = 1.0 - (uv - Vec2::new(0.5, 0.5)).length() * VIGNETTE_STRENGTH;
    color.map(|c| c * vignette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = Vec2> {
        (-20..20).flat_map(|y| (-20..20).map(move |x| Vec2::new(x as f32 * 0.37, y as f32 * 1.13)))
    }

    #[test]
    fn hash_stays_in_unit_interval() {
        for p in grid() {
            let h = hash(p);
            assert!((0.0..1.0).contains(&h), "hash({p:?}) = {h}");
        }
    }

    #[test]
    fn value_noise_matches_corners_on_lattice() {
        for p in [Vec2::new(0.0, 0.0), Vec2::new(3.0, -2.0), Vec2::new(-7.0, 11.0)] {
            assert_eq!(value_noise(p), hash(p));
        }
    }

    #[test]
    fn value_noise_is_bounded_by_corners() {
        let cell = Vec2::new(4.0, 9.0);
        let corners = [
            hash(cell),
            hash(cell + Vec2::new(1.0, 0.0)),
            hash(cell + Vec2::new(0.0, 1.0)),
            hash(cell + Vec2::new(1.0, 1.0)),
        ];
        let lo = corners.iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = corners.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        for i in 0..10 {
            for j in 0..10 {
                let p = cell + Vec2::new(i as f32 / 10.0, j as f32 / 10.0);
                let n = value_noise(p);
                assert!(n >= lo - 1e-5 && n <= hi + 1e-5);
            }
        }
    }

    #[test]
    fn fbm_is_below_amplitude_sum() {
        // 0.5 + 0.25 + ... over five octaves
        let bound = 1.0 - 0.5f32.powi(OCTAVES as i32);
        for p in grid() {
            let v = fbm(p);
            assert!((0.0..bound).contains(&v), "fbm({p:?}) = {v}");
        }
    }

    #[test]
    fn layers_start_unshifted() {
        let st = Vec2::new(0.42, 0.77);
        let (swell, ripple) = layer_coords(st, 0.0);
        assert_eq!(swell, st * SWELL_SCALE);
        assert_eq!(ripple, st * RIPPLE_SCALE);
    }

    #[test]
    fn layers_drift_at_different_rates() {
        let st = Vec2::new(0.5, 0.5);
        let (swell0, ripple0) = layer_coords(st, 0.0);
        let (swell1, ripple1) = layer_coords(st, 10.0);
        assert_ne!(swell1 - swell0, ripple1 - ripple0);
    }

    #[test]
    fn color_is_deterministic() {
        let res = Vec2::new(1280.0, 720.0);
        let palette = Palette::default();
        for (frag, t) in [
            (Vec2::new(0.5, 0.5), 0.0),
            (Vec2::new(640.5, 360.5), 2.5),
            (Vec2::new(1279.5, 719.5), 86_400.0),
        ] {
            assert_eq!(
                ocean_color(frag, res, t, &palette),
                ocean_color(frag, res, t, &palette)
            );
        }
    }

    #[test]
    fn vignette_darkens_corners() {
        let palette = Palette {
            deep: [1.0; 3],
            mid: [1.0; 3],
            light: [1.0; 3],
            highlight: [1.0; 3],
        };
        let res = Vec2::new(100.0, 100.0);
        let center = ocean_color(Vec2::new(50.0, 50.0), res, 1.0, &palette);
        let corner = ocean_color(Vec2::new(0.0, 0.0), res, 1.0, &palette);
        assert!((center[0] - 1.0).abs() < 1e-6);
        assert!((corner[0] - (1.0 - 0.5f32.hypot(0.5) * VIGNETTE_STRENGTH)).abs() < 1e-5);
    }
}
