//! Color space helpers.
//!
//! Colors are authored in sRGB (CSS names, HSL picks) and shaded in linear
//! space, so everything that reaches the GPU goes through
//! [`srgb_to_linear`] first.

/// Convert one sRGB-encoded channel to linear.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB triple to linear.
#[must_use]
pub fn srgb_to_linear_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_to_linear)
}

/// Linear color from a `0xRRGGBB` sRGB hex value.
#[must_use]
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| f32::from(((hex >> shift) & 0xff) as u8) / 255.0;
    srgb_to_linear_rgb([channel(16), channel(8), channel(0)])
}

/// HSL to sRGB. Hue wraps into `[0, 1)`; saturation and lightness are
/// clamped to `[0, 1]`.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l; 3];
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;

    [
        hue_to_rgb(q, p, h + 1.0 / 3.0),
        hue_to_rgb(q, p, h),
        hue_to_rgb(q, p, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Linear-space `wgpu::Color` for an sRGB triple, fully opaque.
#[must_use]
pub fn clear_color(srgb: [f32; 3]) -> wgpu::Color {
    let [r, g, b] = srgb_to_linear_rgb(srgb);
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb_close(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn primary_hues() {
        assert_rgb_close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_rgb_close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_rgb_close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn hue_wraps() {
        assert_rgb_close(hsl_to_rgb(1.25, 1.0, 0.6), hsl_to_rgb(0.25, 1.0, 0.6));
        assert_rgb_close(hsl_to_rgb(-0.75, 1.0, 0.6), hsl_to_rgb(0.25, 1.0, 0.6));
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert_rgb_close(hsl_to_rgb(0.4, 0.0, 0.6), [0.6; 3]);
    }

    #[test]
    fn instance_lightness_stays_bright() {
        // Saturation 1, lightness 0.6: max channel 1.0, min channel 0.2.
        let rgb = hsl_to_rgb(0.1, 1.0, 0.6);
        let max = rgb.iter().copied().fold(f32::MIN, f32::max);
        let min = rgb.iter().copied().fold(f32::MAX, f32::min);
        assert!((max - 1.0).abs() < 1e-5);
        assert!((min - 0.2).abs() < 1e-5);
    }

    #[test]
    fn srgb_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.214_041).abs() < 1e-4);
    }

    #[test]
    fn hex_channels() {
        assert_rgb_close(hex_to_linear(0xff0000), [1.0, 0.0, 0.0]);
        assert_rgb_close(hex_to_linear(0xffffff), [1.0; 3]);
        let [r, g, b] = hex_to_linear(0x333333);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!((r - srgb_to_linear(0.2)).abs() < 1e-6);
    }
}
