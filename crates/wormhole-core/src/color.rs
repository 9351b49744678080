use glam::Vec3;

/// HSL to linear-ish RGB, all components in [0, 1]. Hue wraps.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s == 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Wrap into [0, 1); `rem_euclid` can round up to exactly 1.0 for tiny negatives.
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    let w = x.rem_euclid(1.0);
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

#[inline]
pub fn scale_rgb(rgb: [f32; 3], k: f32) -> [f32; 3] {
    [
        (rgb[0] * k).min(1.0),
        (rgb[1] * k).min(1.0),
        (rgb[2] * k).min(1.0),
    ]
}
