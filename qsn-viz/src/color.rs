//! Color helpers for renderer payloads.
//!
//! Colors are (r, g, b) tuples in [0.0, 1.0] or "#RRGGBB" strings.

/// Stops of the radial ramp, evenly spaced over [0, 1].
const RADIAL_STOPS: [(f32, f32, f32); 5] = [
    (0.0, 0.0, 1.0),
    (0.0, 1.0, 1.0),
    (0.0, 1.0, 0.0),
    (1.0, 1.0, 0.0),
    (1.0, 0.0, 0.0),
];

/// Color for a point at normalized radius `t` (0 = origin, 1 = farthest
/// point), linearly interpolated between `RADIAL_STOPS`. Clamped.
pub fn radial_color(t: f32) -> (f32, f32, f32) {
    let segments = (RADIAL_STOPS.len() - 1) as f32;
    let x = t.clamp(0.0, 1.0) * segments;
    let i = (x.floor() as usize).min(RADIAL_STOPS.len() - 2);
    let s = x - i as f32;
    let (a, b) = (RADIAL_STOPS[i], RADIAL_STOPS[i + 1]);
    (
        a.0 + (b.0 - a.0) * s,
        a.1 + (b.1 - a.1) * s,
        a.2 + (b.2 - a.2) * s,
    )
}

/// Convert (r, g, b) in [0,1] to a CSS hex color string "#RRGGBB".
pub fn rgb_to_hex(r: f32, g: f32, b: f32) -> String {
    let ri = (r.clamp(0.0, 1.0) * 255.0) as u8;
    let gi = (g.clamp(0.0, 1.0) * 255.0) as u8;
    let bi = (b.clamp(0.0, 1.0) * 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", ri, gi, bi)
}
