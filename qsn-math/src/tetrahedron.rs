//! Randomly placed golden-ratio tetrahedra.
//!
//! The reference cell has vertices (0,0,0), (1,0,0), (φ,φ,0), (φ,0,φ). A
//! sample scales it, applies a rigid rotation from three uniform Euler angles
//! in [0, 2π), then translates it by a uniform offset in [-5, 5)³.

use std::f64::consts::TAU;

use anyhow::{ensure, Result};
use nalgebra::{Rotation3, Vector3};
use rand::Rng;

use crate::PHI;

/// Half-width of the cube offsets are drawn from.
pub const OFFSET_EXTENT: f64 = 5.0;

/// The unscaled, unrotated reference tetrahedron.
pub fn reference_tetrahedron() -> [[f64; 3]; 4] {
    [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [PHI, PHI, 0.0],
        [PHI, 0.0, PHI],
    ]
}

/// Draw one tetrahedron. `size` must be finite and positive.
pub fn random_tetrahedron<R: Rng + ?Sized>(size: f64, rng: &mut R) -> Result<[[f64; 3]; 4]> {
    ensure!(
        size.is_finite() && size > 0.0,
        "tetrahedron size must be finite and positive, got {size}"
    );

    let roll = rng.gen_range(0.0..TAU);
    let pitch = rng.gen_range(0.0..TAU);
    let yaw = rng.gen_range(0.0..TAU);
    let rotation = Rotation3::from_euler_angles(roll, pitch, yaw);

    let offset = Vector3::new(
        rng.gen_range(-OFFSET_EXTENT..OFFSET_EXTENT),
        rng.gen_range(-OFFSET_EXTENT..OFFSET_EXTENT),
        rng.gen_range(-OFFSET_EXTENT..OFFSET_EXTENT),
    );

    let mut out = [[0.0; 3]; 4];
    for (dst, v) in out.iter_mut().zip(reference_tetrahedron()) {
        let p = rotation * (Vector3::from(v) * size) + offset;
        *dst = [p.x, p.y, p.z];
    }
    Ok(out)
}
