//! Monte Carlo estimate of a qubit sent over two classical bits plus shared
//! randomness.
//!
//! Per sample, two standard-normal vectors λ₁, λ₂ are shared. The sender
//! transmits cᵢ = [state·λᵢ ≥ 0]; the receiver negates λᵢ when cᵢ = 0 and
//! reports 1 when λ₁·basis ≥ λ₂·basis.

use anyhow::{ensure, Result};
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

fn gaussian_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    Vector3::from_fn(|_, _| StandardNormal.sample(rng))
}

/// Fraction of samples with outcome 1, in [0, 1].
pub fn estimate_transmission<R: Rng + ?Sized>(
    state: [f64; 3],
    basis: [f64; 3],
    samples: usize,
    rng: &mut R,
) -> Result<f64> {
    ensure!(samples > 0, "transmission estimate needs at least one sample");
    ensure!(
        state.iter().chain(basis.iter()).all(|v| v.is_finite()),
        "state {state:?} and basis {basis:?} must be finite"
    );

    let state = Vector3::from(state);
    let basis = Vector3::from(basis);

    let mut ones = 0usize;
    for _ in 0..samples {
        let mut lambda1 = gaussian_vector(rng);
        let mut lambda2 = gaussian_vector(rng);

        if state.dot(&lambda1) < 0.0 {
            lambda1 = -lambda1;
        }
        if state.dot(&lambda2) < 0.0 {
            lambda2 = -lambda2;
        }

        if lambda1.dot(&basis) >= lambda2.dot(&basis) {
            ones += 1;
        }
    }

    let estimate = ones as f64 / samples as f64;
    tracing::debug!(samples, estimate, "estimated qubit transmission");
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];

    #[test]
    fn test_zero_basis_always_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = estimate_transmission(Z, [0.0; 3], 200, &mut rng).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_symmetric_estimate_near_half() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = estimate_transmission(Z, X, 20_000, &mut rng).unwrap();
        assert_abs_diff_eq!(p, 0.5, epsilon = 0.03);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let run = |seed| estimate_transmission(X, Y, 500, &mut StdRng::seed_from_u64(seed));
        let a = run(9).unwrap();
        let b = run(9).unwrap();
        assert_eq!(a, b);
        assert_abs_diff_eq!(a, 0.5, epsilon = 0.5);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(estimate_transmission(X, X, 0, &mut rng).is_err());
        assert!(estimate_transmission([f64::NAN, 0.0, 0.0], X, 10, &mut rng).is_err());
        assert!(estimate_transmission(X, [0.0, f64::INFINITY, 0.0], 10, &mut rng).is_err());
    }
}
