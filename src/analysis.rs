/// Utility functions for analyzing lattice gas results

/// Exact density of the single-site lattice gas (L = 1) at activity z:
/// rho = z / (1 + z)
pub fn single_site_density(activity: f64) -> f64 {
    activity / (1.0 + activity)
}

/// Inverse of [`single_site_density`]: beta * mu = ln(rho / (1 - rho)).
///
/// Only defined for 0 < rho < 1.
pub fn single_site_beta_mu(density: f64) -> Option<f64> {
    if density > 0.0 && density < 1.0 {
        Some((density / (1.0 - density)).ln())
    } else {
        None
    }
}

/// Activity for a given reduced chemical potential, z = exp(beta * mu)
pub fn activity_from_beta_mu(beta_mu: f64) -> f64 {
    beta_mu.exp()
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation; zero for fewer than two samples
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let variance =
        samples.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_site_density() {
        assert_relative_eq!(single_site_density(1.0), 0.5);
        assert_relative_eq!(single_site_density(3.0), 0.75);
        assert_eq!(single_site_density(0.0), 0.0);
    }

    #[test]
    fn test_beta_mu_inverts_density() {
        for z in [0.1, 1.0, 4.0] {
            let rho = single_site_density(z);
            let beta_mu = single_site_beta_mu(rho).unwrap();
            assert_relative_eq!(activity_from_beta_mu(beta_mu), z, epsilon = 1e-10);
        }
        assert_eq!(single_site_beta_mu(0.0), None);
        assert_eq!(single_site_beta_mu(1.0), None);
    }

    #[test]
    fn test_sample_statistics() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&samples), 2.5);
        assert_relative_eq!(std_dev(&samples), (5.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_eq!(std_dev(&[1.0]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
