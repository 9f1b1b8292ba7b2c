//! Combining rules for per-pair Lennard-Jones-like steric parameters.

/// Lorentz-Berthelot epsilon combining rule: geometric mean.
pub fn lorentz_berthelot_epsilon(epsilon_i: f32, epsilon_j: f32) -> f32 {
    (epsilon_i * epsilon_j).sqrt()
}

/// Good-Hope radius/sigma combining rule: geometric mean.
pub fn good_hope_sigma(sigma_i: f32, sigma_j: f32) -> f32 {
    (sigma_i * sigma_j).sqrt()
}

/// Zacharias epsilon combining rule: plain product.
pub fn zacharias_epsilon(epsilon_i: f32, epsilon_j: f32) -> f32 {
    epsilon_i * epsilon_j
}

/// Zacharias sigma combining rule: plain product.
pub fn zacharias_sigma(sigma_i: f32, sigma_j: f32) -> f32 {
    sigma_i * sigma_j
}

/// Amber epsilon combining rule: arithmetic mean.
pub fn amber_epsilon(epsilon_i: f32, epsilon_j: f32) -> f32 {
    0.5 * (epsilon_i + epsilon_j)
}

/// Amber sigma combining rule: arithmetic mean.
pub fn amber_sigma(sigma_i: f32, sigma_j: f32) -> f32 {
    0.5 * (sigma_i + sigma_j)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lorentz_berthelot_is_geometric_mean() {
        assert!((lorentz_berthelot_epsilon(4.0, 9.0) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn zacharias_is_product() {
        assert_eq!(zacharias_epsilon(2.0, 3.0), 6.0);
        assert_eq!(zacharias_sigma(2.0, 3.0), 6.0);
    }

    #[test]
    fn amber_is_arithmetic_mean() {
        assert_eq!(amber_epsilon(2.0, 4.0), 3.0);
    }
}
