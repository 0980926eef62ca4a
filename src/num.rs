//! Utilities related to numbers.

use num;
use std::fmt;

/// Floating point marker trait for easier control over trait bounds.
pub trait BFloat: Sync + Send + num::Float + num::cast::FromPrimitive + fmt::Debug {}

impl BFloat for f32 {}
impl BFloat for f64 {}

/// Sums the given floating point values using Kahan compensated summation.
///
/// Used where many small per-particle contributions are accumulated.
pub fn compensated_sum<F, I>(values: I) -> F
where
    F: BFloat,
    I: IntoIterator<Item = F>,
{
    let mut sum = F::zero();
    let mut compensation = F::zero();
    for value in values {
        let corrected = value - compensation;
        let new_sum = sum + corrected;
        compensation = (new_sum - sum) - corrected;
        sum = new_sum;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensated_sum_of_many_small_values_is_accurate() {
        let values = std::iter::once(1.0).chain(std::iter::repeat(1e-16).take(10_000));
        let sum: f64 = compensated_sum(values);
        approx::assert_abs_diff_eq!(sum, 1.0 + 1e-12, epsilon = 1e-15);
    }
}
