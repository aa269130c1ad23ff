/// Summary statistics over azimuth profiles.
pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Population standard deviation (divides by `n`).
    pub fn std(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(samples);
        let var = samples.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>()
            / samples.len() as f64;
        var.sqrt()
    }

    pub fn max(samples: &[f64]) -> f64 {
        samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Sum of the `k` largest values.
    pub fn top_k_sum(samples: &[f64], k: usize) -> f64 {
        if samples.is_empty() || k == 0 {
            return 0.0;
        }
        let k = k.min(samples.len());
        let mut sorted = samples.to_vec();
        let pivot = sorted.len() - k;
        sorted.select_nth_unstable_by(pivot, |a, b| a.total_cmp(b));
        sorted[pivot..].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_yields_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
        assert_eq!(StatsHelper::std(&[]), 0.0);
        assert_eq!(StatsHelper::max(&[]), 0.0);
        assert_eq!(StatsHelper::top_k_sum(&[], 3), 0.0);
    }

    #[test]
    fn std_is_population_std() {
        let std = StatsHelper::std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn top_k_sum_picks_largest_values() {
        assert_eq!(StatsHelper::top_k_sum(&[1.0, 9.0, 3.0, 7.0], 2), 16.0);
        assert_eq!(StatsHelper::top_k_sum(&[1.0, 2.0], 5), 3.0);
    }

    #[test]
    fn max_handles_negative_values() {
        assert_eq!(StatsHelper::max(&[-3.0, -1.0, -2.0]), -1.0);
    }
}
