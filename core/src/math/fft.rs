use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Wraps a planned forward FFT so a profile length is planned once.
pub struct FftHelper {
    fft: Arc<dyn Fft<f64>>,
    size: usize,
    scratch: Vec<Complex64>,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::zero(); fft.get_inplace_scratch_len()];
        Self { fft, size, scratch }
    }

    /// Forward transform of a real sequence, zero-padded or truncated to the planned size.
    pub fn forward(&mut self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .map(|&value| Complex64::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::zero());

        self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_helper_returns_same_length() {
        let mut helper = FftHelper::new(4);
        let output = helper.forward(&[1.0, 0.0, -1.0, 0.0]);
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn dc_term_is_sum_of_inputs() {
        let mut helper = FftHelper::new(8);
        let output = helper.forward(&[1.0; 8]);
        assert!((output[0].re - 8.0).abs() < 1e-12);
        assert!(output[1].norm() < 1e-12);
    }
}
