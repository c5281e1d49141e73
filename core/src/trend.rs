use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Least-squares line `y = slope * x + intercept` over `x = 0, 1, .., n-1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares fit against the implicit step index.
///
/// A single observation yields a flat line through it.
pub fn fit(values: &[f64]) -> Result<TrendLine, ForecastError> {
    match values {
        [] => Err(ForecastError::EmptyHistory),
        [only] => Ok(TrendLine { slope: 0.0, intercept: *only }),
        _ => {
            let n = values.len() as f64;
            let x_mean = (n - 1.0) / 2.0;
            let y_mean = values.iter().sum::<f64>() / n;
            let mut sxy = 0.0;
            let mut sxx = 0.0;
            for (i, y) in values.iter().enumerate() {
                let dx = i as f64 - x_mean;
                sxy += dx * (y - y_mean);
                sxx += dx * dx;
            }
            let slope = sxy / sxx;
            Ok(TrendLine { slope, intercept: y_mean - slope * x_mean })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_sequence() {
        let line = fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((line.slope - 1.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
        assert!((line.at(5.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn noisy_fit() {
        // y = 2x + 1 with symmetric noise
        let line = fit(&[1.5, 2.5, 5.5, 6.5]).unwrap();
        assert!((line.slope - 1.8).abs() < 1e-12);
        assert!((line.intercept - 1.3).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(fit(&[]), Err(ForecastError::EmptyHistory));
        assert_eq!(fit(&[4.0]), Ok(TrendLine { slope: 0.0, intercept: 4.0 }));
        let flat = fit(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(flat.slope, 0.0);
        assert_eq!(flat.intercept, 3.0);
    }
}
