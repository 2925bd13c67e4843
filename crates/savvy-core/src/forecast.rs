//! Budget forecast model
//!
//! Ordinary least squares linear regression over fixed two-feature rows,
//! persisted as a JSON document on disk. The model is loaded on each
//! construction and overwritten wholesale on each `fit` call; there is no
//! versioning or history. Writes go through a temp file and an atomic
//! rename, so a concurrent reader never observes a torn file and the last
//! of two racing trains wins cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Number of features per input row
pub const FEATURE_DIM: usize = 2;

/// Small Tikhonov term added to the normal-equation diagonal so that
/// collinear feature columns still yield a solvable system.
const RIDGE: f64 = 1e-9;

/// A fitted linear model: prediction = intercept + coefficients . features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Disk-backed budget forecaster
pub struct BudgetForecaster {
    model: Option<LinearModel>,
    model_path: PathBuf,
}

impl BudgetForecaster {
    /// Load the forecaster from the given model path
    ///
    /// Returns an untrained forecaster if no model file exists yet.
    pub fn load(model_path: &Path) -> Result<Self> {
        let model = if model_path.exists() {
            let contents = std::fs::read_to_string(model_path)?;
            Some(serde_json::from_str(&contents)?)
        } else {
            None
        };

        Ok(Self {
            model,
            model_path: model_path.to_path_buf(),
        })
    }

    /// Whether a trained model is available
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Fit a new model to the given data and persist it
    ///
    /// Retrains from scratch; the previous fit is discarded entirely.
    pub fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        validate_features(features)?;
        if targets.len() != features.len() {
            return Err(Error::InvalidData(format!(
                "expected {} targets for {} feature rows, got {}",
                features.len(),
                features.len(),
                targets.len()
            )));
        }
        if targets.iter().any(|t| !t.is_finite()) {
            return Err(Error::InvalidData(
                "targets must be finite numbers".to_string(),
            ));
        }

        let model = solve_least_squares(features, targets)?;
        self.save(&model)?;
        self.model = Some(model);

        info!(
            samples = features.len(),
            path = %self.model_path.display(),
            "Forecast model trained"
        );
        Ok(())
    }

    /// Predict one value per input row
    ///
    /// Fails with `Error::ModelUntrained` if no model has ever been fitted.
    pub fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        validate_features(features)?;

        let model = self.model.as_ref().ok_or(Error::ModelUntrained)?;
        Ok(features.iter().map(|row| model.predict_row(row)).collect())
    }

    /// Persist the model atomically: write to a temp file in the same
    /// directory, then rename over the target.
    fn save(&self, model: &LinearModel) -> Result<()> {
        let dir = self
            .model_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&tmp, model)?;
        tmp.persist(&self.model_path)
            .map_err(|e| Error::Io(e.error))?;

        Ok(())
    }
}

/// Check that every row is exactly FEATURE_DIM finite values
fn validate_features(features: &[Vec<f64>]) -> Result<()> {
    if features.is_empty() {
        return Err(Error::InvalidData(
            "features must contain at least one row".to_string(),
        ));
    }
    for (i, row) in features.iter().enumerate() {
        if row.len() != FEATURE_DIM {
            return Err(Error::InvalidData(format!(
                "feature row {} has {} values, expected {}",
                i,
                row.len(),
                FEATURE_DIM
            )));
        }
        if row.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidData(format!(
                "feature row {} contains a non-finite value",
                i
            )));
        }
    }
    Ok(())
}

/// Solve ordinary least squares via the normal equations
///
/// The design matrix is augmented with a leading 1s column for the
/// intercept. The RIDGE term keeps the system non-singular when feature
/// columns are collinear (common with hand-entered example data).
fn solve_least_squares(features: &[Vec<f64>], targets: &[f64]) -> Result<LinearModel> {
    const N: usize = FEATURE_DIM + 1;

    // Accumulate XᵀX and Xᵀy over augmented rows [1, x1, x2]
    let mut a = [[0.0f64; N]; N];
    let mut b = [0.0f64; N];

    for (row, &y) in features.iter().zip(targets) {
        let aug = [1.0, row[0], row[1]];
        for i in 0..N {
            for j in 0..N {
                a[i][j] += aug[i] * aug[j];
            }
            b[i] += aug[i] * y;
        }
    }

    for (i, row) in a.iter_mut().enumerate() {
        row[i] += RIDGE;
    }

    let solution = solve_linear_system(a, b)?;

    Ok(LinearModel {
        intercept: solution[0],
        coefficients: solution[1..].to_vec(),
    })
}

/// Gaussian elimination with partial pivoting on a small dense system
fn solve_linear_system(
    mut a: [[f64; FEATURE_DIM + 1]; FEATURE_DIM + 1],
    mut b: [f64; FEATURE_DIM + 1],
) -> Result<[f64; FEATURE_DIM + 1]> {
    const N: usize = FEATURE_DIM + 1;

    for col in 0..N {
        // Pivot on the largest remaining entry in this column
        let pivot = (col..N)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        if a[pivot][col].abs() < f64::EPSILON {
            return Err(Error::InvalidData(
                "features are degenerate; cannot fit a model".to_string(),
            ));
        }

        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..N {
            let factor = a[row][col] / a[col][col];
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = [0.0f64; N];
    for row in (0..N).rev() {
        let mut sum = b[row];
        for k in (row + 1)..N {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn model_path(dir: &TempDir) -> PathBuf {
        dir.path().join("budget_forecast_model.json")
    }

    #[test]
    fn test_untrained_predict_is_distinguished_error() {
        let dir = TempDir::new().unwrap();
        let forecaster = BudgetForecaster::load(&model_path(&dir)).unwrap();
        assert!(!forecaster.is_trained());

        // Deterministic across repeated calls
        for _ in 0..3 {
            let err = forecaster.predict(&[vec![1.0, 2.0]]).unwrap_err();
            assert!(matches!(err, Error::ModelUntrained));
        }
    }

    #[test]
    fn test_fit_recovers_known_coefficients() {
        let dir = TempDir::new().unwrap();
        let mut forecaster = BudgetForecaster::load(&model_path(&dir)).unwrap();

        // y = 10 + 2*x1 + 3*x2, well-conditioned rows
        let features = vec![
            vec![1.0, 1.0],
            vec![2.0, 5.0],
            vec![3.0, 2.0],
            vec![4.0, 7.0],
            vec![5.0, 3.0],
        ];
        let targets: Vec<f64> = features
            .iter()
            .map(|r| 10.0 + 2.0 * r[0] + 3.0 * r[1])
            .collect();

        forecaster.fit(&features, &targets).unwrap();

        let preds = forecaster.predict(&[vec![6.0, 4.0]]).unwrap();
        assert!((preds[0] - (10.0 + 12.0 + 12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_fit_collinear_features_extrapolates() {
        let dir = TempDir::new().unwrap();
        let mut forecaster = BudgetForecaster::load(&model_path(&dir)).unwrap();

        // Second column is first + 1, so the design matrix is rank-deficient
        let features = vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]];
        let targets = vec![100.0, 200.0, 300.0];
        forecaster.fit(&features, &targets).unwrap();

        let preds = forecaster
            .predict(&[vec![4.0, 5.0], vec![5.0, 6.0]])
            .unwrap();

        // Extrapolation continues the upward trend
        assert!(preds[0] > 300.0);
        assert!(preds[1] > preds[0]);
    }

    #[test]
    fn test_model_persists_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = model_path(&dir);

        let mut forecaster = BudgetForecaster::load(&path).unwrap();
        forecaster
            .fit(&[vec![1.0, 1.0], vec![2.0, 4.0], vec![3.0, 9.0]], &[1.0, 2.0, 3.0])
            .unwrap();

        let reloaded = BudgetForecaster::load(&path).unwrap();
        assert!(reloaded.is_trained());

        let a = forecaster.predict(&[vec![2.5, 6.0]]).unwrap();
        let b = reloaded.predict(&[vec![2.5, 6.0]]).unwrap();
        assert!((a[0] - b[0]).abs() < 1e-12);
    }

    #[test]
    fn test_refit_overwrites_previous_model() {
        let dir = TempDir::new().unwrap();
        let path = model_path(&dir);

        let mut forecaster = BudgetForecaster::load(&path).unwrap();
        forecaster
            .fit(&[vec![1.0, 0.0], vec![2.0, 1.0], vec![3.0, 5.0]], &[10.0, 20.0, 30.0])
            .unwrap();

        forecaster
            .fit(&[vec![1.0, 0.0], vec![2.0, 1.0], vec![3.0, 5.0]], &[-10.0, -20.0, -30.0])
            .unwrap();

        let reloaded = BudgetForecaster::load(&path).unwrap();
        let preds = reloaded.predict(&[vec![2.0, 1.0]]).unwrap();
        assert!((preds[0] + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_concurrent_trains_leave_one_intact_model() {
        let dir = TempDir::new().unwrap();
        let path = model_path(&dir);

        let features = vec![vec![1.0, 0.0], vec![2.0, 1.0], vec![3.0, 5.0]];

        let handles: Vec<_> = [1.0f64, -1.0]
            .into_iter()
            .map(|sign| {
                let path = path.clone();
                let features = features.clone();
                std::thread::spawn(move || {
                    let targets = vec![sign * 10.0, sign * 20.0, sign * 30.0];
                    let mut forecaster = BudgetForecaster::load(&path).unwrap();
                    forecaster.fit(&features, &targets).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Whichever writer won, the file parses and holds exactly one of
        // the two fits: predict(2, 1) is either ~20 or ~-20.
        let reloaded = BudgetForecaster::load(&path).unwrap();
        let pred = reloaded.predict(&[vec![2.0, 1.0]]).unwrap()[0];
        assert!(
            (pred - 20.0).abs() < 1e-3 || (pred + 20.0).abs() < 1e-3,
            "unexpected prediction {}",
            pred
        );
    }

    #[test]
    fn test_fit_rejects_bad_shapes() {
        let dir = TempDir::new().unwrap();
        let mut forecaster = BudgetForecaster::load(&model_path(&dir)).unwrap();

        // Empty features
        let err = forecaster.fit(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        // 1-dimensional rows are rejected: the contract is two features
        let err = forecaster.fit(&[vec![1.0]], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        // Three-wide rows too
        let err = forecaster.fit(&[vec![1.0, 2.0, 3.0]], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        // Target length mismatch
        let err = forecaster
            .fit(&[vec![1.0, 2.0], vec![2.0, 3.0]], &[1.0])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        // Nothing got persisted
        assert!(!forecaster.is_trained());
        assert!(!model_path(&dir).exists());
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let dir = TempDir::new().unwrap();
        let mut forecaster = BudgetForecaster::load(&model_path(&dir)).unwrap();
        forecaster
            .fit(&[vec![1.0, 1.0], vec![2.0, 0.0], vec![0.0, 2.0]], &[1.0, 2.0, 3.0])
            .unwrap();

        let err = forecaster.predict(&[vec![1.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
