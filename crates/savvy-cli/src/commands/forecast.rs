//! Forecast command implementations
//!
//! Feature rows are entered as semicolon-separated, comma-delimited pairs:
//! "1,2;2,3;3,4" is three rows of two features each.

use std::path::Path;

use anyhow::{bail, Context, Result};

use savvy_core::forecast::{BudgetForecaster, FEATURE_DIM};

pub fn cmd_forecast_train(model_path: &Path, features: &str, targets: &str) -> Result<()> {
    let features = parse_feature_rows(features)?;
    let targets = parse_numbers(targets).context("Invalid targets")?;

    let mut forecaster = BudgetForecaster::load(model_path)?;
    forecaster.fit(&features, &targets)?;

    println!(
        "Model trained on {} sample(s) and saved to {}",
        features.len(),
        model_path.display()
    );

    Ok(())
}

pub fn cmd_forecast_predict(model_path: &Path, features: &str) -> Result<()> {
    let features = parse_feature_rows(features)?;

    let forecaster = BudgetForecaster::load(model_path)?;
    let predictions = forecaster.predict(&features)?;

    for (row, prediction) in features.iter().zip(&predictions) {
        println!("{:?} -> {:.2}", row, prediction);
    }

    Ok(())
}

/// Parse "1,2;2,3" into feature rows
fn parse_feature_rows(input: &str) -> Result<Vec<Vec<f64>>> {
    let rows = input
        .split(';')
        .filter(|s| !s.trim().is_empty())
        .map(parse_numbers)
        .collect::<Result<Vec<_>>>()?;

    for row in &rows {
        if row.len() != FEATURE_DIM {
            bail!(
                "Each feature row needs exactly {} values, got {} in {:?}",
                FEATURE_DIM,
                row.len(),
                row
            );
        }
    }

    Ok(rows)
}

/// Parse "100,200,300" into a list of numbers
fn parse_numbers(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(|s| {
            let s = s.trim();
            s.parse::<f64>()
                .with_context(|| format!("Invalid number '{}'", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_rows() {
        let rows = parse_feature_rows("1,2;2,3;3,4").unwrap();
        assert_eq!(
            rows,
            vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]]
        );

        // Whitespace and a trailing semicolon are tolerated
        let rows = parse_feature_rows(" 4 , 5 ; ").unwrap();
        assert_eq!(rows, vec![vec![4.0, 5.0]]);
    }

    #[test]
    fn test_parse_feature_rows_wrong_width() {
        assert!(parse_feature_rows("1;2").is_err());
        assert!(parse_feature_rows("1,2,3").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(
            parse_numbers("100, 200,300").unwrap(),
            vec![100.0, 200.0, 300.0]
        );
        assert!(parse_numbers("100,abc").is_err());
    }

    #[test]
    fn test_train_then_predict_via_commands() {
        let dir = tempfile::TempDir::new().unwrap();
        let model_path = dir.path().join("model.json");

        cmd_forecast_train(&model_path, "1,2;2,3;3,4", "100,200,300").unwrap();
        assert!(model_path.exists());

        cmd_forecast_predict(&model_path, "4,5;5,6").unwrap();
    }
}
