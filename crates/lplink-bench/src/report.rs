//! Per-case, per-stage summaries of recorded trials.

use crate::trial::{STAGES, Trial};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub case: String,
    pub stage: &'static str,
    pub samples: usize,
    pub mean_ms: f64,
    pub max_ms: f64,
}

/// Mean and max duration of every stage, grouped by case.
///
/// Cases come out in name order and stages in pipeline order.
pub fn summarize(trials: &[Trial]) -> Vec<StageSummary> {
    let mut by_case: BTreeMap<&str, Vec<&Trial>> = BTreeMap::new();
    for trial in trials {
        by_case.entry(trial.case.as_str()).or_default().push(trial);
    }

    by_case
        .into_iter()
        .flat_map(|(case, group)| {
            STAGES.iter().map(move |&stage| {
                let samples: Vec<f64> = group
                    .iter()
                    .filter_map(|trial| trial.stages_ms.get(stage))
                    .collect();
                let max_ms = samples.iter().copied().fold(0.0, f64::max);
                let mean_ms = samples.iter().sum::<f64>() / samples.len().max(1) as f64;
                StageSummary {
                    case: case.to_string(),
                    stage,
                    samples: samples.len(),
                    mean_ms,
                    max_ms,
                }
            })
        })
        .collect()
}

/// Number of trials per case that finished with each model status.
pub fn status_counts(trials: &[Trial]) -> BTreeMap<(String, String), usize> {
    let mut counts = BTreeMap::new();
    for trial in trials {
        *counts
            .entry((trial.case.clone(), trial.model_status.clone()))
            .or_insert(0) += 1;
    }
    counts
}

pub fn print_table(summaries: &[StageSummary]) {
    println!(
        "{:<24} {:<8} {:>7} {:>12} {:>12}",
        "case", "stage", "samples", "mean_ms", "max_ms"
    );
    for row in summaries {
        println!(
            "{:<24} {:<8} {:>7} {:>12.3} {:>12.3}",
            row.case, row.stage, row.samples, row.mean_ms, row.max_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::StageTimes;

    fn trial(case: &str, solve_ms: f64, status: &str) -> Trial {
        Trial {
            case: case.to_string(),
            repetition: 1,
            seed: 0,
            orientation: "column_wise".to_string(),
            num_rows: 4,
            num_cols: 4,
            nnz: 6,
            stages_ms: StageTimes {
                build: 1.0,
                prepare: 2.0,
                load: 0.5,
                solve: solve_ms,
                total: 3.5 + solve_ms,
            },
            model_status: status.to_string(),
            objective_value: 0.0,
            simplex_iterations: 3,
            warning: None,
        }
    }

    fn approx_eq(left: f64, right: f64) {
        assert!((left - right).abs() < 1e-9, "left={left}, right={right}");
    }

    #[test]
    fn test_summarize_orders_cases_and_stages() {
        let trials = vec![
            trial("r8_c8_d0.5", 4.0, "optimal"),
            trial("r2_c2_d1", 1.0, "optimal"),
            trial("r8_c8_d0.5", 8.0, "optimal"),
        ];
        let rows = summarize(&trials);
        assert_eq!(rows.len(), 2 * STAGES.len());
        assert_eq!(rows[0].case, "r2_c2_d1");
        let stages: Vec<&str> = rows[5..].iter().map(|r| r.stage).collect();
        assert_eq!(stages, STAGES);

        let solve = &rows[5 + 3];
        assert_eq!(solve.stage, "solve");
        assert_eq!(solve.samples, 2);
        approx_eq(solve.mean_ms, 6.0);
        approx_eq(solve.max_ms, 8.0);
        approx_eq(rows[5 + 4].mean_ms, 9.5);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_status_counts() {
        let trials = vec![
            trial("a", 1.0, "optimal"),
            trial("a", 1.0, "iteration_limit"),
            trial("a", 1.0, "optimal"),
        ];
        let counts = status_counts(&trials);
        assert_eq!(counts[&("a".to_string(), "optimal".to_string())], 2);
        assert_eq!(counts.len(), 2);
    }
}
