//! One timed pass through the model-to-solution pipeline.

use crate::synthetic::{self, Shape};
use lplink_core::Orientation;
use lplink_highs::{SolveError, Solution, load_prepared};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::time::Instant;
use tracing::warn;

/// Pipeline stages in execution order.
pub const STAGES: [&str; 5] = ["build", "prepare", "load", "solve", "total"];

/// Wall-clock milliseconds spent in each stage of one trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    pub build: f64,
    pub prepare: f64,
    pub load: f64,
    pub solve: f64,
    pub total: f64,
}

impl StageTimes {
    pub fn get(&self, stage: &str) -> Option<f64> {
        match stage {
            "build" => Some(self.build),
            "prepare" => Some(self.prepare),
            "load" => Some(self.load),
            "solve" => Some(self.solve),
            "total" => Some(self.total),
            _ => None,
        }
    }
}

/// A single repetition: what was solved, how long each stage took, and
/// what the engine reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub case: String,
    pub repetition: u32,
    pub seed: u64,
    pub orientation: String,
    pub num_rows: usize,
    pub num_cols: usize,
    pub nnz: usize,
    pub stages_ms: StageTimes,
    pub model_status: String,
    pub objective_value: f64,
    pub simplex_iterations: u64,
    /// Set when the engine returned its result under a warning.
    pub warning: Option<String>,
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

impl Trial {
    /// Generate, prepare, load, and solve one synthetic model.
    ///
    /// Each stage is timed on its own; `load` covers only handing the
    /// prepared arrays to a fresh engine handle.
    pub fn measure(
        shape: Shape,
        seed: u64,
        orientation: Orientation,
        repetition: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut stages_ms = StageTimes::default();
        let total_started = Instant::now();

        let started = Instant::now();
        let model = synthetic::generate(shape, seed);
        stages_ms.build = elapsed_ms(started);

        let started = Instant::now();
        let prepared = model.prepare(orientation)?;
        stages_ms.prepare = elapsed_ms(started);

        let started = Instant::now();
        let mut raw = load_prepared(&prepared)?;
        stages_ms.load = elapsed_ms(started);

        let started = Instant::now();
        let (solution, warning) = match raw.solve() {
            Ok(solution) => (solution, None),
            Err(SolveError::Warning { solution, cause }) => {
                warn!(
                    component = "bench",
                    operation = "solve",
                    status = "warn",
                    case = %shape.case_name(),
                    code = cause.code(),
                    "Solve finished under an engine warning"
                );
                (*solution, Some(cause.to_string()))
            }
            Err(err) => return Err(err.into()),
        };
        stages_ms.solve = elapsed_ms(started);
        raw.close();
        stages_ms.total = elapsed_ms(total_started);

        Ok(Self::from_parts(
            shape,
            seed,
            repetition,
            &prepared,
            &solution,
            stages_ms,
            warning,
        ))
    }

    fn from_parts(
        shape: Shape,
        seed: u64,
        repetition: u32,
        prepared: &lplink_core::PreparedLp,
        solution: &Solution,
        stages_ms: StageTimes,
        warning: Option<String>,
    ) -> Self {
        Self {
            case: shape.case_name(),
            repetition,
            seed,
            orientation: prepared.matrix().orientation().as_str().to_string(),
            num_rows: prepared.num_rows(),
            num_cols: prepared.num_cols(),
            nnz: prepared.matrix().num_nonzeros(),
            stages_ms,
            model_status: solution.status_string().to_string(),
            objective_value: solution.objective_value(),
            simplex_iterations: solution.simplex_iterations(),
            warning,
        }
    }
}

/// Append trials to `writer`, one JSON object per line.
pub fn write_trials<W: Write>(mut writer: W, trials: &[Trial]) -> std::io::Result<()> {
    for trial in trials {
        serde_json::to_writer(&mut writer, trial)?;
        writeln!(writer)?;
    }
    writer.flush()
}

/// Read every trial from a JSON-lines stream.
pub fn read_trials<R: Read>(reader: R) -> Result<Vec<Trial>, serde_json::Error> {
    serde_json::Deserializer::from_reader(reader)
        .into_iter::<Trial>()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> Shape {
        Shape {
            rows: 12,
            cols: 18,
            density: 0.3,
        }
    }

    #[test]
    fn test_stage_lookup_covers_every_stage() {
        let times = StageTimes {
            build: 1.0,
            prepare: 2.0,
            load: 3.0,
            solve: 4.0,
            total: 10.0,
        };
        let looked_up: Vec<f64> = STAGES.iter().filter_map(|s| times.get(s)).collect();
        assert_eq!(looked_up, vec![1.0, 2.0, 3.0, 4.0, 10.0]);
        assert_eq!(times.get("warmup"), None);
    }

    #[test]
    fn test_measure_records_model_and_outcome() {
        let trial = Trial::measure(shape(), 5, Orientation::RowWise, 1).expect("trial runs");
        assert_eq!(trial.case, "r12_c18_d0.3");
        assert_eq!(trial.orientation, "row_wise");
        assert_eq!(trial.num_rows, 12);
        assert_eq!(trial.num_cols, 18);
        assert_eq!(
            trial.nnz,
            synthetic::generate(shape(), 5).num_nonzeros()
        );
        assert_eq!(trial.model_status, "optimal");
        assert!(trial.warning.is_none());
        let stages = trial.stages_ms;
        let parts = stages.build + stages.prepare + stages.load + stages.solve;
        assert!(stages.total + 1e-9 >= parts);
    }

    #[test]
    fn test_trials_survive_json_lines() {
        let trial = Trial::measure(shape(), 2, Orientation::ColumnWise, 3).expect("trial runs");
        let mut buffer = Vec::new();
        write_trials(&mut buffer, &[trial.clone(), trial.clone()]).unwrap();
        assert_eq!(buffer.iter().filter(|&&b| b == b'\n').count(), 2);

        let read = read_trials(buffer.as_slice()).unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[1].case, trial.case);
        assert_eq!(read[1].repetition, 3);
        assert_eq!(read[1].nnz, trial.nnz);
        assert_eq!(read[1].model_status, trial.model_status);
        assert!((read[1].stages_ms.total - trial.stages_ms.total).abs() < 1e-9);
    }
}
