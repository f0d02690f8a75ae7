//! FFI bindings to HiGHS solver library.
//!
//! This module contains unsafe code for interacting with the C library.
//! [`RawModel`] owns exactly one engine handle and releases it exactly once.
#![allow(unsafe_code)]

use crate::adapter::EngineLp;
use crate::error::{EngineError, SolveError};
use crate::solution::{RawOutput, Solution, translate};
use crate::status::{check_call, check_call_strict};
use highs_sys::HighsInt;
use std::cell::Cell;
use std::ffi::{CStr, CString, c_char, c_void};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::time::Instant;
use tracing::{debug, trace, warn};

// HiGHS writes string option values into a buffer of this many bytes.
const STRING_OPTION_CAPACITY: usize = highs_sys::kHighsMaximumStringLength as usize;

const BASIS_VALIDITY_VALID: HighsInt = 1;

/// Low-level handle to one HiGHS instance.
///
/// The handle can be moved to another thread but never shared or cloned;
/// the engine state behind it is not reentrant.
pub struct RawModel {
    handle: NonNull<c_void>,
    warnings: Vec<EngineError>,
    _not_sync: PhantomData<Cell<()>>,
}

// SAFETY: a HiGHS instance has no thread affinity; exclusive access is
// guaranteed by `&mut self` on every mutating call and by `RawModel: !Sync`.
unsafe impl Send for RawModel {}

impl RawModel {
    /// Allocate a fresh, empty engine instance.
    ///
    /// Returns `None` if the engine could not allocate one.
    pub fn new() -> Option<Self> {
        let ptr = unsafe { highs_sys::Highs_create() };
        let handle = NonNull::new(ptr)?;
        trace!(
            component = "engine",
            operation = "create",
            status = "success",
            "Created HiGHS instance"
        );
        Some(Self {
            handle,
            warnings: Vec::new(),
            _not_sync: PhantomData,
        })
    }

    fn ptr(&self) -> *mut c_void {
        self.handle.as_ptr()
    }

    /// Release the engine instance now instead of at drop.
    pub fn close(self) {
        debug!(
            component = "engine",
            operation = "close",
            status = "success",
            "Closing HiGHS instance"
        );
    }

    /// Warnings the engine reported while this handle was being loaded.
    pub fn warnings(&self) -> &[EngineError] {
        &self.warnings
    }

    pub(crate) fn record_warning(&mut self, warning: EngineError) {
        warn!(
            component = "engine",
            operation = warning.call(),
            status = "warn",
            code = warning.code(),
            "Engine call completed with a warning"
        );
        self.warnings.push(warning);
    }

    /// Number of columns in the loaded model.
    pub fn num_cols(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumCol(self.ptr()) };
        usize::try_from(n).unwrap_or(0)
    }

    /// Number of rows in the loaded model.
    pub fn num_rows(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumRow(self.ptr()) };
        usize::try_from(n).unwrap_or(0)
    }

    pub fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), EngineError> {
        const CALL: &str = "Highs_setBoolOptionValue";
        let c_name = c_string(name, CALL)?;
        let code = unsafe {
            highs_sys::Highs_setBoolOptionValue(self.ptr(), c_name.as_ptr(), HighsInt::from(value))
        };
        log_option(name, code);
        check_call_strict(code, CALL)
    }

    pub fn set_int_option(&mut self, name: &str, value: HighsInt) -> Result<(), EngineError> {
        const CALL: &str = "Highs_setIntOptionValue";
        let c_name = c_string(name, CALL)?;
        let code =
            unsafe { highs_sys::Highs_setIntOptionValue(self.ptr(), c_name.as_ptr(), value) };
        log_option(name, code);
        check_call_strict(code, CALL)
    }

    pub fn set_float_option(&mut self, name: &str, value: f64) -> Result<(), EngineError> {
        const CALL: &str = "Highs_setDoubleOptionValue";
        let c_name = c_string(name, CALL)?;
        let code =
            unsafe { highs_sys::Highs_setDoubleOptionValue(self.ptr(), c_name.as_ptr(), value) };
        log_option(name, code);
        check_call_strict(code, CALL)
    }

    pub fn set_string_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        const CALL: &str = "Highs_setStringOptionValue";
        let c_name = c_string(name, CALL)?;
        let c_value = c_string(value, CALL)?;
        let code = unsafe {
            highs_sys::Highs_setStringOptionValue(self.ptr(), c_name.as_ptr(), c_value.as_ptr())
        };
        log_option(name, code);
        check_call_strict(code, CALL)
    }

    pub fn get_bool_option(&self, name: &str) -> Result<bool, EngineError> {
        const CALL: &str = "Highs_getBoolOptionValue";
        let c_name = c_string(name, CALL)?;
        let mut value: HighsInt = 0;
        let code = unsafe {
            highs_sys::Highs_getBoolOptionValue(self.ptr(), c_name.as_ptr(), &raw mut value)
        };
        check_call_strict(code, CALL)?;
        Ok(value != 0)
    }

    pub fn get_int_option(&self, name: &str) -> Result<HighsInt, EngineError> {
        const CALL: &str = "Highs_getIntOptionValue";
        let c_name = c_string(name, CALL)?;
        let mut value: HighsInt = 0;
        let code = unsafe {
            highs_sys::Highs_getIntOptionValue(self.ptr(), c_name.as_ptr(), &raw mut value)
        };
        check_call_strict(code, CALL)?;
        Ok(value)
    }

    pub fn get_float_option(&self, name: &str) -> Result<f64, EngineError> {
        const CALL: &str = "Highs_getDoubleOptionValue";
        let c_name = c_string(name, CALL)?;
        let mut value = 0.0;
        let code = unsafe {
            highs_sys::Highs_getDoubleOptionValue(self.ptr(), c_name.as_ptr(), &raw mut value)
        };
        check_call_strict(code, CALL)?;
        Ok(value)
    }

    pub fn get_string_option(&self, name: &str) -> Result<String, EngineError> {
        const CALL: &str = "Highs_getStringOptionValue";
        let c_name = c_string(name, CALL)?;
        let mut buffer: Vec<c_char> = vec![0; STRING_OPTION_CAPACITY];
        let code = unsafe {
            highs_sys::Highs_getStringOptionValue(self.ptr(), c_name.as_ptr(), buffer.as_mut_ptr())
        };
        check_call_strict(code, CALL)?;
        // HiGHS may fill the buffer completely; keep the final slot as terminator.
        if let Some(last) = buffer.last_mut() {
            *last = 0;
        }
        let value = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        Ok(value.to_string_lossy().into_owned())
    }

    pub fn int_info(&self, name: &str) -> Result<HighsInt, EngineError> {
        const CALL: &str = "Highs_getIntInfoValue";
        let c_name = c_string(name, CALL)?;
        let mut value: HighsInt = 0;
        let code = unsafe {
            highs_sys::Highs_getIntInfoValue(self.ptr(), c_name.as_ptr(), &raw mut value)
        };
        check_call_strict(code, CALL)?;
        Ok(value)
    }

    pub fn int64_info(&self, name: &str) -> Result<i64, EngineError> {
        const CALL: &str = "Highs_getInt64InfoValue";
        let c_name = c_string(name, CALL)?;
        let mut value: i64 = 0;
        let code = unsafe {
            highs_sys::Highs_getInt64InfoValue(self.ptr(), c_name.as_ptr(), &raw mut value)
        };
        check_call_strict(code, CALL)?;
        Ok(value)
    }

    pub fn float_info(&self, name: &str) -> Result<f64, EngineError> {
        const CALL: &str = "Highs_getDoubleInfoValue";
        let c_name = c_string(name, CALL)?;
        let mut value = 0.0;
        let code = unsafe {
            highs_sys::Highs_getDoubleInfoValue(self.ptr(), c_name.as_ptr(), &raw mut value)
        };
        check_call_strict(code, CALL)?;
        Ok(value)
    }

    /// Load a fully converted LP into the engine.
    ///
    /// `Ok(Some(_))` means the model was accepted with a warning.
    pub(crate) fn pass_lp(&mut self, lp: &EngineLp) -> Result<Option<EngineError>, EngineError> {
        if let Some(integrality) = &lp.integrality {
            let code = unsafe {
                highs_sys::Highs_passMip(
                    self.ptr(),
                    lp.num_col,
                    lp.num_row,
                    lp.num_nz,
                    lp.a_format,
                    lp.sense,
                    lp.offset,
                    lp.col_cost.as_ptr(),
                    lp.col_lower.as_ptr(),
                    lp.col_upper.as_ptr(),
                    lp.row_lower.as_ptr(),
                    lp.row_upper.as_ptr(),
                    lp.a_start.as_ptr(),
                    lp.a_index.as_ptr(),
                    lp.a_value.as_ptr(),
                    integrality.as_ptr(),
                )
            };
            return check_call(code, "Highs_passMip");
        }
        let code = unsafe {
            highs_sys::Highs_passLp(
                self.ptr(),
                lp.num_col,
                lp.num_row,
                lp.num_nz,
                lp.a_format,
                lp.sense,
                lp.offset,
                lp.col_cost.as_ptr(),
                lp.col_lower.as_ptr(),
                lp.col_upper.as_ptr(),
                lp.row_lower.as_ptr(),
                lp.row_upper.as_ptr(),
                lp.a_start.as_ptr(),
                lp.a_index.as_ptr(),
                lp.a_value.as_ptr(),
            )
        };
        check_call(code, "Highs_passLp")
    }

    /// Run the engine on the loaded model and extract the result.
    ///
    /// Blocks until the engine returns. On a warning from any call involved,
    /// the extracted solution is returned inside [`SolveError::Warning`].
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        let started = Instant::now();
        debug!(
            component = "engine",
            operation = "solve",
            status = "start",
            num_cols = self.num_cols(),
            num_rows = self.num_rows(),
            "Running HiGHS"
        );

        let code = unsafe { highs_sys::Highs_run(self.ptr()) };
        let mut warning = check_call(code, "Highs_run").map_err(|err| {
            warn!(
                component = "engine",
                operation = "solve",
                status = "error",
                code = err.code(),
                "HiGHS run failed"
            );
            SolveError::Failed(err)
        })?;

        let mut raw = self.extract(&mut warning).map_err(SolveError::Failed)?;
        raw.solve_time_seconds = started.elapsed().as_secs_f64();
        let solution = translate(raw);

        let outcome = if warning.is_some() { "warn" } else { "success" };
        debug!(
            component = "engine",
            operation = "solve",
            status = outcome,
            model_status = solution.status().as_str(),
            objective_value = solution.objective_value(),
            simplex_iterations = solution.simplex_iterations(),
            duration_ms = solution.solve_time_seconds() * 1000.0,
            "HiGHS solve completed"
        );

        match warning {
            None => Ok(solution),
            Some(cause) => {
                warn!(
                    component = "engine",
                    operation = "solve",
                    status = "warn",
                    call = cause.call(),
                    model_status = solution.status().as_str(),
                    "Solution extracted under an engine warning"
                );
                Err(SolveError::Warning {
                    solution: Box::new(solution),
                    cause,
                })
            }
        }
    }

    // Pull status, vectors, basis, and objective out of the engine after a run.
    // The first warning seen is kept in `warning`.
    fn extract(&self, warning: &mut Option<EngineError>) -> Result<RawOutput, EngineError> {
        let model_status = unsafe { highs_sys::Highs_getModelStatus(self.ptr()) };
        let num_cols = self.num_cols();
        let num_rows = self.num_rows();

        let mut col_values = vec![0.0; num_cols];
        let mut col_duals = vec![0.0; num_cols];
        let mut row_values = vec![0.0; num_rows];
        let mut row_duals = vec![0.0; num_rows];
        let code = unsafe {
            highs_sys::Highs_getSolution(
                self.ptr(),
                col_values.as_mut_ptr(),
                col_duals.as_mut_ptr(),
                row_values.as_mut_ptr(),
                row_duals.as_mut_ptr(),
            )
        };
        keep_first(warning, check_call(code, "Highs_getSolution")?);

        let (col_basis, row_basis) = if self.basis_is_valid() {
            let mut col_basis = vec![highs_sys::kHighsBasisStatusZero; num_cols];
            let mut row_basis = vec![highs_sys::kHighsBasisStatusZero; num_rows];
            let code = unsafe {
                highs_sys::Highs_getBasis(
                    self.ptr(),
                    col_basis.as_mut_ptr(),
                    row_basis.as_mut_ptr(),
                )
            };
            keep_first(warning, check_call(code, "Highs_getBasis")?);
            (col_basis, row_basis)
        } else {
            trace!(
                component = "engine",
                operation = "get_basis",
                status = "skipped",
                "No valid basis after solve"
            );
            (Vec::new(), Vec::new())
        };

        let objective_value = unsafe { highs_sys::Highs_getObjectiveValue(self.ptr()) };
        let simplex_iterations = match self.int_info("simplex_iteration_count") {
            Ok(count) => u64::try_from(count).unwrap_or(0),
            Err(err) => {
                debug!(
                    component = "engine",
                    operation = "solve_info",
                    info = "simplex_iteration_count",
                    code = err.code(),
                    "Simplex iteration count not available"
                );
                0
            }
        };

        Ok(RawOutput {
            model_status,
            col_values,
            col_duals,
            row_values,
            row_duals,
            col_basis,
            row_basis,
            objective_value,
            simplex_iterations,
            solve_time_seconds: 0.0,
        })
    }

    fn basis_is_valid(&self) -> bool {
        matches!(self.int_info("basis_validity"), Ok(BASIS_VALIDITY_VALID))
    }
}

impl Drop for RawModel {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.ptr()) };
        trace!(
            component = "engine",
            operation = "destroy",
            status = "success",
            "Released HiGHS instance"
        );
    }
}

impl fmt::Debug for RawModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawModel")
            .field("num_cols", &self.num_cols())
            .field("num_rows", &self.num_rows())
            .field("warnings", &self.warnings.len())
            .finish_non_exhaustive()
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

fn c_string(value: &str, call: &'static str) -> Result<CString, EngineError> {
    CString::new(value)
        .map_err(|_| EngineError::rejected(call, format!("'{value}' contains a NUL byte")))
}

fn keep_first(slot: &mut Option<EngineError>, warning: Option<EngineError>) {
    if slot.is_none() {
        *slot = warning;
    }
}

fn log_option(name: &str, code: HighsInt) {
    trace!(
        component = "engine",
        operation = "set_option",
        option = name,
        status_code = code,
        "Set HiGHS option"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::CallStatus;

    #[test]
    fn test_c_string_rejects_interior_nul() {
        let err = c_string("bad\0name", "Highs_setIntOptionValue").unwrap_err();
        assert_eq!(err.call(), "Highs_setIntOptionValue");
        assert_eq!(err.status(), CallStatus::Error);
        assert!(c_string("time_limit", "Highs_setDoubleOptionValue").is_ok());
    }

    #[test]
    fn test_keep_first_warning() {
        let mut slot = None;
        keep_first(&mut slot, None);
        assert!(slot.is_none());
        keep_first(&mut slot, Some(EngineError::new("Highs_run", CallStatus::Warning)));
        keep_first(
            &mut slot,
            Some(EngineError::new("Highs_getSolution", CallStatus::Warning)),
        );
        assert_eq!(slot.map(|w| w.call()), Some("Highs_run"));
    }

    #[test]
    fn test_raw_model_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<RawModel>();
    }
}
