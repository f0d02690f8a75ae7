//! Numeric width conversion across the engine boundary.
//!
//! Index arrays go from `usize` to the engine's `HighsInt`, which can fail.
//! Floating-point arrays are copied exactly; magnitudes at or beyond
//! [`ENGINE_INFINITY`] are treated as the engine's infinity sentinel and
//! become `±inf`.

use crate::error::ConversionError;
use highs_sys::HighsInt;
use num_traits::{Float, NumCast, ToPrimitive};

/// Bound magnitude from which the engine treats a value as unbounded.
pub const ENGINE_INFINITY: f64 = 1.0e30;

/// Convert every element to `T`, or `None` if any element does not fit.
pub fn convert_slice<T, F>(from: &[F]) -> Option<Vec<T>>
where
    T: NumCast,
    F: ToPrimitive + Copy,
{
    from.iter().map(|&value| T::from(value)).collect()
}

/// Map a single float to the sentinel-normalised value of type `T`.
///
/// Finite values below the sentinel are converted exactly when `T` can hold
/// them; `NaN` stays `NaN`.
pub fn normalize_float<T, F>(value: F) -> T
where
    T: Float,
    F: Float,
{
    let sentinel = F::from(ENGINE_INFINITY).unwrap_or_else(F::infinity);
    if value.is_nan() {
        T::nan()
    } else if value >= sentinel {
        T::infinity()
    } else if value <= -sentinel {
        T::neg_infinity()
    } else {
        T::from(value).unwrap_or_else(|| {
            if value > F::zero() {
                T::infinity()
            } else {
                T::neg_infinity()
            }
        })
    }
}

/// Sentinel-normalise a float slice, changing width if needed.
pub fn convert_floats<T, F>(from: &[F]) -> Vec<T>
where
    T: Float,
    F: Float,
{
    from.iter().map(|&value| normalize_float(value)).collect()
}

/// Convert a count to the engine integer type.
pub(crate) fn engine_count(field: &'static str, value: usize) -> Result<HighsInt, ConversionError> {
    HighsInt::try_from(value).map_err(|_| ConversionError::Width { field, value })
}

/// Convert an index array to the engine integer type.
pub(crate) fn engine_indices(
    field: &'static str,
    values: &[usize],
) -> Result<Vec<HighsInt>, ConversionError> {
    convert_slice(values).ok_or_else(|| {
        let value = values
            .iter()
            .copied()
            .find(|&v| HighsInt::try_from(v).is_err())
            .unwrap_or_default();
        ConversionError::Width { field, value }
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_slice_integers() {
        let converted: Vec<HighsInt> = convert_slice(&[0usize, 3, 17]).unwrap();
        assert_eq!(converted, vec![0, 3, 17]);
    }

    #[test]
    fn test_convert_slice_rejects_overflow() {
        let too_big = HighsInt::MAX as usize + 1;
        assert!(convert_slice::<HighsInt, usize>(&[1, too_big]).is_none());
        let err = engine_indices("a_index", &[1, too_big]).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Width {
                field: "a_index",
                value: too_big,
            }
        );
    }

    #[test]
    fn test_engine_count() {
        assert_eq!(engine_count("num_col", 12).unwrap(), 12);
        assert!(engine_count("num_col", usize::MAX).is_err());
    }

    #[test]
    fn test_normalize_float_sentinels() {
        assert_eq!(normalize_float::<f64, f64>(1.0e30), f64::INFINITY);
        assert_eq!(normalize_float::<f64, f64>(5.0e31), f64::INFINITY);
        assert_eq!(normalize_float::<f64, f64>(-1.0e30), f64::NEG_INFINITY);
        assert_eq!(normalize_float::<f64, f64>(f64::INFINITY), f64::INFINITY);
        assert_eq!(normalize_float::<f64, f64>(9.99e29), 9.99e29);
        assert!(normalize_float::<f64, f64>(f64::NAN).is_nan());
    }

    #[test]
    fn test_convert_floats_is_exact_for_finite_values() {
        let values = [0.1, -2.25, 1.0e-300, 123_456_789.123_456_79, -0.0];
        let converted: Vec<f64> = convert_floats(&values);
        for (a, b) in values.iter().zip(&converted) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_convert_floats_across_widths() {
        let narrow = [0.5f32, -3.75, f32::INFINITY, 1.0e-3];
        let wide: Vec<f64> = convert_floats(&narrow);
        assert_eq!(wide[0], 0.5);
        assert_eq!(wide[1], -3.75);
        assert_eq!(wide[2], f64::INFINITY);
        assert_eq!(wide[3], f64::from(1.0e-3f32));

        let back: Vec<f32> = convert_floats(&wide);
        assert_eq!(back, narrow.to_vec());
    }
}
