//! Helpers for reading generator parameters out of a JSON object.
//!
//! Each helper takes the params value, a key and a default. Missing keys and
//! wrong JSON types fall back to the default, so a generator can always be
//! built from whatever `--params` object the user passed.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or
/// wrong type. Integers are accepted; non-finite results fall back too.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Extracts a probability from `params[name]`, clamped to [0, 1].
pub fn param_probability(params: &Value, name: &str, default: f64) -> f64 {
    param_f64(params, name, default).clamp(0.0, 1.0)
}

/// Extracts a `usize` from `params[name]`, returning `default` unless the
/// value is a non-negative integer. Values past `usize::MAX` saturate.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(default)
}

/// Extracts a count from `params[name]` like [`param_usize`], capped at
/// `ceiling`.
pub fn param_count(params: &Value, name: &str, default: usize, ceiling: usize) -> usize {
    param_usize(params, name, default).min(ceiling)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Reads a `(min, max)` pair of `f64` params and returns them ordered.
pub fn param_f64_range(
    params: &Value,
    (min_name, max_name): (&str, &str),
    (min_default, max_default): (f64, f64),
) -> (f64, f64) {
    let a = param_f64(params, min_name, min_default);
    let b = param_f64(params, max_name, max_default);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Reads a `(min, max)` pair of count params, each capped at `ceiling`,
/// and returns them ordered.
pub fn param_usize_range(
    params: &Value,
    (min_name, max_name): (&str, &str),
    (min_default, max_default): (usize, usize),
    ceiling: usize,
) -> (usize, usize) {
    let a = param_count(params, min_name, min_default, ceiling);
    let b = param_count(params, max_name, max_default, ceiling);
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_integer() {
        let params = json!({"a": 2.5, "b": 10});
        assert_eq!(param_f64(&params, "a", 1.0), 2.5);
        assert_eq!(param_f64(&params, "b", 0.0), 10.0);
    }

    #[test]
    fn param_f64_falls_back_for_missing_or_wrong_type() {
        let params = json!({"speed": "fast", "none": null});
        assert_eq!(param_f64(&params, "speed", 1.0), 1.0);
        assert_eq!(param_f64(&params, "none", 5.0), 5.0);
        assert_eq!(param_f64(&params, "missing", 3.0), 3.0);
        assert_eq!(param_f64(&json!("not an object"), "x", 7.0), 7.0);
    }

    #[test]
    fn param_probability_clamps() {
        let params = json!({"hi": 1.7, "lo": -0.2, "mid": 0.3});
        assert_eq!(param_probability(&params, "hi", 0.5), 1.0);
        assert_eq!(param_probability(&params, "lo", 0.5), 0.0);
        assert_eq!(param_probability(&params, "mid", 0.5), 0.3);
    }

    #[test]
    fn param_usize_rejects_floats_and_negatives() {
        let params = json!({"f": 2.5, "n": -1, "ok": 42});
        assert_eq!(param_usize(&params, "f", 99), 99);
        assert_eq!(param_usize(&params, "n", 5), 5);
        assert_eq!(param_usize(&params, "ok", 0), 42);
    }

    #[test]
    fn param_bool_extracts_and_falls_back() {
        let params = json!({"on": true, "num": 1});
        assert!(param_bool(&params, "on", false));
        assert!(!param_bool(&params, "num", false));
        assert!(param_bool(&params, "missing", true));
    }

    #[test]
    fn ranges_are_reordered() {
        let params = json!({"lo": 30.0, "hi": 5.0, "n_lo": 9, "n_hi": 4});
        assert_eq!(
            param_f64_range(&params, ("lo", "hi"), (0.0, 1.0)),
            (5.0, 30.0)
        );
        assert_eq!(
            param_usize_range(&params, ("n_lo", "n_hi"), (0, 1), 100),
            (4, 9)
        );
    }

    #[test]
    fn ranges_use_defaults_when_missing() {
        let params = json!({});
        assert_eq!(
            param_f64_range(&params, ("lo", "hi"), (0.4, 1.0)),
            (0.4, 1.0)
        );
        assert_eq!(
            param_usize_range(&params, ("lo", "hi"), (150, 400), 10_000),
            (150, 400)
        );
    }

    #[test]
    fn counts_are_capped_at_ceiling() {
        let params = json!({"n": u64::MAX, "lo": 0, "hi": u64::MAX, "small": 3});
        assert_eq!(param_count(&params, "n", 1, 500), 500);
        assert_eq!(param_count(&params, "small", 1, 500), 3);
        assert_eq!(param_count(&params, "missing", 7, 500), 7);
        assert_eq!(param_usize(&params, "n", 0), usize::MAX);
        assert_eq!(
            param_usize_range(&params, ("lo", "hi"), (150, 400), 10_000),
            (0, 10_000)
        );
    }
}
