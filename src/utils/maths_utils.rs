use argminmax::ArgMinMax;
use itertools::Itertools;
use statrs::statistics::Statistics;

#[inline]
pub(crate) fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

#[inline]
pub(crate) fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Trailing simple moving average. The first `window - 1` slots stay `None`.
pub(crate) fn rolling_mean(data: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(data, window, |win| win.iter().mean())
}

/// Trailing sample standard deviation (n - 1 denominator), same warm-up rule as `rolling_mean`.
pub(crate) fn rolling_sample_stddev(data: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(data, window, |win| win.iter().std_dev())
}

fn rolling(data: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if window == 0 || data.len() < window {
        return out;
    }
    for (i, win) in data.windows(window).enumerate() {
        out[i + window - 1] = Some(f(win));
    }
    out
}

/// Day-over-day fractional change; one element shorter than the input.
pub(crate) fn pct_change(data: &[f64]) -> Vec<f64> {
    data.iter()
        .tuple_windows()
        .map(|(prev, next)| (next - prev) / prev)
        .collect()
}

/// Sample standard deviation, `None` when fewer than two points exist.
pub(crate) fn sample_stddev(data: &[f64]) -> Option<f64> {
    (data.len() >= 2).then(|| data.iter().std_dev())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_mean_respects_warm_up() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn rolling_on_short_input_is_all_none() {
        assert!(rolling_mean(&[1.0, 2.0], 3).iter().all(Option::is_none));
        assert!(rolling_sample_stddev(&[], 3).is_empty());
    }

    #[test]
    fn sample_stddev_uses_n_minus_one() {
        // mean 5, squared deviations sum to 32 over 8 points -> 32/7
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_stddev(&data).unwrap();
        assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_stddev(&[1.0]), None);
    }

    #[test]
    fn pct_change_is_fractional() {
        let out = pct_change(&[100.0, 110.0, 99.0]);
        assert!((out[0] - 0.10).abs() < 1e-12);
        assert!((out[1] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn min_and_max() {
        let v = [3.0, -1.0, 8.5, 2.0];
        assert_eq!(get_max(&v), 8.5);
        assert_eq!(get_min(&v), -1.0);
    }
}
