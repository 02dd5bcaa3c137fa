pub mod unit;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, then evaluates to the value
/// of the expression. The log level defaults to `Debug`.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} µs", $label, elapsed.as_micros());
        value
    }};
}

/// Round a float to the nearest integer, with halves always rounding up
/// (towards positive infinity). [f64::round] rounds halves away from zero,
/// which would make rounding behave differently on either side of the origin.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Calculate the number of coordinates within `radius` steps of a single
/// coordinate (including that coordinate). Radius 0 is 1, 1 is 7, 2 is 19,
/// etc.
pub fn hexagon_len(radius: u32) -> usize {
    // We'll always have 3r^2+3r+1 tiles (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r tiles for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}
