//! This module provides observability hooks for the codec kernels.
//!
//! The `log_metric!` macro emits one structured `key=value` line through the
//! `log` facade at `debug` level, under the `bitmask::metric` target, so it can
//! be filtered independently of ordinary log output
//! (e.g. `RUST_LOG=bitmask::metric=debug`).

/// Logs a structured key-value metric line at `debug` level.
///
/// # Example
/// ```
/// use bitmask_codec::log_metric;
/// let blocks = 4;
/// log_metric!("event"="bitmask_encode", "blocks"=&blocks);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if ::log::log_enabled!(target: "bitmask::metric", ::log::Level::Debug) {
            let mut parts: Vec<String> = Vec::new();
            $(
                parts.push(format!("{}={}", $key, $value));
            )+
            ::log::debug!(target: "bitmask::metric", "{}", parts.join(" "));
        }
    };
}
