//! Units formatting and conversion utilities
//!
//! Provides functions for human-readable formatting of file sizes and
//! throughput computation from byte counts and elapsed time.

use std::time::Duration;

/// Format a byte count into a human-readable size label.
///
/// Divides by 1024 while the value is at least 1024 and unit suffixes
/// remain, rendering with one decimal place.
///
/// # Examples
/// ```
/// use csvbench::util::units::format_file_size;
///
/// assert_eq!(format_file_size(0), "0.0 B");
/// assert_eq!(format_file_size(1024), "1.0 KB");
/// assert_eq!(format_file_size(1048576), "1.0 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    const THRESHOLD: f64 = 1024.0;

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}

/// Calculate throughput in MB/s from bytes and duration.
///
/// 1 MB = 1,048,576 bytes. Zero duration yields 0.0.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use csvbench::util::units::calculate_throughput_mbps;
///
/// let throughput = calculate_throughput_mbps(1048576, Duration::from_secs(1));
/// assert!((throughput - 1.0).abs() < 0.01);
/// ```
pub fn calculate_throughput_mbps(bytes: u64, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }

    let duration_secs = duration.as_secs_f64();
    let megabytes = bytes as f64 / 1_048_576.0;
    megabytes / duration_secs
}
