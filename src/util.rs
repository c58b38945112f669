use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn format_capacity(bytes: u64, precision: usize) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.precision$}");
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };

    format!("{trimmed} {}", UNITS[unit])
}

pub fn percentage_of(used: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }

    let ratio = used as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn stable_fraction(id: &str) -> f64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    (hash >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_capacity_zero_is_exact() {
        assert_eq!(format_capacity(0, 2), "0 Bytes");
        assert_eq!(format_capacity(0, 0), "0 Bytes");
    }

    #[test]
    fn format_capacity_unit_boundaries() {
        assert_eq!(format_capacity(1024, 2), "1 KB");
        assert_eq!(format_capacity(1_048_576, 2), "1 MB");
        assert_eq!(format_capacity(1_073_741_824, 2), "1 GB");
        assert_eq!(format_capacity(1_099_511_627_776, 2), "1 TB");
    }

    #[test]
    fn format_capacity_respects_precision() {
        assert_eq!(format_capacity(1536, 1), "1.5 KB");
        assert_eq!(format_capacity(1536, 0), "2 KB");
        assert_eq!(format_capacity(1536, 3), "1.5 KB");
    }

    #[test]
    fn format_capacity_small_values_stay_in_bytes() {
        assert_eq!(format_capacity(1023, 2), "1023 Bytes");
        assert_eq!(format_capacity(1, 0), "1 Bytes");
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage_of(0, 0), 0);
        assert_eq!(percentage_of(500, 0), 0);
    }

    #[test]
    fn percentage_of_clamps_overuse_to_100() {
        assert_eq!(percentage_of(200, 100), 100);
        assert_eq!(percentage_of(100, 100), 100);
    }

    #[test]
    fn percentage_of_rounds_to_nearest() {
        assert_eq!(percentage_of(1, 3), 33);
        assert_eq!(percentage_of(2, 3), 67);
        assert_eq!(percentage_of(1, 200), 1);
    }

    #[test]
    fn stable_fraction_is_deterministic_and_bounded() {
        let a = stable_fraction("host-17");
        let b = stable_fraction("host-17");
        assert_eq!(a, b);
        assert!((0.0..1.0).contains(&a));
    }
}
