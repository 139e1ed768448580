/// Decimal byte units, largest first
const BYTE_UNITS: [(&str, u64); 5] = [
    ("TB", 1_000_000_000_000),
    ("GB", 1_000_000_000),
    ("MB", 1_000_000),
    ("KB", 1_000),
    ("bytes", 1),
];

/// Format a byte count with the largest unit it reaches, rounded to a whole number.
///
/// Zero renders as `- bytes`.
pub fn readable_bytes(value: u64) -> String {
    if value == 0 {
        return "- bytes".to_string();
    }

    for (suffix, unit) in BYTE_UNITS {
        if value >= unit {
            let amount = (value as f64 / unit as f64).round();
            return format!("{} {}", amount, suffix);
        }
    }

    "0".to_string()
}
