// crates/metrics/src/eta.rs
//! Estimated time to a target XP value at the current daily rate.

/// ETA result: whole days plus the display string the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eta {
    /// `None` when the rate is zero or negative (no usable estimate).
    pub days: Option<i64>,
    /// "37d", "14m", "0d", or "N/A".
    pub display: String,
}

impl Eta {
    fn not_available() -> Self {
        Self {
            days: None,
            display: "N/A".to_string(),
        }
    }
}

/// Estimate days until `current_xp` reaches `target_xp` at `rate_per_day`.
///
/// A non-positive rate yields "N/A" — there is nothing meaningful to
/// extrapolate from a stalled or regressing character. When XP is still
/// owed the estimate is floored at 1 day; already being at or past the
/// target reads as "0d".
pub fn estimate(current_xp: i64, target_xp: i64, rate_per_day: f64) -> Eta {
    if rate_per_day <= 0.0 {
        return Eta::not_available();
    }
    let remaining = (target_xp - current_xp).max(0);
    if remaining == 0 {
        return Eta {
            days: Some(0),
            display: "0d".to_string(),
        };
    }
    let days = (remaining as f64 / rate_per_day).ceil().max(1.0) as i64;
    Eta {
        days: Some(days),
        display: format_days(days),
    }
}

/// Format an ETA in days: below 365 days as `"{n}d"`, otherwise as
/// `"{ceil(n/30)}m"`. Months are fixed 30-day units, not calendar months.
pub fn format_days(days: i64) -> String {
    if days < 365 {
        format!("{days}d")
    } else {
        format!("{}m", (days + 29) / 30)
    }
}
