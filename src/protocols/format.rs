//! Display formatting for derived protocol fields.
//!
//! The two normalizer modes format TVL and zero-change differently; both
//! policies are kept as they are shown to users side by side with their
//! fallback data.

/// Coerce a missing or non-finite feed number to `0.0`.
pub fn num(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `Some(v)` only for finite, non-zero values.
pub fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Round to `digits` decimals with ties away from zero, so `{:.N}` sees no
/// exact ties (it would round those to even).
pub fn round_half_up(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvlPolicy {
    /// `$x.xB`, `$xM`, `$xK`, `$x`
    Compact,
    /// `$x.xM`, `$x.xK`, `$x`; no billions tier
    Precise,
}

pub fn format_tvl(tvl: f64, policy: TvlPolicy) -> String {
    if !tvl.is_finite() {
        return "$0".to_string();
    }

    match policy {
        TvlPolicy::Compact => {
            if tvl >= 1e9 {
                format!("${:.1}B", round_half_up(tvl / 1e9, 1))
            } else if tvl >= 1e6 {
                format!("${:.0}M", round_half_up(tvl / 1e6, 0))
            } else if tvl >= 1e3 {
                format!("${:.0}K", round_half_up(tvl / 1e3, 0))
            } else {
                format!("${:.0}", round_half_up(tvl, 0))
            }
        }
        TvlPolicy::Precise => {
            if tvl >= 1e6 {
                format!("${:.1}M", round_half_up(tvl / 1e6, 1))
            } else if tvl >= 1e3 {
                format!("${:.1}K", round_half_up(tvl / 1e3, 1))
            } else {
                format!("${:.0}", round_half_up(tvl, 0))
            }
        }
    }
}

/// Signed one-decimal percent change from `previous` to `current`, or
/// `zero` when there is nothing to compare against.
pub fn format_change(current: f64, previous: Option<f64>, zero: &str) -> String {
    let Some(previous) = non_zero(previous) else {
        return zero.to_string();
    };

    let change = (current - previous) / previous * 100.0;
    if !change.is_finite() {
        return zero.to_string();
    }
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, round_half_up(change, 1))
}

/// Week-over-week TVL growth annualized (x52), as an absolute percentage.
///
/// This is a placeholder estimate derived from TVL movement, not a yield.
pub fn estimate_apy(tvl: f64, tvl_prev_week: f64) -> String {
    if tvl_prev_week == 0.0 {
        return "0.0%".to_string();
    }
    let weekly_change = (tvl - tvl_prev_week) / tvl_prev_week * 100.0;
    let annualized = weekly_change * 52.0;
    if !annualized.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", round_half_up(annualized.abs(), 1))
}

/// Logo slug used by the icon CDN: lowercase, whitespace runs become `-`.
pub fn logo_slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
