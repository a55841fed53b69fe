pub(crate) fn format_rate(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.0}")
    } else {
        "0".to_string()
    }
}

/// Renders seconds with a unit that keeps 3-4 significant digits visible.
pub(crate) fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return "-".to_string();
    }
    if secs >= 1.0 {
        return format!("{secs:.3}s");
    }
    if secs >= 1e-3 {
        return format!("{:.2}ms", secs * 1e3);
    }
    format!("{:.0}us", secs * 1e6)
}
