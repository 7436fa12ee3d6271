/// Percentage with one decimal, suitable for CSS widths.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value.clamp(0.0, 100.0))
}

#[must_use]
pub fn format_duration_label(minutes: u32) -> String {
    format!("{minutes} min session")
}
