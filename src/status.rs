// Human-readable precipitation status.

/// Describe a forecast result in words.
///
/// Unknown and negative values read as "I don't know"; positive values include the
/// amount with at least one decimal place (`1.0`, `3.2`).
pub fn precipitation_status(value: Option<f64>) -> String {
    match value {
        Some(mm) if mm == 0.0 => "It will not rain".to_string(),
        Some(mm) if mm > 0.0 => format!("It will rain ({mm:?} mm)"),
        _ => "I don't know".to_string(),
    }
}
