//! Unit conversions and numeric input handling.
//!
//! Measurements are stored in metric; conversion to and from imperial
//! happens only at presentation and input boundaries.

const LB_PER_KG: f64 = 2.2046226218;
const CM_PER_IN: f64 = 2.54;

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

pub fn cm_to_in(cm: f64) -> f64 {
    cm / CM_PER_IN
}

pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_IN
}

/// Body mass index formatted to one decimal place.
///
/// Returns `None` when either value is absent, zero, or non-finite.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<String> {
    let w = weight_kg?;
    let h = height_cm?;
    if w == 0.0 || h == 0.0 || !w.is_finite() || !h.is_finite() {
        return None;
    }
    let m = h / 100.0;
    if m <= 0.0 {
        return None;
    }
    Some(format!("{:.1}", w / (m * m)))
}

/// Parses raw user input into a numeric value.
///
/// Blank input means "field not provided"; unparseable or non-finite
/// input is treated the same way rather than surfaced as an error.
pub fn sanitize_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_round_trip() {
        for w in [0.0, 3.4, 9.8, 54.2] {
            assert!((lb_to_kg(kg_to_lb(w)) - w).abs() < 1e-9);
        }
    }

    #[test]
    fn test_length_round_trip() {
        for h in [0.0, 48.0, 76.8, 110.5] {
            assert!((in_to_cm(cm_to_in(h)) - h).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bmi_known_value() {
        assert_eq!(bmi(Some(9.8), Some(76.8)), Some("16.6".to_string()));
    }

    #[test]
    fn test_bmi_missing_or_zero() {
        assert_eq!(bmi(None, Some(70.0)), None);
        assert_eq!(bmi(Some(10.0), None), None);
        assert_eq!(bmi(Some(0.0), Some(70.0)), None);
        assert_eq!(bmi(Some(10.0), Some(0.0)), None);
        assert_eq!(bmi(Some(10.0), Some(-50.0)), None);
    }

    #[test]
    fn test_sanitize_number() {
        assert_eq!(sanitize_number("9.8"), Some(9.8));
        assert_eq!(sanitize_number(" 12 "), Some(12.0));
        assert_eq!(sanitize_number(""), None);
        assert_eq!(sanitize_number("   "), None);
        assert_eq!(sanitize_number("abc"), None);
        assert_eq!(sanitize_number("NaN"), None);
        assert_eq!(sanitize_number("inf"), None);
    }
}
