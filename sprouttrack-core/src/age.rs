use chrono::NaiveDate;

/// Renders the age at `at` for someone born on `birth` as a compact label:
/// `"18d"` under a month, `"7m"` under a year, `"1y 3m"` beyond.
///
/// Years use an average 365.25-day year and months an average 30.4375-day
/// month, so labels stay stable across leap years.
pub fn age_label(birth: NaiveDate, at: NaiveDate) -> String {
    let days = (at - birth).num_days();
    let years = (days as f64 / 365.25).floor() as i64;
    let months = ((days as f64 % 365.25) / 30.4375).floor() as i64;
    if years <= 0 && months <= 0 {
        format!("{}d", days)
    } else if years <= 0 {
        format!("{}m", months)
    } else {
        format!("{}y {}m", years, months)
    }
}
