//! Text formatting shared by the prose outputs.

use chrono::NaiveDate;

/// Integer with comma thousands separators: `1234567` -> `"1,234,567"`.
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `January 24, 2026`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// `Jan 24, 2026`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Hours covered by a window label such as `"1400-1600"`, both ends inclusive.
pub fn window_hours(time_window: &str) -> Option<(u32, u32)> {
    let (start, end) = time_window.trim().split_once('-')?;
    let hour = |s: &str| -> Option<u32> {
        let s = s.trim();
        let h: u32 = s.get(..2)?.parse().ok()?;
        (h < 24 && s.len() == 4).then_some(h)
    };
    let (start, end) = (hour(start)?, hour(end)?);
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
        assert_eq!(thousands(-45000), "-45,000");
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(long_date(d), "January 04, 2026");
        assert_eq!(short_date(d), "Jan 04, 2026");
    }

    #[test]
    fn test_window_hours() {
        assert_eq!(window_hours("1400-1600"), Some((14, 16)));
        assert_eq!(window_hours("0600-0800"), Some((6, 8)));
        assert_eq!(window_hours("1600-1400"), None);
        assert_eq!(window_hours("afternoon"), None);
        assert_eq!(window_hours("14-16"), None);
    }
}
