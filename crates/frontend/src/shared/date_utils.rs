//! Date display helpers. The API speaks ISO-8601, screens show dd/mm/yyyy.

use chrono::NaiveDate;

/// Example: 2024-03-15 -> "15/03/2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(date), "15/03/2024");
        assert_eq!(format_optional_date(None), "-");
    }
}
