use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};

/// Birthdays and founding dates must fall strictly between 1910-01-01 and `today`.
pub fn ensure_historic_date(field: &str, date: NaiveDate, today: NaiveDate) -> Result<()> {
    let after_floor = (date.year(), date.ordinal()) > (1910, 1);
    if after_floor && date < today {
        Ok(())
    } else {
        Err(Error::validation(field, "Incorrect date"))
    }
}

pub fn ensure_non_negative(field: &str, value: i64) -> Result<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(Error::validation(field, "Ensure this value is greater than or equal to 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn historic_date_bounds_are_exclusive() {
        let today = date(2024, 6, 1);
        assert!(ensure_historic_date("birthday", date(1910, 1, 2), today).is_ok());
        assert!(ensure_historic_date("birthday", date(2024, 5, 31), today).is_ok());
        assert!(ensure_historic_date("birthday", date(1910, 1, 1), today).is_err());
        assert!(ensure_historic_date("birthday", date(1899, 12, 31), today).is_err());
        assert!(ensure_historic_date("birthday", today, today).is_err());
    }

    #[test]
    fn reports_the_offending_field() {
        let err = ensure_historic_date("established", date(2100, 1, 1), date(2024, 1, 1))
            .unwrap_err();
        match err {
            Error::Validation { field, reason } => {
                assert_eq!(field, "established");
                assert_eq!(reason, "Incorrect date");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(ensure_non_negative("salary", -1).is_err());
        assert!(ensure_non_negative("salary", 0).is_ok());
    }
}
