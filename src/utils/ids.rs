use chrono::{DateTime, Local, Utc};

use crate::error::{AppError, AppResult};

/// Path ids are strings on the wire; anything that is not an integer is a
/// malformed id rather than a not-found.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// 本地时间当天零点 (UTC)
pub fn start_of_today() -> DateTime<Utc> {
    let now = Local::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(AppError::InvalidId(_))));
        assert!(matches!(parse_id(""), Err(AppError::InvalidId(_))));
    }

    #[test]
    fn test_start_of_today_is_not_in_future() {
        let midnight = start_of_today();
        assert!(midnight <= Utc::now());
        assert!(Utc::now() - midnight <= chrono::Duration::hours(26));
    }
}
