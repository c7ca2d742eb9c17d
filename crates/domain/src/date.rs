use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Reminder due dates carry no time component and no timezone; all
/// calendar arithmetic on them happens in a neutral calendar (UTC
/// midnight) so that local timezone shifts can never move a date.
pub fn parse_calendar_date(datestr: &str) -> Result<NaiveDate, String> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(datestr.to_string());
    }
    let year = dates[0].parse::<i32>();
    let month = dates[1].parse::<u32>();
    let day = dates[2].parse::<u32>();

    let (year, month, day) = match (year, month, day) {
        (Ok(y), Ok(m), Ok(d)) => (y, m, d),
        _ => return Err(datestr.to_string()),
    };

    if !(1970..=2100).contains(&year) {
        return Err(datestr.to_string());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| datestr.to_string())
}
