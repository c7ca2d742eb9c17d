use chrono_tz::Tz;

/// Standard (non-DST) UTC offsets for the IANA zones users can pick in
/// their hub preferences. The notification scheduler reverse-maps the
/// current UTC hour through this table to find the zones sitting at local
/// 7am.
///
/// Fixed-offset approximation: zones observing daylight saving will get
/// their email an hour early or late for part of the year.
const ZONE_STANDARD_OFFSETS: &[(&str, i32)] = &[
    ("Pacific/Honolulu", -10),
    ("America/Anchorage", -9),
    ("America/Los_Angeles", -8),
    ("America/Vancouver", -8),
    ("America/Denver", -7),
    ("America/Phoenix", -7),
    ("America/Chicago", -6),
    ("America/Mexico_City", -6),
    ("America/New_York", -5),
    ("America/Toronto", -5),
    ("America/Bogota", -5),
    ("America/Lima", -5),
    ("America/Halifax", -4),
    ("America/Santiago", -4),
    ("America/Sao_Paulo", -3),
    ("America/Argentina/Buenos_Aires", -3),
    ("Atlantic/South_Georgia", -2),
    ("Atlantic/Azores", -1),
    ("UTC", 0),
    ("Europe/London", 0),
    ("Europe/Dublin", 0),
    ("Europe/Lisbon", 0),
    ("Europe/Paris", 1),
    ("Europe/Berlin", 1),
    ("Europe/Madrid", 1),
    ("Europe/Rome", 1),
    ("Europe/Amsterdam", 1),
    ("Europe/Oslo", 1),
    ("Europe/Stockholm", 1),
    ("Europe/Warsaw", 1),
    ("Africa/Lagos", 1),
    ("Europe/Helsinki", 2),
    ("Europe/Athens", 2),
    ("Europe/Kiev", 2),
    ("Africa/Cairo", 2),
    ("Africa/Johannesburg", 2),
    ("Europe/Moscow", 3),
    ("Europe/Istanbul", 3),
    ("Africa/Nairobi", 3),
    ("Asia/Dubai", 4),
    ("Asia/Karachi", 5),
    ("Asia/Dhaka", 6),
    ("Asia/Bangkok", 7),
    ("Asia/Jakarta", 7),
    ("Asia/Shanghai", 8),
    ("Asia/Singapore", 8),
    ("Asia/Hong_Kong", 8),
    ("Australia/Perth", 8),
    ("Asia/Tokyo", 9),
    ("Asia/Seoul", 9),
    ("Australia/Brisbane", 10),
    ("Australia/Sydney", 10),
    ("Australia/Melbourne", 10),
    ("Pacific/Noumea", 11),
    ("Pacific/Auckland", 12),
];

/// Returns the zones whose local wall-clock hour equals `local_hour` at the
/// given UTC hour, per the standard-offset table above.
pub fn timezones_at_local_hour(utc_hour: u32, local_hour: u32) -> Vec<Tz> {
    ZONE_STANDARD_OFFSETS
        .iter()
        .filter(|(_, offset)| (utc_hour as i32 + offset).rem_euclid(24) == local_hour as i32)
        .filter_map(|(name, _)| name.parse::<Tz>().ok())
        .collect()
}
