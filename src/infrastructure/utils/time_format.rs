use chrono::{DateTime, Local, TimeZone, Utc};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Relative age of `timestamp` as seen at `now`: whole minutes under an
/// hour, whole hours under a day, whole days beyond. Timestamps in the
/// future read as "0 minutes ago".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).num_seconds().max(0);

    let (count, unit) = if elapsed < SECS_PER_HOUR {
        (elapsed / SECS_PER_MINUTE, "minute")
    } else if elapsed < SECS_PER_DAY {
        (elapsed / SECS_PER_HOUR, "hour")
    } else {
        (elapsed / SECS_PER_DAY, "day")
    };

    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}

pub fn time_ago_now(timestamp: DateTime<Utc>) -> String {
    time_ago(timestamp, Utc::now())
}

/// Absolute display form, e.g. `Oct 18, 2026, 02:05 PM`.
pub fn format_date_time<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

pub fn format_local(timestamp: DateTime<Utc>) -> String {
    format_date_time(timestamp, &Local)
}
