use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fastdate::DateTime;

use crate::consts::LOG_FILE_EXT;
use crate::error::LogError;

/// local calendar time of `t`
pub fn local(t: SystemTime) -> DateTime {
    DateTime::from_system_time(t, fastdate::offset_sec())
}

/// `YYYYMMDD` of the given date
pub fn ymd(dt: &DateTime) -> u32 {
    dt.year() as u32 * 10000 + dt.mon() as u32 * 100 + dt.day() as u32
}

/// Today's local date as `YYYYMMDD`.
///
/// Not stable across a midnight boundary, capture it once per run.
pub fn current_date() -> u32 {
    ymd(&local(SystemTime::now()))
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u32, mon: u32) -> u32 {
    match mon {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// checks that `date` is an 8-digit `YYYYMMDD` naming a real calendar day
pub fn validate_date(date: u32) -> Result<u32, LogError> {
    let year = date / 10000;
    let mon = date / 100 % 100;
    let day = date % 100;
    if !(1000..=9999).contains(&year) || day == 0 || day > days_in_month(year, mon) {
        return Err(LogError::InvalidArgument(format!(
            "Invalid log date {}. Please use an 8-digit YYYYMMDD date.",
            date
        )));
    }
    Ok(date)
}

/// `{dir}/{app_name}_{date}.log`
pub fn log_file_path(dir: &Path, app_name: &str, date: u32) -> PathBuf {
    dir.join(format!("{}_{}.{}", app_name, date, LOG_FILE_EXT))
}
