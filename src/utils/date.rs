//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for post dates,
//! formatted as RFC 2822 for RSS `pubDate`.
//!
//! # Accepted inputs
//!
//! - `2024-06-15`
//! - `2024-06-15T14:30:45Z`, with optional fractional seconds
//! - `2024-06-15T16:30:45+02:00`, normalized to UTC
//! - `Jun 15 2024` / `Jun 15, 2024`
//! - TOML native dates and datetimes (`pub_date = 2024-06-15` in `+++` front matter)
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
//! assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");
//! ```

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// UTC datetime without timezone complexity.
///
/// Field order matters: the derived `Ord` compares chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse any of the accepted date spellings.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let dt = Self::parse_iso(s).or_else(|| Self::parse_month_name(s))?;
        dt.validate().ok()?;
        Some(dt)
    }

    /// Parse an ISO 8601 date (`YYYY-MM-DD`) or datetime.
    ///
    /// A datetime may carry fractional seconds, which are dropped, and a `Z`
    /// or `±hh:mm` offset, which is applied so the result is UTC. A datetime
    /// without an offset is taken as UTC.
    fn parse_iso(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = parse_u16(&bytes[0..4])?;
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;

        if bytes.len() == 10 {
            return Some(Self::from_ymd(year, month, day));
        }

        // "THH:MM:SS", with `t` or a space accepted as separator
        if bytes.len() < 19
            || !matches!(bytes[10], b'T' | b't' | b' ')
            || bytes[13] != b':'
            || bytes[16] != b':'
        {
            return None;
        }
        let hour = parse_u8(&bytes[11..13])?;
        let minute = parse_u8(&bytes[14..16])?;
        let second = parse_u8(&bytes[17..19])?;

        let mut rest = &bytes[19..];
        if let Some(fraction) = rest.strip_prefix(b".") {
            let digits = fraction.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            rest = &fraction[digits..];
        }
        let offset = parse_offset(rest)?;

        let local = Self::new(year, month, day, hour, minute, second);
        local.validate().ok()?;
        local.shift_minutes(-offset)
    }

    /// Move by `minutes`, rolling over days, months and years.
    ///
    /// Returns `None` when the result leaves the representable years.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // minute of day is 0..1440
    fn shift_minutes(self, minutes: i64) -> Option<Self> {
        if minutes == 0 {
            return Some(self);
        }

        let days = days_from_civil(self.year, self.month, self.day);
        let total = days * 1440 + i64::from(self.hour) * 60 + i64::from(self.minute) + minutes;
        let (year, month, day) = civil_from_days(total.div_euclid(1440));
        let minute_of_day = total.rem_euclid(1440);

        Some(Self::new(
            u16::try_from(year).ok().filter(|y| *y <= 9999)?,
            month,
            day,
            (minute_of_day / 60) as u8,
            (minute_of_day % 60) as u8,
            self.second,
        ))
    }

    /// Parse "Mon DD YYYY", with an optional comma after the day.
    fn parse_month_name(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let month_name = parts.next()?;
        let day = parts.next()?.trim_end_matches(',');
        let year = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let prefix = month_name.get(..3)?;
        let month = MONTHS.iter().position(|m| m.eq_ignore_ascii_case(prefix))?;
        let day: u8 = day.parse().ok()?;
        let year: u16 = year.parse().ok()?;

        #[allow(clippy::cast_possible_truncation)] // index into a 12-element table
        Some(Self::from_ymd(year, month as u8 + 1, day))
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339 (ISO 8601).
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Format as RFC 2822 for RSS `pubDate`.
    ///
    /// Returns: `Sun, 01 Jan 2023 00:00:00 GMT`
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[self.weekday_index()],
            self.day,
            MONTHS[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Zeller's congruence, 0 = Saturday.
    #[inline]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for DateTimeUtc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for DateTimeUtc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DateVisitor)
    }
}

struct DateVisitor;

impl<'de> de::Visitor<'de> for DateVisitor {
    type Value = DateTimeUtc;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date like `2024-06-15`, `2024-06-15T14:30:45+02:00` or `Jun 15 2024`")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        DateTimeUtc::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    // TOML datetimes arrive as a single-entry map wrapping their string form.
    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let (_, raw): (String, String) = map
            .next_entry()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        self.visit_str(&raw)
    }
}

/// Parse a UTC offset suffix into minutes east of UTC.
///
/// Accepts nothing (UTC), `Z`, `±hh:mm` and `±hhmm`.
fn parse_offset(bytes: &[u8]) -> Option<i64> {
    let (sign, hours, minutes) = match bytes {
        [] | [b'Z' | b'z'] => return Some(0),
        [sign @ (b'+' | b'-'), h1, h2, b':', m1, m2] | [sign @ (b'+' | b'-'), h1, h2, m1, m2] => {
            (*sign, parse_u8(&[*h1, *h2])?, parse_u8(&[*m1, *m2])?)
        }
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    let total = i64::from(hours) * 60 + i64::from(minutes);
    Some(if sign == b'-' { -total } else { total })
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let m = i64::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`]: `(year, month, day)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // month 1-12, day 1-31
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (yoe + era * 400 + i64::from(month <= 2), month as u8, day as u8)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}
