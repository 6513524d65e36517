use core::fmt;

/// Largest fraction the text form keeps; the parser reads at most six digits.
const MAX_MICROSECOND: u32 = 999_999;

/// Reasons a [`Datetime`] builder refuses a component.
///
/// Every accepted value has a text form that parses back to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DatetimeError {
    #[error("year {0} does not fit in four digits")]
    Year(u16),
    #[error("{name} {value} does not fit in two digits")]
    Component { name: &'static str, value: u8 },
    #[error("fraction of {0} microseconds does not fit in six digits")]
    Microsecond(u32),
    #[error("offset {hours}:{minutes} must keep one sign and two digits per part")]
    Offset { hours: i8, minutes: i8 },
}

/// An offset date-time as written in a document.
///
/// Components are only checked for digit width, so values such as month 13 are representable.
/// A zero offset is rendered as `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Datetime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: Option<u32>,
    hour_offset: i8,
    minute_offset: i8,
}

impl Datetime {
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, DatetimeError> {
        if year > 9999 {
            return Err(DatetimeError::Year(year));
        }
        for (name, value) in [
            ("month", month),
            ("day", day),
            ("hour", hour),
            ("minute", minute),
            ("second", second),
        ] {
            if value > 99 {
                return Err(DatetimeError::Component { name, value });
            }
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            ..Self::default()
        })
    }

    pub fn with_microsecond(mut self, microsecond: u32) -> Result<Self, DatetimeError> {
        if microsecond > MAX_MICROSECOND {
            return Err(DatetimeError::Microsecond(microsecond));
        }
        self.microsecond = Some(microsecond);
        Ok(self)
    }

    /// Sets the UTC offset. Both parts carry the offset's sign, so `-00:30` is `(0, -30)`.
    pub fn with_offset(mut self, hours: i8, minutes: i8) -> Result<Self, DatetimeError> {
        let mixed = (hours < 0 && minutes > 0) || (hours > 0 && minutes < 0);
        if mixed || hours.unsigned_abs() > 99 || minutes.unsigned_abs() > 99 {
            return Err(DatetimeError::Offset { hours, minutes });
        }
        self.hour_offset = hours;
        self.minute_offset = minutes;
        Ok(self)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Fractional seconds in microseconds, present only when a fraction was written.
    pub fn microsecond(&self) -> Option<u32> {
        self.microsecond
    }

    pub fn hour_offset(&self) -> i8 {
        self.hour_offset
    }

    pub fn minute_offset(&self) -> i8 {
        self.minute_offset
    }

    pub fn is_utc(&self) -> bool {
        self.hour_offset == 0 && self.minute_offset == 0
    }

    /// Total offset from UTC in seconds.
    pub fn offset_seconds(&self) -> i32 {
        i32::from(self.hour_offset) * 3600 + i32::from(self.minute_offset) * 60
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if let Some(us) = self.microsecond {
            write!(f, ".{:06}", us)?;
        }
        if self.is_utc() {
            return f.write_str("Z");
        }
        let sign = if self.hour_offset < 0 || self.minute_offset < 0 {
            '-'
        } else {
            '+'
        };
        write!(
            f,
            "{}{:02}:{:02}",
            sign,
            self.hour_offset.unsigned_abs(),
            self.minute_offset.unsigned_abs()
        )
    }
}

#[cfg(feature = "chrono")]
mod chrono_impls {
    use super::{Datetime, MAX_MICROSECOND};
    use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};

    impl Datetime {
        /// Converts to a chrono date-time; `None` if any component is out of range.
        pub fn to_chrono(&self) -> Option<DateTime<FixedOffset>> {
            let offset = FixedOffset::east_opt(self.offset_seconds())?;
            let naive = NaiveDate::from_ymd_opt(
                i32::from(self.year),
                u32::from(self.month),
                u32::from(self.day),
            )?
            .and_hms_micro_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
                self.microsecond.unwrap_or(0),
            )?;
            offset.from_local_datetime(&naive).single()
        }
    }

    impl<Tz: TimeZone> From<DateTime<Tz>> for Datetime {
        fn from(dt: DateTime<Tz>) -> Self {
            let fixed = dt.fixed_offset();
            let offset = fixed.offset().local_minus_utc();
            // Leap seconds report up to two seconds of nanoseconds.
            let micros = (fixed.nanosecond() / 1_000).min(MAX_MICROSECOND);
            Datetime {
                year: fixed.year().clamp(0, 9999) as u16,
                month: fixed.month() as u8,
                day: fixed.day() as u8,
                hour: fixed.hour() as u8,
                minute: fixed.minute() as u8,
                second: fixed.second() as u8,
                microsecond: if micros > 0 { Some(micros) } else { None },
                hour_offset: (offset / 3600) as i8,
                minute_offset: ((offset % 3600) / 60) as i8,
            }
        }
    }
}
