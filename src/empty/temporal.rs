//! Points in time, durations, dates and times of day
//!
//! Each type is empty at its epoch, never "now".

use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};

use super::Emptiness;

impl Emptiness for Duration {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_zero()
    }
}

impl Emptiness for SystemTime {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == SystemTime::UNIX_EPOCH
    }
}

impl Emptiness for TimeDelta {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == TimeDelta::zero()
    }
}

impl Emptiness for NaiveDate {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == NaiveDate::default()
    }
}

impl Emptiness for NaiveTime {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == NaiveTime::default()
    }
}

impl Emptiness for NaiveDateTime {
    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == NaiveDateTime::default()
    }
}

// The local clock reading decides, whatever instant it names.
impl<Tz: TimeZone> Emptiness for DateTime<Tz> {
    #[inline]
    fn is_empty_value(&self) -> bool {
        self.naive_local() == NaiveDateTime::default()
    }
}
