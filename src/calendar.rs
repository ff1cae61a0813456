use chrono::{DateTime, NaiveDate, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use log::debug;
use crate::errors::PriceError;
use crate::models::{CountryCode, DayClassification, Granularity};

/// Classifies a date as a normal day or a DST switch day for the given country.
///
/// The UTC offset at the local start of the day is compared with the offset at the
/// local start of the next day. If the offset grows the day is one hour short (spring),
/// if it shrinks the day is one hour long (autumn).
///
/// The previous day is not consulted: the day after a switch already starts with the
/// new offset, so an offset change from the previous midnight says nothing about the
/// length of this day. Days adjacent to a switch day are normal.
///
/// # Arguments
///
/// * 'date' - the calendar date to classify
/// * 'country' - country whose timezone the date is expressed in
pub fn classify(date: NaiveDate, country: CountryCode) -> Result<DayClassification, PriceError> {
    let (day_start, day_end) = day_bounds(date, country)?;
    debug!("{} {}: offsets start/next start: {}/{}", country, date, utc_offset(&day_start), utc_offset(&day_end));

    // Day length is measured on the UTC time line, so a switch at local midnight is caught too
    let minutes = (day_end - day_start).num_minutes();
    let classification = if minutes < 24 * 60 {
        DayClassification::SpringForward
    } else if minutes > 24 * 60 {
        DayClassification::FallBack
    } else {
        DayClassification::Normal
    };

    Ok(classification)
}

/// Returns the number of price periods a day requires
///
/// # Arguments
///
/// * 'date' - the calendar date
/// * 'country' - country whose timezone the date is expressed in
/// * 'granularity' - hourly or half-hourly periods
pub fn period_count(date: NaiveDate, country: CountryCode, granularity: Granularity) -> Result<usize, PriceError> {
    Ok(classify(date, country)?.hours() * granularity.multiplier())
}

/// Returns the start and end (non-inclusive) of a local day.
/// For DST switch days the span between the two is either 23 or 25 hours.
///
/// # Arguments
///
/// * 'date' - the calendar date
/// * 'country' - country whose timezone the date is expressed in
pub fn day_bounds(date: NaiveDate, country: CountryCode) -> Result<(DateTime<Tz>, DateTime<Tz>), PriceError> {
    let tz = country.timezone();
    let next_date = date.succ_opt().ok_or_else(|| out_of_range(date))?;

    Ok((local_day_start(tz, date)?, local_day_start(tz, next_date)?))
}

/// Returns the first existing local instant of a date, which is midnight unless
/// the clocks skip over midnight that day
///
/// # Arguments
///
/// * 'tz' - the timezone
/// * 'date' - the calendar date
fn local_day_start(tz: Tz, date: NaiveDate) -> Result<DateTime<Tz>, PriceError> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| out_of_range(date))?;

    // A gap is never longer than two hours, probe in 15 minute steps
    (0..=8)
        .find_map(|q| midnight
            .checked_add_signed(TimeDelta::minutes(15 * q))
            .and_then(|naive| tz.from_local_datetime(&naive).earliest()))
        .ok_or_else(|| out_of_range(date))
}

fn utc_offset(date_time: &DateTime<Tz>) -> i32 {
    date_time.offset().fix().local_minus_utc()
}

fn out_of_range(date: NaiveDate) -> PriceError {
    PriceError::InvalidArgument(format!("date out of supported range: {}", date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn normal_days_have_24_hours_everywhere() {
        for country in CountryCode::ALL {
            for d in ["2024-06-15", "2024-01-01", "2024-12-31", "2024-02-29"] {
                assert_eq!(period_count(date(d), country, Granularity::Hourly).unwrap(), 24, "{} {}", country, d);
                assert_eq!(period_count(date(d), country, Granularity::HalfHourly).unwrap(), 48, "{} {}", country, d);
            }
        }
    }

    #[test]
    fn uk_switch_days() {
        assert_eq!(classify(date("2024-03-31"), CountryCode::GB).unwrap(), DayClassification::SpringForward);
        assert_eq!(period_count(date("2024-03-31"), CountryCode::GB, Granularity::Hourly).unwrap(), 23);
        assert_eq!(classify(date("2024-10-27"), CountryCode::GB).unwrap(), DayClassification::FallBack);
        assert_eq!(period_count(date("2024-10-27"), CountryCode::GB, Granularity::Hourly).unwrap(), 25);
        assert_eq!(period_count(date("2024-10-27"), CountryCode::GB, Granularity::HalfHourly).unwrap(), 50);
    }

    #[test]
    fn cet_switch_days() {
        for country in [CountryCode::FR, CountryCode::NL, CountryCode::DE, CountryCode::BE] {
            assert_eq!(classify(date("2025-03-30"), country).unwrap(), DayClassification::SpringForward);
            assert_eq!(classify(date("2025-10-26"), country).unwrap(), DayClassification::FallBack);
            assert_eq!(period_count(date("2025-03-30"), country, Granularity::HalfHourly).unwrap(), 46);
        }
    }

    #[test]
    fn days_adjacent_to_a_switch_are_normal() {
        for d in ["2024-03-30", "2024-04-01", "2024-10-26", "2024-10-28"] {
            assert_eq!(classify(date(d), CountryCode::GB).unwrap(), DayClassification::Normal, "{}", d);
        }
    }

    #[test]
    fn day_bounds_span_switch_days() {
        let (start, end) = day_bounds(date("2024-10-27"), CountryCode::DE).unwrap();
        assert_eq!((end - start).num_hours(), 25);
        assert_eq!(start.to_rfc3339(), "2024-10-27T00:00:00+02:00");
        assert_eq!(end.to_rfc3339(), "2024-10-28T00:00:00+01:00");
    }

    #[test]
    fn last_calendar_date_is_rejected() {
        assert!(matches!(classify(NaiveDate::MAX, CountryCode::GB), Err(PriceError::InvalidArgument(_))));
    }
}
