use chrono::{NaiveDate, TimeDelta, Utc};
use crate::calendar::{day_bounds, period_count};
use crate::errors::PriceError;
use crate::models::{CountryCode, Granularity, LabeledPrice};

/// Labels prices with the local wall-clock start of their delivery period.
///
/// Periods are stepped on the UTC time line and read back through the country's timezone,
/// so the skipped hour of a spring day never shows up and the repeated hour of an autumn
/// day is walked twice.
///
/// # Arguments
///
/// * 'prices' - one price per period, in delivery order
/// * 'date' - the delivery date
/// * 'country' - country whose local time the labels are expressed in
/// * 'granularity' - hourly or half-hourly periods
pub fn label(prices: &[f64], date: NaiveDate, country: CountryCode, granularity: Granularity) -> Result<Vec<LabeledPrice>, PriceError> {
    let expected = period_count(date, country, granularity)?;
    if prices.len() != expected {
        return Err(PriceError::LengthMismatch { expected, actual: prices.len() });
    }

    let (day_start, day_end) = day_bounds(date, country)?;
    let step = TimeDelta::minutes(granularity.step_minutes());

    let mut result: Vec<LabeledPrice> = Vec::with_capacity(prices.len());
    let mut current = day_start;
    for price in prices {
        if current >= day_end {
            break;
        }
        result.push(LabeledPrice {
            label: current.format("%H%M").to_string(),
            price: *price,
            valid_time: current.with_timezone(&Utc),
        });
        current += step;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn prices(count: usize) -> Vec<f64> {
        (0..count).map(|i| i as f64 + 0.25).collect()
    }

    fn labels(result: &[LabeledPrice]) -> Vec<&str> {
        result.iter().map(|l| l.label.as_str()).collect()
    }

    #[test]
    fn half_hourly_normal_day_has_no_gaps() {
        let result = label(&prices(48), date("2024-06-15"), CountryCode::FR, Granularity::HalfHourly).unwrap();
        let expected: Vec<String> = (0..48).map(|i| format!("{:02}{:02}", i / 2, (i % 2) * 30)).collect();

        assert_eq!(labels(&result), expected);
        assert_eq!(result[0].to_string(), "0000: 0.25");
        assert_eq!(result[47].to_string(), "2330: 47.25");
    }

    #[test]
    fn spring_day_skips_the_missing_hour() {
        let result = label(&prices(23), date("2024-03-31"), CountryCode::GB, Granularity::Hourly).unwrap();
        let l = labels(&result);

        assert_eq!(l.len(), 23);
        assert_eq!(&l[0..3], &["0000", "0200", "0300"]);
        assert!(!l.contains(&"0100"));
        assert_eq!(l[22], "2300");

        let result = label(&prices(46), date("2024-03-31"), CountryCode::DE, Granularity::HalfHourly).unwrap();
        let l = labels(&result);
        assert_eq!(&l[0..6], &["0000", "0030", "0100", "0130", "0300", "0330"]);
    }

    #[test]
    fn autumn_day_repeats_the_doubled_hour() {
        let result = label(&prices(25), date("2024-10-27"), CountryCode::GB, Granularity::Hourly).unwrap();
        let l = labels(&result);

        assert_eq!(l.len(), 25);
        // UK clocks go back from 02:00 BST to 01:00 GMT, so 01:00 is the doubled hour.
        // CET countries go back at 03:00 and double 02:00 instead (NL below).
        assert_eq!(&l[0..4], &["0000", "0100", "0100", "0200"]);
        for h in 0..24 {
            let hhmm = format!("{:02}00", h);
            let occurrences = l.iter().filter(|x| **x == hhmm).count();
            assert_eq!(occurrences, if h == 1 { 2 } else { 1 }, "{}", hhmm);
        }
        // The two 01:00 periods are an hour apart in UTC
        assert_eq!((result[2].valid_time - result[1].valid_time).num_minutes(), 60);

        let result = label(&prices(25), date("2024-10-27"), CountryCode::NL, Granularity::Hourly).unwrap();
        assert_eq!(&labels(&result)[1..5], &["0100", "0200", "0200", "0300"]);
    }

    #[test]
    fn autumn_day_half_hourly() {
        let result = label(&prices(50), date("2024-10-27"), CountryCode::BE, Granularity::HalfHourly).unwrap();
        let l = labels(&result);

        assert_eq!(&l[4..10], &["0200", "0230", "0200", "0230", "0300", "0330"]);
        assert_eq!(l[49], "2330");
    }

    #[test]
    fn labels_are_chronological_apart_from_the_repeat() {
        let result = label(&prices(25), date("2024-10-27"), CountryCode::FR, Granularity::Hourly).unwrap();
        let backwards = result.windows(2).filter(|w| w[1].label <= w[0].label).count();
        assert_eq!(backwards, 1);
        assert!(result.windows(2).all(|w| w[1].valid_time > w[0].valid_time));
    }

    #[test]
    fn mismatched_length_is_rejected() {
        let err = label(&prices(24), date("2024-10-27"), CountryCode::GB, Granularity::Hourly).unwrap_err();
        assert_eq!(err, PriceError::LengthMismatch { expected: 25, actual: 24 });

        let err = label(&prices(49), date("2024-06-15"), CountryCode::FR, Granularity::HalfHourly).unwrap_err();
        assert_eq!(err, PriceError::LengthMismatch { expected: 48, actual: 49 });
    }
}
