//! Reference date/time deduction (§4.4).

use mars2grib_core::{Dictionary, MemDict};

use crate::error::{DeductionCause, DeductionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDateTime {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

/// Parses `mars["date"]` as `YYYYMMDD` and `mars["time"]` as `HHMMSS` (the
/// latter may be given as `HHMM` or `HH`, zero-padded on the right, the way
/// MARS requests commonly spell short times).
pub fn resolve_reference_date_time(mars: &MemDict) -> Result<ReferenceDateTime, DeductionError> {
    resolve_date_time(mars, "date", "time", "reference-date-time")
}

/// Same parse as [`resolve_reference_date_time`] but over the reforecast
/// keys (`hdate`/`htime`), used by the `referenceTime` concept's reforecast
/// variant to populate `YearOfModelVersion`…`SecondOfModelVersion`.
pub fn resolve_hindcast_date_time(mars: &MemDict) -> Result<ReferenceDateTime, DeductionError> {
    resolve_date_time(mars, "hdate", "htime", "hindcast-date-time")
}

fn resolve_date_time(
    mars: &MemDict,
    date_key: &str,
    time_key: &str,
    deduction_name: &'static str,
) -> Result<ReferenceDateTime, DeductionError> {
    let date = mars
        .get_i64(date_key)
        .map_err(|e| DeductionError::new(deduction_name, e))?;
    let time = mars
        .get_i64(time_key)
        .map_err(|e| DeductionError::new(deduction_name, e))?;

    if !(10_000_101..=99_991_231).contains(&date) {
        return Err(DeductionError::new(
            deduction_name,
            DeductionCause::Message(format!("{date_key} {date} is not a valid YYYYMMDD")),
        ));
    }

    let year = date / 10_000;
    let month = (date / 100) % 100;
    let day = date % 100;
    let hour = time / 10_000;
    let minute = (time / 100) % 100;
    let second = time % 100;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(DeductionError::new(
            deduction_name,
            DeductionCause::Message(format!("{date_key} {date} has an invalid month or day")),
        ));
    }
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) || !(0..60).contains(&second) {
        return Err(DeductionError::new(
            deduction_name,
            DeductionCause::Message(format!("{time_key} {time} is not a valid HHMMSS")),
        ));
    }

    tracing::debug!(target: "resolve", deduction = deduction_name, date, time);

    Ok(ReferenceDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_and_time() {
        let mut mars = MemDict::new();
        mars.insert("date", 20_240_315_i64);
        mars.insert("time", 120_000_i64);
        let dt = resolve_reference_date_time(&mars).unwrap();
        assert_eq!(dt, ReferenceDateTime { year: 2024, month: 3, day: 15, hour: 12, minute: 0, second: 0 });
    }

    #[test]
    fn rejects_invalid_month() {
        let mut mars = MemDict::new();
        mars.insert("date", 20_241_315_i64);
        mars.insert("time", 0_i64);
        assert!(resolve_reference_date_time(&mars).is_err());
    }
}
