use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::core::primitives::hours_between;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTotals {
    pub total_shift_duration: Decimal,
    pub total_hours: Decimal,
    /// Breaks exceeded the shift and the worked hours were floored at zero.
    pub clamped: bool,
}

/// Worked hours of a finished shift: elapsed time minus accumulated breaks.
pub fn shift_totals(
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
    break_hours: Decimal,
) -> ShiftTotals {
    let total_shift_duration = hours_between(clock_in, clock_out);
    let worked = total_shift_duration - break_hours;
    ShiftTotals {
        total_shift_duration,
        total_hours: worked.max(Decimal::ZERO),
        clamped: worked < Decimal::ZERO,
    }
}

pub fn break_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    hours_between(start, end).max(Decimal::ZERO)
}

#[cfg(test)]
mod calculations_tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, hour, minute, 0).unwrap()
    }

    #[rstest]
    fn it_should_subtract_breaks_from_the_shift() {
        let totals = shift_totals(at(9, 0), at(17, 30), dec!(0.5));
        assert_eq!(totals.total_shift_duration, dec!(8.5));
        assert_eq!(totals.total_hours, dec!(8.0));
        assert!(!totals.clamped);
    }

    #[rstest]
    fn it_should_floor_worked_hours_at_zero() {
        let totals = shift_totals(at(9, 0), at(9, 30), dec!(1.0));
        assert_eq!(totals.total_hours, Decimal::ZERO);
        assert!(totals.clamped);
    }

    #[rstest]
    #[case(at(12, 0), at(12, 15), dec!(0.25))]
    #[case(at(12, 0), at(12, 0), dec!(0))]
    #[case(at(12, 10), at(12, 0), dec!(0))]
    fn it_should_measure_breaks(
        #[case] start: DateTime<Utc>,
        #[case] end: DateTime<Utc>,
        #[case] expected: Decimal,
    ) {
        assert_eq!(break_duration(start, end), expected);
    }
}
