use chrono::{Datelike, NaiveDate};

use crate::{
    error::Error,
    record::{NormalizedRecord, Operation, RawRecord},
};

/// Swap the locale decimal comma for a period. Nothing else is validated:
/// `1.234,56` becomes `1.234.56` and is passed through as such.
pub fn normalize_amount(amount: &str) -> String {
    amount.replace(',', ".")
}

/// Any `-` in the amount as exported marks a debit.
pub fn operation_of(amount: &str) -> Operation {
    if amount.contains('-') {
        Operation::Debit
    } else {
        Operation::Credit
    }
}

/// Split a currency date into `(year, month, day)` using a chrono `strftime` pattern.
///
/// The value must match the pattern exactly: chrono alone lets `%Y` take a
/// two-digit year, so the parsed date has to format back to the same string.
pub fn split_date(value: &str, pattern: &str) -> Result<(i32, u32, u32), Error> {
    NaiveDate::parse_from_str(value, pattern)
        .ok()
        .filter(|date| date.format(pattern).to_string() == value)
        .map(|date| (date.year(), date.month(), date.day()))
        .ok_or_else(|| Error::DateParse {
            value: value.to_string(),
            pattern: pattern.to_string(),
        })
}

pub fn normalize(record: RawRecord, date_pattern: &str) -> Result<NormalizedRecord, Error> {
    let (year, month, day) = split_date(&record.currency_date, date_pattern)?;
    Ok(NormalizedRecord {
        operation: operation_of(&record.amount),
        amount: normalize_amount(&record.amount),
        expense_date: record.expense_date,
        counterparty: record.counterparty,
        year,
        month,
        day,
    })
}

/// Normalize every record, keeping file order. Fails on the first bad date.
pub fn transform(
    records: Vec<RawRecord>,
    date_pattern: &str,
) -> Result<Vec<NormalizedRecord>, Error> {
    records
        .into_iter()
        .map(|record| normalize(record, date_pattern))
        .collect()
}

#[cfg(test)]
mod tests {
    mod amount {
        use crate::record::Operation;
        use crate::transform::{normalize_amount, operation_of};

        #[test]
        fn comma_becomes_period() {
            assert_eq!(normalize_amount("12,50"), "12.50");
            assert_eq!(normalize_amount("-5,00"), "-5.00");
        }

        #[test]
        fn normalization_is_idempotent() {
            for amount in ["12,50", "-5,00", "1.234,56", "7", "0,5,5"] {
                let once = normalize_amount(amount);
                assert_eq!(normalize_amount(&once), once);
            }
        }

        #[test]
        fn thousands_separator_is_not_corrected() {
            assert_eq!(normalize_amount("1.234,56"), "1.234.56");
        }

        #[test]
        fn debit_iff_minus_anywhere() {
            assert_eq!(operation_of("-5,00"), Operation::Debit);
            assert_eq!(operation_of("5,00-"), Operation::Debit);
            assert_eq!(operation_of("12,50"), Operation::Credit);
            assert_eq!(operation_of("+12,50"), Operation::Credit);
        }

        #[test]
        fn sign_survives_normalization() {
            let amount = "-5,00";
            assert_eq!(operation_of(&normalize_amount(amount)), operation_of(amount));
        }
    }

    mod dates {
        use crate::config::{DD_MM_YY, DD_MM_YYYY};
        use crate::error::Error;
        use crate::transform::split_date;

        macro_rules! test_valid_dates {
            ($($name:ident: $value:literal with $pattern:ident => ($y:literal, $m:literal, $d:literal),)*) => {
            $(
                paste::paste! {
                #[test]
                fn [<$name _ $pattern:lower>]() {
                    assert_eq!(split_date($value, $pattern).unwrap(), ($y, $m, $d));
                }
            }
            )*
            }
        }

        macro_rules! test_invalid_dates {
            ($($name:ident: $value:literal with $pattern:ident,)*) => {
            $(
                paste::paste! {
                #[test]
                fn [<$name _ $pattern:lower>]() {
                    match split_date($value, $pattern) {
                        Err(Error::DateParse { value, pattern }) => {
                            assert_eq!(value, $value);
                            assert_eq!(pattern, $pattern);
                        }
                        other => panic!("unexpected result: {:?}", other),
                    }
                }
            }
            )*
            }
        }

        test_valid_dates! {
            day_before_month: "05/03/2024" with DD_MM_YYYY => (2024, 3, 5),
            end_of_year: "31/12/2023" with DD_MM_YYYY => (2023, 12, 31),
            leap_day: "29/02/2024" with DD_MM_YYYY => (2024, 2, 29),
            short_year: "05/03/24" with DD_MM_YY => (2024, 3, 5),
            short_year_end: "31/12/23" with DD_MM_YY => (2023, 12, 31),
        }

        test_invalid_dates! {
            month_out_of_range: "05/13/2024" with DD_MM_YYYY,
            not_a_leap_year: "29/02/2023" with DD_MM_YYYY,
            two_digit_year: "05/03/24" with DD_MM_YYYY,
            unpadded_day: "5/03/2024" with DD_MM_YYYY,
            four_digit_year: "05/03/2024" with DD_MM_YY,
            iso_order: "2024-03-05" with DD_MM_YYYY,
            free_text: "yesterday" with DD_MM_YY,
            empty: "" with DD_MM_YY,
        }
    }

    mod records {
        use crate::config::DD_MM_YYYY;
        use crate::error::Error;
        use crate::record::{NormalizedRecord, Operation, RawRecord};
        use crate::transform::transform;

        fn raw(amount: &str, expense_date: &str, counterparty: &str, currency_date: &str) -> RawRecord {
            RawRecord {
                amount: amount.to_string(),
                expense_date: expense_date.to_string(),
                counterparty: counterparty.to_string(),
                currency_date: currency_date.to_string(),
            }
        }

        #[test]
        fn normalizes_in_file_order() {
            let records = transform(
                vec![
                    raw("12,50", "x", "Shop A", "01/04/2024"),
                    raw("-5,00", "y", "Shop B", "15/04/2024"),
                ],
                DD_MM_YYYY,
            )
            .unwrap();
            assert_eq!(
                records,
                vec![
                    NormalizedRecord {
                        expense_date: "x".to_string(),
                        counterparty: "Shop A".to_string(),
                        amount: "12.50".to_string(),
                        operation: Operation::Credit,
                        year: 2024,
                        month: 4,
                        day: 1,
                    },
                    NormalizedRecord {
                        expense_date: "y".to_string(),
                        counterparty: "Shop B".to_string(),
                        amount: "-5.00".to_string(),
                        operation: Operation::Debit,
                        year: 2024,
                        month: 4,
                        day: 15,
                    },
                ]
            );
        }

        #[test]
        fn one_bad_date_fails_the_batch() {
            let result = transform(
                vec![
                    raw("1", "x", "A", "01/04/2024"),
                    raw("2", "y", "B", "2024-04-02"),
                ],
                DD_MM_YYYY,
            );
            assert!(matches!(result, Err(Error::DateParse { .. })));
        }

        #[test]
        fn empty_input() {
            assert!(transform(vec![], DD_MM_YYYY).unwrap().is_empty());
        }
    }
}
