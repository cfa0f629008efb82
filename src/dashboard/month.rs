//! Helpers for the `YYYY-MM` month keys that drive the dashboard.
//!
//! Month keys stay plain strings end to end (transaction dates are filtered
//! by prefix), so this module only parses them at the edges: to step to the
//! neighbouring month, to render the Portuguese label, and to apply the
//! default-date rule for new transactions.

use time::{Date, OffsetDateTime};

use crate::Error;

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// The month key for today's date.
pub fn current_month_key() -> String {
    month_key_of(OffsetDateTime::now_utc().date())
}

/// The `YYYY-MM` key of `date`.
pub fn month_key_of(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Parse `key` as a `(year, month)` pair.
///
/// # Errors
/// Returns [Error::InvalidMonthKey] unless `key` is exactly four digits, a
/// dash and two digits, with the month between 01 and 12.
pub fn parse_month_key(key: &str) -> Result<(i32, u8), Error> {
    let parsed = key.split_once('-').and_then(|(year_part, month_part)| {
        if year_part.len() != 4
            || month_part.len() != 2
            || !year_part.bytes().all(|byte| byte.is_ascii_digit())
            || !month_part.bytes().all(|byte| byte.is_ascii_digit())
        {
            return None;
        }

        let year = year_part.parse().ok()?;
        let month: u8 = month_part.parse().ok()?;

        (1..=12).contains(&month).then_some((year, month))
    });

    parsed.ok_or_else(|| Error::InvalidMonthKey(key.to_owned()))
}

/// Step `key` by `offset` months, wrapping across year boundaries.
///
/// # Errors
/// Returns [Error::InvalidMonthKey] if `key` does not parse.
pub fn shift_month_key(key: &str, offset: i32) -> Result<String, Error> {
    let (year, month) = parse_month_key(key)?;

    let month_index = (month as i32 - 1) + offset;
    let year = year + month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) + 1;

    Ok(format!("{year:04}-{month:02}"))
}

/// The uppercase Portuguese label for `key`, e.g. "MAIO DE 2024".
///
/// # Errors
/// Returns [Error::InvalidMonthKey] if `key` does not parse.
pub fn month_label(key: &str) -> Result<String, Error> {
    let (year, month) = parse_month_key(key)?;
    let name = MONTH_NAMES[month as usize - 1];

    Ok(format!("{name} de {year}").to_uppercase())
}

/// The date a new transaction is filed under when viewing `month_key`.
///
/// Today's date if today falls inside the viewed month, otherwise the first
/// day of that month. There is no date input on the form; this rule is the
/// only source of transaction dates.
pub fn default_transaction_date(month_key: &str, today: Date) -> String {
    if month_key_of(today) == month_key {
        format!(
            "{:04}-{:02}-{:02}",
            today.year(),
            u8::from(today.month()),
            today.day()
        )
    } else {
        format!("{month_key}-01")
    }
}
