use time::{Month, OffsetDateTime, Weekday};

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Senin",
        Weekday::Tuesday => "Selasa",
        Weekday::Wednesday => "Rabu",
        Weekday::Thursday => "Kamis",
        Weekday::Friday => "Jumat",
        Weekday::Saturday => "Sabtu",
        Weekday::Sunday => "Minggu",
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Januari",
        Month::February => "Februari",
        Month::March => "Maret",
        Month::April => "April",
        Month::May => "Mei",
        Month::June => "Juni",
        Month::July => "Juli",
        Month::August => "Agustus",
        Month::September => "September",
        Month::October => "Oktober",
        Month::November => "November",
        Month::December => "Desember",
    }
}

/// Formats the calendar date in the value's own offset, e.g. `Senin, 15 Januari 2024`.
pub fn long_date(value: OffsetDateTime) -> String {
    format!(
        "{}, {} {} {}",
        day_name(value.weekday()),
        value.day(),
        month_name(value.month()),
        value.year()
    )
}
