use chrono::NaiveDate;
use daybook::domain::Day;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn day_with_text(year: i32, month: u32, day: u32, text: &str) -> Day {
    let mut result = Day::new(date(year, month, day));
    result.set_text(text);
    result
}
