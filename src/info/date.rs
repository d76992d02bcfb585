use chrono::{Datelike, NaiveDate, Weekday};

/// Render an ISO `YYYY-MM-DD` date as a full French calendar date with the
/// leading letter capitalized, e.g. `"Mercredi 12 juillet 2023"`. Returns
/// `None` on absent or unparseable input; callers substitute their sentinel.
pub(crate) fn full_french_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;
    let weekday = match date.weekday() {
        Weekday::Mon => "lundi",
        Weekday::Tue => "mardi",
        Weekday::Wed => "mercredi",
        Weekday::Thu => "jeudi",
        Weekday::Fri => "vendredi",
        Weekday::Sat => "samedi",
        Weekday::Sun => "dimanche",
    };
    let month = match date.month() {
        1 => "janvier",
        2 => "février",
        3 => "mars",
        4 => "avril",
        5 => "mai",
        6 => "juin",
        7 => "juillet",
        8 => "août",
        9 => "septembre",
        10 => "octobre",
        11 => "novembre",
        12 => "décembre",
        _ => unreachable!(),
    };
    Some(capitalize_first(&format!(
        "{weekday} {} {month} {}",
        date.day(),
        date.year()
    )))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
