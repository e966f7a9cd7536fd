use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Formats a date the way it is shown in emails, e.g.
/// `19 de octubre de 2026, 02:05 p. m.`
pub fn format_local_date(time: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = time.with_timezone(&offset);
    let (pm, hour) = local.hour12();
    format!(
        "{} de {} de {}, {hour:02}:{:02} {}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.minute(),
        if pm { "p. m." } else { "a. m." }
    )
}
