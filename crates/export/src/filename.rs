use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

const ISO_DATE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Build the download filename for an export artifact.
///
/// Pure function of its inputs so repeated exports of the same plan produce
/// byte-identical names. The user name fragment is reduced to a slug safe
/// for a `Content-Disposition` header: quotes, control characters and path
/// separators never survive. A name that sanitizes to nothing falls back to
/// the generic form.
pub fn export_filename(
    start_date: Date,
    days: u16,
    user_name: Option<&str>,
    extension: &str,
) -> String {
    // The description contains no invalid components, formatting a Date
    // cannot fail.
    let date = start_date
        .format(&ISO_DATE)
        .unwrap_or_else(|_| String::new());

    match user_name.and_then(slug) {
        Some(slug) => format!("meal-plan_{date}_{days}-days_{slug}.{extension}"),
        None => format!("meal-plan_{date}_{days}-days.{extension}"),
    }
}

fn slug(raw: &str) -> Option<String> {
    let mut out = String::new();
    let mut pending_sep = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    (!out.is_empty()).then_some(out)
}
