use crate::models::block::{BlockState, TimeBlock};

const PRODID: &str = "-//Orbita//Orbita CLI//EN";

/// Escapes a text value per RFC 5545: commas, semicolons, backslashes and
/// newlines become `\,` `\;` `\\` `\n`.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Inverse of `escape_text`, satisfying `escape(unescape(x)) == x` for
/// the four escape sequences.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some(',') => {
                    out.push(',');
                    chars.next();
                }
                Some(';') => {
                    out.push(';');
                    chars.next();
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                Some('n') => {
                    out.push('\n');
                    chars.next();
                }
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn format_utc_stamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

fn status_for(block: &TimeBlock) -> &'static str {
    match block.state {
        BlockState::Completed => "CONFIRMED",
        BlockState::Missed => "CANCELLED",
        BlockState::Pending => "TENTATIVE",
    }
}

/// Encodes a single time block as a `BEGIN:VEVENT`..`END:VEVENT` body,
/// CRLF-terminated, with UTC timestamps and the escaping rules above.
/// UID is `<blockId>@orbita`.
pub fn encode_vevent(block: &TimeBlock, dtstamp: chrono::DateTime<chrono::Utc>) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VEVENT\r\n");
    out.push_str(&format!("UID:{}@orbita\r\n", block.id));
    out.push_str(&format!("DTSTAMP:{}\r\n", format_utc_stamp(dtstamp)));
    out.push_str(&format!("DTSTART:{}\r\n", format_utc_stamp(block.start)));
    out.push_str(&format!("DTEND:{}\r\n", format_utc_stamp(block.end)));
    out.push_str(&format!(
        "SUMMARY:{}\r\n",
        escape_text(block.title.as_str())
    ));
    out.push_str(&format!(
        "CATEGORIES:{}\r\n",
        block.block_type.as_category()
    ));
    out.push_str(&format!("STATUS:{}\r\n", status_for(block)));
    out.push_str("END:VEVENT\r\n");
    out
}

/// Encodes a full `VCALENDAR` wrapping one `VEVENT` per block.
pub fn encode_vcalendar(
    blocks: &[TimeBlock],
    dtstamp: chrono::DateTime<chrono::Utc>,
) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VCALENDAR\r\n");
    out.push_str("VERSION:2.0\r\n");
    out.push_str(&format!("PRODID:{PRODID}\r\n"));
    for block in blocks {
        out.push_str(&encode_vevent(block, dtstamp));
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}
