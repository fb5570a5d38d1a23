use chrono::{Duration, NaiveTime};
use unicode_width::UnicodeWidthStr;

/// Shown in place of a countdown that could not be computed.
pub const COUNTDOWN_PLACEHOLDER: &str = "--:--:--";

/// Format a duration as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_countdown(d: Duration) -> String {
    let total = d.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Format a bearing as e.g. "151.6°"
pub fn format_degrees(deg: f64) -> String {
    format!("{:.1}°", deg)
}

/// Right-pad by display width so Arabic and accented names line up.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pads_each_field() {
        assert_eq!(format_countdown(Duration::seconds(5)), "00:00:05");
        assert_eq!(format_countdown(Duration::seconds(3 * 3600 + 7 * 60 + 9)), "03:07:09");
    }

    #[test]
    fn hours_are_unbounded() {
        assert_eq!(format_countdown(Duration::hours(30)), "30:00:00");
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(format_countdown(Duration::seconds(-12)), "00:00:00");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_display("Asr", 6), "Asr   ");
        assert_eq!(pad_display("Maghrib", 3), "Maghrib");
    }
}
