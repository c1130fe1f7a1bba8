//! Display formatting for clocks and creation timestamps

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Locale used for timestamp labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayLocale {
    #[default]
    KoKr,
    EnUs,
}

impl DisplayLocale {
    /// BCP 47 tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::KoKr => "ko-KR",
            Self::EnUs => "en-US",
        }
    }
}

/// Format seconds as `M:SS`
///
/// Minutes are not capped at 59. Negative and non-finite input renders as
/// `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Short creation label for the track list (month, day, hour, minute)
///
/// `ko-KR`: `10월 17일 오후 03:04`, `en-US`: `Oct 17, 03:04 PM`.
pub fn format_list_timestamp(
    timestamp: DateTime<Utc>,
    locale: DisplayLocale,
    utc_offset_minutes: i32,
) -> String {
    let local = localize(timestamp, utc_offset_minutes);
    let (is_pm, hour12) = local.hour12();

    match locale {
        DisplayLocale::KoKr => format!(
            "{}월 {}일 {} {:02}:{:02}",
            local.month(),
            local.day(),
            if is_pm { "오후" } else { "오전" },
            hour12,
            local.minute()
        ),
        DisplayLocale::EnUs => format!(
            "{} {}, {:02}:{:02} {}",
            local.format("%b"),
            local.day(),
            hour12,
            local.minute(),
            if is_pm { "PM" } else { "AM" }
        ),
    }
}

/// Date-only label shown under the player
///
/// `ko-KR`: `2026. 10. 17.`, `en-US`: `10/17/2026`.
pub fn format_date(
    timestamp: DateTime<Utc>,
    locale: DisplayLocale,
    utc_offset_minutes: i32,
) -> String {
    let local = localize(timestamp, utc_offset_minutes);

    match locale {
        DisplayLocale::KoKr => format!("{}. {}. {}.", local.year(), local.month(), local.day()),
        DisplayLocale::EnUs => format!("{}/{}/{}", local.month(), local.day(), local.year()),
    }
}

fn localize(timestamp: DateTime<Utc>, utc_offset_minutes: i32) -> DateTime<FixedOffset> {
    // Out-of-range offsets degrade to UTC
    let offset =
        FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix());
    timestamp.with_timezone(&offset)
}
