use std::fmt;

use crate::{core::timer::TimerMode, models::Color};

/// Accent colors for the timer, one per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTheme {
    pub name: &'static str,
    focus: Color,
    short_break: Color,
    long_break: Color,
}

const fn theme(name: &'static str, focus: u32, short_break: u32, long_break: u32) -> TimerTheme {
    TimerTheme {
        name,
        focus: hex(focus),
        short_break: hex(short_break),
        long_break: hex(long_break),
    }
}

const fn hex(value: u32) -> Color {
    Color::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

pub const TIMER_THEMES: [TimerTheme; 8] = [
    theme("Classic", 0xef4444, 0x3b82f6, 0x22c55e),
    theme("Ocean", 0x06b6d4, 0x2dd4bf, 0x0ea5e9),
    theme("Forest", 0x16a34a, 0x84cc16, 0x10b981),
    theme("Sunset", 0xf97316, 0xf59e0b, 0xfacc15),
    theme("Royal", 0x9333ea, 0x8b5cf6, 0xd946ef),
    theme("Strawberry", 0xef4444, 0xf472b6, 0xfb7185),
    theme("Coffee", 0x57534e, 0xb45309, 0x854d0e),
    theme("Mono", 0x1f2937, 0x4b5563, 0x6b7280),
];

impl TimerTheme {
    /// Theme called `name`, or the first one when unknown or unset.
    pub fn find(name: Option<&str>) -> Self {
        name.and_then(|name| {
            TIMER_THEMES
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(name))
        })
        .copied()
        .unwrap_or(TIMER_THEMES[0])
    }

    pub fn accent(&self, mode: TimerMode) -> Color {
        match mode {
            TimerMode::Focus => self.focus,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}

impl fmt::Display for TimerTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
