use std::sync::OnceLock;

use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Capture the local UTC offset. Lookups fail on Unix once a second thread
/// exists, so call this at the top of `main`.
pub fn init_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Current local time, or UTC when the offset is unknown.
pub fn now() -> OffsetDateTime {
    let offset = LOCAL_OFFSET
        .get()
        .copied()
        .or_else(|| UtcOffset::current_local_offset().ok())
        .unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset)
}

/// Wall-clock time without an offset, comparable with assignment due dates.
pub fn local_now() -> PrimitiveDateTime {
    let now = now();
    PrimitiveDateTime::new(now.date(), now.time())
}

pub fn today() -> Date {
    now().date()
}
