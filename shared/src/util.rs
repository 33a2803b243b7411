use std::sync::atomic::{AtomicI64, Ordering};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Last ID handed out by [`snowflake_id`]
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a time-ordered i64 resource ID.
///
/// Layout (53 bits, safe as a JavaScript number):
///   - 41 bits: milliseconds since 2024-01-01 UTC
///   - 12 bits: per-millisecond sequence
///
/// IDs are strictly increasing within a process. When more than 4096 IDs
/// are requested in one millisecond the sequence borrows from the next
/// millisecond instead of wrapping.
pub fn snowflake_id() -> i64 {
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let floor = ts << 12;

    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = floor.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(current) => last = current,
        }
    }
}
