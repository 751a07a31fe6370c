//! The buffered-overlap primitive.
//!
//! Every comparison in the engine goes through [`overlaps`] and
//! [`buffered_interval`], so the buffer semantics live in one place.

use chrono::{DateTime, Duration, Utc};

/// An interval expanded outward by a buffer on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BufferedInterval {
    /// True when the two buffered intervals overlap.
    pub fn overlaps(&self, other: &BufferedInterval) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

/// Half-open strict overlap: `a_start < b_end && b_start < a_end`.
///
/// Back-to-back intervals (`a_end == b_start`) and zero-length intervals
/// touching the other's boundary do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Expand `[start, end]` by `buffer_minutes` on each side.
///
/// A negative buffer shrinks the interval instead. Ends pushed past the
/// representable range saturate at [`DateTime::<Utc>::MIN_UTC`] and
/// [`DateTime::<Utc>::MAX_UTC`], so a huge buffer covers every instant and a
/// huge negative one leaves an inverted interval that overlaps nothing.
pub fn buffered_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    buffer_minutes: i64,
) -> BufferedInterval {
    let (low, high) = if buffer_minutes >= 0 {
        (DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
    } else {
        (DateTime::<Utc>::MAX_UTC, DateTime::<Utc>::MIN_UTC)
    };
    let buffer = Duration::try_minutes(buffer_minutes);
    BufferedInterval {
        start: buffer
            .and_then(|b| start.checked_sub_signed(b))
            .unwrap_or(low),
        end: buffer.and_then(|b| end.checked_add_signed(b)).unwrap_or(high),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap()
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn zero_length_interval_inside_other_overlaps() {
        assert!(overlaps(at(9, 30), at(9, 30), at(9, 0), at(10, 0)));
        assert!(!overlaps(at(9, 0), at(9, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn buffer_expands_both_ends() {
        let b = buffered_interval(at(10, 0), at(11, 0), 15);
        assert_eq!(b.start, at(9, 45));
        assert_eq!(b.end, at(11, 15));
    }

    #[test]
    fn out_of_range_buffer_saturates() {
        let wide = buffered_interval(at(10, 0), at(11, 0), i64::MAX);
        assert_eq!(wide.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(wide.end, DateTime::<Utc>::MAX_UTC);

        // Representable as a duration, but not once added to the instant.
        let past_range = buffered_interval(at(10, 0), at(11, 0), 1_000_000_000_000);
        assert_eq!(past_range, wide);
        assert!(past_range.overlaps(&buffered_interval(at(23, 0), at(23, 30), 0)));
    }

    #[test]
    fn out_of_range_negative_buffer_overlaps_nothing() {
        let inverted = buffered_interval(at(10, 0), at(11, 0), i64::MIN);
        assert_eq!(inverted.start, DateTime::<Utc>::MAX_UTC);
        assert_eq!(inverted.end, DateTime::<Utc>::MIN_UTC);
        assert!(!inverted.overlaps(&buffered_interval(at(10, 0), at(11, 0), i64::MAX)));
    }
}
