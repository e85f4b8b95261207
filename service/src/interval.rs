use time::PrimitiveDateTime;

use crate::ServiceError;

/// Half-open time interval `[start, end)` with `start < end` enforced at
/// construction. A shift ending at 17:00 does not conflict with one
/// starting at 17:00.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
}

impl TimeInterval {
    pub fn new(start: PrimitiveDateTime, end: PrimitiveDateTime) -> Result<Self, ServiceError> {
        if start >= end {
            return Err(ServiceError::TimeOrderWrong(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    pub fn end(&self) -> PrimitiveDateTime {
        self.end
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
