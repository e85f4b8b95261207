use std::sync::Arc;

use rota_utils::derive_from_reference;
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShiftTO {
    #[serde(default)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub start_time: PrimitiveDateTime,
    pub end_time: PrimitiveDateTime,
    pub role: Arc<str>,
    pub shift_type: Arc<str>,
    #[serde(default)]
    pub created: Option<PrimitiveDateTime>,
}
impl From<&service::shift::Shift> for ShiftTO {
    fn from(shift: &service::shift::Shift) -> Self {
        Self {
            id: shift.id,
            employee_id: shift.employee_id,
            date: shift.date,
            start_time: shift.start_time,
            end_time: shift.end_time,
            role: shift.role.clone(),
            shift_type: shift.shift_type.clone(),
            created: shift.created,
        }
    }
}
derive_from_reference!(service::shift::Shift, ShiftTO);

/// Creation payload. Fields stay optional so that incomplete requests reach
/// the validation layer and come back as itemized failures, not 422s.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ShiftCandidateTO {
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub start_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub end_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub role: Option<Arc<str>>,
    #[serde(default)]
    pub shift_type: Option<Arc<str>>,
}
impl From<&ShiftCandidateTO> for service::shift::ShiftCandidate {
    fn from(candidate: &ShiftCandidateTO) -> Self {
        Self {
            employee_id: candidate.employee_id,
            date: candidate.date,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
            role: candidate.role.clone(),
            shift_type: candidate.shift_type.clone(),
        }
    }
}
derive_from_reference!(ShiftCandidateTO, service::shift::ShiftCandidate);

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ShiftPatchTO {
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub start_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub end_time: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub role: Option<Arc<str>>,
    #[serde(default)]
    pub shift_type: Option<Arc<str>>,
}
impl From<&ShiftPatchTO> for service::shift::ShiftPatch {
    fn from(patch: &ShiftPatchTO) -> Self {
        Self {
            date: patch.date,
            start_time: patch.start_time,
            end_time: patch.end_time,
            role: patch.role.clone(),
            shift_type: patch.shift_type.clone(),
        }
    }
}
derive_from_reference!(ShiftPatchTO, service::shift::ShiftPatch);

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BulkCreateRequestTO {
    pub shifts: Vec<ShiftCandidateTO>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BulkConflictTO {
    pub employee_id: Option<Uuid>,
    pub date: Option<Date>,
    pub employee_name: Option<Arc<str>>,
    pub reason: Arc<str>,
}
impl From<&service::shift::BulkConflict> for BulkConflictTO {
    fn from(conflict: &service::shift::BulkConflict) -> Self {
        Self {
            employee_id: conflict.employee_id,
            date: conflict.date,
            employee_name: conflict.employee_name.clone(),
            reason: conflict.reason.as_str().into(),
        }
    }
}
derive_from_reference!(service::shift::BulkConflict, BulkConflictTO);

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BulkResultTO {
    pub successful: u32,
    pub failed: u32,
    pub conflicts: Vec<BulkConflictTO>,
}
impl From<&service::shift::BulkResult> for BulkResultTO {
    fn from(result: &service::shift::BulkResult) -> Self {
        Self {
            successful: result.successful,
            failed: result.failed,
            conflicts: result.conflicts.iter().map(BulkConflictTO::from).collect(),
        }
    }
}
derive_from_reference!(service::shift::BulkResult, BulkResultTO);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum AvailabilityStatusTO {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "SCHEDULED")]
    Scheduled,
    #[serde(rename = "ON_LEAVE")]
    OnLeave,
}
impl From<service::availability::AvailabilityStatus> for AvailabilityStatusTO {
    fn from(status: service::availability::AvailabilityStatus) -> Self {
        match status {
            service::availability::AvailabilityStatus::Available => Self::Available,
            service::availability::AvailabilityStatus::Scheduled => Self::Scheduled,
            service::availability::AvailabilityStatus::OnLeave => Self::OnLeave,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StaffAvailabilityTO {
    pub employee_id: Uuid,
    pub name: Arc<str>,
    pub email: Arc<str>,
    pub department: Option<Arc<str>>,
    pub status: AvailabilityStatusTO,
    #[serde(default)]
    pub scheduled_start: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub scheduled_end: Option<PrimitiveDateTime>,
}
impl From<&service::availability::StaffAvailability> for StaffAvailabilityTO {
    fn from(availability: &service::availability::StaffAvailability) -> Self {
        Self {
            employee_id: availability.employee_id,
            name: availability.name.clone(),
            email: availability.email.clone(),
            department: availability.department.clone(),
            status: availability.status.into(),
            scheduled_start: availability
                .scheduled_time
                .as_ref()
                .map(|interval| interval.start()),
            scheduled_end: availability
                .scheduled_time
                .as_ref()
                .map(|interval| interval.end()),
        }
    }
}
derive_from_reference!(service::availability::StaffAvailability, StaffAvailabilityTO);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum SwapStatusTO {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "REJECTED")]
    Rejected,
}
impl From<service::swap::SwapStatus> for SwapStatusTO {
    fn from(status: service::swap::SwapStatus) -> Self {
        match status {
            service::swap::SwapStatus::Pending => Self::Pending,
            service::swap::SwapStatus::Approved => Self::Approved,
            service::swap::SwapStatus::Rejected => Self::Rejected,
        }
    }
}
impl From<SwapStatusTO> for service::swap::SwapStatus {
    fn from(status: SwapStatusTO) -> Self {
        match status {
            SwapStatusTO::Pending => Self::Pending,
            SwapStatusTO::Approved => Self::Approved,
            SwapStatusTO::Rejected => Self::Rejected,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SwapRequestTO {
    #[serde(default)]
    pub id: Uuid,
    pub requester_id: Uuid,
    pub requested_with_id: Uuid,
    pub original_shift_id: Uuid,
    pub status: SwapStatusTO,
    #[serde(default)]
    pub created: Option<PrimitiveDateTime>,
}
impl From<&service::swap::SwapRequest> for SwapRequestTO {
    fn from(swap: &service::swap::SwapRequest) -> Self {
        Self {
            id: swap.id,
            requester_id: swap.requester_id,
            requested_with_id: swap.requested_with_id,
            original_shift_id: swap.original_shift_id,
            status: swap.status.into(),
            created: swap.created,
        }
    }
}
derive_from_reference!(service::swap::SwapRequest, SwapRequestTO);

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SwapCandidateTO {
    #[serde(default)]
    pub requester_id: Option<Uuid>,
    #[serde(default)]
    pub requested_with_id: Option<Uuid>,
    #[serde(default)]
    pub original_shift_id: Option<Uuid>,
}
impl From<&SwapCandidateTO> for service::swap::SwapCandidate {
    fn from(candidate: &SwapCandidateTO) -> Self {
        Self {
            requester_id: candidate.requester_id,
            requested_with_id: candidate.requested_with_id,
            original_shift_id: candidate.original_shift_id,
        }
    }
}
derive_from_reference!(SwapCandidateTO, service::swap::SwapCandidate);

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct SwapStatusUpdateTO {
    pub status: SwapStatusTO,
}
