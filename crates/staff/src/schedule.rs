//! Monthly shift schedule and the per-staff sign-up state machine.
//!
//! A shift slot is identified by `(date, kind)`. Whether a given staff member
//! is signed up for it is derived from the slot's staff list every time; the
//! backend is the only source of truth and callers re-fetch after mutating.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use greedible_core::date::{calendar_date, optional_calendar_date};
use greedible_core::{DomainError, DomainResult, ScheduleId, StaffId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("You are already signed up for this shift.")]
    AlreadySignedUp,

    #[error("Could not find your assignment in this shift.")]
    AssignmentNotFound,
}

/// Morning or evening shift.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ShiftKind {
    Morning,
    Evening,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 2] = [ShiftKind::Morning, ShiftKind::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::Morning => "Morning",
            ShiftKind::Evening => "Evening",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(ShiftKind::Morning),
            "evening" => Ok(ShiftKind::Evening),
            other => Err(DomainError::validation(format!("unknown shift: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for ShiftKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A staff member assigned to a shift.
///
/// The backend is inconsistent about key names, so both `staff_id`/`id` and
/// `name`/`staff_name` are kept and resolved through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignedStaff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<StaffId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StaffId>,
    #[serde(default)]
    pub schedule_id: Option<ScheduleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl AssignedStaff {
    pub fn member_id(&self) -> Option<StaffId> {
        self.staff_id.or(self.id)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.staff_name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// First letter of the name, used when there is no avatar.
    pub fn initial(&self) -> char {
        self.display_name()
            .and_then(|n| n.chars().next())
            .unwrap_or('?')
    }

    fn is(&self, staff_id: StaffId) -> bool {
        self.member_id()
            .map(|id| id.to_string() == staff_id.to_string())
            .unwrap_or(false)
    }
}

/// Whether one staff member holds a place in one shift slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignmentState {
    Unassigned,
    SignedUp { schedule_id: Option<ScheduleId> },
}

/// Body of `POST /api/schedules` when a staff member signs up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    #[serde(with = "calendar_date")]
    pub shift_date: NaiveDate,
    pub shift: ShiftKind,
    pub staff_id: StaffId,
}

/// One shift on one day with the staff assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    #[serde(default)]
    pub id: Option<ScheduleId>,
    #[serde(default, with = "optional_calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "shift")]
    pub kind: ShiftKind,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub staff: Vec<AssignedStaff>,
}

impl ShiftSlot {
    pub fn assignment_for(&self, staff_id: StaffId) -> AssignmentState {
        match self.staff.iter().find(|s| s.is(staff_id)) {
            Some(s) => AssignmentState::SignedUp {
                schedule_id: s.schedule_id,
            },
            None => AssignmentState::Unassigned,
        }
    }

    /// Sign `staff_id` up for this slot on `date`.
    pub fn sign_up(&self, date: NaiveDate, staff_id: StaffId) -> Result<SignUpRequest, ScheduleError> {
        match self.assignment_for(staff_id) {
            AssignmentState::Unassigned => Ok(SignUpRequest {
                shift_date: date,
                shift: self.kind,
                staff_id,
            }),
            AssignmentState::SignedUp { .. } => Err(ScheduleError::AlreadySignedUp),
        }
    }

    /// Schedule row to delete so that `staff_id` leaves this slot.
    pub fn unassign(&self, staff_id: StaffId) -> Result<ScheduleId, ScheduleError> {
        match self.assignment_for(staff_id) {
            AssignmentState::SignedUp {
                schedule_id: Some(id),
            } => Ok(id),
            _ => Err(ScheduleError::AssignmentNotFound),
        }
    }

    pub fn headcount(&self) -> usize {
        self.staff.len()
    }
}

/// All shifts of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(rename = "date", with = "calendar_date")]
    pub day: NaiveDate,
    #[serde(default)]
    pub shifts: Vec<ShiftSlot>,
}

/// Schedule of a whole month as returned by `POST /api/schedules/month`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DaySchedule>,
}

impl MonthSchedule {
    pub fn new(year: i32, month: u32, mut days: Vec<DaySchedule>) -> Self {
        days.sort_by_key(|d| d.day);
        Self { year, month, days }
    }

    pub fn day(&self, day: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Slots of `kind` on `day`. Usually zero or one.
    pub fn shifts_on(&self, day: NaiveDate, kind: ShiftKind) -> Vec<&ShiftSlot> {
        self.day(day)
            .map(|d| d.shifts.iter().filter(|s| s.kind == kind).collect())
            .unwrap_or_default()
    }

    /// Days on which `staff_id` is signed up for at least one shift.
    pub fn shifts_of(&self, staff_id: StaffId) -> Vec<(NaiveDate, ShiftKind)> {
        self.days
            .iter()
            .flat_map(|d| {
                d.shifts
                    .iter()
                    .filter(move |s| s.assignment_for(staff_id) != AssignmentState::Unassigned)
                    .map(move |s| (d.day, s.kind))
            })
            .collect()
    }
}

/// Body of `POST /api/schedules` when a manager opens a new shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShift {
    #[serde(with = "calendar_date")]
    pub shift_date: NaiveDate,
    pub shift: ShiftKind,
}

/// Body of `DELETE /api/schedules/block`: every assignment of one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBlock {
    #[serde(with = "calendar_date")]
    pub shift_date: NaiveDate,
    pub shift: ShiftKind,
}

/// Month grid laid out Monday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st.
    pub leading_blanks: u32,
    pub days: Vec<NaiveDate>,
}

impl MonthCalendar {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| DomainError::validation(format!("invalid month: {year}-{month}")))?;
        let days: Vec<NaiveDate> = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .collect();
        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_monday(),
            days,
        })
    }

    pub fn days_in_month(&self) -> usize {
        self.days.len()
    }

    /// Rows of seven cells; `None` marks a blank.
    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        let cells: Vec<Option<NaiveDate>> = (0..self.leading_blanks)
            .map(|_| None)
            .chain(self.days.iter().copied().map(Some))
            .collect();
        cells
            .chunks(7)
            .map(|week| {
                let mut week = week.to_vec();
                week.resize(7, None);
                week
            })
            .collect()
    }
}
