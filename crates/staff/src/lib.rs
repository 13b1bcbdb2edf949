//! `greedible-staff`: staff records, payroll views and the shift schedule.

pub mod member;
pub mod schedule;

pub use member::{EmployeePay, NewStaffMember, SalarySummary, StaffMember, total_payroll};
pub use schedule::{
    AssignedStaff, AssignmentState, DaySchedule, MonthCalendar, MonthSchedule, NewShift,
    ScheduleError, ShiftBlock, ShiftKind, ShiftSlot, SignUpRequest,
};
