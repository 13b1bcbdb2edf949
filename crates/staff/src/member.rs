use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use greedible_core::{DomainError, DomainResult, Entity, Money, StaffId};

/// A staff member as listed by `GET /api/staff/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub staff_id: StaffId,
    pub staff_name: String,
    #[serde(default)]
    pub staff_email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub pay_rates: Option<Money>,
}

impl Entity for StaffMember {
    type Id = StaffId;

    fn id(&self) -> &Self::Id {
        &self.staff_id
    }
}

/// Body of `POST /api/staff`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStaffMember {
    pub staff_name: String,
    pub staff_email: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub pay_rates: Decimal,
}

impl core::fmt::Debug for NewStaffMember {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NewStaffMember")
            .field("staff_name", &self.staff_name)
            .field("staff_email", &self.staff_email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("phone", &self.phone)
            .field("pay_rates", &self.pay_rates)
            .finish()
    }
}

impl NewStaffMember {
    pub fn validate(&self) -> DomainResult<()> {
        if self.staff_name.trim().is_empty() {
            return Err(DomainError::validation("Staff name is required."));
        }
        if !self.staff_email.contains('@') {
            return Err(DomainError::validation("A valid email is required."));
        }
        if self.password.is_empty() {
            return Err(DomainError::validation("Password is required."));
        }
        if self.role.trim().is_empty() {
            return Err(DomainError::validation("Role is required."));
        }
        if self.pay_rates.is_sign_negative() {
            return Err(DomainError::validation("Pay rate cannot be negative."));
        }
        Ok(())
    }
}

/// Hours worked and salary earned by the signed-in staff member in a month.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalarySummary {
    #[serde(default)]
    pub hours: Decimal,
    #[serde(default)]
    pub salary: Money,
}

/// One employee row of the manager's monthly salary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePay {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub total_pay: Money,
}

/// Total payroll of a month.
pub fn total_payroll(employees: &[EmployeePay]) -> Money {
    employees.iter().map(|e| e.total_pay).sum()
}
