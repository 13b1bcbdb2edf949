//! Screens that combine several resources.

use chrono::NaiveDate;
use tracing::warn;

use greedible_auth::{AuthzError, Screen, Session, StaffProfile, can_delete_shifts, can_manage_shifts};
use greedible_core::{DomainError, StaffId};
use greedible_inventory::{IngredientReport, assess_inventory};
use greedible_sales::MonthlySeries;
use greedible_staff::{MonthSchedule, NewShift, ScheduleError, ShiftBlock, ShiftKind, ShiftSlot};

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// Every ingredient with its expiration view as of `today`.
    ///
    /// Without restock details the ingredients are still listed, with
    /// unknown expiration.
    pub async fn inventory_overview(
        &self,
        session: &Session,
        today: NaiveDate,
    ) -> Result<Vec<IngredientReport>, ApiError> {
        let (ingredients, batches) =
            tokio::join!(self.ingredients(session), self.restock_batches(session));
        let ingredients = ingredients?;
        let batches = or_empty(batches, "restock details")?;
        Ok(assess_inventory(&ingredients, batches, today))
    }

    /// The dashboard series of one month.
    ///
    /// A failing source leaves its figures at zero; an expired session still
    /// fails the whole view.
    pub async fn monthly_dashboard(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<MonthlySeries, ApiError> {
        let (sales, revenue, imports) = tokio::join!(
            self.daily_sales(session, year, month),
            self.revenue(session),
            self.daily_import_totals(session, year, month),
        );
        let sales = or_empty(sales, "daily sales")?;
        let revenue = or_empty(revenue, "revenue")?;
        let imports = or_empty(imports, "daily import totals")?;

        Ok(MonthlySeries::build(year, month, &sales, &revenue, &imports)?)
    }
}

fn or_empty<T>(result: Result<Vec<T>, ApiError>, source: &str) -> Result<Vec<T>, ApiError> {
    match result {
        Ok(rows) => Ok(rows),
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            warn!(source, error = %e, "source unavailable, continuing without it");
            Ok(Vec::new())
        }
    }
}

/// The shift calendar of one month for the signed-in staff member.
///
/// Every mutation re-fetches the month; nothing is patched locally.
#[derive(Debug)]
pub struct ScheduleBoard<'a> {
    client: &'a ApiClient,
    session: &'a Session,
    schedule: MonthSchedule,
}

impl<'a> ScheduleBoard<'a> {
    pub async fn load(
        client: &'a ApiClient,
        session: &'a Session,
        year: i32,
        month: u32,
    ) -> Result<Self, ApiError> {
        let schedule = client.month_schedule(session, year, month).await?;
        Ok(Self {
            client,
            session,
            schedule,
        })
    }

    pub fn schedule(&self) -> &MonthSchedule {
        &self.schedule
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.schedule = self
            .client
            .month_schedule(self.session, self.schedule.year, self.schedule.month)
            .await?;
        Ok(())
    }

    /// Sign the current user up for `kind` on `date`.
    pub async fn sign_up(&mut self, date: NaiveDate, kind: ShiftKind) -> Result<(), ApiError> {
        let staff_id = self.staff_id()?;
        let request = match self.slot(date, kind) {
            Some(slot) => slot.sign_up(date, staff_id)?,
            None => empty_slot(date, kind).sign_up(date, staff_id)?,
        };
        self.client.sign_up(self.session, &request).await?;
        self.refresh().await
    }

    /// Remove the current user's assignment from `kind` on `date`.
    pub async fn unassign(&mut self, date: NaiveDate, kind: ShiftKind) -> Result<(), ApiError> {
        let staff_id = self.staff_id()?;
        let slot = self
            .slot(date, kind)
            .ok_or(ScheduleError::AssignmentNotFound)?;
        let schedule_id = slot.unassign(staff_id)?;
        self.client
            .remove_assignment(self.session, schedule_id)
            .await?;
        self.refresh().await
    }

    /// Open an empty shift. Managers and admins only.
    pub async fn create_shift(&mut self, date: NaiveDate, kind: ShiftKind) -> Result<(), ApiError> {
        let profile = self.profile()?;
        if !can_manage_shifts(&profile.role) {
            return Err(AuthzError::Forbidden {
                redirect: Screen::Staff,
            }
            .into());
        }
        let shift = NewShift {
            shift_date: date,
            shift: kind,
        };
        self.client.create_shift(self.session, &shift).await?;
        self.refresh().await
    }

    /// Delete a shift with all of its assignments. Managers only.
    pub async fn delete_shift(&mut self, date: NaiveDate, kind: ShiftKind) -> Result<(), ApiError> {
        let profile = self.profile()?;
        if !can_delete_shifts(&profile.role) {
            return Err(AuthzError::Forbidden {
                redirect: Screen::Staff,
            }
            .into());
        }
        let block = ShiftBlock {
            shift_date: date,
            shift: kind,
        };
        self.client.delete_shift_block(self.session, &block).await?;
        self.refresh().await
    }

    fn slot(&self, date: NaiveDate, kind: ShiftKind) -> Option<&ShiftSlot> {
        self.schedule.shifts_on(date, kind).into_iter().next()
    }

    fn profile(&self) -> Result<&StaffProfile, ApiError> {
        self.session
            .profile
            .as_ref()
            .ok_or(ApiError::Authz(AuthzError::Unauthenticated))
    }

    fn staff_id(&self) -> Result<StaffId, ApiError> {
        self.session.staff_id().ok_or_else(|| {
            DomainError::validation("Shift date, shift time, and staff ID are required.").into()
        })
    }
}

fn empty_slot(date: NaiveDate, kind: ShiftKind) -> ShiftSlot {
    ShiftSlot {
        id: None,
        date: Some(date),
        kind,
        time: None,
        staff: Vec::new(),
    }
}
