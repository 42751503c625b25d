use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::{
    Admission, AdmissionStatus, DashboardMetrics, Event, EventStatus, Fee, FeeStatus, Notification,
    Salary, SalaryStatus, Severity, Student, StudentStatus, Teacher, TeacherStatus,
};

// Dashboard aggregates are always computed over the whole collection; search,
// filters and pagination never apply here. Every function is pure, and the
// time-windowed ones take `as_of` instead of reading the clock so callers and
// tests control "now". "This month" means month-to-date: from the first of
// `as_of`'s month through `as_of` itself, so future-dated records never count.
// Empty collections yield 0 everywhere, never NaN.

fn first_of_month(as_of: NaiveDate) -> NaiveDate {
    as_of.with_day(1).unwrap_or(as_of)
}

fn ratio_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub graduated: usize,
    pub suspended: usize,
    pub new_this_month: usize,
    pub average_attendance: f64,
    pub by_class: BTreeMap<String, usize>,
}

pub fn student_stats(students: &[Student], as_of: NaiveDate) -> StudentStats {
    let month_start = first_of_month(as_of);
    let mut by_class: BTreeMap<String, usize> = BTreeMap::new();
    for s in students {
        *by_class.entry(s.class_name.clone()).or_insert(0) += 1;
    }
    let average_attendance = if students.is_empty() {
        0.0
    } else {
        students.iter().map(|s| s.attendance_rate).sum::<f64>() / students.len() as f64
    };
    StudentStats {
        total: students.len(),
        active: count(students, |s| s.status == StudentStatus::Active),
        inactive: count(students, |s| s.status == StudentStatus::Inactive),
        graduated: count(students, |s| s.status == StudentStatus::Graduated),
        suspended: count(students, |s| s.status == StudentStatus::Suspended),
        new_this_month: count(students, |s| {
            s.admission_date >= month_start && s.admission_date <= as_of
        }),
        average_attendance,
        by_class,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    pub total: usize,
    pub active: usize,
    pub on_leave: usize,
    pub by_department: BTreeMap<String, usize>,
}

pub fn teacher_stats(teachers: &[Teacher]) -> TeacherStats {
    let mut by_department: BTreeMap<String, usize> = BTreeMap::new();
    for t in teachers {
        *by_department.entry(t.department.clone()).or_insert(0) += 1;
    }
    TeacherStats {
        total: teachers.len(),
        active: count(teachers, |t| t.status == TeacherStatus::Active),
        on_leave: count(teachers, |t| t.status == TeacherStatus::OnLeave),
        by_department,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStats {
    pub total: usize,
    pub collected: f64,
    pub outstanding: f64,
    pub paid_count: usize,
    pub partial_count: usize,
    pub due_count: usize,
    pub overdue_count: usize,
    /// Collected as a percentage of everything billed; 0 when nothing billed.
    pub collection_rate: f64,
}

pub fn fee_stats(fees: &[Fee]) -> FeeStats {
    let collected: f64 = fees.iter().map(|f| f.paid).sum();
    let billed: f64 = fees.iter().map(|f| f.amount).sum();
    FeeStats {
        total: fees.len(),
        collected,
        outstanding: fees.iter().map(|f| f.due).sum(),
        paid_count: count(fees, |f| f.status == FeeStatus::Paid),
        partial_count: count(fees, |f| f.status == FeeStatus::Partial),
        due_count: count(fees, |f| f.status == FeeStatus::Due),
        overdue_count: count(fees, |f| f.status == FeeStatus::Overdue),
        collection_rate: ratio_percent(collected, billed),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStats {
    pub total: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
    pub paid_amount: f64,
    pub pending_amount: f64,
}

pub fn salary_stats(salaries: &[Salary]) -> SalaryStats {
    SalaryStats {
        total: salaries.len(),
        paid_count: count(salaries, |s| s.status == SalaryStatus::Paid),
        pending_count: count(salaries, |s| s.status == SalaryStatus::Pending),
        overdue_count: count(salaries, |s| s.status == SalaryStatus::Overdue),
        paid_amount: salaries
            .iter()
            .filter(|s| s.status == SalaryStatus::Paid)
            .map(|s| s.net)
            .sum(),
        pending_amount: salaries
            .iter()
            .filter(|s| s.status != SalaryStatus::Paid)
            .map(|s| s.net)
            .sum(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub this_month: usize,
}

pub fn event_stats(events: &[Event], as_of: NaiveDate) -> EventStats {
    let month_start = first_of_month(as_of);
    EventStats {
        total: events.len(),
        upcoming: count(events, |e| {
            e.date >= as_of && e.status != EventStatus::Cancelled && e.status != EventStatus::Completed
        }),
        completed: count(events, |e| e.status == EventStatus::Completed),
        cancelled: count(events, |e| e.status == EventStatus::Cancelled),
        this_month: count(events, |e| {
            e.date >= month_start && e.date.month() == as_of.month() && e.date.year() == as_of.year()
        }),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub new_this_month: usize,
    /// Approved as a percentage of decided applications; 0 when none decided.
    pub approval_rate: f64,
}

pub fn admission_stats(admissions: &[Admission], as_of: NaiveDate) -> AdmissionStats {
    let month_start = first_of_month(as_of);
    let approved = count(admissions, |a| a.status == AdmissionStatus::Approved);
    let rejected = count(admissions, |a| a.status == AdmissionStatus::Rejected);
    AdmissionStats {
        total: admissions.len(),
        pending: count(admissions, |a| a.status == AdmissionStatus::Pending),
        approved,
        rejected,
        new_this_month: count(admissions, |a| {
            a.applied_on >= month_start && a.applied_on <= as_of
        }),
        approval_rate: ratio_percent(approved as f64, (approved + rejected) as f64),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub total: usize,
    pub unread: usize,
    pub info: usize,
    pub warning: usize,
    pub critical: usize,
}

pub fn notification_stats(notifications: &[Notification]) -> NotificationStats {
    NotificationStats {
        total: notifications.len(),
        unread: count(notifications, |n| !n.read),
        info: count(notifications, |n| n.severity == Severity::Info),
        warning: count(notifications, |n| n.severity == Severity::Warning),
        critical: count(notifications, |n| n.severity == Severity::Critical),
    }
}

/// The card numbers on the landing dashboard, composed from the per-entity
/// aggregates above.
pub fn dashboard_metrics(
    students: &[Student],
    teachers: &[Teacher],
    class_count: usize,
    fees: &[Fee],
    events: &[Event],
    admissions: &[Admission],
    notifications: &[Notification],
    as_of: NaiveDate,
) -> DashboardMetrics {
    let fee = fee_stats(fees);
    DashboardMetrics {
        total_students: students.len(),
        total_teachers: teachers.len(),
        total_classes: class_count,
        fees_collected: fee.collected,
        fees_outstanding: fee.outstanding,
        upcoming_events: event_stats(events, as_of).upcoming,
        pending_admissions: admission_stats(admissions, as_of).pending,
        unread_notifications: notification_stats(notifications).unread,
    }
}

fn count<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|i| pred(i)).count()
}
