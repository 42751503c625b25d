use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
    Suspended,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeacherStatus {
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeStatus {
    Paid,
    Partial,
    Due,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryStatus {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Plain reference; the store never checks that the class exists.
    pub class_id: String,
    pub class_name: String,
    pub roll_number: String,
    pub parent_name: String,
    pub gender: Gender,
    pub status: StudentStatus,
    pub attendance_rate: f64,
    pub admission_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub subject: String,
    pub status: TeacherStatus,
    pub joined_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub section: String,
    pub teacher_id: String,
    pub capacity: u32,
    pub enrolled: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub fee_type: String,
    pub amount: f64,
    pub paid: f64,
    pub due: f64,
    pub status: FeeStatus,
    pub due_date: NaiveDate,
    pub last_payment: Option<NaiveDate>,
    pub payment_method: Option<String>,
}

impl Fee {
    /// Applies a payment and recomputes every dependent field in one step.
    /// `due` is floored at zero; overpayment never drives it negative.
    pub fn record_payment(&mut self, amount: f64, method: &str, on: NaiveDate) {
        self.paid += amount;
        self.due = (self.amount - self.paid).max(0.0);
        self.status = if self.due == 0.0 {
            FeeStatus::Paid
        } else {
            FeeStatus::Partial
        };
        self.last_payment = Some(on);
        self.payment_method = Some(method.to_string());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: String,
    pub teacher_id: String,
    pub teacher_name: String,
    /// Pay period as YYYY-MM.
    pub month: String,
    pub amount: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net: f64,
    pub status: SalaryStatus,
    pub paid_on: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl Salary {
    pub fn mark_paid(&mut self, on: NaiveDate, remarks: Option<String>) {
        self.status = SalaryStatus::Paid;
        self.paid_on = Some(on);
        if remarks.is_some() {
            self.remarks = remarks;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub venue: String,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub id: String,
    pub applicant_name: String,
    pub email: String,
    pub grade: String,
    pub previous_school: Option<String>,
    pub status: AdmissionStatus,
    pub applied_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub module: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// Stamped automatically on every update; the only entity with this behavior.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub module: String,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_students: usize,
    pub total_teachers: usize,
    pub total_classes: usize,
    pub fees_collected: f64,
    pub fees_outstanding: f64,
    pub upcoming_events: usize,
    pub pending_admissions: usize,
    pub unread_notifications: usize,
}
