use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    Admission, AdmissionStatus, Class, Event, EventStatus, Fee, FeeStatus, Gender, LogEntry,
    Notification, Salary, SalaryStatus, Severity, Student, StudentStatus, Teacher, TeacherStatus,
};
use crate::ui::SectionUi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Comparable projection of a record field. Mismatched kinds compare equal,
/// which only happens when an entity maps one key to different kinds (a bug).
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Str(String),
    Num(f64),
    Date(NaiveDate),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Str(a), SortValue::Str(b)) => a.cmp(b),
            (SortValue::Num(a), SortValue::Num(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// What the filter/sort/paginate engine needs from a record: a fixed haystack
/// of searchable string fields, a typed filter match, and sortable field
/// projections keyed by wire name.
pub trait Queryable {
    type Filters: Default + PartialEq;

    fn haystack(&self) -> Vec<&str>;
    fn matches(&self, filters: &Self::Filters) -> bool;
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

/// One visible page of a collection, plus the counts the UI renders around it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// Size of the whole collection, before search and filters.
    pub total: usize,
    /// Size of the filtered set this page was sliced from.
    pub filtered: usize,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
}

/// Derives the current page from a collection and its section UI state.
/// Recomputed on every call; nothing is cached.
pub fn visible_page<'a, T: Queryable>(items: &'a [T], ui: &SectionUi<T::Filters>) -> Page<'a, T> {
    let needle = ui.search_term.trim().to_lowercase();
    let mut matched: Vec<&T> = items
        .iter()
        .filter(|record| {
            let search_hit = needle.is_empty()
                || record
                    .haystack()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            search_hit && record.matches(&ui.filters)
        })
        .collect();

    if let Some(key) = ui.sort_by.as_deref() {
        matched.sort_by(|a, b| compare_by(*a, *b, key, ui.sort_direction));
    }

    // page_size 0 would slice nothing forever; clamp to 1. A page past the
    // end is left alone and simply yields an empty slice.
    let page_size = ui.page_size.max(1);
    let filtered = matched.len();
    let page_count = (filtered as u32).div_ceil(page_size);
    let start = (ui.current_page.saturating_sub(1) as usize) * page_size as usize;
    let page_items: Vec<&T> = matched
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Page {
        items: page_items,
        total: items.len(),
        filtered,
        page: ui.current_page,
        page_size,
        page_count,
    }
}

/// The one comparator shared by every collection: project both records onto
/// the sort key, three-way compare, flip for descending. Records without the
/// key sort last.
fn compare_by<T: Queryable>(a: &T, b: &T, key: &str, direction: SortDirection) -> Ordering {
    let ord = match (a.sort_value(key), b.sort_value(key)) {
        (Some(x), Some(y)) => x.compare(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

fn all_or<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    match filter {
        Some(wanted) => wanted == value,
        None => true,
    }
}

// Per-entity filter shapes. `None` means "all"; every `Some` must match
// exactly, and all active filters are ANDed together with the search term.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentFilters {
    pub status: Option<StudentStatus>,
    pub class: Option<String>,
    pub gender: Option<Gender>,
}

impl Queryable for Student {
    type Filters = StudentFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.email,
            &self.class_name,
            &self.roll_number,
            &self.parent_name,
        ]
    }

    fn matches(&self, f: &StudentFilters) -> bool {
        all_or(&f.status, &self.status)
            && all_or(&f.class, &self.class_name)
            && all_or(&f.gender, &self.gender)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Str(self.name.clone())),
            "rollNumber" => Some(SortValue::Str(self.roll_number.clone())),
            "className" => Some(SortValue::Str(self.class_name.clone())),
            "attendanceRate" => Some(SortValue::Num(self.attendance_rate)),
            "admissionDate" => Some(SortValue::Date(self.admission_date)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherFilters {
    pub status: Option<TeacherStatus>,
    pub department: Option<String>,
}

impl Queryable for Teacher {
    type Filters = TeacherFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.department, &self.subject]
    }

    fn matches(&self, f: &TeacherFilters) -> bool {
        all_or(&f.status, &self.status) && all_or(&f.department, &self.department)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Str(self.name.clone())),
            "department" => Some(SortValue::Str(self.department.clone())),
            "subject" => Some(SortValue::Str(self.subject.clone())),
            "joinedDate" => Some(SortValue::Date(self.joined_date)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassFilters {
    pub grade: Option<String>,
}

impl Queryable for Class {
    type Filters = ClassFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.grade, &self.section]
    }

    fn matches(&self, f: &ClassFilters) -> bool {
        all_or(&f.grade, &self.grade)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "name" => Some(SortValue::Str(self.name.clone())),
            "grade" => Some(SortValue::Str(self.grade.clone())),
            "enrolled" => Some(SortValue::Num(self.enrolled as f64)),
            "capacity" => Some(SortValue::Num(self.capacity as f64)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeFilters {
    pub status: Option<FeeStatus>,
    pub fee_type: Option<String>,
}

impl Queryable for Fee {
    type Filters = FeeFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.student_name, &self.fee_type]
    }

    fn matches(&self, f: &FeeFilters) -> bool {
        all_or(&f.status, &self.status) && all_or(&f.fee_type, &self.fee_type)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "studentName" => Some(SortValue::Str(self.student_name.clone())),
            "amount" => Some(SortValue::Num(self.amount)),
            "due" => Some(SortValue::Num(self.due)),
            "dueDate" => Some(SortValue::Date(self.due_date)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryFilters {
    pub status: Option<SalaryStatus>,
    pub month: Option<String>,
}

impl Queryable for Salary {
    type Filters = SalaryFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.teacher_name, &self.month]
    }

    fn matches(&self, f: &SalaryFilters) -> bool {
        all_or(&f.status, &self.status) && all_or(&f.month, &self.month)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "teacherName" => Some(SortValue::Str(self.teacher_name.clone())),
            "month" => Some(SortValue::Str(self.month.clone())),
            "net" => Some(SortValue::Num(self.net)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventFilters {
    pub status: Option<EventStatus>,
    pub category: Option<String>,
}

impl Queryable for Event {
    type Filters = EventFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.venue, &self.category]
    }

    fn matches(&self, f: &EventFilters) -> bool {
        all_or(&f.status, &self.status) && all_or(&f.category, &self.category)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "title" => Some(SortValue::Str(self.title.clone())),
            "category" => Some(SortValue::Str(self.category.clone())),
            "date" => Some(SortValue::Date(self.date)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionFilters {
    pub status: Option<AdmissionStatus>,
    pub grade: Option<String>,
}

impl Queryable for Admission {
    type Filters = AdmissionFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.applicant_name, &self.email, &self.grade]
    }

    fn matches(&self, f: &AdmissionFilters) -> bool {
        all_or(&f.status, &self.status) && all_or(&f.grade, &self.grade)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "applicantName" => Some(SortValue::Str(self.applicant_name.clone())),
            "grade" => Some(SortValue::Str(self.grade.clone())),
            "appliedOn" => Some(SortValue::Date(self.applied_on)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationFilters {
    pub severity: Option<Severity>,
    pub module: Option<String>,
    pub read: Option<bool>,
}

impl Queryable for Notification {
    type Filters = NotificationFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.message, &self.module]
    }

    fn matches(&self, f: &NotificationFilters) -> bool {
        all_or(&f.severity, &self.severity)
            && all_or(&f.module, &self.module)
            && all_or(&f.read, &self.read)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "title" => Some(SortValue::Str(self.title.clone())),
            "createdAt" => Some(SortValue::Date(self.created_at.date_naive())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogFilters {
    pub severity: Option<Severity>,
    pub module: Option<String>,
}

impl Queryable for LogEntry {
    type Filters = LogFilters;

    fn haystack(&self) -> Vec<&str> {
        vec![&self.actor, &self.action, &self.module, &self.message]
    }

    fn matches(&self, f: &LogFilters) -> bool {
        all_or(&f.severity, &self.severity) && all_or(&f.module, &self.module)
    }

    fn sort_value(&self, key: &str) -> Option<SortValue> {
        match key {
            "actor" => Some(SortValue::Str(self.actor.clone())),
            "module" => Some(SortValue::Str(self.module.clone())),
            "timestamp" => Some(SortValue::Date(self.timestamp.date_naive())),
            _ => None,
        }
    }
}
