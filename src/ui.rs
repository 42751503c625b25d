use serde::{Deserialize, Serialize};

use crate::query::{
    AdmissionFilters, ClassFilters, EventFilters, FeeFilters, LogFilters, NotificationFilters,
    SalaryFilters, SortDirection, StudentFilters, TeacherFilters,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-section view state: pagination, search, sort, typed filters, and the
/// modal/selection flags the pages toggle. Ephemeral by design; the
/// persistence whitelist never includes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUi<F> {
    pub is_loading: bool,
    pub selected_items: Vec<String>,
    pub current_page: u32,
    pub page_size: u32,
    pub search_term: String,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    pub filters: F,
    pub is_create_modal_open: bool,
    pub is_edit_modal_open: bool,
    pub is_preview_modal_open: bool,
    pub is_delete_modal_open: bool,
    pub selected_item: Option<String>,
    pub editing_item: Option<String>,
}

impl<F: Default> Default for SectionUi<F> {
    fn default() -> Self {
        SectionUi {
            is_loading: false,
            selected_items: Vec::new(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            sort_by: None,
            sort_direction: SortDirection::Asc,
            filters: F::default(),
            is_create_modal_open: false,
            is_edit_modal_open: false,
            is_preview_modal_open: false,
            is_delete_modal_open: false,
            selected_item: None,
            editing_item: None,
        }
    }
}

/// Partial update for a section's UI state. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUiPatch<F> {
    pub is_loading: Option<bool>,
    pub selected_items: Option<Vec<String>>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub search_term: Option<String>,
    pub sort_by: Option<Option<String>>,
    pub sort_direction: Option<SortDirection>,
    pub filters: Option<F>,
    pub is_create_modal_open: Option<bool>,
    pub is_edit_modal_open: Option<bool>,
    pub is_preview_modal_open: Option<bool>,
    pub is_delete_modal_open: Option<bool>,
    pub selected_item: Option<Option<String>>,
    pub editing_item: Option<Option<String>>,
}

impl<F: PartialEq> SectionUi<F> {
    /// Applies a patch. Changing the search term or the filters snaps the
    /// pagination back to page 1; changing only the sort or page size does
    /// not, and an explicit `currentPage` in the same patch wins.
    pub fn apply(&mut self, patch: SectionUiPatch<F>) {
        let mut reset_page = false;

        if let Some(term) = patch.search_term {
            if term != self.search_term {
                reset_page = true;
            }
            self.search_term = term;
        }
        if let Some(filters) = patch.filters {
            if filters != self.filters {
                reset_page = true;
            }
            self.filters = filters;
        }
        if reset_page {
            self.current_page = 1;
        }
        if let Some(page) = patch.current_page {
            self.current_page = page.max(1);
        }

        if let Some(v) = patch.is_loading {
            self.is_loading = v;
        }
        if let Some(v) = patch.selected_items {
            self.selected_items = v;
        }
        if let Some(v) = patch.page_size {
            self.page_size = v;
        }
        if let Some(v) = patch.sort_by {
            self.sort_by = v;
        }
        if let Some(v) = patch.sort_direction {
            self.sort_direction = v;
        }
        if let Some(v) = patch.is_create_modal_open {
            self.is_create_modal_open = v;
        }
        if let Some(v) = patch.is_edit_modal_open {
            self.is_edit_modal_open = v;
        }
        if let Some(v) = patch.is_preview_modal_open {
            self.is_preview_modal_open = v;
        }
        if let Some(v) = patch.is_delete_modal_open {
            self.is_delete_modal_open = v;
        }
        if let Some(v) = patch.selected_item {
            self.selected_item = v;
        }
        if let Some(v) = patch.editing_item {
            self.editing_item = v;
        }
    }
}

/// One `SectionUi` per entity family. Initialized to defaults at startup,
/// mutated only through `*.uiPatch` / `*.query`, reset on workspace switch.
#[derive(Debug, Default)]
pub struct Sections {
    pub students: SectionUi<StudentFilters>,
    pub teachers: SectionUi<TeacherFilters>,
    pub classes: SectionUi<ClassFilters>,
    pub fees: SectionUi<FeeFilters>,
    pub salaries: SectionUi<SalaryFilters>,
    pub events: SectionUi<EventFilters>,
    pub admissions: SectionUi<AdmissionFilters>,
    pub notifications: SectionUi<NotificationFilters>,
    pub logs: SectionUi<LogFilters>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentStatus;

    #[test]
    fn search_change_resets_page_but_sort_change_does_not() {
        let mut ui: SectionUi<StudentFilters> = SectionUi::default();
        ui.current_page = 4;

        ui.apply(SectionUiPatch {
            sort_by: Some(Some("name".to_string())),
            sort_direction: Some(SortDirection::Desc),
            page_size: Some(25),
            ..Default::default()
        });
        assert_eq!(ui.current_page, 4, "sort/pageSize changes keep the page");

        ui.apply(SectionUiPatch {
            search_term: Some("ravi".to_string()),
            ..Default::default()
        });
        assert_eq!(ui.current_page, 1, "search change snaps back to page 1");
    }

    #[test]
    fn filter_change_resets_page_and_same_value_does_not() {
        let mut ui: SectionUi<StudentFilters> = SectionUi::default();
        ui.current_page = 3;
        ui.filters.status = Some(StudentStatus::Active);

        // Re-sending identical filters is not a change.
        ui.apply(SectionUiPatch {
            filters: Some(StudentFilters {
                status: Some(StudentStatus::Active),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(ui.current_page, 3);

        ui.apply(SectionUiPatch {
            filters: Some(StudentFilters::default()),
            ..Default::default()
        });
        assert_eq!(ui.current_page, 1);
    }
}
