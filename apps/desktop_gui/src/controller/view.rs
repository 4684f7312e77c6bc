//! Table view model: filter text, name sort and pagination over the store's
//! collection. Rows are cached and only recomputed on [`DirectoryView::refresh`]
//! or a filter/sort change; the collection itself is never touched.

use client_core::filter_employees;
use shared::domain::Employee;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSort {
    #[default]
    None,
    Ascending,
    Descending,
}

impl NameSort {
    pub fn next(self) -> Self {
        match self {
            NameSort::None => NameSort::Ascending,
            NameSort::Ascending => NameSort::Descending,
            NameSort::Descending => NameSort::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NameSort::None => "Name",
            NameSort::Ascending => "Name ^",
            NameSort::Descending => "Name v",
        }
    }
}

#[derive(Debug, Default)]
pub struct DirectoryView {
    filter: String,
    sort: NameSort,
    page: usize,
    rows: Vec<Employee>,
    recomputed: u64,
}

impl DirectoryView {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> NameSort {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of times the visible rows were rebuilt.
    pub fn recomputed(&self) -> u64 {
        self.recomputed
    }

    pub fn rows(&self) -> &[Employee] {
        &self.rows
    }

    pub fn refresh(&mut self, employees: &[Employee]) {
        let mut rows = filter_employees(employees, &self.filter);
        match self.sort {
            NameSort::None => {}
            NameSort::Ascending => rows.sort_by_key(|e| e.name.to_lowercase()),
            NameSort::Descending => {
                rows.sort_by_key(|e| std::cmp::Reverse(e.name.to_lowercase()))
            }
        }
        self.rows = rows;
        self.page = self.page.min(self.page_count() - 1);
        self.recomputed += 1;
    }

    /// Returns true when the text changed and rows were rebuilt.
    pub fn set_filter(&mut self, text: &str, employees: &[Employee]) -> bool {
        if self.filter == text {
            return false;
        }
        self.filter = text.to_string();
        self.page = 0;
        self.refresh(employees);
        true
    }

    pub fn cycle_sort(&mut self, employees: &[Employee]) {
        self.sort = self.sort.next();
        self.refresh(employees);
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn page_rows(&self) -> &[Employee] {
        let start = (self.page * PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}
