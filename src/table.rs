//! Client-side table state: filter, sort, paginate, select.
//!
//! The base collection is whatever the service returned last. Everything else is
//! derived from it: the filtered view is a list of indices into the base collection,
//! recomputed on every search change and every base replacement.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{Employee, EmployeeId};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// Columns that can be sorted from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Designation,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Designation => "Designation",
        }
    }

    fn value<'a>(&self, emp: &'a Employee) -> &'a str {
        match self {
            SortKey::Name => &emp.name,
            SortKey::Designation => &emp.designation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

/// Table state over the last fetched employee collection.
#[derive(Debug, Clone)]
pub struct RecordTable {
    employees: Vec<Employee>,
    filtered: Vec<usize>,
    search: String,
    sort: Option<SortState>,
    current_page: usize,
    selected: BTreeSet<EmployeeId>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            filtered: Vec::new(),
            search: String::new(),
            sort: None,
            current_page: 1,
            selected: BTreeSet::new(),
        }
    }

    /// Replace the base collection after a successful fetch.
    ///
    /// Selection is deliberately left alone, so ids that vanished stay selected.
    pub fn set_employees(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        self.refilter();
    }

    /// Drop the base collection (failed fetch).
    pub fn clear(&mut self) {
        self.set_employees(Vec::new());
    }

    /// The full base collection in server order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Set the search term, recompute the view and go back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.refilter();
    }

    fn refilter(&mut self) {
        let needle = self.search.to_lowercase();
        self.filtered = self
            .employees
            .iter()
            .enumerate()
            .filter(|(_, emp)| matches_search(emp, &needle))
            .map(|(idx, _)| idx)
            .collect();
        if let Some(sort) = self.sort {
            self.apply_sort(sort);
        }
        self.current_page = 1;
    }

    /// Handle a click on a sortable header.
    ///
    /// The same key twice flips the direction; a new key starts ascending.
    pub fn sort_by(&mut self, key: SortKey) {
        let order = match self.sort {
            Some(current) if current.key == key && current.order == SortOrder::Ascending => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };
        let sort = SortState { key, order };
        self.sort = Some(sort);
        self.apply_sort(sort);
    }

    fn apply_sort(&mut self, sort: SortState) {
        let employees = &self.employees;
        self.filtered.sort_by(|&a, &b| {
            let ordering = sort.key.value(&employees[a]).cmp(sort.key.value(&employees[b]));
            sort.order.apply(ordering)
        });
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Number of rows matching the search.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The filtered and sorted view, all pages.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.filtered.iter().map(|&idx| &self.employees[idx])
    }

    /// Number of page buttons: `ceil(filtered / PAGE_SIZE)`.
    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(PAGE_SIZE)
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Jump to a page. Pages past the end are allowed and show nothing.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Rows of the given 1-based page; empty when out of range.
    pub fn rows_for_page(&self, page: usize) -> Vec<&Employee> {
        let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        self.filtered
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|&idx| &self.employees[idx])
            .collect()
    }

    /// Rows currently on screen. Export uses exactly this slice.
    pub fn visible_rows(&self) -> Vec<&Employee> {
        self.rows_for_page(self.current_page)
    }

    /// Flip the checkbox for one id.
    pub fn toggle_selected(&mut self, id: EmployeeId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn is_selected(&self, id: EmployeeId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids, possibly including ids no longer in the collection.
    pub fn selected_ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.selected.iter().copied()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}

/// Case-insensitive substring match on name, designation, gender and state.
/// `needle` must already be lowercase.
fn matches_search(emp: &Employee, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        emp.name.as_str(),
        emp.designation.as_str(),
        emp.gender.as_str(),
        emp.state_name.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::test_support::{employee, seven_employees};

    fn names(rows: &[&Employee]) -> Vec<String> {
        rows.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_seven_employees_two_pages() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());

        assert_eq!(table.page_count(), 2);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.visible_rows().len(), 5);

        table.set_page(2);
        assert_eq!(table.visible_rows().len(), 2);
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        let table = RecordTable::new();
        assert_eq!(table.page_count(), 0);
        assert!(table.visible_rows().is_empty());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());
        table.set_page(9);
        assert!(table.visible_rows().is_empty());
    }

    #[test]
    fn test_pages_reconstruct_filtered_view() {
        for count in [0, 1, 4, 5, 6, 10, 11, 23] {
            let employees: Vec<_> = (0..count)
                .map(|i| employee(i, &format!("Person {i:02}"), "Clerk", Gender::Male, "Goa"))
                .collect();
            let mut table = RecordTable::new();
            table.set_employees(employees);

            assert_eq!(table.page_count(), (count as usize).div_ceil(PAGE_SIZE));

            let concatenated: Vec<EmployeeId> = (1..=table.page_count())
                .flat_map(|page| table.rows_for_page(page).into_iter().map(|e| e.id).collect::<Vec<_>>())
                .collect();
            let view: Vec<EmployeeId> = table.filtered_rows().map(|e| e.id).collect();
            assert_eq!(concatenated, view);
        }
    }

    #[test]
    fn test_search_matches_each_field() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());

        for term in ["asha", "ENGINEER", "female", "kar", "x-no-match"] {
            table.set_search(term);
            let needle = term.to_lowercase();
            for emp in table.employees() {
                let in_view = table.filtered_rows().any(|row| row.id == emp.id);
                assert_eq!(in_view, matches_search(emp, &needle), "term {term}, employee {}", emp.name);
            }
            for row in table.filtered_rows() {
                let hit = [&row.name, &row.designation, &row.state_name]
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle))
                    || row.gender.as_str().to_lowercase().contains(&needle);
                assert!(hit);
            }
        }
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());
        table.set_page(2);

        table.set_search("e");
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_search_matches_gender_substring() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());

        // "male" is a substring of "Female", so every row matches.
        table.set_search("male");
        assert_eq!(table.filtered_len(), 7);

        table.set_search("fem");
        assert!(table.filtered_rows().all(|e| e.gender == Gender::Female));
    }

    #[test]
    fn test_sort_toggles_on_same_key() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());

        table.sort_by(SortKey::Name);
        assert_eq!(
            table.sort_state(),
            Some(SortState {
                key: SortKey::Name,
                order: SortOrder::Ascending
            })
        );
        let ascending: Vec<_> = table.filtered_rows().map(|e| e.name.clone()).collect();
        let mut expected = ascending.clone();
        expected.sort();
        assert_eq!(ascending, expected);

        table.sort_by(SortKey::Name);
        assert_eq!(table.sort_state().map(|s| s.order), Some(SortOrder::Descending));
        let descending: Vec<_> = table.filtered_rows().map(|e| e.name.clone()).collect();
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);

        table.sort_by(SortKey::Name);
        assert_eq!(table.sort_state().map(|s| s.order), Some(SortOrder::Ascending));
    }

    #[test]
    fn test_new_sort_key_starts_ascending() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());

        table.sort_by(SortKey::Name);
        table.sort_by(SortKey::Name);
        table.sort_by(SortKey::Designation);

        let state = table.sort_state().unwrap();
        assert_eq!(state.key, SortKey::Designation);
        assert_eq!(state.order, SortOrder::Ascending);
        let designations: Vec<_> = table.filtered_rows().map(|e| e.designation.clone()).collect();
        let mut expected = designations.clone();
        expected.sort();
        assert_eq!(designations, expected);
    }

    #[test]
    fn test_sort_survives_refilter() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());
        table.sort_by(SortKey::Name);
        table.sort_by(SortKey::Name);

        table.set_search("e");
        let view = names(&table.rows_for_page(1));
        let mut expected = view.clone();
        expected.sort();
        expected.reverse();
        assert_eq!(view, expected);
    }

    #[test]
    fn test_sort_is_case_sensitive_lexicographic() {
        let mut table = RecordTable::new();
        table.set_employees(vec![
            employee(1, "bala", "Clerk", Gender::Male, "Goa"),
            employee(2, "Zara", "Clerk", Gender::Female, "Goa"),
            employee(3, "Anil", "Clerk", Gender::Male, "Goa"),
        ]);
        table.sort_by(SortKey::Name);
        assert_eq!(names(&table.visible_rows()), vec!["Anil", "Zara", "bala"]);
    }

    #[test]
    fn test_selection_survives_filter_and_sort() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());
        table.toggle_selected(1);
        table.toggle_selected(6);

        table.set_search("nothing matches this");
        table.sort_by(SortKey::Designation);
        table.set_search("");

        assert!(table.is_selected(1));
        assert!(table.is_selected(6));
        assert_eq!(table.selected_count(), 2);

        table.toggle_selected(1);
        assert!(!table.is_selected(1));
    }

    #[test]
    fn test_stale_selection_is_tolerated() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());
        table.toggle_selected(3);

        let remaining: Vec<_> = seven_employees().into_iter().filter(|e| e.id != 3).collect();
        table.set_employees(remaining);

        assert!(table.employees().iter().all(|e| e.id != 3));
        assert!(table.is_selected(3));
        assert_eq!(table.selected_ids().collect::<Vec<_>>(), vec![3]);
        assert_eq!(table.visible_rows().len(), 5);
    }

    #[test]
    fn test_clear_after_failed_fetch() {
        let mut table = RecordTable::new();
        table.set_employees(seven_employees());
        table.clear();
        assert!(table.employees().is_empty());
        assert_eq!(table.page_count(), 0);
    }
}
