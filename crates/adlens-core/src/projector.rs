//! Pure projection of the user collection into a paged view.
//!
//! Projection never mutates the source collection and aggregates are
//! always computed over the FULL collection, not the filtered subset.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{FilterCriteria, StatusFilter, UserRecord};

/// Default page size for the user directory.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of the filtered directory, plus paging bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Records on the current page, in source order.
    pub page_items: Vec<Arc<UserRecord>>,
    /// Count of records matching the filter (all pages).
    pub filtered_count: usize,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    /// Always at least 1, even for an empty result.
    pub total_pages: usize,
}

impl ViewModel {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Aggregates over the full collection, independent of any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    /// Created within the trailing seven days.
    pub recent: usize,
}

/// Build the page view for `records` under `filters`.
///
/// `page` is 1-based and clamped into the valid range, so callers may
/// pass a page that the filtered count no longer supports.
pub fn project(
    records: &[Arc<UserRecord>],
    filters: &FilterCriteria,
    page: usize,
    page_size: usize,
) -> ViewModel {
    let page_size = page_size.max(1);
    let filtered: Vec<&Arc<UserRecord>> =
        records.iter().filter(|r| filters.matches(r)).collect();
    let filtered_count = filtered.len();
    let total_pages = filtered_count.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let page_items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    ViewModel {
        page_items,
        filtered_count,
        page,
        total_pages,
    }
}

/// Aggregate the full collection. `now` is injected so the seven-day
/// window is deterministic under test.
pub fn directory_stats(records: &[Arc<UserRecord>], now: DateTime<Utc>) -> DirectoryStats {
    DirectoryStats {
        total: records.len(),
        active: records.iter().filter(|r| r.is_active).count(),
        admins: records.iter().filter(|r| r.is_admin()).count(),
        recent: records.iter().filter(|r| r.is_recent(now)).count(),
    }
}

// ── Stateful directory cursor ────────────────────────────────────────

/// Filter and page state over a user collection snapshot.
///
/// Changing any filter dimension resets the page cursor to 1.
/// Replacing the records keeps the cursor, clamped to the new range.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    records: Arc<Vec<Arc<UserRecord>>>,
    filters: FilterCriteria,
    page: usize,
    page_size: usize,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl UserDirectory {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Arc::new(Vec::new()),
            filters: FilterCriteria::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Swap in a fresh collection snapshot, keeping filters and cursor.
    pub fn set_records(&mut self, records: Arc<Vec<Arc<UserRecord>>>) {
        self.records = records;
        self.page = self.page.clamp(1, self.view().total_pages);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.page = 1;
    }

    pub fn set_role(&mut self, role: Option<String>) {
        self.filters.role = role;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<StatusFilter>) {
        self.filters.status = status;
        self.page = 1;
    }

    /// Move to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.view().total_pages);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn view(&self) -> ViewModel {
        project(&self.records, &self.filters, self.page, self.page_size)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> DirectoryStats {
        directory_stats(&self.records, now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ROLE_ADMIN, ROLE_USER};
    use chrono::TimeZone;

    fn record(n: usize, role: &str, active: bool) -> Arc<UserRecord> {
        Arc::new(UserRecord {
            id: format!("u{n}"),
            username: format!("user{n:02}"),
            email: format!("user{n:02}@example.com"),
            role: role.to_owned(),
            is_active: active,
            created_at: None,
            last_login: None,
        })
    }

    /// Twelve accounts: ten regular active users plus one inactive
    /// admin and one active admin.
    fn twelve() -> Vec<Arc<UserRecord>> {
        let mut records: Vec<_> = (1..=10).map(|n| record(n, ROLE_USER, true)).collect();
        records.push(record(11, ROLE_ADMIN, false));
        records.push(record(12, ROLE_ADMIN, true));
        records
    }

    #[test]
    fn pages_split_at_page_size() {
        let records = twelve();
        let filters = FilterCriteria::default();

        let first = project(&records, &filters, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.filtered_count, 12);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.page_items.len(), 10);
        assert_eq!(first.page_items[0].username, "user01");
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = project(&records, &filters, 2, DEFAULT_PAGE_SIZE);
        assert_eq!(second.page_items.len(), 2);
        assert_eq!(second.page_items[0].username, "user11");
    }

    #[test]
    fn out_of_range_page_clamps() {
        let records = twelve();
        let filters = FilterCriteria::default();

        let view = project(&records, &filters, 99, DEFAULT_PAGE_SIZE);
        assert_eq!(view.page, 2);
        let view = project(&records, &filters, 0, DEFAULT_PAGE_SIZE);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let records = twelve();
        let filters = FilterCriteria {
            search: "no-such-user".to_owned(),
            ..FilterCriteria::default()
        };
        let view = project(&records, &filters, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.total_pages, 1);
        assert!(view.page_items.is_empty());
    }

    #[test]
    fn filter_change_resets_cursor() {
        let mut dir = UserDirectory::new(DEFAULT_PAGE_SIZE);
        dir.set_records(Arc::new(twelve()));
        dir.go_to_page(2);
        assert_eq!(dir.view().page, 2);

        dir.set_search("user");
        assert_eq!(dir.view().page, 1);

        dir.go_to_page(2);
        dir.set_role(Some(ROLE_ADMIN.to_owned()));
        assert_eq!(dir.view().page, 1);
    }

    #[test]
    fn refresh_clamps_but_keeps_cursor() {
        let mut dir = UserDirectory::new(DEFAULT_PAGE_SIZE);
        dir.set_records(Arc::new(twelve()));
        dir.go_to_page(2);

        // Collection shrinks below one page; cursor snaps back.
        dir.set_records(Arc::new(twelve().drain(..5).collect()));
        assert_eq!(dir.view().page, 1);
    }

    #[test]
    fn stats_ignore_active_filter() {
        let mut dir = UserDirectory::new(DEFAULT_PAGE_SIZE);
        dir.set_records(Arc::new(twelve()));
        dir.set_status(Some(StatusFilter::Inactive));

        let now = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
        let stats = dir.stats(now);
        assert_eq!(stats.total, 12);
        assert_eq!(stats.active, 11);
        assert_eq!(stats.admins, 2);
        assert_eq!(stats.recent, 0);

        // But the view honors the filter.
        assert_eq!(dir.view().filtered_count, 1);
    }

    #[test]
    fn projection_leaves_source_untouched() {
        let records = twelve();
        let filters = FilterCriteria {
            role: Some(ROLE_ADMIN.to_owned()),
            ..FilterCriteria::default()
        };
        let _ = project(&records, &filters, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(records.len(), 12);
        assert_eq!(records[0].username, "user01");
    }
}
