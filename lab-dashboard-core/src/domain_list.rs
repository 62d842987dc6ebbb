//! Domain list controller
//!
//! Turns the gateway's domain stream into display rows with a days-to-expiry
//! column, keeps them sorted and paginated, and owns the expanded-row state
//! (including the lab credentials fetched for it).
//!
//! Network work is spawned on the Tokio runtime; results come back through
//! the gateway's broadcast or an internal channel and are applied by
//! [`DomainListController::sync`], which the UI loop calls on every tick.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lab_dashboard_client::{Domain, Lab};
use tokio::sync::{broadcast, mpsc};

use crate::creation::CloneSource;
use crate::error::{CoreError, CoreResult};
use crate::gateway::DashboardGateway;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Page sizes offered by the paginator.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Whole days until `expiration`, rounded up; negative once expired.
#[must_use]
pub fn ttl_in_days(expiration: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = (expiration - now).num_milliseconds();
    let days = diff.div_euclid(MILLIS_PER_DAY);
    if diff.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRow {
    pub domain: Domain,
    /// Derived at refresh time, see [`ttl_in_days`].
    pub ttl_days: i64,
}

impl DomainRow {
    #[must_use]
    pub fn new(domain: Domain, now: DateTime<Utc>) -> Self {
        let ttl_days = ttl_in_days(domain.expiration_date, now);
        Self { domain, ttl_days }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.domain.domain_name
    }
}

// ============ Sorting ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Type,
    Owner,
    CreationDate,
    Ttl,
}

impl SortColumn {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Type,
        Self::Owner,
        Self::CreationDate,
        Self::Ttl,
    ];

    /// Column header.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Owner => "Created By",
            Self::CreationDate => "Creation Date",
            Self::Ttl => "TTL - expiration date",
        }
    }

    fn compare(self, a: &DomainRow, b: &DomainRow) -> Ordering {
        match self {
            Self::Name => a.domain.domain_name.cmp(&b.domain.domain_name),
            Self::Type => a
                .domain
                .instance_type
                .as_str()
                .cmp(b.domain.instance_type.as_str()),
            Self::Owner => a.domain.owner.cmp(&b.domain.owner),
            Self::CreationDate => a.domain.creation_date.cmp(&b.domain.creation_date),
            Self::Ttl => a.ttl_days.cmp(&b.ttl_days),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Stable sort of `rows` by `sort`.
pub fn sort_rows(rows: &mut [DomainRow], sort: Sort) {
    rows.sort_by(|a, b| {
        let ord = sort.column.compare(a, b);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

// ============ Pagination ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    page_index: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 0,
        }
    }
}

impl Pagination {
    /// # Errors
    /// [`CoreError::Validation`] when `page_size` is not one of [`PAGE_SIZE_OPTIONS`].
    pub fn new(page_size: usize) -> CoreResult<Self> {
        check_page_size(page_size)?;
        Ok(Self {
            page_size,
            page_index: 0,
        })
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// At least 1, even for an empty list.
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn clamp(&mut self, total: usize) {
        self.page_index = self.page_index.min(self.page_count(total) - 1);
    }

    /// Indices of the current page within a list of `total` rows.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn next_page(&mut self, total: usize) {
        if self.page_index + 1 < self.page_count(total) {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Change the page size, keeping the first row of the current page visible.
    pub fn set_page_size(&mut self, page_size: usize) -> CoreResult<()> {
        check_page_size(page_size)?;
        let first = self.page_index * self.page_size;
        self.page_size = page_size;
        self.page_index = first / page_size;
        Ok(())
    }

    /// Next entry of [`PAGE_SIZE_OPTIONS`], wrapping around.
    pub fn cycle_page_size(&mut self) {
        let pos = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&s| s == self.page_size)
            .unwrap_or(0);
        let next = PAGE_SIZE_OPTIONS[(pos + 1) % PAGE_SIZE_OPTIONS.len()];
        let _ = self.set_page_size(next);
    }
}

fn check_page_size(page_size: usize) -> CoreResult<()> {
    if PAGE_SIZE_OPTIONS.contains(&page_size) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "page size must be one of {PAGE_SIZE_OPTIONS:?}, got {page_size}"
        )))
    }
}

// ============ Controller ============

enum Completion {
    ListFailed,
    Lab {
        domain_name: String,
        lab_name: String,
        lab: Option<Lab>,
    },
}

pub struct DomainListController {
    gateway: Arc<DashboardGateway>,
    domains_rx: broadcast::Receiver<Vec<Domain>>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    /// Gateway order (creation date ascending).
    source: Vec<DomainRow>,
    /// Display order.
    rows: Vec<DomainRow>,
    loading: bool,
    sort: Option<Sort>,
    pagination: Pagination,
    expanded: Option<String>,
    open_labs: HashSet<String>,
    pending_labs: HashSet<String>,
    labs: HashMap<String, Lab>,
}

impl DomainListController {
    /// Subscribes immediately, so lists published before [`activate`](Self::activate)
    /// are not lost.
    #[must_use]
    pub fn new(gateway: Arc<DashboardGateway>, pagination: Pagination) -> Self {
        let domains_rx = gateway.subscribe_domains();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            domains_rx,
            completion_tx,
            completion_rx,
            source: Vec::new(),
            rows: Vec::new(),
            loading: false,
            sort: None,
            pagination,
            expanded: None,
            open_labs: HashSet::new(),
            pending_labs: HashSet::new(),
            labs: HashMap::new(),
        }
    }

    /// Initial load.
    pub fn activate(&mut self) {
        self.refresh();
    }

    /// Mark loading and fetch the list in the background.
    pub fn refresh(&mut self) {
        self.loading = true;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            if !gateway.list_domains().await {
                let _ = tx.send(Completion::ListFailed);
            }
        });
    }

    /// Apply everything that arrived since the last call. Returns whether
    /// anything changed.
    pub fn sync(&mut self, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        loop {
            match self.domains_rx.try_recv() {
                Ok(domains) => {
                    self.apply_domains(domains, now);
                    changed = true;
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log::debug!("Domain list subscriber skipped {skipped} stale lists");
                }
                Err(_) => break,
            }
        }

        while let Ok(completion) = self.completion_rx.try_recv() {
            changed = true;
            match completion {
                Completion::ListFailed => self.loading = false,
                Completion::Lab {
                    domain_name,
                    lab_name,
                    lab,
                } => self.apply_lab(&domain_name, lab_name, lab),
            }
        }

        changed
    }

    /// Replace the rows with a freshly published list.
    pub fn apply_domains(&mut self, domains: Vec<Domain>, now: DateTime<Utc>) {
        self.source = domains
            .into_iter()
            .map(|d| DomainRow::new(d, now))
            .collect();
        self.loading = false;

        if let Some(expanded) = &self.expanded
            && !self.source.iter().any(|r| r.name() == expanded)
        {
            self.collapse();
        }

        self.rebuild_rows();
    }

    fn rebuild_rows(&mut self) {
        self.rows.clone_from(&self.source);
        if let Some(sort) = self.sort {
            sort_rows(&mut self.rows, sort);
        }
        self.pagination.clamp(self.rows.len());
    }

    fn apply_lab(&mut self, domain_name: &str, lab_name: String, lab: Option<Lab>) {
        self.pending_labs.remove(&lab_name);
        // Only cached while its row is expanded.
        if self.expanded.as_deref() != Some(domain_name) {
            return;
        }
        if let Some(lab) = lab {
            self.labs.insert(lab_name, lab);
        }
    }

    // ===== Queries =====

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// All rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[DomainRow] {
        &self.rows
    }

    /// Rows of the current page.
    #[must_use]
    pub fn page_rows(&self) -> &[DomainRow] {
        &self.rows[self.pagination.range(self.rows.len())]
    }

    #[must_use]
    pub fn find(&self, domain_name: &str) -> Option<&DomainRow> {
        self.rows.iter().find(|r| r.name() == domain_name)
    }

    #[must_use]
    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    #[must_use]
    pub fn is_lab_open(&self, lab_name: &str) -> bool {
        self.open_labs.contains(lab_name)
    }

    #[must_use]
    pub fn is_lab_pending(&self, lab_name: &str) -> bool {
        self.pending_labs.contains(lab_name)
    }

    #[must_use]
    pub fn lab(&self, lab_name: &str) -> Option<&Lab> {
        self.labs.get(lab_name)
    }

    // ===== Sorting & paging =====

    /// Click on a column header: ascending, then descending, then back to
    /// the default order.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some(Sort {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(Sort {
                column,
                direction: SortDirection::Descending,
            }),
            Some(Sort {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(Sort {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        self.rebuild_rows();
    }

    pub fn next_page(&mut self) {
        self.pagination.next_page(self.rows.len());
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> CoreResult<()> {
        self.pagination.set_page_size(page_size)?;
        self.pagination.clamp(self.rows.len());
        Ok(())
    }

    pub fn cycle_page_size(&mut self) {
        self.pagination.cycle_page_size();
        self.pagination.clamp(self.rows.len());
    }

    // ===== Expansion =====

    /// Expand `domain_name` (collapsing any other row) or collapse it if it
    /// is already expanded. A domain with exactly one lab has that lab
    /// opened and fetched right away.
    pub fn toggle_expand(&mut self, domain_name: &str) {
        if self.expanded.as_deref() == Some(domain_name) {
            self.collapse();
            return;
        }
        let Some(row) = self.find(domain_name) else {
            return;
        };
        let single_lab = match row.domain.labs.as_slice() {
            [only] => Some(only.name.clone()),
            _ => None,
        };

        self.collapse();
        self.expanded = Some(domain_name.to_string());
        if let Some(lab_name) = single_lab {
            self.open_lab(&lab_name);
        }
    }

    fn collapse(&mut self) {
        self.expanded = None;
        self.open_labs.clear();
        self.labs.clear();
    }

    /// Open a lab of the expanded domain, fetching its details unless
    /// they are already held or on their way.
    pub fn open_lab(&mut self, lab_name: &str) {
        let Some(domain_name) = self.expanded.clone() else {
            return;
        };
        let belongs = self
            .find(&domain_name)
            .is_some_and(|r| r.domain.labs.iter().any(|l| l.name == lab_name));
        if !belongs {
            log::debug!("Lab '{lab_name}' is not part of '{domain_name}'");
            return;
        }

        self.open_labs.insert(lab_name.to_string());
        if self.labs.contains_key(lab_name) || !self.pending_labs.insert(lab_name.to_string()) {
            return;
        }

        let gateway = Arc::clone(&self.gateway);
        let tx = self.completion_tx.clone();
        let lab_name = lab_name.to_string();
        tokio::spawn(async move {
            let lab = gateway.get_lab(&lab_name).await;
            let _ = tx.send(Completion::Lab {
                domain_name,
                lab_name,
                lab,
            });
        });
    }

    /// Close a lab accordion; its details stay cached while the row is expanded.
    pub fn close_lab(&mut self, lab_name: &str) {
        self.open_labs.remove(lab_name);
    }

    pub fn toggle_lab(&mut self, lab_name: &str) {
        if self.is_lab_open(lab_name) {
            self.close_lab(lab_name);
        } else {
            self.open_lab(lab_name);
        }
    }

    // ===== Row actions =====

    /// Pre-fill source for the creation form.
    #[must_use]
    pub fn clone_source(&self, domain_name: &str) -> Option<CloneSource> {
        self.find(domain_name).map(|r| CloneSource::from(&r.domain))
    }

    /// Delete a domain, then reload the list whatever the delete's outcome.
    /// Returns `false` if the domain is not in the list.
    pub fn delete(&mut self, domain_name: &str) -> bool {
        let Some(domain) = self.find(domain_name).map(|r| r.domain.clone()) else {
            return false;
        };
        self.loading = true;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            gateway.delete_domain(&domain).await;
            if !gateway.list_domains().await {
                let _ = tx.send(Completion::ListFailed);
            }
        });
        true
    }
}
