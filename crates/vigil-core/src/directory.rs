// ── Camera directory view-model ──
//
// Holds the camera list a UI renders: a local copy of the service's
// cameras, the active filters, the filtered view, and the current page.
// Filtering never touches the local copy; it only rebuilds `filtered`.

use std::sync::Arc;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, warn};

use crate::detail::CameraDetail;
use crate::error::CoreError;
use crate::model::{Camera, CameraEvent, CameraId};
use crate::service::VmsService;
use crate::stream::CameraFilter;

/// Default number of cameras per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter `all` by `filter`, keeping input order. Returns the matches
/// and their count.
pub fn apply(all: &[Arc<Camera>], filter: &CameraFilter) -> (Vec<Arc<Camera>>, usize) {
    let search = filter.search.to_lowercase();
    let filtered: Vec<Arc<Camera>> = all
        .iter()
        .filter(|c| filter.matches_folded(c, &search))
        .cloned()
        .collect();
    let total = filtered.len();
    (filtered, total)
}

// ── Pagination ───────────────────────────────────────────────────

/// Slice bounds for one page of a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    /// Inclusive start index into the filtered list, clamped to `total`.
    pub start: usize,
    /// Exclusive end index, clamped to `total`.
    pub end: usize,
}

impl PageWindow {
    /// Page 0 is treated as page 1 and a zero page size as 1.
    pub fn compute(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let start = (page - 1).saturating_mul(page_size);
        let end = start.saturating_add(page_size);
        Self {
            page,
            page_size,
            total,
            start: start.min(total),
            end: end.min(total),
        }
    }

    /// `"Showing {first}-{last} of {total}"`, with `first` = 0 for an
    /// empty list.
    ///
    /// `first` is the page's own first position, `(page - 1) * page_size + 1`,
    /// even when that lies past `total`; `last` is clamped.
    pub fn label(&self) -> String {
        let first = if self.total == 0 {
            0
        } else {
            (self.page - 1).saturating_mul(self.page_size).saturating_add(1)
        };
        format!("Showing {first}-{} of {}", self.end, self.total)
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(self.page_size) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }
}

// ── Load state ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoadState {
    Loading,
    Ready,
    /// The last load failed; the previous camera list (if any) is kept.
    Failed,
}

/// Token for an in-flight load. Only the most recently issued ticket
/// may complete a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket(u64);

// ── Row actions ──────────────────────────────────────────────────

/// Entries of the per-row action menu.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum CameraAction {
    ViewLive,
    Playback,
    Settings,
    Delete,
}

// ── CameraDirectory ──────────────────────────────────────────────

pub struct CameraDirectory {
    all_cameras: Vec<Arc<Camera>>,
    filters: CameraFilter,
    filtered: Vec<Arc<Camera>>,
    current_page: usize,
    page_size: usize,
    load_state: LoadState,
    load_generation: u64,
    active_action_menu: Option<CameraId>,
}

impl CameraDirectory {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all_cameras: Vec::new(),
            filters: CameraFilter::default(),
            filtered: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            load_state: LoadState::Loading,
            load_generation: 0,
            active_action_menu: None,
        }
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Fetch cameras from the service and rebuild the view.
    ///
    /// Ends in `Ready` or `Failed`, never `Loading`.
    pub async fn load(&mut self, service: &VmsService) -> LoadState {
        let ticket = self.begin_load();
        let result = service.get_cameras().await;
        self.finish_load(ticket, result.map(|cams| cams.as_ref().clone()));
        self.load_state
    }

    /// Mark a load as started. Pair with [`finish_load`](Self::finish_load)
    /// when the fetch is driven elsewhere.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.load_state = LoadState::Loading;
        LoadTicket(self.load_generation)
    }

    /// Complete a load. Returns `false` if a newer load has been issued
    /// since `ticket`, in which case the result is dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Arc<Camera>>, CoreError>,
    ) -> bool {
        if ticket.0 != self.load_generation {
            debug!(
                ticket = ticket.0,
                current = self.load_generation,
                "dropping stale camera load"
            );
            return false;
        }

        match result {
            Ok(cameras) => {
                debug!(count = cameras.len(), "cameras loaded");
                self.all_cameras = cameras;
                self.apply_filters();
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "camera load failed");
                self.load_state = LoadState::Failed;
            }
        }
        true
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    // ── Filtering ────────────────────────────────────────────────

    pub fn filters(&self) -> &CameraFilter {
        &self.filters
    }

    /// Replace the filters and rebuild the view from page 1.
    pub fn set_filters(&mut self, filters: CameraFilter) {
        self.filters = filters;
        self.apply_filters();
    }

    /// Rebuild the filtered view from the current filters; resets to page 1.
    pub fn apply_filters(&mut self) {
        let (filtered, _) = apply(&self.all_cameras, &self.filters);
        self.filtered = filtered;
        self.current_page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(CameraFilter::default());
    }

    // ── Pagination ───────────────────────────────────────────────

    pub fn window(&self) -> PageWindow {
        PageWindow::compute(self.current_page, self.page_size, self.filtered.len())
    }

    /// The cameras on the current page.
    pub fn page_items(&self) -> &[Arc<Camera>] {
        let window = self.window();
        &self.filtered[window.start..window.end]
    }

    pub fn pagination_label(&self) -> String {
        self.window().label()
    }

    /// Advance one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.window().has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Go back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.window().has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Number of cameras passing the filters.
    pub fn total_items(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        self.window().total_pages()
    }

    /// The unfiltered local copy.
    pub fn all_cameras(&self) -> &[Arc<Camera>] {
        &self.all_cameras
    }

    pub fn filtered(&self) -> &[Arc<Camera>] {
        &self.filtered
    }

    // ── Change notifications ─────────────────────────────────────

    /// Patch the local copy from a camera notification. Events for ids
    /// not in the list are ignored. Returns whether anything changed.
    pub fn handle_event(&mut self, event: &CameraEvent) -> bool {
        let Some(index) = self
            .all_cameras
            .iter()
            .position(|c| &c.id == event.camera_id())
        else {
            return false;
        };

        match event {
            CameraEvent::Updated(camera) => {
                self.all_cameras[index] = Arc::clone(camera);
            }
            CameraEvent::Deleted(_) => {
                self.all_cameras.remove(index);
                if self
                    .active_action_menu
                    .as_ref()
                    .is_some_and(|id| id == event.camera_id())
                {
                    self.active_action_menu = None;
                }
            }
        }
        self.apply_filters();
        true
    }

    /// Drain every pending notification from `rx`. Returns how many
    /// changed the list.
    pub fn sync(&mut self, rx: &mut broadcast::Receiver<CameraEvent>) -> usize {
        let mut applied = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    if self.handle_event(&event) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "camera notifications lagged; list may be stale");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        applied
    }

    // ── Action menu ──────────────────────────────────────────────

    /// Open the menu for `id`, or close it if it is already open for `id`.
    pub fn toggle_action_menu(&mut self, id: &CameraId) {
        if self.active_action_menu.as_ref() == Some(id) {
            self.active_action_menu = None;
        } else {
            self.active_action_menu = Some(id.clone());
        }
    }

    pub fn close_action_menu(&mut self) {
        self.active_action_menu = None;
    }

    pub fn active_action_menu(&self) -> Option<&CameraId> {
        self.active_action_menu.as_ref()
    }

    /// Run a menu entry: closes the menu and hands the action back to
    /// the caller.
    pub fn handle_action(&mut self, action: CameraAction, camera: &Camera) -> CameraAction {
        debug!(%action, camera = %camera.name, "camera action");
        self.close_action_menu();
        action
    }

    /// Open the settings panel for a camera in the local list.
    pub fn open_details(&mut self, id: &CameraId) -> Option<CameraDetail> {
        self.close_action_menu();
        self.all_cameras
            .iter()
            .find(|c| &c.id == id)
            .map(|c| CameraDetail::open(c))
    }
}

impl Default for CameraDirectory {
    fn default() -> Self {
        Self::new()
    }
}
