//! Client-side configuration state.
//!
//! [`Selection`] holds what the user picked. [`Configurator`] wraps it
//! together with the fetched catalog and the bookkeeping for in-flight
//! requests. Neither touches the network or the browser: operations return
//! the fetch the caller has to perform, and results are fed back in.
//!
//! Every design-list request gets a ticket. Only the response carrying the
//! latest ticket is applied, so a slow answer for a category the user already
//! left cannot overwrite the current list.

use crate::query::SharedQuery;
use crate::types::{Category, Design, GarmentColor, Slot, View};

/// Base images of the plain garment, one folder per colour.
const GARMENT_ASSET_ROOT: &str = "/assets/hoddies";

// ─── Selection ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: Option<String>,
    pub front: Option<Design>,
    pub back: Option<Design>,
    pub color: GarmentColor,
    pub view: View,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            category: None,
            front: None,
            back: None,
            color: GarmentColor::default(),
            view: Slot::Back,
        }
    }
}

impl Selection {
    pub fn design(&self, slot: Slot) -> Option<&Design> {
        match slot {
            Slot::Front => self.front.as_ref(),
            Slot::Back => self.back.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Design> {
        match slot {
            Slot::Front => &mut self.front,
            Slot::Back => &mut self.back,
        }
    }

    /// Change category. Both slots are cleared even when the new category
    /// holds files with the same names.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
        self.front = None;
        self.back = None;
    }

    /// Selecting the design already in `slot` clears the slot; anything else
    /// puts the design there and shows that side.
    pub fn toggle_design(&mut self, design: Design, slot: Slot) {
        let current = self.slot_mut(slot);
        if current.as_ref().is_some_and(|d| d.id == design.id) {
            *current = None;
            return;
        }
        *current = Some(design);
        self.view = slot;
    }

    /// Design shown in the active view.
    pub fn current_design(&self) -> Option<&Design> {
        self.design(self.view)
    }

    /// Plain garment image for the current colour and view.
    pub fn garment_image_url(&self) -> String {
        format!(
            "{GARMENT_ASSET_ROOT}/{}/{}.png",
            self.color.value,
            self.view.asset_name()
        )
    }

    pub fn to_query(&self) -> SharedQuery {
        SharedQuery {
            anime: self.category.clone(),
            pecho: self.front.as_ref().map(|d| d.filename.clone()),
            espalda: self.back.as_ref().map(|d| d.filename.clone()),
            color: Some(self.color.value.to_string()),
        }
    }
}

// ─── Fetch bookkeeping ───────────────────────────────────────────────

/// Design list the caller must fetch, tagged with its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    pub ticket: u64,
    pub category: String,
}

/// A fetch that can be retried after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Categories { ticket: u64 },
    Designs(DesignRequest),
}

/// Filenames read from the URL, waiting for the design list to arrive.
#[derive(Debug, Clone, Default, PartialEq)]
struct PendingSlots {
    front: Option<String>,
    back: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct DesignFailure {
    request: DesignRequest,
    message: String,
}

// ─── Configurator ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configurator {
    selection: Selection,
    categories: Vec<Category>,
    designs: Vec<Design>,
    categories_in_flight: Option<u64>,
    designs_in_flight: Option<DesignRequest>,
    pending_slots: Option<PendingSlots>,
    categories_failure: Option<String>,
    designs_failure: Option<DesignFailure>,
    last_ticket: u64,
    url_revision: u64,
}

impl Configurator {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Read access ─────────────────────────────────────────────

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    pub fn is_loading(&self) -> bool {
        self.categories_in_flight.is_some() || self.designs_in_flight.is_some()
    }

    /// Design list currently awaited, if any.
    pub fn pending_designs(&self) -> Option<&DesignRequest> {
        self.designs_in_flight.as_ref()
    }

    /// Ticket of the category list currently awaited, if any.
    pub fn pending_categories(&self) -> Option<u64> {
        self.categories_in_flight
    }

    /// Messages of every fetch that failed and was not retried yet.
    pub fn error(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .categories_failure
            .iter()
            .map(String::as_str)
            .chain(self.designs_failure.iter().map(|f| f.message.as_str()))
            .collect();
        (!messages.is_empty()).then(|| messages.join(" · "))
    }

    /// Bumped by every user change that must be written back to the URL.
    /// Restoring from the URL leaves it alone.
    pub fn url_revision(&self) -> u64 {
        self.url_revision
    }

    /// Query describing the configuration. Filenames read from the URL whose
    /// design list has not arrived yet are carried over.
    pub fn query_string(&self) -> String {
        let mut query = self.selection.to_query();
        if let Some(pending) = &self.pending_slots {
            if query.pecho.is_none() {
                query.pecho = pending.front.clone();
            }
            if query.espalda.is_none() {
                query.espalda = pending.back.clone();
            }
        }
        query.to_query_string()
    }

    // ─── Fetch lifecycle ─────────────────────────────────────────

    fn next_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.last_ticket
    }

    fn request_designs(&mut self, category: String) -> DesignRequest {
        let request = DesignRequest {
            ticket: self.next_ticket(),
            category,
        };
        self.designs_in_flight = Some(request.clone());
        self.designs_failure = None;
        request
    }

    /// Start loading the category list. Returns the ticket to report back.
    pub fn load_categories(&mut self) -> u64 {
        let ticket = self.next_ticket();
        self.categories_in_flight = Some(ticket);
        self.categories_failure = None;
        ticket
    }

    /// Feed back the category list. Stale tickets are ignored; returns whether
    /// the result was applied.
    pub fn categories_loaded(&mut self, ticket: u64, result: Result<Vec<Category>, String>) -> bool {
        if self.categories_in_flight != Some(ticket) {
            log::debug!("dropping stale category list (ticket {ticket})");
            return false;
        }
        self.categories_in_flight = None;
        match result {
            Ok(categories) => self.categories = categories,
            Err(message) => {
                log::error!("Error al cargar animes: {message}");
                self.categories_failure =
                    Some(format!("No se pudieron cargar los animes: {message}"));
            }
        }
        true
    }

    /// Feed back a design list. Only the latest request is applied; returns
    /// whether this result was.
    pub fn designs_loaded(&mut self, ticket: u64, result: Result<Vec<Design>, String>) -> bool {
        if self.designs_in_flight.as_ref().map(|r| r.ticket) != Some(ticket) {
            log::debug!("dropping stale design list (ticket {ticket})");
            return false;
        }
        let Some(request) = self.designs_in_flight.take() else {
            return false;
        };
        match result {
            Ok(designs) => {
                // URL filenames stay pending until a fetch succeeds.
                if let Some(pending) = self.pending_slots.take() {
                    let find = |filename: Option<String>| {
                        filename.and_then(|f| designs.iter().find(|d| d.filename == f).cloned())
                    };
                    if let Some(design) = find(pending.front) {
                        self.selection.front = Some(design);
                    }
                    if let Some(design) = find(pending.back) {
                        self.selection.back = Some(design);
                    }
                    // The URL was rewritten while these were pending.
                    if self.url_revision > 0 {
                        self.url_revision += 1;
                    }
                }
                self.designs = designs;
            }
            Err(message) => {
                log::error!("Error al cargar diseños de {}: {message}", request.category);
                self.designs_failure = Some(DesignFailure {
                    message: format!(
                        "No se pudieron cargar los diseños de {}: {message}",
                        request.category
                    ),
                    request,
                });
            }
        }
        true
    }

    /// Re-issue every failed fetch, each with a fresh ticket.
    pub fn retry(&mut self) -> Vec<Fetch> {
        let mut fetches = Vec::new();
        if self.categories_failure.is_some() {
            fetches.push(Fetch::Categories {
                ticket: self.load_categories(),
            });
        }
        if let Some(failure) = self.designs_failure.take() {
            let category = failure.request.category;
            if self.selection.category.as_deref() == Some(category.as_str()) {
                fetches.push(Fetch::Designs(self.request_designs(category)));
            }
        }
        fetches
    }

    // ─── User operations ─────────────────────────────────────────

    /// Switch category (or clear it with `None`). Slots are cleared and the
    /// new design list has to be fetched.
    pub fn select_category(&mut self, category: Option<String>) -> Option<DesignRequest> {
        let category = category.filter(|c| !c.is_empty());
        self.selection.set_category(category.clone());
        self.designs.clear();
        self.pending_slots = None;
        self.url_revision += 1;
        match category {
            Some(category) => Some(self.request_designs(category)),
            None => {
                self.designs_in_flight = None;
                self.designs_failure = None;
                None
            }
        }
    }

    pub fn toggle_design(&mut self, design: Design, slot: Slot) {
        self.selection.toggle_design(design, slot);
        self.url_revision += 1;
    }

    pub fn select_color(&mut self, color: GarmentColor) {
        self.selection.color = color;
        self.url_revision += 1;
    }

    pub fn switch_view(&mut self, view: View) {
        self.selection.view = view;
    }

    /// Apply a configuration read from the page URL.
    ///
    /// A known colour value is adopted right away. A category triggers a
    /// design fetch; the front/back filenames are resolved once that list
    /// arrives, and names no longer in the catalog are dropped silently.
    pub fn restore_from_query(&mut self, query: &str) -> Option<DesignRequest> {
        let shared = SharedQuery::parse(query);

        if let Some(color) = shared.color.as_deref().and_then(GarmentColor::from_value) {
            self.selection.color = color;
        }

        let category = shared.anime?;
        self.selection.set_category(Some(category.clone()));
        self.designs.clear();
        self.pending_slots = Some(PendingSlots {
            front: shared.pecho,
            back: shared.espalda,
        });
        Some(self.request_designs(category))
    }
}
