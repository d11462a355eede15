use std::rc::Rc;

use saco_catalog::{Category, Configurator, Design, GarmentColor, Slot, View};
use wasm_bindgen::JsValue;
use yew::Reducible;

// ─── Reducer ────────────────────────────────────────────────────────

pub enum Action {
    LoadCategories,
    CategoriesLoaded {
        ticket: u64,
        result: Result<Vec<Category>, String>,
    },
    SelectCategory(Option<String>),
    DesignsLoaded {
        ticket: u64,
        result: Result<Vec<Design>, String>,
    },
    ToggleDesign(Design, Slot),
    SelectColor(GarmentColor),
    SwitchView(View),
    /// Re-read the configuration from a query string.
    Restore(String),
    Retry,
}

/// App state as seen by yew. Fetches are not started here: the component
/// watches the pending requests exposed by the configurator and runs them.
#[derive(Default, PartialEq)]
pub struct Store(pub Configurator);

impl Reducible for Store {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut next = self.0.clone();
        match action {
            Action::LoadCategories => {
                next.load_categories();
            }
            Action::CategoriesLoaded { ticket, result } => {
                next.categories_loaded(ticket, result);
            }
            Action::SelectCategory(category) => {
                next.select_category(category);
            }
            Action::DesignsLoaded { ticket, result } => {
                next.designs_loaded(ticket, result);
            }
            Action::ToggleDesign(design, slot) => next.toggle_design(design, slot),
            Action::SelectColor(color) => next.select_color(color),
            Action::SwitchView(view) => next.switch_view(view),
            Action::Restore(query) => {
                next.restore_from_query(&query);
            }
            Action::Retry => {
                next.retry();
            }
        }
        Rc::new(Store(next))
    }
}

// ─── Browser location ───────────────────────────────────────────────

/// Current `?query` of the page, empty when unavailable.
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn current_href() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

/// Swap the query string in place: no navigation, no history entry.
pub fn replace_query(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let pathname = window.location().pathname().unwrap_or_default();
    let url = if query.is_empty() {
        pathname
    } else {
        format!("{pathname}?{query}")
    };
    if let Ok(history) = window.history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("replaceState failed: {e:?}");
        }
    }
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("window.open failed: {e:?}");
        }
    }
}
