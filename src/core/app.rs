//! The dashboard state object
//!
//! `Dashboard` owns every piece of session state and is passed by shared
//! reference to each handler. Fields that change are behind `RefCell`, each
//! written by one handler path, and no borrow is ever held across an
//! `.await`, so several handlers may be in flight on the one thread.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::DashboardConfig;
use crate::core::activity::LogSink;
use crate::core::network::{NetworkClient, Transport};
use crate::core::sequence::Sequencer;
use crate::forms::{self, FormInputs};
use crate::map::{
    Canonicalizer, GoogleEvent, LeafletEvent, MapAdapter, MapProviders, MapSurfaces, ProviderId,
};
use crate::review::{self, ReviewStore};
use crate::session::events::{Action, EventTable, Panel};
use crate::session::messages::{MapMsg, Msg, NavMsg};
use crate::session::state::UiState;

pub struct Dashboard<T> {
    pub config: DashboardConfig,
    pub(crate) client: NetworkClient<T>,
    pub(crate) log: Rc<LogSink>,
    pub(crate) geometry: Canonicalizer,
    pub(crate) maps: RefCell<MapProviders>,
    pub(crate) ui: RefCell<UiState>,
    pub(crate) store: RefCell<ReviewStore>,
    pub(crate) forms: RefCell<FormInputs>,
    /// Text shown in each panel's output area
    pub(crate) outputs: RefCell<BTreeMap<Panel, String>>,
    pub(crate) sequencer: Sequencer,
    events: EventTable,
}

impl<T: Transport> Dashboard<T> {
    /// Build the dashboard; unavailable map providers are logged, never fatal
    pub fn new(config: DashboardConfig, transport: T, surfaces: MapSurfaces) -> Self {
        let log = Rc::new(LogSink::with_capacity(config.log_capacity));
        let maps = MapProviders::new(
            surfaces,
            config.google_maps_api_key(),
            config.overlay_padding_px,
            &log,
        );
        let events = EventTable::standard();
        log::debug!("Registered {} panel actions", events.len());

        Self {
            client: NetworkClient::new(transport),
            geometry: Canonicalizer::new(Rc::clone(&log)),
            maps: RefCell::new(maps),
            ui: RefCell::new(UiState::new(config.default_provider)),
            store: RefCell::new(ReviewStore::new()),
            forms: RefCell::new(FormInputs::default()),
            outputs: RefCell::new(BTreeMap::new()),
            sequencer: Sequencer::new(config.discard_stale_responses),
            events,
            log,
            config,
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Handle one message to completion
    pub async fn update(&self, msg: Msg) {
        match msg {
            Msg::Map(msg) => self.handle_map_msg(msg),
            Msg::Nav(msg) => self.handle_nav_msg(msg),
            Msg::Review(msg) => review::handle_review_msg(self, msg).await,
            Msg::Form(msg) => forms::handle_form_msg(self, msg).await,
        }
    }

    /// Run the handler registered for a panel action
    ///
    /// Returns false when nothing is registered for the pair.
    pub async fn trigger(&self, panel: Panel, action: Action) -> bool {
        let Some(msg) = self.events.lookup(panel, action) else {
            log::debug!("No handler for {} {action}", panel.label());
            return false;
        };
        self.update(msg).await;
        true
    }

    fn handle_map_msg(&self, msg: MapMsg) {
        match msg {
            MapMsg::Leaflet(event) => {
                if !self.accepts_drawing(ProviderId::OpenStreetMap) {
                    return;
                }
                let creates = matches!(event, LeafletEvent::Created(_));
                let mut maps = self.maps.borrow_mut();
                maps.leaflet.handle_event(event, &self.geometry);
                if creates {
                    maps.other_mut(ProviderId::OpenStreetMap).release_drawn();
                }
            }
            MapMsg::Google(event) => {
                if !self.accepts_drawing(ProviderId::GoogleMaps) {
                    return;
                }
                let creates = matches!(event, GoogleEvent::OverlayComplete(_));
                let mut maps = self.maps.borrow_mut();
                maps.google.handle_event(event, &self.geometry);
                if creates {
                    maps.other_mut(ProviderId::GoogleMaps).release_drawn();
                }
            }
            MapMsg::SelectProvider(provider) => {
                let changed = self.ui.borrow_mut().activate_provider(provider);
                if !changed {
                    return;
                }
                // Mission area first, else the overlay drawn while hidden
                let area = self
                    .geometry
                    .current_geometry()
                    .or_else(|| self.store.borrow().selected_overlay())
                    .and_then(|geometry| geometry.bounds());
                let mut maps = self.maps.borrow_mut();
                let adapter = maps.get_mut(provider);
                // The container was hidden and may hold a stale size
                adapter.relayout();
                if let Some(bounds) = area {
                    adapter.fit_bounds(bounds);
                }
                self.log.info(format!("Drawing provider set to {}", provider.label()));
            }
        }
    }

    /// Only the visible provider draws
    fn accepts_drawing(&self, provider: ProviderId) -> bool {
        let visible = self.ui.borrow().is_provider_visible(provider);
        if !visible {
            log::debug!("Ignoring drawing event from hidden {}", provider.label());
        }
        visible
    }

    fn handle_nav_msg(&self, msg: NavMsg) {
        match msg {
            NavMsg::Tab(id) => {
                let change = self.ui.borrow_mut().activate_tab(&id);
                match change {
                    Some(change) if change.relayout_map => {
                        let provider = self.ui.borrow().active_provider();
                        self.maps.borrow_mut().get_mut(provider).relayout();
                    }
                    Some(_) => {}
                    None => log::debug!("Unknown tab {id}"),
                }
            }
            NavMsg::Subtab(container, id) => {
                let change = self.ui.borrow_mut().activate_subtab(container, &id);
                if let Some(change) = change {
                    self.log.info(format!(
                        "{}: switched from {} to {}",
                        change.container.label(),
                        change.from,
                        change.to
                    ));
                }
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn geometry(&self) -> &Canonicalizer {
        &self.geometry
    }

    pub fn client(&self) -> &NetworkClient<T> {
        &self.client
    }

    pub fn events(&self) -> &EventTable {
        &self.events
    }

    pub fn ui(&self) -> Ref<'_, UiState> {
        self.ui.borrow()
    }

    pub fn store(&self) -> Ref<'_, ReviewStore> {
        self.store.borrow()
    }

    pub fn maps(&self) -> Ref<'_, MapProviders> {
        self.maps.borrow()
    }

    /// Text currently in a panel's output area
    pub fn output(&self, panel: Panel) -> Option<String> {
        self.outputs.borrow().get(&panel).cloned()
    }

    pub(crate) fn set_output(&self, panel: Panel, text: String) {
        self.outputs.borrow_mut().insert(panel, text);
    }

    /// Edit form fields the way a front-end would between submissions
    pub fn with_forms<R>(&self, edit: impl FnOnce(&mut FormInputs) -> R) -> R {
        edit(&mut self.forms.borrow_mut())
    }
}
