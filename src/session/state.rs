//! Tab, sub-tab and map-provider selection state
//!
//! Every group holds exactly one active member; transitions report what
//! the caller has to do next (sidebar text, map re-layout, log line).

use std::collections::BTreeMap;

use crate::map::ProviderId;

/// Top-level dashboard tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tab {
    Overview,
    Mission,
    Footage,
    Classification,
    Surveys,
    Finance,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Mission,
        Tab::Footage,
        Tab::Classification,
        Tab::Surveys,
        Tab::Finance,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Mission => "mission",
            Tab::Footage => "footage",
            Tab::Classification => "classification",
            Tab::Surveys => "surveys",
            Tab::Finance => "finance",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.id() == id)
    }

    /// Contextual sidebar guidance
    pub fn sidebar_text(self) -> &'static str {
        match self {
            Tab::Overview => "Upload sample footage or pick a provider to begin.",
            Tab::Mission => {
                "Draw the survey area on the map, then plan a grid route over it. \
                 Rectangles and polygons are both accepted."
            }
            Tab::Footage => "Upload drone or phone footage for frame extraction.",
            Tab::Classification => "Run the demo classifier to preview asset labels.",
            Tab::Surveys => {
                "Pick a capture to view its overlay and assets, compare two captures, \
                 or annotate an asset."
            }
            Tab::Finance => "Review income and expenses, or duplicate a transaction as a template.",
        }
    }

    /// The tab hosting the interactive drawing map
    pub fn hosts_drawing_map(self) -> bool {
        matches!(self, Tab::Mission)
    }
}

/// Panels that carry their own sub-tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubtabContainer {
    Surveys,
    Finance,
}

impl SubtabContainer {
    pub const ALL: [SubtabContainer; 2] = [SubtabContainer::Surveys, SubtabContainer::Finance];

    /// Label used to scope log lines
    pub fn label(self) -> &'static str {
        match self {
            SubtabContainer::Surveys => "Survey history",
            SubtabContainer::Finance => "Finance",
        }
    }

    /// Sub-tab ids; the first is active initially
    pub fn subtabs(self) -> &'static [&'static str] {
        match self {
            SubtabContainer::Surveys => &["visualise", "compare", "annotate"],
            SubtabContainer::Finance => &["ledger", "duplicate"],
        }
    }
}

/// Result of entering a top-level tab
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabChange {
    pub tab: Tab,
    pub sidebar: &'static str,
    pub relayout_map: bool,
}

/// Result of switching a sub-tab
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubtabChange {
    pub container: SubtabContainer,
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Clone, Debug)]
pub struct UiState {
    active_tab: Tab,
    active_provider: ProviderId,
    subtabs: BTreeMap<SubtabContainer, &'static str>,
    sidebar: &'static str,
}

impl UiState {
    pub const DEFAULT_TAB: Tab = Tab::Overview;

    pub fn new(provider: ProviderId) -> Self {
        let subtabs = SubtabContainer::ALL
            .into_iter()
            .filter_map(|container| container.subtabs().first().map(|id| (container, *id)))
            .collect();
        Self {
            active_tab: Self::DEFAULT_TAB,
            active_provider: provider,
            subtabs,
            sidebar: Self::DEFAULT_TAB.sidebar_text(),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn active_provider(&self) -> ProviderId {
        self.active_provider
    }

    pub fn sidebar(&self) -> &'static str {
        self.sidebar
    }

    pub fn active_subtab(&self, container: SubtabContainer) -> &'static str {
        self.subtabs.get(&container).copied().unwrap_or_default()
    }

    /// Whether a provider's map container is shown (the other is hidden, not destroyed)
    pub fn is_provider_visible(&self, provider: ProviderId) -> bool {
        self.active_provider == provider
    }

    /// Unknown ids leave the state untouched
    pub fn activate_tab(&mut self, id: &str) -> Option<TabChange> {
        let tab = Tab::from_id(id)?;
        self.active_tab = tab;
        self.sidebar = tab.sidebar_text();
        Some(TabChange {
            tab,
            sidebar: self.sidebar,
            relayout_map: tab.hosts_drawing_map(),
        })
    }

    /// Idempotent: re-activating the active sub-tab, or an unknown one, does nothing
    pub fn activate_subtab(&mut self, container: SubtabContainer, id: &str) -> Option<SubtabChange> {
        let to = container.subtabs().iter().copied().find(|candidate| *candidate == id)?;
        let from = self.active_subtab(container);
        if from == to {
            return None;
        }
        self.subtabs.insert(container, to);
        Some(SubtabChange { container, from, to })
    }

    /// Returns true when the provider actually changed
    pub fn activate_provider(&mut self, provider: ProviderId) -> bool {
        if self.active_provider == provider {
            return false;
        }
        self.active_provider = provider;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_default_tab_with_first_subtabs() {
        let ui = UiState::new(ProviderId::OpenStreetMap);
        assert_eq!(ui.active_tab(), Tab::Overview);
        assert_eq!(ui.active_subtab(SubtabContainer::Surveys), "visualise");
        assert_eq!(ui.active_subtab(SubtabContainer::Finance), "ledger");
        assert_eq!(ui.sidebar(), Tab::Overview.sidebar_text());
    }

    #[test]
    fn unknown_tab_is_a_no_op() {
        let mut ui = UiState::new(ProviderId::OpenStreetMap);
        ui.activate_tab("finance");
        assert_eq!(ui.activate_tab("settings"), None);
        assert_eq!(ui.active_tab(), Tab::Finance);
    }

    #[test]
    fn only_mission_tab_requests_relayout() {
        let mut ui = UiState::new(ProviderId::OpenStreetMap);
        for tab in Tab::ALL {
            let change = ui.activate_tab(tab.id()).unwrap();
            assert_eq!(change.relayout_map, tab == Tab::Mission);
            assert_eq!(change.sidebar, tab.sidebar_text());
        }
    }

    #[test]
    fn subtab_activation_is_idempotent() {
        let mut ui = UiState::new(ProviderId::OpenStreetMap);
        let change = ui.activate_subtab(SubtabContainer::Surveys, "compare").unwrap();
        assert_eq!((change.from, change.to), ("visualise", "compare"));
        assert_eq!(ui.activate_subtab(SubtabContainer::Surveys, "compare"), None);
        assert_eq!(ui.activate_subtab(SubtabContainer::Surveys, "nonsense"), None);
        assert_eq!(ui.active_subtab(SubtabContainer::Surveys), "compare");
        assert_eq!(ui.active_subtab(SubtabContainer::Finance), "ledger");
    }

    #[test]
    fn provider_toggle_reports_change() {
        let mut ui = UiState::new(ProviderId::OpenStreetMap);
        assert!(!ui.activate_provider(ProviderId::OpenStreetMap));
        assert!(ui.activate_provider(ProviderId::GoogleMaps));
        assert!(ui.is_provider_visible(ProviderId::GoogleMaps));
        assert!(!ui.is_provider_visible(ProviderId::OpenStreetMap));
    }
}
