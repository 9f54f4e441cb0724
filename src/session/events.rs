//! Operator event registration
//!
//! Every button a front-end exposes is a `(Panel, Action)` pair. The table
//! mapping those pairs to messages is built once at startup, so the whole
//! event surface can be listed and exercised without a live interface.

use std::collections::BTreeMap;
use std::fmt;

use super::messages::Msg;

/// Dashboard panels that own an output area or a request stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Panel {
    Mission,
    Footage,
    Classification,
    Surveys,
    Comparison,
    Annotation,
    Finance,
}

impl Panel {
    pub fn label(self) -> &'static str {
        match self {
            Panel::Mission => "mission",
            Panel::Footage => "footage",
            Panel::Classification => "classification",
            Panel::Surveys => "surveys",
            Panel::Comparison => "comparison",
            Panel::Annotation => "annotation",
            Panel::Finance => "finance",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Submit,
    Refresh,
    ClearSelection,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Submit => "submit",
            Action::Refresh => "refresh",
            Action::ClearSelection => "clear-selection",
        })
    }
}

#[derive(Debug, Clone)]
pub struct EventTable {
    handlers: BTreeMap<(Panel, Action), Msg>,
}

impl EventTable {
    /// The dashboard's full set of panel actions
    pub fn standard() -> Self {
        let handlers = BTreeMap::from([
            ((Panel::Mission, Action::Submit), Msg::plan_route()),
            ((Panel::Footage, Action::Submit), Msg::upload_footage()),
            ((Panel::Classification, Action::Submit), Msg::run_classification()),
            ((Panel::Surveys, Action::Refresh), Msg::load_captures()),
            ((Panel::Comparison, Action::Submit), Msg::compare_captures()),
            ((Panel::Annotation, Action::Submit), Msg::annotate_asset()),
            ((Panel::Finance, Action::Refresh), Msg::load_finance()),
            ((Panel::Finance, Action::Submit), Msg::duplicate_transaction()),
            ((Panel::Finance, Action::ClearSelection), Msg::clear_selection()),
        ]);
        Self { handlers }
    }

    pub fn lookup(&self, panel: Panel, action: Action) -> Option<Msg> {
        self.handlers.get(&(panel, action)).cloned()
    }

    /// Registered pairs in a stable order
    pub fn entries(&self) -> impl Iterator<Item = (Panel, Action)> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::messages::{FormMsg, ReviewMsg};

    #[test]
    fn every_panel_has_a_registered_action() {
        let table = EventTable::standard();
        let panels: std::collections::BTreeSet<_> = table.entries().map(|(panel, _)| panel).collect();
        assert_eq!(panels.len(), 7);
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn lookup_returns_registered_message() {
        let table = EventTable::standard();
        assert!(matches!(
            table.lookup(Panel::Finance, Action::Submit),
            Some(Msg::Form(FormMsg::DuplicateTransaction))
        ));
        assert!(matches!(
            table.lookup(Panel::Surveys, Action::Refresh),
            Some(Msg::Review(ReviewMsg::LoadCaptures))
        ));
        assert!(table.lookup(Panel::Mission, Action::Refresh).is_none());
    }
}
