//! Per-panel request stamping
//!
//! Every fetch or submission takes a ticket for its panel. When a response
//! arrives, only the ticket issued last for that panel is still current;
//! anything older has been overtaken by a newer request.
//!
//! Fetches and submissions on the same panel count separately, so a
//! refresh never hides the outcome of a form submission.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::session::events::Panel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    Fetch,
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub panel: Panel,
    pub stream: Stream,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    latest: RefCell<HashMap<(Panel, Stream), u64>>,
    enforce: bool,
}

impl Sequencer {
    /// `enforce = false` keeps last-to-complete-wins behaviour
    pub fn new(enforce: bool) -> Self {
        Self {
            latest: RefCell::new(HashMap::new()),
            enforce,
        }
    }

    /// Ticket for a data fetch
    pub fn issue(&self, panel: Panel) -> Ticket {
        self.next(panel, Stream::Fetch)
    }

    /// Ticket for a form submission
    pub fn issue_submit(&self, panel: Panel) -> Ticket {
        self.next(panel, Stream::Submit)
    }

    fn next(&self, panel: Panel, stream: Stream) -> Ticket {
        let mut latest = self.latest.borrow_mut();
        let seq = latest.entry((panel, stream)).or_insert(0);
        *seq += 1;
        Ticket { panel, stream, seq: *seq }
    }

    /// Whether a completion for `ticket` may still be applied
    pub fn is_current(&self, ticket: Ticket) -> bool {
        if !self.enforce {
            return true;
        }
        let key = (ticket.panel, ticket.stream);
        let current = self.latest.borrow().get(&key).copied().unwrap_or(0) == ticket.seq;
        if !current {
            log::debug!(
                "Discarding stale {:?} {:?} response #{}",
                ticket.panel,
                ticket.stream,
                ticket.seq
            );
        }
        current
    }
}
