//! The single canonical mission-area slot
//!
//! Adapters write through `set_geometry`; forms read `current_geometry` or
//! the serialized copy taken at the last write.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::activity::LogSink;
use crate::domain::Geometry;

#[derive(Debug)]
pub struct Canonicalizer {
    current: RefCell<Option<Geometry>>,
    /// GeoJSON text of `current`, empty when absent
    serialized: RefCell<String>,
    revision: Cell<u64>,
    log: Rc<LogSink>,
}

impl Canonicalizer {
    pub fn new(log: Rc<LogSink>) -> Self {
        Self {
            current: RefCell::new(None),
            serialized: RefCell::new(String::new()),
            revision: Cell::new(0),
            log,
        }
    }

    /// Replace the canonical geometry; `None` clears it
    ///
    /// No ring or winding validation happens here.
    pub fn set_geometry(&self, geometry: Option<Geometry>) {
        let serialized = match &geometry {
            Some(geometry) => match serde_json::to_string(geometry) {
                Ok(text) => text,
                Err(err) => {
                    log::error!("Failed to serialize mission area: {err}");
                    String::new()
                }
            },
            None => String::new(),
        };

        let message = match &geometry {
            Some(geometry) => format!(
                "Mission area updated ({} points)",
                geometry.outer_ring().len()
            ),
            None => "Mission area cleared".to_string(),
        };

        *self.current.borrow_mut() = geometry;
        *self.serialized.borrow_mut() = serialized;
        self.revision.set(self.revision.get() + 1);
        self.log.info(message);
    }

    pub fn current_geometry(&self) -> Option<Geometry> {
        self.current.borrow().clone()
    }

    /// Serialized copy consumed by route planning at submit time
    pub fn serialized(&self) -> String {
        self.serialized.borrow().clone()
    }

    /// Bumped on every write
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Short status line for the mission panel
    pub fn describe(&self) -> String {
        match &*self.current.borrow() {
            Some(geometry) => format!("Area captured: {} points", geometry.outer_ring().len()),
            None => "No mission area drawn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer() -> (Canonicalizer, Rc<LogSink>) {
        let log = Rc::new(LogSink::default());
        (Canonicalizer::new(Rc::clone(&log)), log)
    }

    #[test]
    fn set_then_clear_updates_serialized_copy() {
        let (canonical, log) = canonicalizer();
        let geometry = Geometry::polygon(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);

        canonical.set_geometry(Some(geometry.clone()));
        assert_eq!(canonical.current_geometry(), Some(geometry.clone()));
        assert_eq!(
            canonical.serialized(),
            serde_json::to_string(&geometry).unwrap()
        );

        canonical.set_geometry(None);
        assert_eq!(canonical.current_geometry(), None);
        assert_eq!(canonical.serialized(), "");
        assert_eq!(canonical.revision(), 2);

        let messages: Vec<_> = log.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["Mission area cleared", "Mission area updated (4 points)"]);
    }

    #[test]
    fn describe_reflects_slot() {
        let (canonical, _log) = canonicalizer();
        assert_eq!(canonical.describe(), "No mission area drawn");
        canonical.set_geometry(Some(Geometry::polygon(vec![[0.0, 0.0]; 5])));
        assert_eq!(canonical.describe(), "Area captured: 5 points");
    }
}
