use crate::model::{Event, EventId};
use serde::Serialize;

/// Zoom level a map consumer should fly to when focusing a selected event.
pub const FOCUS_ZOOM: u8 = 6;

/// Where the map should center for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusTarget {
    pub id: EventId,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

/// At most one selected event id.
///
/// An id that is not in the filtered set is kept as-is and simply resolves to
/// no focus target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    id: Option<EventId>,
}

impl Selection {
    pub fn select(&mut self, id: EventId) {
        self.id = Some(id);
    }

    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn id(&self) -> Option<&EventId> {
        self.id.as_ref()
    }

    pub fn focus(&self, events: &[Event]) -> Option<FocusTarget> {
        let id = self.id.as_ref()?;
        let event = events.iter().find(|e| &e.id == id)?;

        Some(FocusTarget {
            id: event.id.clone(),
            latitude: event.latitude,
            longitude: event.longitude,
            zoom: FOCUS_ZOOM,
        })
    }
}
