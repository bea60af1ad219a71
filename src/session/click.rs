use std::time::Instant;
use tracing::debug;

use super::SessionState;
use crate::geo::{ClickEvent, Coordinate};

/// Result of feeding a map click into a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Same raw click as before; nothing changed
    Duplicate,
    /// Position updated, search suppressed by the cooldown
    RateLimited(Coordinate),
    /// Position updated and a search is due
    TriggerSearch(Coordinate),
}

impl ClickOutcome {
    pub fn triggers_search(&self) -> bool {
        matches!(self, ClickOutcome::TriggerSearch(_))
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            ClickOutcome::Duplicate => None,
            ClickOutcome::RateLimited(c) | ClickOutcome::TriggerSearch(c) => Some(*c),
        }
    }
}

impl SessionState {
    /// Applies a raw map click received at `now`
    ///
    /// A click equal to the previous one is dropped. Otherwise the normalized
    /// position becomes current, and a search is triggered if more than the
    /// cooldown has passed since the last triggered search (or if there was
    /// none yet).
    pub fn handle_click(&mut self, click: ClickEvent, now: Instant) -> ClickOutcome {
        if self.last_click == Some(click) {
            return ClickOutcome::Duplicate;
        }

        self.last_click = Some(click);
        self.coordinate = click.to_coordinate();

        let due = match self.last_search {
            Some(last) => now.saturating_duration_since(last) > self.cooldown,
            None => true,
        };

        if due {
            self.last_search = Some(now);
            ClickOutcome::TriggerSearch(self.coordinate)
        } else {
            debug!(coordinate = %self.coordinate, "click search suppressed by cooldown");
            ClickOutcome::RateLimited(self.coordinate)
        }
    }
}
