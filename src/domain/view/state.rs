//! View state container — an explicit state object plus a pure reducer.
//!
//! Every refresh carries a `RefreshTicket`. Completions whose ticket is not the
//! latest one started (or whose period no longer matches the selection) are
//! dropped, so a slow response for an old period can never overwrite the view
//! of the current one.

use super::{present, ViewModel};
use crate::domain::rates::ChartSeries;
use crate::error::FetchError;
use crate::shared::Period;
use serde::{Deserialize, Serialize};

/// Tag identifying one refresh. Generations increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefreshTicket {
    pub generation: u64,
    pub period: Period,
}

/// Discrete inputs to the reducer.
#[derive(Debug)]
pub enum ViewEvent {
    /// The user picked a period. Drops whatever was shown before.
    PeriodChanged(Period),
    FetchStarted(RefreshTicket),
    FetchSucceeded {
        ticket: RefreshTicket,
        series: ChartSeries,
    },
    FetchFailed {
        ticket: RefreshTicket,
        error: FetchError,
    },
}

impl ViewEvent {
    pub fn ticket(&self) -> Option<RefreshTicket> {
        match self {
            ViewEvent::PeriodChanged(_) => None,
            ViewEvent::FetchStarted(t)
            | ViewEvent::FetchSucceeded { ticket: t, .. }
            | ViewEvent::FetchFailed { ticket: t, .. } => Some(*t),
        }
    }
}

/// Reducer state: the published view model plus the latest started generation.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub generation: u64,
    pub model: ViewModel,
}

impl ViewState {
    pub fn new(period: Period) -> Self {
        Self {
            generation: 0,
            model: ViewModel::loading(period),
        }
    }

    /// Whether a completion carrying `ticket` would be applied.
    pub fn accepts(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.generation && ticket.period == self.model.period
    }
}

/// Produce the next state for `event`. Never mutates `state`.
pub fn reduce(state: &ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::PeriodChanged(period) => ViewState {
            generation: state.generation,
            model: ViewModel::loading(period),
        },
        ViewEvent::FetchStarted(ticket) => {
            if ticket.generation <= state.generation {
                return state.clone();
            }
            ViewState {
                generation: ticket.generation,
                model: ViewModel::loading(ticket.period),
            }
        }
        ViewEvent::FetchSucceeded { ticket, series } => {
            if !state.accepts(&ticket) {
                return state.clone();
            }
            ViewState {
                generation: state.generation,
                model: present(ticket.period, Ok(series)),
            }
        }
        ViewEvent::FetchFailed { ticket, error } => {
            if !state.accepts(&ticket) {
                return state.clone();
            }
            ViewState {
                generation: state.generation,
                model: present(ticket.period, Err(error)),
            }
        }
    }
}
