//! View state for a single fetch: one per screen.
//!
//! `Fetch` never performs I/O itself. `load` hands out a `Ticket`; whoever
//! runs the request reports back through `resolve` with that ticket. Every
//! `load` or `reset` bumps the generation, so a response to a superseded
//! request is dropped instead of overwriting newer state.

use crate::error::{Result, ShelfError};

#[derive(Debug, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(ShelfError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ShelfError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Loaded,
    Failed,
    /// The ticket was superseded; state is unchanged.
    Stale,
}

#[derive(Debug)]
pub struct Fetch<P, T> {
    state: FetchState<T>,
    params: Option<P>,
    generation: u64,
}

impl<P, T> Default for Fetch<P, T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            params: None,
            generation: 0,
        }
    }
}

impl<P: Clone, T> Fetch<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Parameters of the most recent `load`.
    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    pub fn load(&mut self, params: P) -> Ticket {
        self.generation += 1;
        self.params = Some(params);
        self.state = FetchState::Loading;
        Ticket {
            generation: self.generation,
        }
    }

    pub fn resolve(&mut self, ticket: Ticket, result: Result<T>) -> Resolution {
        if ticket.generation != self.generation || !self.state.is_loading() {
            return Resolution::Stale;
        }

        match result {
            Ok(data) => {
                self.state = FetchState::Loaded(data);
                Resolution::Loaded
            }
            Err(err) => {
                self.state = FetchState::Failed(err);
                Resolution::Failed
            }
        }
    }

    /// Re-issue the last request. Only valid from `Failed`.
    pub fn retry(&mut self) -> Option<(P, Ticket)> {
        if !matches!(self.state, FetchState::Failed(_)) {
            return None;
        }
        let params = self.params.clone()?;
        let ticket = self.load(params.clone());
        Some((params, ticket))
    }

    /// Back to `Idle`; any in-flight ticket becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.params = None;
        self.state = FetchState::Idle;
    }
}
