use chrono::{DateTime, Utc};
use roster::{build_view_state, ViewState};
use tracing::{error, info};

use crate::{api::GroupSource, error::FetchError};

/// Owns the view state and refreshes it from a [`GroupSource`]. A reload
/// either replaces the whole state or leaves the previous one in place.
pub struct RosterSession<S> {
    source: S,
    state: ViewState,
    loaded_at: Option<DateTime<Utc>>,
}

impl<S: GroupSource> RosterSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ViewState::default(),
            loaded_at: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub async fn try_reload(&mut self) -> Result<&ViewState, FetchError> {
        self.try_reload_at(Utc::now()).await
    }

    /// Ages are computed relative to `now`.
    pub async fn try_reload_at(&mut self, now: DateTime<Utc>) -> Result<&ViewState, FetchError> {
        let groups = self.source.fetch_groups().await?;
        let next = build_view_state(&groups, now);
        info!(
            groups = next.groups().len(),
            members = next.groups().iter().map(|g| g.members.len()).sum::<usize>(),
            "roster rebuilt"
        );
        self.state = next;
        self.loaded_at = Some(now);
        Ok(&self.state)
    }

    /// Like [`Self::try_reload`] but logs failures instead of returning them.
    pub async fn reload(&mut self) -> bool {
        match self.try_reload().await {
            Ok(_) => true,
            Err(err) => {
                error!(error = %err, "failed to load groups; keeping previous roster");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
