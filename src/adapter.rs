// src/adapter.rs
// Long-lived entry point: console lines in, decision updates out

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::config::FeedConfig;
use crate::error::ExtractError;
use crate::feed::events::TableEvent;
use crate::feed::payload;
use crate::hand::state::Snapshot;
use crate::hand::tracker::HandTracker;
use crate::strategy::node_key::build_node_key;

static AUTH_USER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[AUTH\] authenticated as userId (\d+)").unwrap());

/// What one processed line produced: the fresh snapshot, whether the tracked
/// player is the one to act, and the lookup key when they are.
#[derive(Debug, Clone)]
pub struct DecisionUpdate {
    pub snapshot: Snapshot,
    pub is_decision_point: bool,
    pub node_key: Option<String>,
}

/// Feeds console lines through extraction, decoding and the hand tracker.
/// Holds the suppression state that keeps repeat snapshots quiet.
pub struct TableFeed {
    tracker: HandTracker,
    last_state_key: Option<String>,
}

impl TableFeed {
    pub fn new(config: FeedConfig) -> TableFeed {
        TableFeed {
            tracker: HandTracker::new(&config),
            last_state_key: None,
        }
    }

    pub fn tracker(&self) -> &HandTracker {
        &self.tracker
    }

    /// Feed one console line. `tag` is the caller's classification of the
    /// line's origin and only shows up in trace logs. Never fails: anything
    /// unusable is logged and skipped.
    pub fn process(&mut self, tag: &str, text: &str) -> Option<DecisionUpdate> {
        trace!(tag, "console line");

        if self.tracker.hero_user_id().is_none() {
            if let Some(user_id) = parse_auth_user_id(text) {
                self.tracker.set_hero_user_id(user_id);
                debug!(user_id, "authenticated");
            }
            // Without a tracked player there is no hand to follow yet.
            if self.tracker.hero_user_id().is_none() {
                return None;
            }
        }

        let update = match payload::try_extract(text) {
            Ok(update) => update,
            Err(ExtractError::MissingMarker) => return None,
            Err(err) => {
                warn!(%err, "skipping unparseable update line");
                return None;
            }
        };

        let action = update.action.clone();
        let Some(event) = TableEvent::from_update(update) else {
            trace!(%action, "ignoring unrecognized update action");
            return None;
        };

        let snapshot = self.tracker.apply(event)?;

        let state_key = state_key(&snapshot);
        if self.last_state_key.as_deref() == Some(state_key.as_str()) {
            return None;
        }
        self.last_state_key = Some(state_key);

        let is_decision_point = snapshot.is_hero_turn();
        let node_key = is_decision_point.then(|| build_node_key(&snapshot));
        Some(DecisionUpdate {
            snapshot,
            is_decision_point,
            node_key,
        })
    }
}

fn parse_auth_user_id(text: &str) -> Option<u64> {
    AUTH_USER_ID
        .captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Compact identity of a snapshot, used to suppress repeat emissions.
fn state_key(snapshot: &Snapshot) -> String {
    let board: String = snapshot.board.iter().map(ToString::to_string).collect();
    format!(
        "{:?}|{}|{:?}|{}|{}|{}",
        snapshot.hand_id,
        snapshot.street,
        snapshot.acting_seat,
        snapshot.pot,
        snapshot.history.len(),
        board
    )
}
