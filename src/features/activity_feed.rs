//! The activity feed: an ordered log of favorites changes.

use crate::effect::Effect;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a recorded event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    AddedFavoritePrime(i64),
    RemovedFavoritePrime(i64),
}

/// One feed entry, identified independently of its payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn new(timestamp: DateTime<Utc>, kind: ActivityKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
        }
    }

    pub fn label(&self) -> String {
        match self.kind {
            ActivityKind::AddedFavoritePrime(prime) => format!("Added prime: {}", prime),
            ActivityKind::RemovedFavoritePrime(prime) => format!("Removed prime: {}", prime),
        }
    }
}

pub type ActivityFeedState = Vec<Activity>;

#[derive(Clone, Debug, PartialEq)]
pub enum ActivityFeedAction {
    /// Ascending, unique indices into the current feed.
    DeleteActivity(Vec<usize>),
}

pub fn activity_feed_reducer(
    state: &mut ActivityFeedState,
    action: ActivityFeedAction,
    _environment: &(),
) -> Vec<Effect<ActivityFeedAction>> {
    match action {
        ActivityFeedAction::DeleteActivity(mut indices) => {
            indices.sort_unstable();
            indices.dedup();
            for index in indices.into_iter().rev() {
                state.remove(index);
            }
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn feed_at(now: DateTime<Utc>) -> ActivityFeedState {
        vec![
            Activity::new(now - TimeDelta::seconds(30), ActivityKind::AddedFavoritePrime(5)),
            Activity::new(now - TimeDelta::seconds(20), ActivityKind::AddedFavoritePrime(7)),
            Activity::new(now - TimeDelta::seconds(10), ActivityKind::AddedFavoritePrime(11)),
            Activity::new(now, ActivityKind::RemovedFavoritePrime(7)),
        ]
    }

    #[test]
    fn delete_removes_entry_at_index() {
        let now = Utc::now();
        let mut state = feed_at(now);

        let effects =
            activity_feed_reducer(&mut state, ActivityFeedAction::DeleteActivity(vec![0]), &());

        assert_eq!(state.len(), 3);
        assert_eq!(state[0].timestamp, now - TimeDelta::seconds(20));
        assert!(effects.is_empty());
    }

    #[test]
    fn labels_classify_entries() {
        let entry = Activity::new(Utc::now(), ActivityKind::AddedFavoritePrime(5));
        assert_eq!(entry.label(), "Added prime: 5");

        let entry = Activity::new(Utc::now(), ActivityKind::RemovedFavoritePrime(7));
        assert_eq!(entry.label(), "Removed prime: 7");
    }
}
