//! Per-connection subscription manager.
//!
//! Tracks which grades a live-feed client wants registrations for and
//! provides server-side event filtering.

use std::collections::HashSet;

/// Manages the grade filter for a single WebSocket connection.
///
/// The `Default` manager matches nothing; connections start from
/// [`SubscriptionManager::all`].
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed grades. If `subscribe_all` is true, this set is ignored.
    grades: HashSet<i64>,
    /// Whether the client receives every registration (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a manager that matches every grade.
    #[must_use]
    pub fn all() -> Self {
        Self {
            grades: HashSet::new(),
            subscribe_all: true,
        }
    }

    /// Adds grades to the subscription set. `wildcard` enables matching
    /// every grade.
    pub fn subscribe(&mut self, grades: &[i64], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.grades.extend(grades.iter().copied());
    }

    /// Removes grades from the subscription set. `wildcard` clears the
    /// wildcard and every explicit grade.
    pub fn unsubscribe(&mut self, grades: &[i64], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
            self.grades.clear();
            return;
        }
        for grade in grades {
            self.grades.remove(grade);
        }
    }

    /// Returns `true` if a registration for `grade` should be forwarded.
    #[must_use]
    pub fn matches(&self, grade: i64) -> bool {
        self.subscribe_all || self.grades.contains(&grade)
    }

    /// Returns the number of explicitly subscribed grades.
    #[must_use]
    pub fn count(&self) -> usize {
        self.grades.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
