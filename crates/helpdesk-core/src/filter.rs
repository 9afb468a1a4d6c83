use serde::{Deserialize, Serialize};

use crate::model::{Category, Priority, Ticket};
use crate::UserId;

/// Visibility restriction for the ticket collection.
///
/// `Mine` is the only legal scope for a non-admin caller; `All` is enforced
/// by the remote store, not re-checked here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Mine,
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityFilter {
    /// Neutral element: no priority constraint.
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub const fn accepts(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => matches!(
                (wanted, priority),
                (Priority::Low, Priority::Low)
                    | (Priority::Medium, Priority::Medium)
                    | (Priority::High, Priority::High)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Neutral element: no category constraint.
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// What a filter change requires of the cached snapshot.
///
/// Structural axes (scope, priority, category) invalidate the snapshot and
/// force a fresh remote fetch; the text axis refines the cached collection
/// locally. Local refinement stays eventually exact because every
/// structural change goes back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    UseSnapshot,
    RefetchRemote,
}

/// The three orthogonal filter axes plus the role scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub priority: PriorityFilter,
    pub category: CategoryFilter,
    pub scope: Scope,
}

impl FilterState {
    pub fn scoped(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Replaces the free-text axis. Never structural: the non-text axes
    /// are untouched, so a snapshot fetched without a text constraint
    /// keeps serving local recomposition. A snapshot that was produced by
    /// a remote search is narrowed to its query; the holder of that
    /// snapshot tracks the narrowing and refetches on its own.
    pub fn set_query(&mut self, query: impl Into<String>) -> FetchPlan {
        self.query = query.into();
        FetchPlan::UseSnapshot
    }

    pub fn set_priority(&mut self, priority: PriorityFilter) -> FetchPlan {
        if self.priority == priority {
            return FetchPlan::UseSnapshot;
        }
        self.priority = priority;
        FetchPlan::RefetchRemote
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> FetchPlan {
        if self.category == category {
            return FetchPlan::UseSnapshot;
        }
        self.category = category;
        FetchPlan::RefetchRemote
    }

    pub fn set_scope(&mut self, scope: Scope) -> FetchPlan {
        if self.scope == scope {
            return FetchPlan::UseSnapshot;
        }
        self.scope = scope;
        FetchPlan::RefetchRemote
    }

    /// Clears every axis back to neutral, keeping the scope.
    pub fn reset(&mut self) -> FetchPlan {
        let structural = self.priority != PriorityFilter::All || self.category != CategoryFilter::All;
        self.query.clear();
        self.priority = PriorityFilter::All;
        self.category = CategoryFilter::All;
        if structural {
            FetchPlan::RefetchRemote
        } else {
            FetchPlan::UseSnapshot
        }
    }

    /// Applies the composition rule to one ticket, in fixed order:
    /// scope, priority, category, then free text. Axes compose
    /// conjunctively; the text axis ORs across title, description, and
    /// owner display name.
    pub fn matches(&self, ticket: &Ticket, caller: &UserId) -> bool {
        if matches!(self.scope, Scope::Mine) && &ticket.owner != caller {
            return false;
        }

        if !self.priority.accepts(ticket.priority) {
            return false;
        }

        if !self.category.accepts(ticket.category) {
            return false;
        }

        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        ticket.title.to_lowercase().contains(&needle)
            || ticket.description.to_lowercase().contains(&needle)
            || ticket.owner_name.to_lowercase().contains(&needle)
    }
}
