use crate::filter::FilterState;
use crate::model::Ticket;
use crate::UserId;

/// How the snapshot base for the visible set is produced.
///
/// The two observed search paths, filtering a fully fetched collection and
/// issuing a remote search query, are one configurable strategy rather than
/// two overlapping code paths. `LocalFilter` lists by the structural axes
/// and refines text locally; `RemoteQuery` pushes the text axis to the
/// store's search endpoint, so the resulting snapshot is narrowed to that
/// query and only serves recomposition under the same query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    LocalFilter,
    RemoteQuery,
}

impl SearchStrategy {
    pub fn for_filter(filter: &FilterState) -> Self {
        if filter.query.trim().is_empty() {
            Self::LocalFilter
        } else {
            Self::RemoteQuery
        }
    }
}

/// Composes the ordered visible subset of `snapshot` for `filter`.
///
/// Ordering is the remote store's: local filtering preserves the snapshot's
/// relative order and never re-sorts.
pub fn compose_view<'a>(
    snapshot: &'a [Ticket],
    filter: &FilterState,
    caller: &UserId,
) -> Vec<&'a Ticket> {
    snapshot
        .iter()
        .filter(|ticket| filter.matches(ticket, caller))
        .collect()
}
