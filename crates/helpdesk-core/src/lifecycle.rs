use crate::model::TicketStatus;
use crate::CoreError;

/// Transition-validity table for ticket status edits.
///
/// Status is edited through a flat selector, so every transition is legal,
/// including re-selecting the current status. The table is kept explicit so
/// tightening a cell later is a one-line edit rather than a new code path.
/// `Reopened` re-enters the graph with the same outgoing edges as `Open`.
const fn allowed_from(from: TicketStatus) -> [TicketStatus; 4] {
    match from {
        TicketStatus::Open
        | TicketStatus::InProgress
        | TicketStatus::Closed
        | TicketStatus::Reopened => TicketStatus::ALL,
    }
}

pub const fn transition_allowed(from: TicketStatus, to: TicketStatus) -> bool {
    let candidates = allowed_from(from);
    let mut index = 0;
    while index < candidates.len() {
        if candidates[index] as usize == to as usize {
            return true;
        }
        index += 1;
    }
    false
}

/// Validates a requested status edit against the transition table.
pub fn validate_transition(from: TicketStatus, to: TicketStatus) -> Result<(), CoreError> {
    if transition_allowed(from, to) {
        return Ok(());
    }
    Err(CoreError::validation(format!(
        "status transition from `{}` to `{}` is not allowed",
        from.label(),
        to.label()
    )))
}
