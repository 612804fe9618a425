//! Authentication decoders and session effects

use crate::session::SessionState;
use crate::xml::Envelope;

/// `<ticket>` of an `API_Authenticate` response.
pub fn ticket(envelope: &Envelope<'_>) -> String {
    envelope.text("ticket")
}

/// Store the new ticket in the session. Always announced, even when the
/// same ticket is issued again.
#[allow(clippy::ptr_arg)]
pub fn store_ticket(ticket: &String, session: &mut SessionState) -> bool {
    session.set_ticket(ticket.as_str());
    true
}

/// Forget the ticket after sign-out. Announced only when a ticket was held.
pub fn clear_ticket(_: &(), session: &mut SessionState) -> bool {
    let was_authenticated = session.is_authenticated();
    session.clear_ticket();
    was_authenticated
}
