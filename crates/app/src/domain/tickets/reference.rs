//! Ticket reference generation.

use portal::tickets::{TicketOrigin, TicketReference};
use rand::{seq::SliceRandom, thread_rng};

/// Attempts before a reference collision is reported to the caller.
pub(crate) const MAX_REFERENCE_ATTEMPTS: u32 = 5;

pub(crate) fn generate_reference(origin: TicketOrigin) -> String {
    let mut rng = thread_rng();

    let code: String = (0..TicketReference::CODE_LEN)
        .filter_map(|_| TicketReference::ALPHABET.choose(&mut rng))
        .map(|byte| char::from(*byte))
        .collect();

    format!("{}-{code}", origin.prefix())
}
