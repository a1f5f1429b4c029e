use crate::Event;

/// A projection builds a read model from a stream of events.
///
/// The projection keeps whatever copy of the source state it needs to
/// answer queries; it never reaches back into the aggregate that emitted
/// the events.
///
/// ## Idempotency
///
/// Applying the same event twice must leave the read model as if it had
/// been applied once. Every catalog view event carries the full new value
/// of the selection it changes, so re-applying it recomputes the same view.
pub trait Projection {
    type Ev: Event;

    fn apply(&mut self, event: &Self::Ev);
}
