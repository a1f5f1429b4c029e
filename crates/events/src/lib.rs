//! View events, projections and the inline command executor.

pub mod event;
pub mod handler;
pub mod projection;

pub use event::Event;
pub use handler::execute;
pub use projection::Projection;
