//! Feed pagination and category switching.
//!
//! A [`FeedMachine`] multiplexes the hot, trending, per-topic, location and
//! search sources into one paginated view. Every trigger mutates the view
//! synchronously and may hand back a [`FetchRequest`]; the caller runs it
//! against a [`NewsSource`](crate::fetcher::NewsSource) and passes the result
//! to [`FeedMachine::complete`]. Only the most recently issued request is
//! allowed to commit.
//!
//! [`FeedSession`] bundles a machine with a source for callers that simply
//! await each transition.

mod driver;
mod machine;
mod request;
mod state;

pub use driver::FeedSession;
pub use machine::FeedMachine;
pub use request::{FetchRequest, FetchTarget, FetchedBatch, LoadMode};
pub use state::FeedState;
