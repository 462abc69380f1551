//! In-crate acceptance tests driving the runtime end to end.
