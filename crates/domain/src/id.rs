//! Correlation identifiers for log lines, dispatches and scheduler runs.
//!
//! None of these are ever looked up; they exist so that log lines and
//! tracing spans from the same flow can be tied together.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

correlation_id!(
    /// Identifies one [`LogEntry`](crate::log::LogEntry).
    LogEntryId
);

correlation_id!(
    /// Correlates the log lines and tracing spans of one dispatch.
    DispatchId
);

correlation_id!(
    /// Identifies one start-to-stop run of the scheduler loop.
    RunId
);
