//! `voxnote-routing` — select a destination profile for a transcribed memo.
//!
//! A memo opens with a trigger keyword ("journal ...", "idée ..."); the
//! registry scans the opening tokens and picks the first destination whose
//! keyword set matches. The search window ends at the first sentence
//! boundary.

pub mod detection;
pub mod registry;

pub use detection::{route, RoutingResult};
pub use registry::DestinationRegistry;
