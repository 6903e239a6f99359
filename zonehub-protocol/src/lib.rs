//! Zone Hub Protocol Translation
//!
//! Stateless translation between wire-level protocol messages and the typed
//! command model, plus the dispatcher that routes commands into
//! [`zonehub_state::HubStore`].
//!
//! # Architecture
//!
//! ```text
//! topic + payload ─┐
//!                  ├→ Command → Dispatcher → HubStore mutation
//! bus role + value ┘
//!
//! StateChange → encode_status / encode_bus_status → outbound frames
//! ```
//!
//! Parsing is centralized here so no adapter repeats validation: numeric
//! payloads are strict invariant integers clamped to their domain, booleans
//! accept a fixed token set, and relative `+`/`-` forms carry a bounded
//! step. Anything else is `None`, never a guess.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use zonehub_protocol::{parse_message_path, CommandSource, Dispatcher, TargetKind};
//!
//! let dispatcher = Dispatcher::new(store);
//! if let Some(cmd) = parse_message_path(
//!     TargetKind::Zone, 1, "volume/set", "42", CommandSource::MessageBus,
//! ) {
//!     dispatcher.dispatch(&cmd)?;
//! }
//! ```

// Core modules
pub mod bus;
pub mod command;
pub mod dispatch;
pub mod encode;
pub mod path;
pub mod payload;

// ============================================================================
// Re-exports
// ============================================================================

pub use bus::{decode_bus_value, encode_bus_status, BusRole, BusValue};
pub use command::{Command, CommandBody, CommandSource};
pub use dispatch::Dispatcher;
pub use encode::{encode_status, StatusFrame};
pub use path::{parse_message_path, TargetKind};

/// Convenience imports for protocol adapters
pub mod prelude {
    pub use crate::bus::{decode_bus_value, encode_bus_status, BusRole, BusValue};
    pub use crate::command::{Command, CommandBody, CommandSource};
    pub use crate::dispatch::Dispatcher;
    pub use crate::encode::{encode_status, StatusFrame};
    pub use crate::path::{parse_message_path, TargetKind};
}
