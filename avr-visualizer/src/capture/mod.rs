//! Ping/pong frame handoff between the ADC interrupt and the foreground.
//!
//! Two [`Ring`](crate::ring::Ring)s live for the whole program. One is the
//! *capture* ring the ISR writes into; the other is the *process* ring the
//! foreground drains. A single handoff flag (`busy`) tells the two contexts
//! who owns what.
//!
//! ```text
//!                 capture ring full, busy == false
//!                 (ISR swaps roles, then raises busy)
//!   ┌───────────┐ ─────────────────────────────────► ┌──────────┐
//!   │ Capturing │                                    │ Draining │
//!   │ busy=false│ ◄───────────────────────────────── │ busy=true│
//!   └───────────┘   foreground drops the Frame       └──────────┘
//!                   (clears process ring, busy=false)
//! ```
//!
//! Initial state is *Capturing* with capture = ping, process = pong.
//!
//! While *Draining*, a capture ring that fills again is not rotated: the ISR
//! keeps overwriting its oldest slots and the frame is dropped. The
//! visualizer prefers fresh frames over complete ones.
//!
//! ## Components
//!
//! - [`Switchboard`]: the two rings, the role byte and the handoff flag
//! - [`Frame`]: read-only guard over the process ring; dropping it re-arms

pub mod frame;
pub mod switchboard;

pub use frame::Frame;
pub use switchboard::{Roles, Slot, Switchboard};
