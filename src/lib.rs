//! Layout resolution and snap-assist engine for the stage display editor.
//!
//! The editor places labeled rectangles (header, clock, title, text lines,
//! preview panel) on a scaled canvas standing in for an external screen. This
//! crate owns the parts with real invariants: resolving relative ("flow")
//! positions, collecting resolved bounds, snapping drags and resizes to canvas
//! guides and sibling edges, and the drag/resize gesture state machine that
//! commits clamped geometry. Painting, persistence and pointer capture belong
//! to the host; they only exchange the data types defined here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Percent/pixel conversion, canvas and rectangles |
//! | [`element`] | Typed element ids and the persisted element model |
//! | [`layout`] | Element store, sparse patches and JSON payloads |
//! | [`measure`] | Measured-height read port and deferred measurements |
//! | [`flow`] | Flow resolver with cycle protection |
//! | [`bounds`] | Resolved bounds registry fed to the snap engine |
//! | [`snap`] | Per-axis ranked snap search and guide descriptors |
//! | [`input`] | Resize handles, gesture state and the frame throttle |
//! | [`engine`] | Interaction controller ([`engine::EditorCore`]) |
//! | [`config`] | Environment-driven editor configuration |
//! | [`error`] | Error types and stable error codes |
//! | [`logging`] | `tracing` subscriber setup for hosts and tests |
//! | [`consts`] | Shared numeric constants |

pub mod bounds;
pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod logging;
pub mod measure;
pub mod snap;
