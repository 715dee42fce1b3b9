//! svgmotion core (shell-agnostic)
//!
//! Turns a vector image into animatable layers, keeps per-layer keyframe
//! timelines, resolves interpolated poses for arbitrary query times, and
//! compiles everything back into a standalone animated SVG. The editor
//! shell (panels, upload, scrubber, toasts) lives elsewhere and talks to
//! this crate through three calls: markup -> layer tree, tree + time ->
//! resolved pose, and tree + timelines -> exportable markup.

pub mod compile;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod extract;
pub mod ids;
pub mod preview;
pub mod properties;
pub mod sample;
pub mod session;
pub mod timeline;
pub mod tree;

// Re-exports for consumers (adapters)
pub use compile::{class_name, compile, compile_document};
pub use config::Config;
pub use data::{Keyframe, Layer, LayerKind};
pub use document::SvgDocument;
pub use error::{ParseError, ValidationError};
pub use extract::extract;
pub use ids::{ClockIdSource, IdSource, SequentialIdSource};
pub use preview::{apply_pose, HIGHLIGHT_CLASS, SELECT_CLASS};
pub use properties::{AnimationProperties, PropertyValue, ANIMATABLE_PROPERTIES};
pub use sample::{interpolate_properties, resolve, sample_layer};
pub use session::Session;
pub use timeline::{Timeline, DEFAULT_DURATION_MS, FRAME_STEP_MS};
pub use tree::{LayerPatch, LayerTree};
