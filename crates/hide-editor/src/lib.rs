//! # hide-editor
//!
//! Interactive correction of measurement polygons.
//!
//! - [`EditorSession`]: the step-gated vertex editor (reference capture, target
//!   capture, drag adjustment) with live area recomputation
//! - [`ViewTransform`]: zoom and pan state for the editing surface
//! - [`normalize`]: mapping between screen positions and the 0-1000 grid
//!
//! Nothing here performs I/O. A UI feeds discrete pointer events and commands
//! into a session and renders from its accessors.

pub mod error;
pub mod normalize;
pub mod session;
pub mod step;
pub mod view;

pub use error::EditorError;
pub use normalize::{ScreenPoint, Surface};
pub use session::{EditorSession, EditorSettings, IgnoreReason, InputOutcome};
pub use step::EditorStep;
pub use view::ViewTransform;
