//! Library exports for the doodle-assist editor core.
//!
//! Front ends drive an [`EditorSession`]: pointer events go in, shapes, the
//! active tool and the pending assistant suggestion come out, and every
//! semantic action is journaled to the CSV event log.

pub mod assistant;
pub mod config;
pub mod draw;
pub mod eventlog;
pub mod input;
pub mod replay;
pub mod session;
pub mod util;

pub use config::Config;
pub use session::EditorSession;
