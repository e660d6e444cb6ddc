//! rsopml: OPML outline editor core.
//!
//! Documents are parsed into an immutable tree of folders and feeds,
//! edited through operations that each produce a new snapshot, and
//! serialized back to normalized OPML. See [`codec`] for the text codec,
//! [`mutation`] and [`reorder`] for the operations, and [`session`] for
//! the UI-facing selection/expansion/drag side channel.

pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod mutation;
pub mod outline;
pub mod path;
pub mod reorder;
pub mod session;
pub mod util;

pub use errors::{OutlineError, OutlineResult};
pub use outline::{Document, NodeKind, OutlineNode};
pub use path::NodePath;
pub use session::Session;
