//! External scanner invocation and supervision.
//!
//! One scan spawns the scanner once and drains its two output streams
//! concurrently, line by line, into a shared [`LogSink`]. Order is preserved
//! within each stream; interleaving between the streams is best-effort. The
//! supervising call blocks until the process exits and returns its status.

#![forbid(unsafe_code)]

mod command;
mod sink;
mod supervise;

pub use command::ScanCommand;
pub use sink::{BufferSink, LogSink};
pub use supervise::{supervise, supervise_with_cancel, CancelToken, SuperviseError};
