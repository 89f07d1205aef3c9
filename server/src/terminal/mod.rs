mod error;
mod remote_terminal;

pub use error::TerminalError;
pub use remote_terminal::{RemoteTerminal, TerminalState, MATRIX_SLOTS};
