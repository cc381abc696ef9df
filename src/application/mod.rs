// Application layer - the session that owns the ledger and report title.
// Every client (CLI, shell, tests) drives the ledger through `Session`.

pub mod error;
pub mod session;

pub use error::*;
pub use session::*;
