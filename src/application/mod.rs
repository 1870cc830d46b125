// Application layer - use cases and orchestration.
// The HTTP API talks to the ledger only through `LedgerService`.

mod clock;
pub mod error;
mod service;

pub use clock::*;
pub use error::*;
pub use service::*;
