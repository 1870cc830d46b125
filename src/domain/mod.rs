mod customer;
mod money;
mod statement;

pub use customer::*;
pub use money::*;
pub use statement::*;
