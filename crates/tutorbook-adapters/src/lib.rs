pub mod diagnostics;
pub mod persistence;

pub use diagnostics::TracingDiagnostics;
pub use persistence::sqlite::SqliteDb;
