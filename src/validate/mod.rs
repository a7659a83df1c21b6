// src/validate/mod.rs
// =============================================================================
// The two validation passes.
//
// - internal: pure lookups in the scanned PageInfo plus file existence checks
// - external: one network request per distinct URL, run concurrently
//
// Neither pass returns early on a broken link: every problem found becomes a
// Diagnostic, so one run reports everything.
// =============================================================================

mod external;
mod internal;
mod legacy;

pub use external::{validate_external, FetchMethod, FetchOutcome, Fetcher, HttpFetcher};
pub use internal::validate_internal;
