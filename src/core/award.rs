// This module groups the award aggregate components.
//
// Structure
// - ledger.rs: the three ordered event collections of one award
// - decide.rs: pure validation of an incoming event against the ledger, per event kind
// - evolve.rs: pure append of an accepted event into its collection
// - cache.rs: memoized totals keyed by target date and precision
// - aggregate.rs: the lock-owning award that ties the above together

pub mod aggregate;
pub mod cache;
pub mod decide;
pub mod evolve;
pub mod ledger;
