// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// Layout
// - core: events, the calculator, the award aggregate and the event store port. No framework code.
// - application: the vesting service, employee registry, schedule cache and configuration.
// - adapters: concrete implementations of core ports.
// - shell: composition root.

pub mod core {
    pub mod award;
    pub mod calculator;
    pub mod employee;
    pub mod event;
    pub mod ports;
    pub mod precision;
}

pub mod application {
    pub mod award_calculator_service;
    pub mod config;
    pub mod employee_registry;
    pub mod errors;
    pub mod partition;
    pub mod schedule;
    pub mod vesting_service;
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_event_store;
    }
}

pub mod shell;

#[cfg(test)]
pub mod test_support {
    pub mod fixtures;
}
