pub mod amendment;
pub mod config;
pub mod employee;
pub mod revision;
pub mod run;
pub mod snapshot;

pub use amendment::ApprovalStatus;
pub use config::ConfigSnapshot;
pub use employee::{
    DeductionLineRecord, EarningLineRecord, EmployeeRecord, PublicHolidayRecord,
};
pub use revision::ActorContext;
pub use run::RunStatus;
pub use snapshot::SnapshotType;
