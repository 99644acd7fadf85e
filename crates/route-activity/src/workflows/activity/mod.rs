//! Monthly activity reconciliation: roster, visits and off-route sales are
//! merged into one classified roster with an ACTIVO/INACTIVO status per row.

pub mod classifier;
pub mod detector;
pub mod domain;
pub mod off_route;
mod pipeline;
pub mod report;
pub mod roster;
pub mod signals;
pub mod unifier;

pub use classifier::{classify, ClassifiedBase, ClassifiedClient};
pub use detector::detect_visit_activity;
pub use domain::{
    ActivityError, ActivityStatus, ClientId, ClientRecord, OffRouteRecord, ReportingPeriod,
    RouteId, SalespersonId, VisitEvidence, VisitRecord,
};
pub use off_route::{reconcile_off_route, OffRouteReconciliation, UnattributedSale};
pub use pipeline::{
    reconcile, ActivityInputs, ReconciliationRun, ReconciliationWarnings, SkippedRows,
};
pub use report::{ActivityReport, SalespersonFilter};
pub use roster::{CompanyRoster, IdentityConflict, IdentityMap};
pub use signals::{ActivitySignals, Attribution, SignalKey};
pub use unifier::unify;
