//! Endpoint-facing services.

pub mod pricing;
pub mod blog;
pub mod contact;
pub mod diagnostics;

pub use blog::BlogService;
pub use contact::{ContactReceipt, ContactService};
pub use diagnostics::{DatabaseReport, DiagnosticsService};
pub use pricing::PricingService;
