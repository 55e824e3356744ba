pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod negotiation;
pub mod order;
pub mod report;
pub mod requisition;
pub mod supplier;
