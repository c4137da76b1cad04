//! Connection attempt execution: one connect+authenticate cycle per call,
//! with every transport failure triaged onto the closed [`Outcome`] set.
mod classify;
mod connector;

pub use connector::{Connector, Probe, SshConnector};
