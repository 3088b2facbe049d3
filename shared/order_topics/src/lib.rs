//! Outbound topic publishing for the order services
//!
//! This crate wraps the AWS SNS client behind the [`topic::TopicPublisher`] trait so that
//! workers can publish order notifications without depending on the SDK directly.

pub mod topic;
