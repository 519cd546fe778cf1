//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod blacklist;
pub mod blocked_dates;
pub mod campaigns;
pub mod contacts;
pub mod groups;
pub mod health;
pub mod instances;
pub mod scheduler;
pub mod schedules;
