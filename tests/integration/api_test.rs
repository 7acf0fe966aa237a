//! Integration tests for the engagement lifecycle and its invariants
//!
//! Requires a Postgres database (TEST_DATABASE_URL or DATABASE_URL);
//! migrations are applied automatically on connect.

#![allow(dead_code)]

mod common;
mod engagements;
mod invariants;
mod milestones;
