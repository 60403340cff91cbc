//! Request handlers, one module per route group.

pub mod accounts;
pub mod health;
pub mod pages;
pub mod registration;
pub mod search;
pub mod session;
