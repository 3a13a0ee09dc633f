//! Finance tracker backend: REST API, domain services, and the trend
//! forecasting engine over a SQLite store.

pub mod db;
pub mod domain;
pub mod rest;
