//! Repositorios de acceso a datos
//!
//! Este módulo contiene las operaciones CRUD contra PostgreSQL.

pub mod client_repository;
pub mod company_repository;
pub mod quote_repository;
pub mod vehicle_repository;
