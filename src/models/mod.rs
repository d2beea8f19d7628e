//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que comparten la API
//! y el almacenamiento JSON.

pub mod vehicle;
