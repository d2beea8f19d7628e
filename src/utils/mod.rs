//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y su mapeo a HTTP.

pub mod errors;
