//! Backend bridge: command queue types and the worker thread that drains them.

pub mod commands;
pub mod runtime;
