//! 职位模块

pub mod handler;
pub mod service;
