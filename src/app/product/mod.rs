//! 产品模块

pub mod handler;
pub mod model;
pub mod service;
