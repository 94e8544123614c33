// src/models/mod.rs

pub mod category;
pub mod question;
pub mod quiz;
