#![allow(non_snake_case)]

pub mod clients;
pub mod config;
pub mod extract;
pub mod models;
pub mod service;
pub mod tasks;
