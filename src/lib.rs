pub mod application;
pub mod auth;
pub mod dto;
pub mod error;
pub mod repository;
pub mod routing;
pub mod service;
mod view;
