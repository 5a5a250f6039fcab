//! Local bridge between Roblox Studio and a Rojo project tree.
//!
//! The bridge exports scripts sent by a Studio plugin into
//! `<project>/src/<service>/<folders...>/`, lists the scripts already on disk
//! as a manifest, and serves individual script files back by their manifest
//! handle.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tree;
