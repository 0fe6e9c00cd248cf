//! Transit network server.
//!
//! Stops, routes and trips are held in a record store; a weighted graph of
//! the network is derived from it and answers shortest-path, reachability
//! and routes-through-stop queries over HTTP.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod pathfinding;
pub mod route_index;
pub mod store;
pub mod system;
pub mod web;
