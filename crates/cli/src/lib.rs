//! placard-cli: headless rehearsal of the AR placement flow.
//!
//! Replays a JSON scenario of session events, taps, and scripted hit-test
//! outcomes against the simulated host, then prints the resulting placement.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod scenario;
