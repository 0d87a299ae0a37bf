//! Demo runtime: configuration, scripted run and the interactive menu.

mod config;
pub mod demo;
pub mod menu;

pub use config::DemoConfig;
pub use demo::{run, Scenario};
pub use menu::{Menu, NextStep, ScenarioChoice};
