//! Demo service: dispatcher, service handle and the factories that build it.

pub mod dispatch;
pub mod factory;
pub mod handler;

pub use dispatch::{Backend, Branch, BranchKind, Dispatcher, UrlRule, Variant};
pub use factory::{
    load_framework, select_factory, FrameworkFactory, ServiceFactory, SimulatedFactory,
};
pub use handler::{DemoError, Env, Service};
