//! Service factories.
//!
//! The host picks a factory once, before any service exists. When the
//! framework backend is requested but cannot be loaded, [`select_factory`]
//! hands back the simulated factory instead.

use crate::service::dispatch::{Backend, Variant};
use crate::service::handler::{DemoError, Service};
use tracing::{info, warn};

/// Builds demo services for one backend.
pub trait ServiceFactory: Send + Sync {
    /// Backend of every service this factory builds.
    fn backend(&self) -> Backend;

    /// Create a named service.
    fn create(&self, name: &str, variant: Variant) -> Service;
}

/// Factory backed by the Clodo Framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameworkFactory;

impl ServiceFactory for FrameworkFactory {
    fn backend(&self) -> Backend {
        Backend::Framework
    }

    fn create(&self, name: &str, variant: Variant) -> Service {
        println!("📦 Service '{}' created!", name);
        info!(service = name, %variant, "Created framework service");
        Service::new(name, variant, Backend::Framework)
    }
}

/// Local stand-in for the framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedFactory;

impl ServiceFactory for SimulatedFactory {
    fn backend(&self) -> Backend {
        Backend::Simulated
    }

    fn create(&self, name: &str, variant: Variant) -> Service {
        println!("📦 Service '{}' created! (simulated)", name);
        info!(service = name, %variant, "Created simulated service");
        Service::new(name, variant, Backend::Simulated)
    }
}

/// Load the framework backend.
///
/// Only builds with the `framework` cargo feature ship it.
pub fn load_framework() -> Result<FrameworkFactory, DemoError> {
    if cfg!(feature = "framework") {
        Ok(FrameworkFactory)
    } else {
        Err(DemoError::dependency_unavailable(
            "clodo-framework is not part of this build",
        ))
    }
}

/// Pick the factory for the requested backend.
pub fn select_factory<L>(requested: Backend, loader: L) -> Box<dyn ServiceFactory>
where
    L: FnOnce() -> Result<FrameworkFactory, DemoError>,
{
    match requested {
        Backend::Simulated => Box::new(SimulatedFactory),
        Backend::Framework => match loader() {
            Ok(factory) => {
                println!("🎯 Using real Clodo Framework!");
                Box::new(factory)
            }
            Err(err) => {
                warn!("Falling back to simulation: {}", err);
                println!("⚠️  Clodo Framework not found, using simulation mode...");
                Box::new(SimulatedFactory)
            }
        },
    }
}
