use super::{mock, EngineFactory};
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

lazy_static! {
    static ref FACTORY: RwLock<Arc<dyn EngineFactory>> = RwLock::new(mock::shared_factory());
}

/// Install the process-wide engine factory. A production build registers
/// the embedded engine here before the first connect; the scripted mock is
/// the default so the driver stays testable without the engine.
pub fn set_engine_factory(factory: Arc<dyn EngineFactory>) {
    *FACTORY.write().unwrap() = factory;
}

pub fn engine_factory() -> Arc<dyn EngineFactory> {
    FACTORY.read().unwrap().clone()
}
