//! Concrete flat layout passes.

#[cfg(feature = "dagre")]
mod dagre;
mod ranked;

#[cfg(feature = "dagre")]
pub use dagre::DagreAdapter;
pub use ranked::RankedAdapter;

use crate::adapter::LayoutAdapter;
use crate::config::{LayoutConfig, LayoutEngine};

/// Adapter selected by `config.engine`.
pub fn adapter_for(config: &LayoutConfig) -> Box<dyn LayoutAdapter> {
    match config.engine {
        #[cfg(feature = "dagre")]
        LayoutEngine::Dagre => Box::new(DagreAdapter::from_config(config)),
        #[cfg(not(feature = "dagre"))]
        LayoutEngine::Dagre => {
            log::warn!("dagre support is not compiled in; using the ranked layout");
            Box::new(RankedAdapter::from_config(config))
        }
        LayoutEngine::Ranked => Box::new(RankedAdapter::from_config(config)),
    }
}
