use std::sync::Arc;

use log::info;

use crate::chart::models::{DrawPrimitive, Viewport};
use crate::chart::renderer::ChartRenderer;
use crate::simulator::engine::PricePathSet;

/// The path set currently on screen. Each generation replaces it wholesale;
/// snapshots handed out earlier stay valid until dropped.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    current: Option<Arc<PricePathSet>>,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, set: PricePathSet) -> Arc<PricePathSet> {
        info!("Holding {} new paths", set.len());
        let snapshot = Arc::new(set);
        self.current = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub fn snapshot(&self) -> Option<Arc<PricePathSet>> {
        self.current.clone()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Renders the current snapshot, empty when nothing was generated yet.
    pub fn render(&self, renderer: &ChartRenderer, viewport: Viewport) -> Vec<DrawPrimitive> {
        match &self.current {
            Some(set) => renderer.render(set, viewport),
            None => Vec::new(),
        }
    }
}
