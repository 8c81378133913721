// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::layer::TextLayer;

/// Identifier of a layer within a [`LayerStack`].
///
/// Ids are handed out in push order and never reused by the same stack, so
/// they survive reordering with [`LayerStack::raise`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub(crate) u64);

impl LayerId {
    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Ordered stack of text layers.
///
/// Insertion order is z-order: the last layer is drawn on top and is the
/// *active* layer, the only one gestures and style setters touch. Every
/// mutator on the active layer is a no-op on an empty stack.
#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    layers: Vec<(LayerId, TextLayer)>,
    next_id: u64,
}

impl LayerStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `layer` on top, making it active, and returns its id.
    pub fn push(&mut self, layer: TextLayer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push((id, layer));
        tracing::debug!(id = id.0, depth = self.layers.len(), "pushed layer");
        id
    }

    /// Removes and returns the active layer.
    pub fn pop(&mut self) -> Option<(LayerId, TextLayer)> {
        let popped = self.layers.pop();
        if let Some((id, _)) = &popped {
            tracing::debug!(id = id.0, depth = self.layers.len(), "popped layer");
        }
        popped
    }

    /// Removes the layer with `id`, wherever it sits.
    pub fn remove(&mut self, id: LayerId) -> Option<TextLayer> {
        let idx = self.layers.iter().position(|(i, _)| *i == id)?;
        tracing::debug!(id = id.0, "removed layer");
        Some(self.layers.remove(idx).1)
    }

    /// Removes every layer. Ids keep counting up.
    pub fn clear(&mut self) {
        if !self.layers.is_empty() {
            tracing::debug!(count = self.layers.len(), "cleared layers");
        }
        self.layers.clear();
    }

    /// Moves the layer at `index` to the top so it becomes active.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn raise(&mut self, index: usize) -> bool {
        if index >= self.layers.len() {
            return false;
        }
        let entry = self.layers.remove(index);
        tracing::debug!(id = entry.0.0, from = index, "raised layer");
        self.layers.push(entry);
        true
    }

    /// The active (topmost) layer.
    #[must_use]
    pub fn active(&self) -> Option<&TextLayer> {
        self.layers.last().map(|(_, l)| l)
    }

    /// Mutable access to the active layer.
    pub fn active_mut(&mut self) -> Option<&mut TextLayer> {
        self.layers.last_mut().map(|(_, l)| l)
    }

    /// Id of the active layer.
    #[must_use]
    pub fn active_id(&self) -> Option<LayerId> {
        self.layers.last().map(|(id, _)| *id)
    }

    /// Layer at `index` (0 is the bottom).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TextLayer> {
        self.layers.get(index).map(|(_, l)| l)
    }

    /// Layer with `id`.
    #[must_use]
    pub fn find(&self, id: LayerId) -> Option<&TextLayer> {
        self.layers.iter().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    /// Mutable access to the layer with `id`.
    pub fn find_mut(&mut self, id: LayerId) -> Option<&mut TextLayer> {
        self.layers
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, l)| l)
    }

    /// Iterates bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (LayerId, &TextLayer)> + '_ {
        self.layers.iter().map(|(id, l)| (*id, l))
    }

    /// Index of the topmost layer whose rotated line boxes contain `view_point`.
    #[must_use]
    pub fn hit_test(&self, view_point: Point, image_rect: Rect) -> Option<usize> {
        self.layers
            .iter()
            .rposition(|(_, l)| l.contains_point(view_point, image_rect))
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
