use std::collections::BTreeSet;

use crate::{crs::Crs, layer::Feature};

/// A named collection of features in one source CRS, with a selection.
/// Only selected features take part in page covering. Selection is by id, so
/// feature ids are expected to be unique within a layer.
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    name: String,
    crs: Crs,
    features: Vec<Feature>,
    selection: BTreeSet<u64>,
}

impl FeatureLayer {
    pub fn new(name: impl Into<String>, crs: Crs) -> Self {
        Self { name: name.into(), crs, features: Vec::new(), selection: BTreeSet::new() }
    }

    pub fn with_features(name: impl Into<String>, crs: Crs, features: Vec<Feature>) -> Self {
        Self { features, ..Self::new(name, crs) }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn crs(&self) -> &Crs { &self.crs }
    #[inline] pub fn features(&self) -> &[Feature] { &self.features }
    #[inline] pub fn len(&self) -> usize { self.features.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    pub fn push(&mut self, feature: Feature) { self.features.push(feature) }

    /// Add feature ids to the selection. Ids not present in the layer are ignored
    /// when selected features are iterated.
    pub fn select(&mut self, ids: impl IntoIterator<Item = u64>) { self.selection.extend(ids) }

    pub fn select_all(&mut self) {
        self.selection = self.features.iter().map(|feature| feature.id).collect();
    }

    pub fn clear_selection(&mut self) { self.selection.clear() }

    #[inline]
    pub fn is_selected(&self, id: u64) -> bool { self.selection.contains(&id) }

    /// Selected features, in layer order.
    pub fn selected_features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|feature| self.selection.contains(&feature.id))
    }

    pub fn selected_count(&self) -> usize { self.selected_features().count() }
}

#[cfg(test)]
mod tests {
    use geo::point;

    use super::*;

    fn make_layer() -> FeatureLayer {
        FeatureLayer::with_features("wells", Crs::utm(32, false), vec![
            Feature::new(10, point!(x: 0.0, y: 0.0)),
            Feature::null(11),
            Feature::new(12, point!(x: 5.0, y: 5.0)),
        ])
    }

    #[test]
    fn nothing_is_selected_initially() {
        let layer = make_layer();
        assert_eq!(layer.len(), 3);
        assert_eq!(layer.selected_count(), 0);
    }

    #[test]
    fn selection_preserves_layer_order() {
        let mut layer = make_layer();
        layer.select([12, 10, 99]);
        let ids = layer.selected_features().map(|feature| feature.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![10, 12]);
        assert!(!layer.is_selected(11));
    }

    #[test]
    fn select_all_and_clear() {
        let mut layer = make_layer();
        layer.select_all();
        assert_eq!(layer.selected_count(), 3);
        layer.clear_selection();
        assert_eq!(layer.selected_count(), 0);
    }
}
