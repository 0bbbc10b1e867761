//! The editor a host embeds: model, interaction controller and configuration.

use crate::config::EditorConfig;
use crate::document::{self, LoadReport, TopologyDocument};
use crate::error::TopologyResult;
use crate::input::{KeyEvent, PointerEvent};
use crate::interaction::{InteractionController, InteractionOutcome};
use crate::model::TopologyModel;
use kurbo::Size;

/// A topology editor instance.
#[derive(Debug, Clone)]
pub struct TopologyEditor {
    model: TopologyModel,
    controller: InteractionController,
    config: EditorConfig,
}

impl Default for TopologyEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl TopologyEditor {
    /// Create an editor with an empty topology.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            model: TopologyModel::new(&config),
            controller: InteractionController::new(&config),
            config,
        }
    }

    /// Create an editor showing `document`.
    pub fn from_document(document: &TopologyDocument, config: EditorConfig) -> (Self, LoadReport) {
        let mut editor = Self::new(config);
        let report = editor.load_document(document);
        (editor, report)
    }

    pub fn model(&self) -> &TopologyModel {
        &self.model
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the topology. Selection and any active gesture are discarded.
    pub fn set_model(&mut self, model: TopologyModel) {
        self.model = model;
        self.controller.reset();
    }

    /// Replace the topology with the contents of a document.
    pub fn load_document(&mut self, document: &TopologyDocument) -> LoadReport {
        let (model, report) = document::deserialize(document, &self.config);
        self.set_model(model);
        report
    }

    /// Snapshot the current topology.
    pub fn document(&self) -> TopologyDocument {
        document::serialize(&self.model)
    }

    /// Apply a programmatic edit, then drop selection or gestures that refer
    /// to elements the edit removed.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut TopologyModel) -> R) -> R {
        let result = f(&mut self.model);
        self.controller.revalidate(&self.model);
        result
    }

    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> TopologyResult<InteractionOutcome> {
        let outcome = self.controller.handle_pointer_event(&mut self.model, event);
        if let Err(err) = &outcome {
            log::warn!("Gesture rejected: {}", err);
        }
        outcome
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) -> InteractionOutcome {
        self.controller.handle_key_event(&mut self.model, event)
    }

    /// Abort the active gesture.
    pub fn cancel(&mut self) -> InteractionOutcome {
        self.controller.cancel()
    }

    /// Delete the selected element.
    pub fn delete_selected(&mut self) -> InteractionOutcome {
        self.controller.delete_selected(&mut self.model)
    }

    /// Zoom and pan so all content fits the viewport. Returns false if there
    /// is nothing to fit.
    pub fn fit_to_content(&mut self, viewport: Size, padding: f64) -> bool {
        match self.model.bounds() {
            Some(bounds) => {
                self.model.view.fit_to_bounds(bounds, viewport, padding);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ItemRef;
    use crate::fixtures::sample_topology;
    use kurbo::Point;

    #[test]
    fn test_load_resets_interaction_state() {
        let (mut editor, report) = TopologyEditor::from_document(&sample_topology(), EditorConfig::default());
        assert!(report.is_clean());

        // Click inside the edge router
        editor.handle_pointer_event(PointerEvent::down(Point::new(140.0, 120.0))).unwrap();
        editor.handle_pointer_event(PointerEvent::up(Point::new(140.0, 120.0))).unwrap();
        assert_eq!(
            editor.controller().selected(),
            Some(&ItemRef::Device("rtr-edge".to_string()))
        );

        editor.load_document(&sample_topology());
        assert!(editor.controller().selected().is_none());
        assert!(editor.controller().mode().is_idle());
    }

    #[test]
    fn test_edit_revalidates_selection() {
        let (mut editor, _) = TopologyEditor::from_document(&sample_topology(), EditorConfig::default());
        editor.handle_pointer_event(PointerEvent::down(Point::new(140.0, 120.0))).unwrap();
        editor.handle_pointer_event(PointerEvent::up(Point::new(140.0, 120.0))).unwrap();

        let removed = editor.edit(|model| model.delete_device("rtr-edge"));
        assert!(removed.is_some());
        assert!(editor.controller().selected().is_none());
        assert_eq!(editor.model().connections().len(), 4);
    }

    #[test]
    fn test_document_roundtrip() {
        let (editor, _) = TopologyEditor::from_document(&sample_topology(), EditorConfig::default());
        let doc = editor.document();
        let (copy, report) = TopologyEditor::from_document(&doc, EditorConfig::default());
        assert!(report.is_clean());
        assert_eq!(copy.model().devices(), editor.model().devices());
        assert_eq!(copy.model().connections(), editor.model().connections());
    }

    #[test]
    fn test_fit_to_content() {
        let mut editor = TopologyEditor::default();
        assert!(!editor.fit_to_content(Size::new(800.0, 600.0), 20.0));

        editor.load_document(&sample_topology());
        assert!(editor.fit_to_content(Size::new(800.0, 600.0), 20.0));
        let scale = editor.model().view.scale();
        assert!(scale > 0.25 && scale <= 1.0);
    }
}
