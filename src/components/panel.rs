//! Reactive panel state for Leptos front ends.

use leptos::prelude::*;

use crate::core::Presenter;
use crate::models::MetadataBlock;

/// Metadata panel state managed with Leptos signals.
///
/// Hand this (it is `Copy`) to a [`SyncController`](crate::core::SyncController)
/// as its presenter and read the signals from the view layer.
#[derive(Clone, Copy)]
pub struct PanelState {
    /// Block of the current page, if it has one.
    pub block: RwSignal<Option<MetadataBlock>>,
    /// Whether the panel should be rendered at all.
    pub visible: RwSignal<bool>,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            block: RwSignal::new(None),
            visible: RwSignal::new(false),
        }
    }

    /// Rows for a key/value table, in document order.
    pub fn rows(&self) -> Vec<(String, String)> {
        self.block.with(|block| {
            block
                .iter()
                .flat_map(|b| b.structured.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for PanelState {
    fn show(&self, block: &MetadataBlock) {
        self.block.set(Some(block.clone()));
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
        self.block.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frontmatter::extract;

    #[test]
    fn test_show_and_hide() {
        let owner = Owner::new();
        owner.with(|| {
            let panel = PanelState::new();
            let block = extract("---\ntitle: Hello\ntags: [a, b]\n---").unwrap();

            panel.show(&block);
            assert!(panel.visible.get_untracked());
            assert_eq!(
                panel.rows(),
                vec![
                    ("title".to_string(), "Hello".to_string()),
                    ("tags".to_string(), "a, b".to_string()),
                ]
            );

            panel.hide();
            assert!(!panel.visible.get_untracked());
            assert!(panel.block.get_untracked().is_none());
            assert!(panel.rows().is_empty());
        });
    }
}
