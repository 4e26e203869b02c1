//! Focus - the single node receiving keyboard input.

use crate::engine::NodeId;
use crate::event::Event;
use crate::pipeline::Ui;

impl Ui {
    /// Move focus. Fires `Unfocus` on the old node, then `Focus` on the new
    /// one. Unknown nodes are ignored.
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        if self.focused == node {
            return;
        }
        if let Some(id) = node {
            if self.tree.node(id).is_none() {
                tracing::debug!(node = ?id, "focus request for unknown node ignored");
                return;
            }
        }

        let old = std::mem::replace(&mut self.focused, node);
        tracing::debug!(old = ?old, new = ?node, "focus changed");
        if let Some(old) = old {
            self.tree.send_event(old, &Event::Unfocus);
        }
        if let Some(new) = node {
            self.tree.send_event(new, &Event::Focus);
        }
    }

    pub fn clear_focus(&mut self) {
        self.set_focus(None);
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::{HeadlessPlatform, Ui, UiConfig};
    use crate::testing::{Probe, filtered, probe_log};
    use crate::types::Vec2;

    #[test]
    fn test_focus_transitions() {
        let mut ui = Ui::new(
            Vec2::new(100.0, 100.0),
            UiConfig::default(),
            Box::new(HeadlessPlatform::new()),
        )
        .unwrap();
        let log = probe_log();
        let root = ui.root();
        let a = ui.tree_mut().create_node(Probe::new("a", &log)).unwrap();
        let b = ui.tree_mut().create_node(Probe::new("b", &log)).unwrap();
        ui.tree_mut().add_child(root, a).unwrap();
        ui.tree_mut().add_child(root, b).unwrap();

        ui.set_focus(Some(a));
        ui.set_focus(Some(a));
        ui.set_focus(Some(b));
        ui.clear_focus();

        assert_eq!(
            filtered(&log, &["focus", "unfocus"]),
            vec!["a:focus", "a:unfocus", "b:focus", "b:unfocus"]
        );
        assert!(!ui.tree()[a].is_focused());
        assert_eq!(ui.focused(), None);
    }
}
