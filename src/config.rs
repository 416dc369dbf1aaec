//! Board document — the TOML file describing portals, columns, and cards.
//!
//! This is where the node tree comes from.  Ids are optional everywhere;
//! whatever is left blank gets generated at registration time.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::core::node::{Node, NodeId, NodeTree};
use crate::core::registry::ClassConfig;

// ───────────────────────────────────────── schema ────────────

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BoardFile {
    /// Class-name overrides; every field falls back to the documented
    /// default (`url-portal`, `url-column`, `url-portlet`).
    #[serde(default)]
    pub classes: Classes,
    #[serde(default, rename = "portal")]
    pub portals: Vec<PortalDef>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Classes {
    pub portal: Option<String>,
    pub column: Option<String>,
    pub portlet: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PortalDef {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "column")]
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ColumnDef {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "portlet")]
    pub portlets: Vec<PortletDef>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PortletDef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

// ───────────────────────────────────────── loading ───────────

impl BoardFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading board file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// The built-in demo board used when no file is given.
    pub fn sample() -> Self {
        toml::from_str(SAMPLE_BOARD).expect("built-in sample board parses")
    }

    /// Resolved class names (overrides merged with defaults).
    pub fn class_config(&self) -> ClassConfig {
        let defaults = ClassConfig::default();
        ClassConfig {
            portal: self.classes.portal.clone().unwrap_or(defaults.portal),
            column: self.classes.column.clone().unwrap_or(defaults.column),
            portlet: self.classes.portlet.clone().unwrap_or(defaults.portlet),
        }
    }

    /// Build the node tree this document describes.  Returns the tree and
    /// the page root; portal subtrees hang off the page and are found by
    /// class query, exactly how the bootstrap consumes them.
    pub fn instantiate(&self) -> (NodeTree, NodeId) {
        let classes = self.class_config();
        let mut tree = NodeTree::new();
        let page = tree.add_root(Node::with_classes(Vec::new()));

        for portal_def in &self.portals {
            let mut portal = Node::with_classes(vec![classes.portal.clone()]);
            portal.id = portal_def.id.clone();
            let portal = tree.add_child(page, portal);

            for column_def in &portal_def.columns {
                let mut column = Node::with_classes(vec![classes.column.clone()]);
                column.id = column_def.id.clone();
                let column = tree.add_child(portal, column);

                for portlet_def in &column_def.portlets {
                    let mut portlet = Node::with_classes(vec![classes.portlet.clone()]);
                    portlet.id = portlet_def.id.clone();
                    portlet.title = portlet_def.title.clone();
                    portlet.body = portlet_def.body.clone();
                    tree.add_child(column, portlet);
                }
            }
        }

        (tree, page)
    }
}

const SAMPLE_BOARD: &str = r#"
[[portal]]
id = "demo"

[[portal.column]]
id = "backlog"

[[portal.column.portlet]]
title = "Welcome"
body = ["Drag cards between", "columns with the mouse."]

[[portal.column.portlet]]
title = "Groceries"
body = ["oat milk", "coffee", "rye bread"]

[[portal.column]]
id = "doing"

[[portal.column.portlet]]
title = "Reading"
body = ["The Left Hand of Darkness"]

[[portal.column]]
id = "done"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_board_parses_and_instantiates() {
        let board = BoardFile::sample();
        let classes = board.class_config();
        let (tree, page) = board.instantiate();

        let portals = tree.query_class(page, &classes.portal);
        assert_eq!(portals.len(), 1);
        assert_eq!(tree.get(portals[0]).id, "demo");
        assert_eq!(tree.query_class(portals[0], &classes.column).len(), 3);
        assert_eq!(tree.query_class(portals[0], &classes.portlet).len(), 3);
    }

    #[test]
    fn class_overrides_fall_back_to_defaults() {
        let board: BoardFile = toml::from_str(
            r#"
            [classes]
            column = "lane"

            [[portal]]
            [[portal.column]]
            "#,
        )
        .unwrap();
        let classes = board.class_config();
        assert_eq!(classes.portal, "url-portal");
        assert_eq!(classes.column, "lane");
        assert_eq!(classes.portlet, "url-portlet");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<BoardFile>("[[portal]]\nname = \"x\"\n");
        assert!(err.is_err());
    }
}
