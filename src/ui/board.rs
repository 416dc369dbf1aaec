//! Board rendering and hit-testing.
//!
//! Geometry is computed structurally from the node tree (by class query, the
//! same way the engine finds things), so rendering and mouse hit-testing can
//! never disagree about where a column is.  Both the widget and the input
//! driver go through [`BoardGeometry`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::node::{NodeId, NodeKind, NodeTree};
use crate::core::registry::ClassConfig;

use super::theme::Theme;

// ───────────────────────────────────────── geometry ──────────

/// Screen rectangles for one portal subtree.
#[derive(Debug)]
pub struct PortalGeom {
    pub root: NodeId,
    pub area: Rect,
    pub columns: Vec<(NodeId, Rect)>,
    pub portlets: Vec<(NodeId, Rect)>,
}

/// Where every managed node landed on screen in the last layout pass.
#[derive(Debug, Default)]
pub struct BoardGeometry {
    pub portals: Vec<PortalGeom>,
}

/// A node under the pointer, with the portal it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub portal_root: NodeId,
    pub node: NodeId,
    pub kind: NodeKind,
}

impl BoardGeometry {
    /// Lay the page's portals out inside `area`: portals stack vertically,
    /// columns split a portal's width evenly, portlets stack inside their
    /// column at natural height.  Column heights come from the model (the
    /// balancer's overrides), clamped to the available space.
    pub fn compute(tree: &NodeTree, page: NodeId, classes: &ClassConfig, area: Rect) -> Self {
        let mut portals = Vec::new();
        let mut y = area.y;

        for root in tree.query_class(page, &classes.portal) {
            if y >= area.bottom() {
                break;
            }
            let columns = tree.query_class(root, &classes.column);
            let want = columns
                .iter()
                .map(|&c| tree.rendered_height(c))
                .max()
                .unwrap_or(0)
                + 2;
            let height = want.min(area.bottom() - y);
            let portal_area = Rect::new(area.x, y, area.width, height);
            y += height;

            portals.push(layout_portal(tree, classes, root, columns, portal_area));
        }

        Self { portals }
    }

    /// The innermost managed node at `(x, y)`: a portlet if the pointer is
    /// on a card, otherwise the column under it.
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        for portal in &self.portals {
            for &(node, rect) in &portal.portlets {
                if rect.contains((x, y).into()) {
                    return Some(Hit {
                        portal_root: portal.root,
                        node,
                        kind: NodeKind::Portlet,
                    });
                }
            }
            for &(node, rect) in &portal.columns {
                if rect.contains((x, y).into()) {
                    return Some(Hit {
                        portal_root: portal.root,
                        node,
                        kind: NodeKind::Column,
                    });
                }
            }
        }
        None
    }
}

fn layout_portal(
    tree: &NodeTree,
    classes: &ClassConfig,
    root: NodeId,
    columns: Vec<NodeId>,
    area: Rect,
) -> PortalGeom {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let mut geom = PortalGeom {
        root,
        area,
        columns: Vec::new(),
        portlets: Vec::new(),
    };
    if columns.is_empty() || inner.width == 0 {
        return geom;
    }

    let count = columns.len() as u16;
    let width = inner.width / count;
    for (i, &column) in columns.iter().enumerate() {
        let x = inner.x + width * i as u16;
        // Last column takes the division remainder.
        let w = if i as u16 == count - 1 {
            inner.right() - x
        } else {
            width
        };
        let h = tree.rendered_height(column).min(inner.height);
        let col_rect = Rect::new(x, inner.y, w, h);
        geom.columns.push((column, col_rect));

        let col_inner = Block::default().borders(Borders::ALL).inner(col_rect);
        let mut y = col_inner.y;
        for &portlet in &tree.get(column).children {
            if !tree.get(portlet).has_class(&classes.portlet) {
                continue;
            }
            let h = tree
                .natural_height(portlet)
                .min(col_inner.bottom().saturating_sub(y));
            if h == 0 {
                break;
            }
            geom.portlets
                .push((portlet, Rect::new(col_inner.x, y, col_inner.width, h)));
            y += h;
        }
    }
    geom
}

// ───────────────────────────────────────── widget ────────────

/// The board widget — created fresh each frame.
pub struct BoardWidget<'a> {
    tree: &'a NodeTree,
    page: NodeId,
    classes: &'a ClassConfig,
    /// Portlet currently being dragged, rendered dimmed at its source.
    dragged: Option<NodeId>,
}

impl<'a> BoardWidget<'a> {
    pub fn new(tree: &'a NodeTree, page: NodeId, classes: &'a ClassConfig) -> Self {
        Self {
            tree,
            page,
            classes,
            dragged: None,
        }
    }

    pub fn dragged(mut self, dragged: Option<NodeId>) -> Self {
        self.dragged = dragged;
        self
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = BoardGeometry::compute(self.tree, self.page, self.classes, area);

        for portal in &geometry.portals {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::portal_border_style())
                .title(format!(" {} ", self.tree.get(portal.root).id))
                .title_style(Theme::portal_title_style())
                .render(portal.area, buf);

            for &(column, rect) in &portal.columns {
                let style = if self.tree.get(column).active {
                    Theme::active_column_style()
                } else {
                    Theme::column_style()
                };
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(format!(" {} ", self.tree.get(column).id))
                    .title_style(style)
                    .render(rect, buf);
            }

            for &(portlet, rect) in &portal.portlets {
                let node = self.tree.get(portlet);
                let style = if self.dragged == Some(portlet) {
                    Theme::dragged_portlet_style()
                } else {
                    Theme::portlet_style()
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(format!(" {} ", node.title))
                    .title_style(style);
                let inner = block.inner(rect);
                block.render(rect, buf);

                let lines: Vec<Line> = node.body.iter().map(|l| Line::raw(l.as_str())).collect();
                Paragraph::new(lines)
                    .style(Theme::portlet_body_style())
                    .render(inner, buf);
            }
        }
    }
}
