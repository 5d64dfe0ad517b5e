//! Persisted tree form of a [`Mask`].
//!
//! A mask is a [`TreeGroup`] whose name selects the variant:
//!
//! ```text
//! Circle     Center/x  Center/y  Radius
//! Extent     Start/x   Start/y   End/x   End/y        (integers)
//! Polygon    Node{x, y}  Node{x, y}  ...              (in order)
//! Sphere     Origin/x  Origin/y  Origin/z  Radius
//! Composite  Operator = AND | OR | XOR, two child mask groups
//! Invert     one child mask group
//! ```
//!
//! `A/b` names item `b` of child group `A`.

use crate::mask::{CompositeOp, Mask};
use indexmap::IndexMap;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

const CIRCLE: &str = "Circle";
const EXTENT: &str = "Extent";
const POLYGON: &str = "Polygon";
const SPHERE: &str = "Sphere";
const COMPOSITE: &str = "Composite";
const INVERT: &str = "Invert";

const CENTER: &str = "Center";
const START: &str = "Start";
const END: &str = "End";
const ORIGIN: &str = "Origin";
const NODE: &str = "Node";
const RADIUS: &str = "Radius";
const OPERATOR: &str = "Operator";

/// A leaf value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeItem {
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    Text(String),
}

/// A named group of items and ordered child groups.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeGroup {
    /// Group name.
    pub name: String,
    /// Named leaf values in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub items: IndexMap<String, TreeItem>,
    /// Child groups in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<TreeGroup>,
}

impl TreeGroup {
    /// An empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: add an item.
    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, item: TreeItem) -> Self {
        self.items.insert(name.into(), item);
        self
    }

    /// Builder: append a child group.
    #[must_use]
    pub fn with_group(mut self, group: TreeGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// First child group called `name`.
    pub fn group(&self, name: &str) -> Option<&TreeGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Resolve a slash-separated path such as `Center/x`.
    pub fn item_at(&self, path: &str) -> Option<&TreeItem> {
        let (groups, item) = match path.rsplit_once('/') {
            Some((groups, item)) => (Some(groups), item),
            None => (None, path),
        };
        let mut g = self;
        for name in groups.into_iter().flat_map(|s| s.split('/')) {
            g = g.group(name)?;
        }
        g.items.get(item)
    }

    fn float(&self, path: &str) -> Result<f64, MaskTreeError> {
        match self.item_at(path) {
            Some(TreeItem::Float(v)) => Ok(*v),
            Some(TreeItem::Int(v)) => Ok(*v as f64),
            Some(_) => Err(self.wrong_type(path, "number")),
            None => Err(self.missing(path)),
        }
    }

    fn int(&self, path: &str) -> Result<i64, MaskTreeError> {
        match self.item_at(path) {
            Some(TreeItem::Int(v)) => Ok(*v),
            Some(_) => Err(self.wrong_type(path, "integer")),
            None => Err(self.missing(path)),
        }
    }

    fn text(&self, path: &str) -> Result<&str, MaskTreeError> {
        match self.item_at(path) {
            Some(TreeItem::Text(v)) => Ok(v),
            Some(_) => Err(self.wrong_type(path, "text")),
            None => Err(self.missing(path)),
        }
    }

    fn missing(&self, path: &str) -> MaskTreeError {
        MaskTreeError::MissingItem {
            group: self.name.clone(),
            path: path.to_string(),
        }
    }

    fn wrong_type(&self, path: &str, expected: &'static str) -> MaskTreeError {
        MaskTreeError::WrongItemType {
            group: self.name.clone(),
            path: path.to_string(),
            expected,
        }
    }
}

/// Errors reading a [`Mask`] from a [`TreeGroup`].
#[derive(Clone, Debug, PartialEq)]
pub enum MaskTreeError {
    /// The group name is not a mask variant.
    UnknownVariant {
        /// Offending name.
        name: String,
    },
    /// A required item is absent.
    MissingItem {
        /// Mask group being read.
        group: String,
        /// Path of the item.
        path: String,
    },
    /// An item holds the wrong kind of value.
    WrongItemType {
        /// Mask group being read.
        group: String,
        /// Path of the item.
        path: String,
        /// Expected value kind.
        expected: &'static str,
    },
    /// `Operator` is not `AND`, `OR` or `XOR`.
    UnknownOperator {
        /// Offending text.
        value: String,
    },
    /// A composite or inverted mask has the wrong number of operands.
    ChildCount {
        /// Mask group being read.
        group: &'static str,
        /// Required child groups.
        expected: usize,
        /// Child groups found.
        actual: usize,
    },
}

impl fmt::Display for MaskTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariant { name } => write!(f, "unknown mask group '{name}'"),
            Self::MissingItem { group, path } => write!(f, "{group}: missing item '{path}'"),
            Self::WrongItemType {
                group,
                path,
                expected,
            } => write!(f, "{group}: item '{path}' is not {expected}"),
            Self::UnknownOperator { value } => {
                write!(f, "unknown composite operator '{value}', expected AND, OR or XOR")
            }
            Self::ChildCount {
                group,
                expected,
                actual,
            } => write!(f, "{group}: expected {expected} child masks, found {actual}"),
        }
    }
}

impl Error for MaskTreeError {}

fn float(v: f64) -> TreeItem {
    TreeItem::Float(v)
}

fn xy(name: &str, x: TreeItem, y: TreeItem) -> TreeGroup {
    TreeGroup::new(name).with_item("x", x).with_item("y", y)
}

/// Write `mask` as a tree.
pub fn to_tree(mask: &Mask) -> TreeGroup {
    match mask {
        Mask::Circle { center, radius } => TreeGroup::new(CIRCLE)
            .with_group(xy(CENTER, float(center.x), float(center.y)))
            .with_item(RADIUS, float(*radius)),
        Mask::Extent { start, end } => TreeGroup::new(EXTENT)
            .with_group(xy(START, TreeItem::Int(start[0]), TreeItem::Int(start[1])))
            .with_group(xy(END, TreeItem::Int(end[0]), TreeItem::Int(end[1]))),
        Mask::Polygon { nodes } => nodes.iter().fold(TreeGroup::new(POLYGON), |g, n| {
            g.with_group(xy(NODE, float(n.x), float(n.y)))
        }),
        Mask::Sphere { origin, radius } => TreeGroup::new(SPHERE)
            .with_group(xy(ORIGIN, float(origin.x), float(origin.y)).with_item("z", float(origin.z)))
            .with_item(RADIUS, float(*radius)),
        Mask::Composite { op, a, b } => TreeGroup::new(COMPOSITE)
            .with_item(OPERATOR, TreeItem::Text(op.as_str().to_string()))
            .with_group(to_tree(a))
            .with_group(to_tree(b)),
        Mask::Invert(m) => TreeGroup::new(INVERT).with_group(to_tree(m)),
    }
}

/// Read a mask back from its tree.
///
/// # Errors
///
/// Returns a [`MaskTreeError`] naming the first group or item that does
/// not follow the layout described in the module docs.
pub fn from_tree(tree: &TreeGroup) -> Result<Mask, MaskTreeError> {
    match tree.name.as_str() {
        CIRCLE => Ok(Mask::Circle {
            center: Vector2::new(tree.float("Center/x")?, tree.float("Center/y")?),
            radius: tree.float(RADIUS)?,
        }),
        EXTENT => Ok(Mask::Extent {
            start: [tree.int("Start/x")?, tree.int("Start/y")?],
            end: [tree.int("End/x")?, tree.int("End/y")?],
        }),
        POLYGON => {
            let nodes = tree
                .groups
                .iter()
                .filter(|g| g.name == NODE)
                .map(|g| Ok(Vector2::new(g.float("x")?, g.float("y")?)))
                .collect::<Result<_, MaskTreeError>>()?;
            Ok(Mask::Polygon { nodes })
        }
        SPHERE => Ok(Mask::Sphere {
            origin: Vector3::new(
                tree.float("Origin/x")?,
                tree.float("Origin/y")?,
                tree.float("Origin/z")?,
            ),
            radius: tree.float(RADIUS)?,
        }),
        COMPOSITE => {
            let text = tree.text(OPERATOR)?;
            let op = text
                .parse::<CompositeOp>()
                .map_err(|value| MaskTreeError::UnknownOperator { value })?;
            let [a, b] = children::<2>(tree, COMPOSITE)?;
            Ok(Mask::composite(op, from_tree(a)?, from_tree(b)?))
        }
        INVERT => {
            let [m] = children::<1>(tree, INVERT)?;
            Ok(Mask::invert(from_tree(m)?))
        }
        other => Err(MaskTreeError::UnknownVariant {
            name: other.to_string(),
        }),
    }
}

fn children<'a, const N: usize>(
    tree: &'a TreeGroup,
    group: &'static str,
) -> Result<[&'a TreeGroup; N], MaskTreeError> {
    let found: Vec<&TreeGroup> = tree.groups.iter().collect();
    let actual = found.len();
    found.try_into().map_err(|_| MaskTreeError::ChildCount {
        group,
        expected: N,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_layout() {
        let t = to_tree(&Mask::Circle {
            center: Vector2::new(1.5, -2.0),
            radius: 3.0,
        });
        assert_eq!(t.name, "Circle");
        assert_eq!(t.item_at("Center/x"), Some(&TreeItem::Float(1.5)));
        assert_eq!(t.item_at("Center/y"), Some(&TreeItem::Float(-2.0)));
        assert_eq!(t.item_at("Radius"), Some(&TreeItem::Float(3.0)));
        assert_eq!(t.item_at("Center/z"), None);
    }

    #[test]
    fn extent_items_are_integers() {
        let t = to_tree(&Mask::Extent {
            start: [1, 2],
            end: [3, 4],
        });
        assert_eq!(t.item_at("End/y"), Some(&TreeItem::Int(4)));

        let bad = TreeGroup::new("Extent")
            .with_group(xy("Start", TreeItem::Int(0), TreeItem::Float(0.5)))
            .with_group(xy("End", TreeItem::Int(1), TreeItem::Int(1)));
        assert_eq!(
            from_tree(&bad),
            Err(MaskTreeError::WrongItemType {
                group: "Extent".into(),
                path: "Start/y".into(),
                expected: "integer"
            })
        );
    }

    #[test]
    fn integer_radius_is_accepted() {
        let t = TreeGroup::new("Sphere")
            .with_group(
                xy("Origin", TreeItem::Int(0), TreeItem::Int(0)).with_item("z", TreeItem::Int(1)),
            )
            .with_item("Radius", TreeItem::Int(2));
        assert_eq!(
            from_tree(&t),
            Ok(Mask::Sphere {
                origin: Vector3::new(0.0, 0.0, 1.0),
                radius: 2.0
            })
        );
    }

    #[test]
    fn polygon_keeps_node_order() {
        let nodes = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(1.0, 3.0),
        ];
        let t = to_tree(&Mask::Polygon {
            nodes: nodes.clone(),
        });
        assert_eq!(t.groups.len(), 3);
        assert_eq!(t.groups[2].items["y"], TreeItem::Float(3.0));
        assert_eq!(from_tree(&t), Ok(Mask::Polygon { nodes }));
    }

    #[test]
    fn composite_requires_two_children() {
        let one = TreeGroup::new("Composite")
            .with_item("Operator", TreeItem::Text("OR".into()))
            .with_group(TreeGroup::new("Invert"));
        assert_eq!(
            from_tree(&one),
            Err(MaskTreeError::ChildCount {
                group: "Composite",
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn composite_rejects_unknown_operator() {
        let t = TreeGroup::new("Composite")
            .with_item("Operator", TreeItem::Text("NOR".into()))
            .with_group(TreeGroup::new("Invert"))
            .with_group(TreeGroup::new("Invert"));
        assert_eq!(
            from_tree(&t),
            Err(MaskTreeError::UnknownOperator {
                value: "NOR".into()
            })
        );
    }

    #[test]
    fn unknown_group_name() {
        assert_eq!(
            from_tree(&TreeGroup::new("Torus")),
            Err(MaskTreeError::UnknownVariant {
                name: "Torus".into()
            })
        );
    }

    #[test]
    fn missing_item_names_the_path() {
        let t = TreeGroup::new("Circle").with_item("Radius", TreeItem::Float(1.0));
        let err = from_tree(&t).unwrap_err();
        assert_eq!(err.to_string(), "Circle: missing item 'Center/x'");
    }
}
