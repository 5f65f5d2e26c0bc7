//! Visitors: pre-order traversal over the returned diff tree
//!
//! The result tree holds no references into the compared value graphs, so
//! visitors that want to render values receive them transiently:
//! [`DiffNode::visit_with_values`] re-resolves the working/base value for each
//! node by walking the original roots along the node's path.

use crate::model::Value;
use crate::node::{DiffNode, NodeState};
use crate::path::{NodePath, PathElement};

/// Callback invoked once per node in a pre-order walk.
pub trait NodeVisitor {
    /// Visit one node, with the corresponding working/base values when the
    /// traversal can resolve them.
    fn node(&mut self, node: &DiffNode, working: Option<&Value>, base: Option<&Value>);
}

impl DiffNode {
    /// Pre-order walk without value resolution.
    pub fn visit(&self, visitor: &mut dyn NodeVisitor) {
        visitor.node(self, None, None);
        for child in &self.children {
            child.visit(visitor);
        }
    }

    /// Pre-order walk resolving each node's working/base value from the
    /// original roots.
    ///
    /// `working_root`/`base_root` must be the values that were compared to
    /// produce this tree; resolution walks them along each node's path
    /// relative to this tree's root path.
    pub fn visit_with_values(
        &self,
        working_root: &Value,
        base_root: &Value,
        visitor: &mut dyn NodeVisitor,
    ) {
        let prefix_len = self.path.len();
        self.visit_resolved(working_root, base_root, prefix_len, visitor);
    }

    fn visit_resolved(
        &self,
        working_root: &Value,
        base_root: &Value,
        prefix_len: usize,
        visitor: &mut dyn NodeVisitor,
    ) {
        let relative = &self.path.elements()[prefix_len.min(self.path.len())..];
        let working = resolve_elements(working_root, relative);
        let base = resolve_elements(base_root, relative);
        visitor.node(self, working.as_ref(), base.as_ref());
        for child in &self.children {
            child.visit_resolved(working_root, base_root, prefix_len, visitor);
        }
    }
}

/// Navigate a value graph along a full node path.
///
/// Returns `None` when any element cannot be resolved (absent member, no
/// sequence element with that representation, missing key).
pub fn resolve_path(root: &Value, path: &NodePath) -> Option<Value> {
    resolve_elements(root, path.elements())
}

fn resolve_elements(root: &Value, elements: &[PathElement]) -> Option<Value> {
    let mut current = root.clone();
    for element in elements {
        let next = match (element, &current) {
            (PathElement::Field(name), Value::Composite(composite)) => {
                composite.member(name).map(|m| m.value)?
            }
            (PathElement::Item(repr), Value::Sequence(seq)) => {
                let elements = seq.elements();
                match elements.iter().find(|e| &e.canonical_repr() == repr) {
                    Some(element) => element.clone(),
                    // a structurally paired element is addressed by the base
                    // side's representation; a single-element sequence still
                    // resolves unambiguously on the working side
                    None if elements.len() == 1 => elements[0].clone(),
                    None => return None,
                }
            }
            (PathElement::Key(repr), Value::Map(map)) => map
                .entries()
                .into_iter()
                .find(|(k, _)| &k.canonical_repr() == repr)
                .map(|(_, v)| v)?,
            _ => return None,
        };
        current = next;
    }
    Some(current)
}

/// Renders one human-readable line per difference, in the classic
/// `Property at path '…' has been …` form.
#[derive(Debug, Default)]
pub struct PrintingVisitor {
    lines: Vec<String>,
}

impl PrintingVisitor {
    /// Create an empty printing visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected report; `Nothing has changed` when no difference was seen.
    pub fn output(&self) -> String {
        if self.lines.is_empty() {
            return "Nothing has changed\n".to_string();
        }
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn render(value: Option<&Value>) -> String {
        match value {
            Some(v) => v.canonical_repr(),
            None => "?".to_string(),
        }
    }
}

impl NodeVisitor for PrintingVisitor {
    fn node(&mut self, node: &DiffNode, working: Option<&Value>, base: Option<&Value>) {
        match node.state {
            NodeState::Added => self.lines.push(format!(
                "Property at path '{}' has been added => [ {} ]",
                node.path,
                Self::render(working)
            )),
            NodeState::Removed => self.lines.push(format!(
                "Property at path '{}' has been removed => [ {} ]",
                node.path,
                Self::render(base)
            )),
            NodeState::Changed => self.lines.push(format!(
                "Property at path '{}' has changed from [ {} ] to [ {} ]",
                node.path,
                Self::render(base),
                Self::render(working)
            )),
            NodeState::Circular => self.lines.push(format!(
                "Property at path '{}' has already been processed at another position (circular reference)",
                node.path
            )),
            NodeState::Inaccessible => self.lines.push(format!(
                "Property at path '{}' could not be accessed",
                node.path
            )),
            NodeState::Untouched | NodeState::Ignored => {}
        }
    }
}

/// Collects `(path, state)` pairs for every non-untouched node, pre-order.
#[derive(Debug, Default)]
pub struct ChangeCollector {
    changes: Vec<(NodePath, NodeState)>,
}

impl ChangeCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected `(path, state)` pairs in visit order.
    pub fn changes(&self) -> &[(NodePath, NodeState)] {
        &self.changes
    }

    /// Rendered paths of all collected changes, in visit order.
    pub fn paths(&self) -> Vec<String> {
        self.changes.iter().map(|(p, _)| p.to_string()).collect()
    }

    /// The state collected at the given rendered path, if any.
    pub fn state_at(&self, path: &str) -> Option<NodeState> {
        self.changes
            .iter()
            .find(|(p, _)| p.to_string() == path)
            .map(|(_, s)| *s)
    }
}

impl NodeVisitor for ChangeCollector {
    fn node(&mut self, node: &DiffNode, _working: Option<&Value>, _base: Option<&Value>) {
        if node.state != NodeState::Untouched {
            self.changes.push((node.path.clone(), node.state));
        }
    }
}
