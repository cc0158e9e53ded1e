//! Widget tree
//!
//! A lightweight tree standing in for the dialog's widget hierarchy.
//! Containers carry a shared [`Panel`] (enabled flag, stacked page index,
//! label text) so the window can flip them; controls are shared so that
//! settings can refer back to them without owning them.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use vosettings_core::{shared, Shared};

use crate::control::{Control, DoubleSpinBox, LineEdit, SpinBox};

/// Shared handle to a control in the tree
pub type SharedControl = Shared<dyn Control>;

/// Name given to the editor embedded in every spin box
pub const SPINBOX_EDITOR_NAME: &str = "spinbox_lineedit";

/// Mutable state of a container widget
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub enabled: bool,
    pub visible: bool,
    /// Current page for stacked and tabbed containers
    pub current_index: usize,
    /// Label text for containers that display one
    pub text: String,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
            current_index: 0,
            text: String::new(),
        }
    }
}

/// What a node in the tree is
#[derive(Clone)]
pub enum NodeClass {
    /// A widget that holds other widgets
    Container(Shared<Panel>),
    /// A layout arranging its children
    Layout,
    /// An interactive control
    Control(SharedControl),
    /// A non-widget helper object; never descended into
    Object,
}

/// One node of the widget tree
#[derive(Clone)]
pub struct Node {
    name: String,
    class: NodeClass,
    children: Vec<Node>,
}

impl Node {
    /// Create a container widget
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: NodeClass::Container(shared(Panel::default())),
            children: Vec::new(),
        }
    }

    /// Create an anonymous layout
    pub fn layout() -> Self {
        Self {
            name: String::new(),
            class: NodeClass::Layout,
            children: Vec::new(),
        }
    }

    /// Create a non-widget helper object
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: NodeClass::Object,
            children: Vec::new(),
        }
    }

    /// Wrap a control; the node takes the control's name
    pub fn control<C: Control + 'static>(control: C) -> Self {
        let name = control.name().to_string();
        let handle: SharedControl = shared(control);
        Self {
            name,
            class: NodeClass::Control(handle),
            children: Vec::new(),
        }
    }

    /// Wrap a spin box together with its embedded editor
    pub fn spin_box(spin: SpinBox) -> Self {
        let text = spin.current().to_string();
        Self::control(spin).child(Self::control(LineEdit::new(SPINBOX_EDITOR_NAME, text)))
    }

    /// Wrap a double spin box together with its embedded editor
    pub fn double_spin_box(spin: DoubleSpinBox) -> Self {
        let text = spin.current().to_string();
        Self::control(spin).child(Self::control(LineEdit::new(SPINBOX_EDITOR_NAME, text)))
    }

    /// Append a child (builder form)
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children (builder form)
    pub fn with_children<I: IntoIterator<Item = Node>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &NodeClass {
        &self.class
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether a tree walk may descend into this node.
    ///
    /// Widgets (containers and controls) and layouts are descended; helper
    /// objects are not.
    pub fn is_traversable(&self) -> bool {
        !matches!(self.class, NodeClass::Object)
    }

    /// The control held by this node, if any
    pub fn as_control(&self) -> Option<&SharedControl> {
        match &self.class {
            NodeClass::Control(control) => Some(control),
            _ => None,
        }
    }

    /// The panel state of this node, if it is a container
    pub fn panel(&self) -> Option<Shared<Panel>> {
        match &self.class {
            NodeClass::Container(panel) => Some(Rc::clone(panel)),
            _ => None,
        }
    }

    /// Find a named container anywhere below (or at) this node
    pub fn find_panel(&self, name: &str) -> Option<Shared<Panel>> {
        self.find(|node| node.name == name && node.panel().is_some())
            .and_then(Node::panel)
    }

    /// Find a named control anywhere below (or at) this node
    pub fn find_control(&self, name: &str) -> Option<SharedControl> {
        self.find(|node| node.name == name && node.as_control().is_some())
            .and_then(|node| node.as_control().cloned())
    }

    fn find(&self, predicate: impl Fn(&Node) -> bool) -> Option<&Node> {
        let mut queue: VecDeque<&Node> = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            if predicate(node) {
                return Some(node);
            }
            queue.extend(node.children.iter());
        }
        None
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match &self.class {
            NodeClass::Container(_) => "Container".to_string(),
            NodeClass::Layout => "Layout".to_string(),
            NodeClass::Control(control) => control.borrow().kind().to_string(),
            NodeClass::Object => "Object".to_string(),
        };
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("class", &class)
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{CheckBox, ControlKind};
    use vosettings_core::SettingValue;

    #[test]
    fn test_find_panel_and_control() {
        let tree = Node::container("root").child(
            Node::layout().child(
                Node::container("videoTabs").child(Node::control(CheckBox::new("videoUseAlpha", true))),
            ),
        );

        let panel = tree.find_panel("videoTabs").expect("panel present");
        panel.borrow_mut().enabled = false;
        assert!(!tree.find_panel("videoTabs").unwrap().borrow().enabled);

        let control = tree.find_control("videoUseAlpha").expect("control present");
        assert_eq!(control.borrow().value(), SettingValue::Bool(true));

        assert!(tree.find_panel("videoUseAlpha").is_none());
        assert!(tree.find_control("missing").is_none());
    }

    #[test]
    fn test_spin_box_has_editor_child() {
        let node = Node::spin_box(SpinBox::new("ditherFruitSize", 6));
        assert_eq!(node.name(), "ditherFruitSize");
        assert_eq!(node.children().len(), 1);
        let editor = node.children()[0].as_control().expect("editor");
        assert_eq!(editor.borrow().name(), SPINBOX_EDITOR_NAME);
        assert_eq!(editor.borrow().kind(), ControlKind::LineEdit);
    }

    #[test]
    fn test_objects_are_not_traversable() {
        assert!(!Node::object("model").is_traversable());
        assert!(Node::layout().is_traversable());
        assert!(Node::container("page").is_traversable());
    }
}
