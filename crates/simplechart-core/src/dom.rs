// File: crates/simplechart-core/src/dom.rs
// Summary: In-memory document: element tree, inline styles, event listeners,
// user notifications and markup serialization.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{trace, warn};

/// Handle to an element owned by a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Pointer events the chart reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseEnter,
    MouseLeave,
    Click,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Click => "click",
        }
    }
}

/// Event handler; receives the document and the element the event targets.
pub type Listener = Rc<dyn Fn(&mut Document, NodeId)>;

/// Blocking notification channel to the user (an alert box in a browser).
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Default notifier: writes the message to the log at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!(target: "simplechart::alert", "{message}");
    }
}

struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    style: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    listeners: Vec<(EventKind, Listener)>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: IndexMap::new(),
            style: IndexMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            listeners: Vec::new(),
        }
    }
}

/// Arena-backed element tree rooted at a `body` element.
///
/// Elements are never freed; detached elements simply stop being reachable
/// from `body` and so are invisible to [`Document::get_element_by_id`].
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    notifier: Box<dyn Notifier>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_notifier(LogNotifier)
    }

    pub fn with_notifier(notifier: impl Notifier + 'static) -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: NodeId(0),
            notifier: Box::new(notifier),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// New detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Create an element and append it to `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        trace!(tag, parent = parent.0, node = child.0, "append");
        child
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.nodes[node.0].attrs.insert(name.to_string(), value.into());
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    /// Set one inline style property.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        self.nodes[node.0].style.insert(property.to_string(), value.into());
    }

    /// Inline style property, as written (e.g. `"300px"`).
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].style.get(property).map(String::as_str)
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = Some(text.into());
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Descendants of `node` in document order (pre-order), excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn query_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(node).into_iter().filter(|n| self.tag(*n) == tag).collect()
    }

    pub fn query_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node).into_iter().filter(|n| self.has_class(*n, class)).collect()
    }

    /// First element attached under `body` whose `id` attribute matches.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    pub fn on(&mut self, node: NodeId, kind: EventKind, listener: impl Fn(&mut Document, NodeId) + 'static) {
        self.nodes[node.0].listeners.push((kind, Rc::new(listener)));
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.nodes[node.0].listeners.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Run every listener registered for `kind` on `node`, in registration
    /// order. Returns how many ran.
    pub fn dispatch(&mut self, node: NodeId, kind: EventKind) -> usize {
        let listeners: Vec<Listener> = self.nodes[node.0]
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| Rc::clone(l))
            .collect();
        trace!(event = kind.name(), node = node.0, listeners = listeners.len(), "dispatch");
        for listener in &listeners {
            listener(self, node);
        }
        listeners.len()
    }

    pub fn alert(&self, message: &str) {
        self.notifier.alert(message);
    }

    /// Serialize `node` and its subtree as markup.
    pub fn outer_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(node, &mut out);
        out
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        let el = &self.nodes[node.0];
        out.push('<');
        out.push_str(&el.tag);
        for (name, value) in &el.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
        }
        if !el.style.is_empty() {
            let style = el
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!(" style=\"{}\"", escape_attr(&style)));
        }
        if el.children.is_empty() && el.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape_text(text));
        }
        for child in &el.children {
            self.write_markup(*child, out);
        }
        out.push_str(&format!("</{}>", el.tag));
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn lookup_ignores_detached_elements() {
        let mut doc = Document::new();
        let loose = doc.create_element("div");
        doc.set_attr(loose, "id", "chart");
        assert_eq!(doc.get_element_by_id("chart"), None);

        let body = doc.body();
        doc.append_child(body, loose);
        assert_eq!(doc.get_element_by_id("chart"), Some(loose));
    }

    #[test]
    fn append_child_moves_between_parents() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append(body, "div");
        let b = doc.append(body, "div");
        let c = doc.append(a, "span");
        doc.append_child(b, c);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[c]);
        assert_eq!(doc.parent(c), Some(b));
    }

    #[test]
    fn dispatch_runs_matching_listeners_only() {
        let mut doc = Document::new();
        let body = doc.body();
        let el = doc.append(body, "circle");
        doc.on(el, EventKind::MouseEnter, |d, n| d.set_attr(n, "r", "6"));
        doc.on(el, EventKind::MouseLeave, |d, n| d.set_attr(n, "r", "4"));

        assert_eq!(doc.dispatch(el, EventKind::MouseEnter), 1);
        assert_eq!(doc.attr(el, "r"), Some("6"));
        assert_eq!(doc.dispatch(el, EventKind::Click), 0);
        assert_eq!(doc.attr(el, "r"), Some("6"));
    }

    #[test]
    fn markup_escapes_and_self_closes() {
        let mut doc = Document::new();
        let body = doc.body();
        let g = doc.append(body, "g");
        doc.set_attr(g, "class", "a \"b\"");
        let t = doc.append(g, "title");
        doc.set_text(t, "x < y & z");
        doc.append(g, "path");
        assert_eq!(
            doc.outer_markup(g),
            "<g class=\"a &quot;b&quot;\"><title>x &lt; y &amp; z</title><path/></g>"
        );
    }

    #[test]
    fn alerts_reach_the_notifier() {
        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl Notifier for Recorder {
            fn alert(&self, message: &str) {
                self.0.borrow_mut().push(message.to_string());
            }
        }
        let seen = Rc::new(RefCell::new(Vec::new()));
        let doc = Document::with_notifier(Recorder(Rc::clone(&seen)));
        doc.alert("hello");
        assert_eq!(seen.borrow().as_slice(), ["hello".to_string()]);
    }
}
