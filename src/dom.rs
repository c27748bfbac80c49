//! A small virtual document tree.
//!
//! Renderers build `Node`s; a `Surface` turns them into real elements.
//! Click behavior is carried as a typed `Action` on the element instead of
//! inline handler text, so record fields never end up inside script strings.

use crate::overlay::OverlayId;

/// What a click on an element does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenImage { src: String, title: String },
    OpenFullscreen { src: String, title: String },
    OpenDocument { url: String, title: String },
    /// Open a URL in a new browsing context.
    OpenExternal { url: String },
    Dismiss(OverlayId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub on_click: Option<Action>,
    /// Image source to swap in when `src` fails to load.
    pub fallback_src: Option<String>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            on_click: None,
            fallback_src: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, css: &str) -> Self {
        self.attr("style", css)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a child only when present; keeps optional blocks out of the tree
    /// instead of rendering them empty.
    pub fn child_opt(mut self, node: Option<impl Into<Node>>) -> Self {
        if let Some(node) = node {
            self.children.push(node.into());
        }
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn on_click_opt(mut self, action: Option<Action>) -> Self {
        self.on_click = action;
        self
    }

    pub fn fallback(mut self, src: impl Into<String>) -> Self {
        self.fallback_src = Some(src.into());
        self
    }
}

// Lookups used by tests to inspect rendered trees.
#[cfg(test)]
impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Element(el) => el.text_content(),
            Node::Text(t) => t.clone(),
        }
    }
}

#[cfg(test)]
impl Element {
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// This element and every element below it, in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = vec![self];
        for child in &self.children {
            if let Node::Element(el) = child {
                found.extend(el.descendants());
            }
        }
        found
    }

    pub fn find_class(&self, class: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|el| el.has_class(class))
    }

    pub fn find_all_class(&self, class: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|el| el.tag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_nested_tree() {
        let el = Element::new("div")
            .class("card")
            .child(Element::new("img").attr("src", "a.png"))
            .child(Element::new("h3").text("Hi"));
        assert_eq!(el.children.len(), 2);
        assert_eq!(el.find_tag("img").unwrap().get_attr("src"), Some("a.png"));
        assert_eq!(el.children[1].text_content(), "Hi");
        assert!(el.children[1].as_element().is_some());
    }

    #[test]
    fn test_text_stays_a_text_node() {
        let el = Element::new("a").text("<b>R&D</b>");
        assert_eq!(el.children, vec![Node::Text("<b>R&D</b>".to_string())]);
        assert!(el.find_tag("b").is_none());
    }

    #[test]
    fn test_attr_overwrites() {
        let el = Element::new("a").attr("href", "#").attr("href", "x.html");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.get_attr("href"), Some("x.html"));
    }

    #[test]
    fn test_queries_walk_in_document_order() {
        let el = Element::new("div")
            .child(Element::new("span").class("tag a").text("one"))
            .child(
                Element::new("div")
                    .child(Element::new("span").class("tag").text("two")),
            );
        let tags: Vec<String> = el
            .find_all_class("tag")
            .iter()
            .map(|t| t.text_content())
            .collect();
        assert_eq!(tags, vec!["one", "two"]);
        assert!(el.find_class("a").is_some());
        assert!(el.find_class("missing").is_none());
        assert_eq!(el.text_content(), "onetwo");
    }

    #[test]
    fn test_child_opt_skips_none() {
        let el = Element::new("div").child_opt(None::<Element>);
        assert!(el.children.is_empty());
    }
}
