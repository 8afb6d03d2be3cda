//! crates/fw_core/src/business.rs
//! Generic labelled tree read from business-item XML. Child order is document
//! order and is significant. The root is synthetic (usually `root`).

/// A node in the business-item tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusinessNode {
    Element(ElementNode),
    /// Kept so the tree mirrors the document; never rendered.
    Comment(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ElementNode {
    pub tag: String,
    /// Value of the `number` attribute (numbered list items).
    pub number: Option<String>,
    /// Leading text content, before the first child element.
    pub text: Option<String>,
    pub children: Vec<BusinessNode>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<BusinessNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = BusinessNode>,
    {
        self.children.extend(children);
        self
    }

    /// No children and no text: renders as nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}

impl BusinessNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            BusinessNode::Element(e) => Some(e),
            BusinessNode::Comment(_) => None,
        }
    }

    /// Tag of an element node; comments have none.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }
}

impl From<ElementNode> for BusinessNode {
    fn from(e: ElementNode) -> Self {
        BusinessNode::Element(e)
    }
}
