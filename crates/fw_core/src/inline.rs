//! crates/fw_core/src/inline.rs
//! Rich inline content produced by the annotator: plain text runs and
//! highlight markers, possibly nested (a full-stop marker may wrap a marker).

/// Highlight colour family. Serialised as the CSS class of the marker span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Yellow house-style marker.
    Standard,
    /// Pink "wrong department" marker.
    WrongDepartment,
}

impl MarkerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MarkerKind::Standard => "marker",
            MarkerKind::WrongDepartment => "marker-pink",
        }
    }

    pub fn from_css_class(class: &str) -> Option<Self> {
        match class {
            "marker" => Some(MarkerKind::Standard),
            "marker-pink" => Some(MarkerKind::WrongDepartment),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Marker {
        kind: MarkerKind,
        tooltip: Option<String>,
        children: Vec<InlineNode>,
    },
}

impl InlineNode {
    pub fn text(s: impl Into<String>) -> Self {
        InlineNode::Text(s.into())
    }

    pub fn marker(kind: MarkerKind, tooltip: Option<&str>, text: impl Into<String>) -> Self {
        InlineNode::Marker {
            kind,
            tooltip: tooltip.map(str::to_owned),
            children: vec![InlineNode::Text(text.into())],
        }
    }

    /// Visible text with all markup removed.
    pub fn plain_text(nodes: &[InlineNode]) -> String {
        let mut out = String::new();
        for n in nodes {
            n.push_plain(&mut out);
        }
        out
    }

    fn push_plain(&self, out: &mut String) {
        match self {
            InlineNode::Text(s) => out.push_str(s),
            InlineNode::Marker { children, .. } => {
                for c in children {
                    c.push_plain(out);
                }
            }
        }
    }

    /// Every tooltip in document order (outer before inner).
    pub fn tooltips(nodes: &[InlineNode]) -> Vec<&str> {
        let mut out = Vec::new();
        for n in nodes {
            n.push_tooltips(&mut out);
        }
        out
    }

    fn push_tooltips<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let InlineNode::Marker { tooltip, children, .. } = self {
            if let Some(t) = tooltip {
                out.push(t.as_str());
            }
            for c in children {
                c.push_tooltips(out);
            }
        }
    }
}
