//! Plain-text renderings used by diagnostics and tree dumps.

use crate::{Ast, WalkEvent};

impl Ast {
    /// This node's text followed by the text of each next sibling, separated by spaces.
    /// Children are not included.
    pub fn to_string_list(&self) -> String {
        self.siblings().map(|node| node.text()).collect::<Vec<_>>().join(" ")
    }

    /// Preorder rendering of this node and its descendants: a node's text, then, if it has
    /// children, their renderings between parentheses, e.g. `A ( B ( D ) C )`.
    pub fn to_string_tree(&self) -> String {
        let mut pieces = Vec::new();
        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let data = node.data();
                    pieces.push(data.text.clone());
                    if data.first_child.is_some() {
                        pieces.push("(".to_owned());
                    }
                }
                WalkEvent::Leave(node) => {
                    if node.data().first_child.is_some() {
                        pieces.push(")".to_owned());
                    }
                }
            }
        }
        pieces.join(" ")
    }

    /// The node's text followed by the hidden run after it. The run before the node is
    /// only included when it opens the input; any other run belongs to the previous
    /// token's rendering. Rendering the nodes of every real token in input order thus
    /// reproduces the input exactly.
    ///
    /// Common nodes render just their text.
    pub fn to_source_string(&self) -> String {
        let mut out = String::new();
        if let Some(run) = self.hidden_before().filter(|run| run.is_leading()) {
            out.push_str(&run.text());
        }
        out.push_str(&self.data().text);
        if let Some(run) = self.hidden_after() {
            out.push_str(&run.text());
        }
        out
    }
}
