use indextree::{Node, NodeId};
use serde_json::{Map, Value, json};

use crate::document::Document;

fn node_to_json(doc: &Document, node: NodeId) -> Value {
    let Some(data) = doc.arena.get(node).map(Node::get) else {
        return Value::Null;
    };
    let mut object = Map::new();
    object.insert(String::from("key"), json!(data.key().0));
    object.insert(String::from("tag"), json!(data.tag()));
    if let Some(id) = data.id() {
        object.insert(String::from("id"), json!(id));
    }
    if !data.classes().is_empty() {
        object.insert(String::from("class"), json!(data.classes().join(" ")));
    }
    let style = data.css_text();
    if !style.is_empty() {
        object.insert(String::from("style"), json!(style));
    }
    let children: Vec<Value> = node
        .children(&doc.arena)
        .map(|child| node_to_json(doc, child))
        .filter(|child| !child.is_null())
        .collect();
    if !children.is_empty() {
        object.insert(String::from("children"), Value::Array(children));
    }
    Value::Object(object)
}

impl Document {
    /// Snapshot the attached tree as JSON: tag, id, class and inline style per element.
    pub fn to_json(&self) -> Value {
        node_to_json(self, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::LayoutBox;
    use sticky::{StickyHost, StyleProperty, StyleValue};

    #[test]
    fn snapshot_includes_classes_and_styles() {
        let mut doc = Document::new();
        let section = doc
            .append_element(Document::ROOT, "section", "parent", LayoutBox::default())
            .unwrap();
        let nav = doc
            .append_element(section, "nav", "child", LayoutBox::default())
            .unwrap();
        doc.set_attribute(nav, "id", "menu");
        doc.add_class(section, "start");
        doc.set_style(nav, StyleProperty::Top, StyleValue::Px(0.0));

        let snapshot = doc.to_json();
        assert_eq!(snapshot["tag"], "html");
        let section_json = &snapshot["children"][0];
        assert_eq!(section_json["class"], "parent start");
        assert_eq!(section_json["children"][0]["id"], "menu");
        assert_eq!(section_json["children"][0]["style"], "top: 0px");
        assert!(section_json["children"][0].get("children").is_none());
    }
}
