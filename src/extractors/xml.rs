//! Small helpers for navigating roxmltree documents.

use roxmltree::Node;

/// First direct child element named `tag`.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

/// All direct child elements named `tag`, in document order.
pub fn find_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == tag)
}

/// Elements named `tag` nested at least two levels below `node`, in document order.
///
/// This is the `*//TAG` selection: a match must sit inside some child of
/// `node`, so direct children of `node` never count.
pub fn find_nested<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(|child| child.is_element())
        .flat_map(move |child| {
            child
                .descendants()
                .skip(1)
                .filter(move |d| d.is_element() && d.tag_name().name() == tag)
        })
}

/// Text directly inside an element; empty elements give "".
pub fn element_text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_find_child_only_looks_one_level_down() {
        let doc = Document::parse("<SEC><PRT><SCN>nested</SCN></PRT><STL>t</STL></SEC>").unwrap();
        let root = doc.root_element();
        assert!(find_child(root, "SCN").is_none());
        assert_eq!(find_child(root, "STL").map(element_text), Some("t"));
    }

    #[test]
    fn test_find_nested_skips_direct_children() {
        let xml = "<SEC><RID>top</RID><PRT><RID>a</RID><SPT><RID>b</RID></SPT></PRT><PRT><RID>c</RID></PRT></SEC>";
        let doc = Document::parse(xml).unwrap();
        let found: Vec<&str> = find_nested(doc.root_element(), "RID").map(element_text).collect();
        assert_eq!(found, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_element_text_of_empty_element() {
        let doc = Document::parse("<REF><RTL/></REF>").unwrap();
        let rtl = find_child(doc.root_element(), "RTL").unwrap();
        assert_eq!(element_text(rtl), "");
    }
}
