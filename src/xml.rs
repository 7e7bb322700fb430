use roxmltree::Node;

/// Direct element children of `node` with the given tag name, in document order.
pub(crate) fn child_elements<'a, 'input: 'a, 'n>(
    node: Node<'a, 'input>,
    name: &'n str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'n
where
    'a: 'n,
{
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(name))
}

/// Follows `path` one direct child at a time and returns the first match.
pub(crate) fn find_path<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> Option<Node<'a, 'input>> {
    path.iter()
        .try_fold(node, |current, name| child_elements(current, name).next())
}

/// Every element reached by following `path`, in document order.
pub(crate) fn find_all<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> Vec<Node<'a, 'input>> {
    path.iter().fold(vec![node], |nodes, name| {
        nodes
            .into_iter()
            .flat_map(|current| child_elements(current, name))
            .collect()
    })
}

/// Trimmed text content, treating whitespace-only text as absent.
pub(crate) fn trimmed_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|text| !text.is_empty())
}
