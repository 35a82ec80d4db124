use std::collections::BTreeMap;

#[derive(Default)]
struct Node<'a> {
    children: BTreeMap<&'a str, Node<'a>>,
}

/// Renders flat slash-separated paths as a sorted directory tree.
///
/// ```text
/// ├── a.txt
/// └── dir/
///     └── b.txt
/// ```
pub fn render_tree<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut root = Node::default();

    for path in paths {
        let mut node = &mut root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.entry(segment).or_default();
        }
    }

    let mut out = String::new();
    render_children(&root, "", &mut out);
    out
}

fn render_children(node: &Node<'_>, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (index, (name, child)) in node.children.iter().enumerate() {
        let last = index + 1 == count;
        let is_dir = !child.children.is_empty();

        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(name);
        if is_dir {
            out.push('/');
        }
        out.push('\n');

        if is_dir {
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_children(child, &child_prefix, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_tree() {
        let tree = render_tree(["src/index.js", "package.json", "src/components/App.js", "public/index.html"]);
        let expected = "\
├── package.json
├── public/
│   └── index.html
└── src/
    ├── components/
    │   └── App.js
    └── index.js
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tree(std::iter::empty()), "");
    }

    #[test]
    fn test_render_flat() {
        assert_eq!(render_tree(["b.txt", "a.txt"]), "├── a.txt\n└── b.txt\n");
    }
}
