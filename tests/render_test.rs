//! Tests for terminal rendering of forests

use rstest::rstest;

use treenode::application::render::{label, render_forest};
use treenode::config::DisplaySettings;
use treenode::TreeNode;

fn display(show_ids: bool, show_state: bool, show_extensions: bool) -> DisplaySettings {
    DisplaySettings {
        show_ids,
        show_state,
        show_extensions,
    }
}

#[rstest]
#[case(display(false, false, false), "Docs")]
#[case(display(true, false, false), "Docs [d1]")]
#[case(display(false, true, false), "[x] - Docs")]
#[case(display(false, false, true), "Docs {owner=ops, size=3}")]
#[case(display(true, true, true), "[x] - Docs [d1] {owner=ops, size=3}")]
fn given_display_settings_when_labeling_then_parts_included(
    #[case] settings: DisplaySettings,
    #[case] expected: &str,
) {
    let node = TreeNode::new("d1", "Docs")
        .with_checked(true)
        .with_expanded(true)
        .with_child(TreeNode::new("f1", "File"))
        .with_extension("size", 3)
        .unwrap()
        .with_extension("owner", "ops")
        .unwrap();

    assert_eq!(label(&node, &settings), expected);
}

#[test]
fn given_lazy_collapsed_node_when_labeling_then_marked() {
    let node = TreeNode::new("l", "Lazy").with_has_children(true);

    assert_eq!(label(&node, &DisplaySettings::default()), "Lazy …");
}

#[test]
fn given_collapsed_node_with_children_when_labeling_then_plus_marker() {
    let node = TreeNode::new("p", "Parent")
        .with_checked(false)
        .with_child(TreeNode::new("c", "Child"));

    assert_eq!(label(&node, &DisplaySettings::default()), "[ ] + Parent");
}

#[test]
fn given_forest_when_rendering_then_one_tree_per_root_with_nesting() {
    let roots = vec![
        TreeNode::new("a", "A")
            .with_child(TreeNode::new("a1", "A1"))
            .with_child(TreeNode::new("a2", "A2")),
        TreeNode::new("b", "B"),
    ];
    let settings = display(false, false, false);

    let trees = render_forest(&roots, &settings);

    assert_eq!(trees.len(), 2);
    let text = trees[0].to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "A");
    assert!(lines[1].ends_with("A1"), "line: {}", lines[1]);
    assert!(lines[2].ends_with("A2"), "line: {}", lines[2]);
    assert_eq!(trees[1].to_string().trim_end(), "B");
}

#[test]
fn given_tree_300_levels_deep_when_rendering_then_every_level_printed() {
    let mut node = TreeNode::new("n299", "L299");
    for level in (0..299).rev() {
        node = TreeNode::new(format!("n{level}"), format!("L{level}")).with_child(node);
    }

    let trees = render_forest(std::slice::from_ref(&node), &display(false, false, false));

    let text = trees[0].to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 300);
    assert_eq!(lines[0], "L0");
    assert!(lines[299].ends_with("L299"), "line: {}", lines[299]);
}
