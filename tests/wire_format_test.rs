//! Tests for the JSON wire format of TreeNode and TreeDocument

use serde_json::json;

use treenode::{FieldValue, TreeDocument, TreeNode};

fn sample_tree() -> TreeNode {
    TreeNode::new("root", "Projects")
        .with_image_url("https://example.com/folder.png")
        .with_expanded(true)
        .with_child(
            TreeNode::new("a", "Alpha")
                .with_parent_id("root")
                .with_checked(false)
                .with_extension("size", 4096)
                .unwrap()
                .with_extension("ratio", 0.25)
                .unwrap()
                .with_extension("tags", vec!["x", "y"])
                .unwrap(),
        )
        .with_child(
            TreeNode::new("b", "Beta")
                .with_parent_id("root")
                .with_has_children(true),
        )
        .with_child(TreeNode::new("c", "Gamma").with_children(vec![]))
}

// ============================================================
// Encoding
// ============================================================

#[test]
fn given_minimal_node_when_encoding_then_only_required_fields_written() {
    let json = serde_json::to_value(TreeNode::new("1", "One")).unwrap();

    assert_eq!(json, json!({"id": "1", "name": "One"}));
}

#[test]
fn given_full_node_when_encoding_then_camel_case_and_flattened_extensions() {
    let node = TreeNode::new("1", "One")
        .with_parent_id("0")
        .with_image_url("i.png")
        .with_expanded(false)
        .with_checked(true)
        .with_has_children(true)
        .with_extension("col", "v")
        .unwrap();

    let json = serde_json::to_value(&node).unwrap();

    assert_eq!(
        json,
        json!({
            "id": "1",
            "parentId": "0",
            "name": "One",
            "imageUrl": "i.png",
            "expanded": false,
            "checked": true,
            "hasChildren": true,
            "col": "v"
        })
    );
}

#[test]
fn given_empty_children_when_encoding_then_written_as_empty_array() {
    let json = serde_json::to_value(TreeNode::new("1", "One").with_children(vec![])).unwrap();

    assert_eq!(json["children"], json!([]));
}

// ============================================================
// Round trip
// ============================================================

#[test]
fn given_nested_tree_with_extensions_when_round_tripping_then_equal() {
    let tree = sample_tree();

    let encoded = serde_json::to_string(&tree).unwrap();
    let decoded: TreeNode = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, tree);
}

#[test]
fn given_presence_variants_when_round_tripping_then_presence_preserved() {
    let tree = sample_tree();

    let decoded: TreeNode = serde_json::from_str(&serde_json::to_string(&tree).unwrap()).unwrap();

    let children = decoded.children();
    assert_eq!(children[0].checked, Some(false));
    assert_eq!(children[0].children, None);
    assert_eq!(children[1].has_children, Some(true));
    assert_eq!(children[1].children, None);
    assert!(children[1].awaits_children());
    assert_eq!(children[2].children, Some(vec![]));
    assert_eq!(children[2].has_children, None);
}

// ============================================================
// Decoding
// ============================================================

#[test]
fn given_unknown_keys_when_decoding_then_collected_as_extensions() {
    let input = json!({
        "id": "r1",
        "name": "Row",
        "hasChildren": false,
        "price": 9.5,
        "qty": 3,
        "meta": {"by": "import", "flags": [true, null]},
        "note": null
    });

    let node: TreeNode = serde_json::from_value(input).unwrap();

    assert_eq!(node.has_children, Some(false));
    assert_eq!(node.extensions.len(), 4);
    assert_eq!(node.extension("price"), Some(&FieldValue::Float(9.5)));
    assert_eq!(node.extension("qty"), Some(&FieldValue::Int(3)));
    assert_eq!(node.extension("note"), Some(&FieldValue::Null));
    let meta = node.extension("meta").and_then(FieldValue::as_map).unwrap();
    assert_eq!(meta["by"], FieldValue::from("import"));
    assert_eq!(
        meta["flags"],
        FieldValue::List(vec![FieldValue::Bool(true), FieldValue::Null])
    );
}

#[test]
fn given_null_extension_when_round_tripping_then_kept_as_null() {
    let input = r#"{"id":"1","name":"One","note":null}"#;

    let node: TreeNode = serde_json::from_str(input).unwrap();

    assert_eq!(serde_json::to_string(&node).unwrap(), input);
}

#[test]
fn given_null_for_optional_fixed_field_when_decoding_then_absent() {
    let node: TreeNode =
        serde_json::from_str(r#"{"id":"1","name":"One","imageUrl":null,"children":null}"#).unwrap();

    assert_eq!(node.image_url, None);
    assert_eq!(node.children, None);
    assert!(node.extensions.is_empty());
}

#[test]
fn given_missing_name_when_decoding_then_error() {
    let result: Result<TreeNode, _> = serde_json::from_str(r#"{"id":"1"}"#);

    let err = result.unwrap_err().to_string();
    assert!(err.contains("name"), "unexpected error: {err}");
}

#[test]
fn given_wrong_type_for_flag_when_decoding_then_error() {
    let result: Result<TreeNode, _> =
        serde_json::from_str(r#"{"id":"1","name":"One","expanded":"yes"}"#);

    assert!(result.is_err());
}

// ============================================================
// Documents
// ============================================================

#[test]
fn given_single_object_when_parsing_document_then_single_shape_kept() {
    let doc = TreeDocument::from_json_str(r#"{"id":"1","name":"One"}"#).unwrap();

    assert!(matches!(doc, TreeDocument::Single(_)));
    assert_eq!(doc.roots().len(), 1);
    assert_eq!(doc.to_json_string(false).unwrap(), r#"{"id":"1","name":"One"}"#);
}

#[test]
fn given_array_when_parsing_document_then_forest_shape_kept() {
    let input = r#"[{"id":"1","name":"One"},{"id":"2","name":"Two","parentId":"1"}]"#;

    let doc = TreeDocument::from_json_str(input).unwrap();

    assert!(matches!(doc, TreeDocument::Forest(_)));
    let roots = doc.into_roots();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[1].parent_id.as_deref(), Some("1"));
}

#[test]
fn given_array_with_bad_node_when_parsing_document_then_error_mentions_field() {
    let err = TreeDocument::from_json_str(r#"[{"id":"1"}]"#)
        .unwrap_err()
        .to_string();

    assert!(err.contains("name"), "unexpected error: {err}");
}

// ============================================================
// Numeric range and depth
// ============================================================

#[test]
fn given_integer_above_i64_max_when_round_tripping_then_exact() {
    let input = r#"{"id":"1","name":"One","big":18446744073709551615}"#;

    let doc = TreeDocument::from_json_str(input).unwrap();

    let node = doc.single().unwrap();
    assert_eq!(node.extension("big"), Some(&FieldValue::UInt(u64::MAX)));
    assert_eq!(doc.to_json_string(false).unwrap(), input);
}

#[test]
fn given_i64_boundaries_when_decoding_then_signed_ints() {
    let input = r#"{"id":"1","name":"One","max":9223372036854775807,"min":-9223372036854775808}"#;

    let node: TreeNode = serde_json::from_str(input).unwrap();

    assert_eq!(node.extension("max"), Some(&FieldValue::Int(i64::MAX)));
    assert_eq!(node.extension("min"), Some(&FieldValue::Int(i64::MIN)));
    assert_eq!(serde_json::to_string(&node).unwrap(), input);
}

#[test]
fn given_non_finite_extension_when_encoding_then_error_instead_of_null() {
    let doc = TreeDocument::Single(
        TreeNode::new("1", "One")
            .with_extension("ratio", f64::NAN)
            .unwrap(),
    );

    let err = doc.to_json_string(false).unwrap_err();

    assert!(err.to_string().contains("non-finite"), "error: {err}");
}

/// Chain of `depth` nodes, each the only child of the previous one.
fn chain(depth: usize) -> TreeNode {
    let mut node = TreeNode::new(format!("n{}", depth - 1), "leaf");
    for level in (0..depth - 1).rev() {
        node = TreeNode::new(format!("n{level}"), format!("level {level}"))
            .with_child(node.with_parent_id(format!("n{level}")));
    }
    node
}

#[test]
fn given_tree_200_levels_deep_when_round_tripping_then_equal() {
    let tree = TreeDocument::Single(chain(200));

    for pretty in [false, true] {
        let encoded = tree.to_json_string(pretty).unwrap();
        let decoded = TreeDocument::from_json_str(&encoded).unwrap();

        assert_eq!(decoded, tree);
        assert_eq!(treenode::domain::walk::depth(decoded.roots()), 200);
    }
}
