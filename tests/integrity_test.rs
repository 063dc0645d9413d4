//! Tests for invariant detection over forests

use rstest::rstest;

use treenode::util::testing;
use treenode::{check_integrity, IntegrityIssue, TreeDocument, TreeNode};

fn forest(json: &str) -> Vec<TreeNode> {
    TreeDocument::from_json_str(json).unwrap().into_roots()
}

#[test]
fn given_well_formed_nested_tree_when_checking_then_ok() {
    testing::init_test_setup();
    let roots = forest(
        r#"{"id":"root","name":"Root","expanded":true,"children":[
            {"id":"a","parentId":"root","name":"A","hasChildren":true},
            {"id":"b","name":"B","children":[{"id":"b1","parentId":"b","name":"B1"}]}
        ]}"#,
    );

    let report = check_integrity(&roots);

    assert!(report.is_ok(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.nodes, 4);
    assert_eq!(report.roots, 1);
    assert_eq!(report.lazy, 1);
}

#[test]
fn given_flat_forest_with_parent_links_when_checking_then_ok() {
    let roots = forest(
        r#"[
            {"id":"1","name":"One"},
            {"id":"2","name":"Two","parentId":"1"},
            {"id":"3","name":"Three","parentId":""}
        ]"#,
    );

    let report = check_integrity(&roots);

    assert!(report.is_ok(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.roots, 3);
}

#[test]
fn given_duplicate_id_in_different_subtrees_when_checking_then_reported_once() {
    let roots = forest(
        r#"[
            {"id":"x","name":"X","children":[{"id":"dup","name":"D1"}]},
            {"id":"y","name":"Y","children":[{"id":"dup","name":"D2"}]}
        ]"#,
    );

    let report = check_integrity(&roots);

    assert_eq!(
        report.issues,
        vec![IntegrityIssue::DuplicateId {
            id: "dup".to_string()
        }]
    );
}

#[rstest]
#[case::dangling(
    r#"[{"id":"1","name":"One","parentId":"ghost"}]"#,
    IntegrityIssue::DanglingParent { id: "1".into(), parent_id: "ghost".into() }
)]
#[case::self_parent(
    r#"[{"id":"1","name":"One","parentId":"1"}]"#,
    IntegrityIssue::SelfParent { id: "1".into() }
)]
#[case::misplaced(
    r#"[{"id":"p","name":"P","children":[{"id":"c","name":"C","parentId":"q"}]},{"id":"q","name":"Q"}]"#,
    IntegrityIssue::MisplacedChild { id: "c".into(), parent_id: "q".into(), container: "p".into() }
)]
#[case::children_contradict_hint(
    r#"{"id":"p","name":"P","hasChildren":false,"children":[{"id":"c","name":"C"}]}"#,
    IntegrityIssue::ChildrenContradictHint { id: "p".into() }
)]
fn given_single_violation_when_checking_then_reported(
    #[case] json: &str,
    #[case] expected: IntegrityIssue,
) {
    let roots = forest(json);

    let report = check_integrity(&roots);

    assert!(!report.is_ok());
    assert_eq!(report.issues, vec![expected]);
}

#[test]
fn given_lazy_hint_without_children_when_checking_then_not_an_issue() {
    let roots = forest(r#"{"id":"p","name":"P","hasChildren":true,"children":[]}"#);

    let report = check_integrity(&roots);

    assert!(report.is_ok());
    assert_eq!(report.lazy, 1);
}

#[test]
fn given_issue_when_displaying_then_names_nodes() {
    let issue = IntegrityIssue::MisplacedChild {
        id: "c".into(),
        parent_id: "q".into(),
        container: "p".into(),
    };

    assert_eq!(
        issue.to_string(),
        "node c declares parent q but is nested under p"
    );
}

#[test]
fn given_empty_forest_when_checking_then_empty_report() {
    let report = check_integrity(&[]);

    assert!(report.is_ok());
    assert_eq!(report.nodes, 0);
    assert_eq!(report.roots, 0);
}
