//! Integration tests for collision resolution through the save handler
//!
//! Tests cover:
//! - Suffix numbering (exact duplicates, existing suffixes, gaps)
//! - Applicability gate (new vs persisted, dirty vs clean)
//! - Idempotence of an applied suffix
//! - Case-insensitive comparison
//! - Language variant isolation
//! - Recovered per-variant failures and fatal context loss
//! - Termination on cyclic trees

use anyhow::Result;
use namescope_core::{
    collision::{CollisionResolver, SkipReason, VariantOutcome},
    models::{NodeId, SavingNode, TreeNode, Variant, ROOT_ID},
    notification::{ContentSavingHandler, NotificationHandler, SavingNotification, StaticTreeAccessor},
    tree::{ContentTree, MemoryTree},
    ScopeConfig,
};
use serde_json::json;
use std::sync::Arc;

/// Test helper: configuration marking "folder" nodes
fn config() -> Arc<ScopeConfig> {
    Arc::new(ScopeConfig::default().with_marked_types(["folder"]))
}

/// Test helper: Home with one marked folder holding the given page names
///
/// Home (1)
/// └── Folder (2, marked)
///     ├── names[0] (10)
///     ├── names[1] (11)
///     └── ...
fn tree_with_folder_pages(names: &[&str]) -> MemoryTree {
    let mut nodes = vec![
        TreeNode::new(1, ROOT_ID, "home", "Home"),
        TreeNode::new(2, 1, "folder", "Folder"),
    ];
    for (offset, name) in names.iter().enumerate() {
        nodes.push(TreeNode::new(10 + offset as NodeId, 2, "page", *name));
    }
    MemoryTree::from_nodes(nodes).unwrap()
}

/// Test helper: run a single-node save through the handler and return the node
fn save(tree: MemoryTree, node: SavingNode) -> Result<SavingNode> {
    let handler = ContentSavingHandler::new(StaticTreeAccessor::new(Arc::new(tree)), config());
    let mut notification = SavingNotification::new(vec![node]);
    handler.handle(&mut notification)?;
    Ok(notification.saved_entities.remove(0))
}

// =========================================================================
// Suffix Numbering
// =========================================================================

#[test]
fn test_exact_duplicate_gets_suffix_one() -> Result<()> {
    let saved = save(tree_with_folder_pages(&["Page"]), SavingNode::new(1, "page", "Page"))?;
    assert_eq!(saved.name, "Page (1) ");
    Ok(())
}

#[test]
fn test_suffix_is_max_plus_one_not_first_gap() -> Result<()> {
    let saved = save(
        tree_with_folder_pages(&["Page", "Page (1)", "Page (3)"]),
        SavingNode::new(1, "page", "Page"),
    )?;
    assert_eq!(saved.name, "Page (4) ");
    Ok(())
}

#[test]
fn test_no_collision_leaves_name_unchanged() -> Result<()> {
    let saved = save(
        tree_with_folder_pages(&["Page", "Other"]),
        SavingNode::new(1, "page", "Unique"),
    )?;
    assert_eq!(saved.name, "Unique");
    Ok(())
}

#[test]
fn test_comparison_is_case_insensitive() -> Result<()> {
    let saved = save(tree_with_folder_pages(&["PAGE"]), SavingNode::new(1, "page", "page"))?;
    assert_eq!(saved.name, "page (1) ");
    Ok(())
}

#[test]
fn test_trailing_whitespace_is_ignored() -> Result<()> {
    let saved = save(tree_with_folder_pages(&["Page (2)  "]), SavingNode::new(1, "page", "Page "))?;
    assert_eq!(saved.name, "Page  (3) ");
    Ok(())
}

#[test]
fn test_unparsable_suffix_does_not_count() -> Result<()> {
    let saved = save(
        tree_with_folder_pages(&["Page (two)", "Page(2)", "Page (-1)"]),
        SavingNode::new(1, "page", "Page"),
    )?;
    assert_eq!(saved.name, "Page");
    Ok(())
}

#[test]
fn test_saving_inside_marked_folder_checks_the_whole_scope() -> Result<()> {
    // New node saved directly under the marked folder collides with a page
    // nested one marked level deeper.
    let tree = MemoryTree::from_nodes(vec![
        TreeNode::new(1, ROOT_ID, "home", "Home"),
        TreeNode::new(2, 1, "folder", "Folder"),
        TreeNode::new(3, 2, "folder", "Sub folder"),
        TreeNode::new(4, 3, "page", "Contact"),
    ])?;

    let saved = save(tree, SavingNode::new(2, "page", "Contact"))?;
    assert_eq!(saved.name, "Contact (1) ");
    Ok(())
}

#[test]
fn test_reserved_attribute_marks_a_node() -> Result<()> {
    let tree = MemoryTree::from_nodes(vec![
        TreeNode::new(1, ROOT_ID, "home", "Home"),
        TreeNode::new(2, 1, "container", "Grouping").with_property("namescopeMarked", json!(true)),
        TreeNode::new(3, 2, "page", "Events"),
    ])?;

    let saved = save(tree, SavingNode::new(1, "page", "Events"))?;
    assert_eq!(saved.name, "Events (1) ");
    Ok(())
}

#[test]
fn test_unmarked_containers_are_not_searched() -> Result<()> {
    let tree = MemoryTree::from_nodes(vec![
        TreeNode::new(1, ROOT_ID, "home", "Home"),
        TreeNode::new(2, 1, "container", "Grouping"),
        TreeNode::new(3, 2, "page", "Events"),
    ])?;

    let saved = save(tree, SavingNode::new(1, "page", "Events"))?;
    assert_eq!(saved.name, "Events");
    Ok(())
}

// =========================================================================
// Applicability Gate
// =========================================================================

#[test]
fn test_new_nodes_are_always_checked() {
    let tree = tree_with_folder_pages(&["Page"]);
    let resolver = CollisionResolver::new(config());

    let mut node = SavingNode::new(1, "page", "Page");
    node.name_dirty = false;

    let report = resolver.process_node(&tree, &mut node);
    assert!(report.checked);
    assert_eq!(node.name, "Page (1) ");
}

#[test]
fn test_unchanged_persisted_node_is_not_mutated() -> Result<()> {
    // Stored name already collides, but nothing changed in this save
    let saved = save(
        tree_with_folder_pages(&["Page"]),
        SavingNode::persisted(50, 1, 2, "page", "Page"),
    )?;
    assert_eq!(saved.name, "Page");
    assert!(!saved.name_dirty);
    Ok(())
}

#[test]
fn test_renamed_persisted_node_is_checked() -> Result<()> {
    let mut node = SavingNode::persisted(50, 1, 2, "page", "Draft");
    node.set_name("Page", &Variant::Invariant);

    let saved = save(tree_with_folder_pages(&["Page"]), node)?;
    assert_eq!(saved.name, "Page (1) ");
    Ok(())
}

#[test]
fn test_persisted_node_does_not_collide_with_itself() -> Result<()> {
    let mut node = SavingNode::persisted(10, 2, 3, "page", "Page");
    node.set_name("Page", &Variant::Invariant);

    let saved = save(tree_with_folder_pages(&["Page"]), node)?;
    assert_eq!(saved.name, "Page");
    Ok(())
}

// =========================================================================
// Idempotence
// =========================================================================

#[test]
fn test_second_pass_keeps_applied_suffix() {
    let tree = tree_with_folder_pages(&["Page", "Page (1)", "Page (3)"]);
    let resolver = CollisionResolver::new(config());
    let mut nodes = vec![SavingNode::new(1, "page", "Page")];

    let first = resolver.process(&tree, &mut nodes);
    assert_eq!(first.renamed_count(), 1);
    assert_eq!(nodes[0].name, "Page (4) ");

    let second = resolver.process(&tree, &mut nodes);
    assert_eq!(second.renamed_count(), 0);
    assert_eq!(nodes[0].name, "Page (4) ");
}

// =========================================================================
// Language Variants
// =========================================================================

/// Home (1)
/// └── Folder (2, marked, en + fr)
///     └── Page (3): en "News", fr "Actualites"
fn variant_tree() -> MemoryTree {
    MemoryTree::from_nodes(vec![
        TreeNode::new(1, ROOT_ID, "home", "Home"),
        TreeNode::new(2, 1, "folder", "Folder")
            .with_variant_name("en", "Folder")
            .with_variant_name("fr", "Dossier"),
        TreeNode::new(3, 2, "page", "News")
            .with_variant_name("en", "News")
            .with_variant_name("fr", "Actualites"),
    ])
    .unwrap()
}

#[test]
fn test_collision_in_one_variant_does_not_touch_another() -> Result<()> {
    let node = SavingNode::new(1, "page", "News")
        .with_variant("en", "News", true)
        .with_variant("fr", "Nouvelles", true);

    let saved = save(variant_tree(), node)?;
    assert_eq!(saved.name_for(&Variant::culture("en")), "News (1) ");
    assert_eq!(saved.name_for(&Variant::culture("fr")), "Nouvelles");
    Ok(())
}

#[test]
fn test_names_from_other_variants_do_not_trigger_collisions() -> Result<()> {
    // "Actualites" exists only in fr; the en name must not collide with it
    let node = SavingNode::new(1, "page", "Actualites")
        .with_variant("en", "Actualites", true)
        .with_variant("fr", "Autre", true);

    let saved = save(variant_tree(), node)?;
    assert_eq!(saved.name_for(&Variant::culture("en")), "Actualites");
    assert_eq!(saved.name_for(&Variant::culture("fr")), "Autre");
    Ok(())
}

#[test]
fn test_each_dirty_variant_gets_its_own_suffix() -> Result<()> {
    let node = SavingNode::new(1, "page", "News")
        .with_variant("en", "News", true)
        .with_variant("fr", "Actualites", true);

    let saved = save(variant_tree(), node)?;
    assert_eq!(saved.name_for(&Variant::culture("en")), "News (1) ");
    assert_eq!(saved.name_for(&Variant::culture("fr")), "Actualites (1) ");
    // Primary name is untouched for variant nodes
    assert_eq!(saved.name, "News");
    Ok(())
}

#[test]
fn test_clean_variant_is_left_alone() -> Result<()> {
    let node = SavingNode::persisted(40, 1, 2, "page", "News")
        .with_variant("en", "News", false)
        .with_variant("fr", "Actualites", true);

    let saved = save(variant_tree(), node)?;
    assert_eq!(saved.name_for(&Variant::culture("en")), "News");
    assert_eq!(saved.name_for(&Variant::culture("fr")), "Actualites (1) ");
    Ok(())
}

// =========================================================================
// Recovered Failures
// =========================================================================

#[test]
fn test_missing_parent_skips_only_that_node() {
    let tree = tree_with_folder_pages(&["Page"]);
    let resolver = CollisionResolver::new(config());
    let mut nodes = vec![
        SavingNode::new(999, "page", "Page"),
        SavingNode::new(1, "page", "Page"),
    ];

    let report = resolver.process(&tree, &mut nodes);

    assert_eq!(
        report.nodes[0].outcome(&Variant::Invariant),
        Some(&VariantOutcome::Skipped(SkipReason::ParentNotFound { parent_id: 999 }))
    );
    assert_eq!(nodes[0].name, "Page");
    assert_eq!(nodes[1].name, "Page (1) ");
    assert_eq!(report.skipped_count(), 1);
}

#[test]
fn test_persisted_root_is_never_renamed() -> Result<()> {
    let mut node = SavingNode::persisted(1, ROOT_ID, 0, "home", "Home");
    node.set_name("Folder", &Variant::Invariant);

    let saved = save(tree_with_folder_pages(&[]), node)?;
    assert_eq!(saved.name, "Folder");
    Ok(())
}

/// Tree whose children lookups always fail
struct BrokenChildren(MemoryTree);

impl ContentTree for BrokenChildren {
    fn get_node(&self, id: NodeId) -> Result<Option<TreeNode>> {
        self.0.get_node(id)
    }

    fn siblings_and_self(&self, node: &TreeNode, variant: &Variant) -> Result<Vec<TreeNode>> {
        self.0.siblings_and_self(node, variant)
    }

    fn children(&self, _node: &TreeNode, _variant: &Variant) -> Result<Vec<TreeNode>> {
        anyhow::bail!("children index unavailable")
    }
}

#[test]
fn test_tree_errors_degrade_to_skip() {
    let tree = BrokenChildren(tree_with_folder_pages(&["Page"]));
    let resolver = CollisionResolver::new(config());
    let mut node = SavingNode::new(1, "page", "Page");

    let report = resolver.process_node(&tree, &mut node);

    assert!(matches!(
        report.outcome(&Variant::Invariant),
        Some(VariantOutcome::Skipped(SkipReason::TreeError(message))) if message.contains("children index")
    ));
    assert_eq!(node.name, "Page");
}

// =========================================================================
// Malformed Trees
// =========================================================================

#[test]
fn test_cyclic_marked_parents_terminate() {
    // Folders 2 and 3 are each other's parent; both are marked
    let tree = MemoryTree::from_nodes(vec![
        TreeNode::new(2, 3, "folder", "Loop A"),
        TreeNode::new(3, 2, "folder", "Loop B"),
        TreeNode::new(4, 2, "page", "Page"),
    ])
    .unwrap();
    let resolver = CollisionResolver::new(Arc::new(
        ScopeConfig::default()
            .with_marked_types(["folder"])
            .with_max_walk_iterations(10),
    ));
    let mut node = SavingNode::new(2, "page", "Page");

    let report = resolver.process_node(&tree, &mut node);

    // The walk is truncated rather than failing; the page under the loop is still found
    assert!(report.checked);
    assert_eq!(node.name, "Page (1) ");
}
