use super::*;

#[test]
fn child_extends_without_mutating_parent() {
    let root = QueryKey::root("account");
    let profile = root.child("profile");
    assert_eq!(root.segments().len(), 1);
    assert_eq!(profile.segments(), &[KeySegment::from("account"), KeySegment::from("profile")]);
}

#[test]
fn starts_with_matches_prefixes_and_self() {
    let root = QueryKey::root("account");
    let profile = root.child("profile");
    assert!(profile.starts_with(&root));
    assert!(profile.starts_with(&profile));
    assert!(!root.starts_with(&profile));
}

#[test]
fn starts_with_compares_whole_segments() {
    let accounts = QueryKey::root("accounts");
    let account = QueryKey::root("account");
    assert!(!accounts.starts_with(&account));
}

#[test]
fn name_and_id_segments_differ() {
    assert_ne!(QueryKey::root("account").child("7"), QueryKey::root("account").child(7_u64));
}

#[test]
fn display_renders_json_like_path() {
    let key = QueryKey::root("account").child("profile");
    assert_eq!(key.to_string(), r#"["account","profile"]"#);
    assert_eq!(QueryKey::root("account").child(42_u64).to_string(), r#"["account",42]"#);
}
