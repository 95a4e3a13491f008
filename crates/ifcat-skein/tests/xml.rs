use ifcat_skein::{Skein, SkeinItem};

fn two_child_skein() -> (Skein, String, String, String) {
    let mut skein = Skein::new();
    let first = skein
        .root_mut()
        .add_child(SkeinItem::new("go north").with_result("A clearing.\n"));
    let second = skein
        .root_mut()
        .add_child(SkeinItem::new("go south").with_result("A riverbank.\n"));
    let root = skein.root().id().to_string();
    (skein, root, first.to_string(), second.to_string())
}

#[test]
fn one_item_element_per_node() {
    let (skein, root, first, second) = two_child_skein();
    let document = skein.xml_data().unwrap();

    assert_eq!(document.matches("<item nodeId=").count(), 3);
    for id in [&root, &first, &second] {
        assert_eq!(document.matches(&format!("<item nodeId=\"{id}\"")).count(), 1);
    }
}

#[test]
fn children_are_listed_by_reference() {
    let (skein, _, first, second) = two_child_skein();
    let document = skein.xml_data().unwrap();

    assert_eq!(document.matches("<children>").count(), 1);
    for id in [&first, &second] {
        assert_eq!(
            document
                .matches(&format!("<child nodeId=\"{id}\"/>"))
                .count(),
            1
        );
    }
}

#[test]
fn wrapper_carries_root_and_active_ids() {
    let (mut skein, root, first, _) = two_child_skein();
    let child = skein.root().children()[0].id();
    assert!(skein.set_active(child));
    let document = skein.xml_data().unwrap();

    assert!(document.starts_with(&format!(
        "<Skein rootNode=\"{root}\" xmlns=\"http://www.logicalshift.org.uk/IF/Skein\">"
    )));
    assert!(document.contains("<generator>ifcat</generator>"));
    assert!(document.contains(&format!("<activeNode nodeId=\"{first}\"/>")));
    assert!(document.trim_end().ends_with("</Skein>"));
}

#[test]
fn stack_walk_emits_last_child_subtree_first() {
    let (skein, root, first, second) = two_child_skein();
    let document = skein.xml_data().unwrap();

    let position = |id: &str| {
        document
            .find(&format!("<item nodeId=\"{id}\""))
            .expect("item present")
    };
    assert!(position(&root) < position(&second));
    assert!(position(&second) < position(&first));
}

#[test]
fn command_text_is_escaped() {
    let mut skein = Skein::new();
    skein
        .root_mut()
        .add_child(SkeinItem::new(r#"<go "north">"#));
    let document = skein.xml_data().unwrap();

    assert!(document.contains(
        "<command xml:space=\"preserve\">&lt;go &quot;north&quot;&gt;</command>"
    ));
}

#[test]
fn bare_item_serializes_only_mandatory_fields() {
    let mut skein = Skein::new();
    let id = skein.root_mut().add_child(SkeinItem::empty());
    let document = skein.xml_data().unwrap();

    let open = format!("<item nodeId=\"{id}\">");
    let start = document.find(&open).unwrap() + open.len();
    let end = start + document[start..].find("</item>").unwrap();
    let body = &document[start..end];

    assert!(body.contains("<played>NO</played>"));
    assert!(body.contains("<changed>NO</changed>"));
    assert!(body.contains("<temporary score=\"0\">YES</temporary>"));
    for absent in ["<command", "<result", "<annotation", "<commentary", "<children>"] {
        assert!(!body.contains(absent), "unexpected {absent} in {body}");
    }
}

#[test]
fn flags_render_as_yes_no_tokens() {
    let mut skein = Skein::new();
    skein.input_command("look");
    skein.output_text("Nothing here.\n");
    skein.waiting_for_input();
    let document = skein.xml_data().unwrap();

    assert!(document.contains("<played>YES</played>"));
    assert!(document.contains("<temporary score=\"1\">YES</temporary>"));
    assert!(!document.contains("<played>yes</played>"));
}

#[test]
fn newlines_survive_and_control_characters_do_not() {
    let mut skein = Skein::new();
    skein
        .root_mut()
        .add_child(SkeinItem::new("look").with_result("line one\nline\u{0}\ttwo\n"));
    let document = skein.xml_data().unwrap();

    assert!(document.contains("<result xml:space=\"preserve\">line one\nlinetwo\n</result>"));
}
