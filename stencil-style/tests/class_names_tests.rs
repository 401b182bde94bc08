use stencil_core::{Component, rewrite_classes};
use stencil_style::{ModuleNames, class_names};

#[test]
fn collects_class_selectors_in_order() {
    let css = r#"
.listItem { display: flex; }
.listItem:hover, li.title > .text { color: #fff; margin: .5em; }
.listItem { padding: 0; }
"#;
    assert_eq!(class_names(css).unwrap(), vec!["listItem", "title", "text"]);
}

#[test]
fn looks_inside_nested_blocks_and_pseudo_classes() {
    let css = r#"
@media (max-width: 600px) { .compact { width: 100%; } }
.item { &.clicked { color: red; } }
a:not(.disabled) { cursor: pointer; }
/* .commented { } */
"#;
    assert_eq!(
        class_names(css).unwrap(),
        vec!["compact", "item", "clicked", "disabled"]
    );
}

#[test]
fn ignores_numbers_and_urls() {
    let css = r#".a { background: url(img/x.png); line-height: 1.5; opacity: .8; }"#;
    assert_eq!(class_names(css).unwrap(), vec!["a"]);
}

#[test]
fn class_map_orders_longest_first() {
    let names = ModuleNames::new("item.scss");
    let map = names
        .class_map(".item { } .itemTitle { } .x { }")
        .unwrap();
    let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["itemTitle", "item", "x"]);
    assert_eq!(map.get("item"), Some(names.hashed("item").as_str()));
}

#[test]
fn class_map_rewrites_overlapping_names_cleanly() {
    let names = ModuleNames::new("item.scss");
    let map = names.class_map(".item {} .itemTitle {}").unwrap();
    let out = rewrite_classes(r#"<li class="item"><b class="itemTitle">x</b></li>"#, &map);
    assert_eq!(
        out,
        format!(
            r#"<li class="{}"><b class="{}">x</b></li>"#,
            names.hashed("item"),
            names.hashed("itemTitle")
        )
    );
}

#[test]
fn feeds_component_construction() {
    let names = ModuleNames::new("button.css");
    let map = names.class_map(".btn { color: red }").unwrap();
    let c = Component::with_class_map(r#"<button class="btn">{{label}}</button>"#, &map).unwrap();
    let button = c.instance();
    assert!(c.document().has_class(button, &names.hashed("btn")));
}

#[test]
fn hashed_names_never_contain_other_classes() {
    let names = ModuleNames::new("letters.css");
    let css = ".title {} .a {} .b {} .c {} .d {} .e {} .f {}";
    let map = names.class_map(css).unwrap();
    for (class, hashed) in map.iter() {
        for (other, _) in map.iter().filter(|(o, _)| *o != class) {
            assert!(!hashed.contains(other), "{hashed} for {class} contains {other}");
        }
    }

    let out = rewrite_classes("title a b c d e f", &map);
    let expected: Vec<_> = ["title", "a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|c| map.get(c).unwrap())
        .collect();
    assert_eq!(out, expected.join(" "));
}
