//! Request-marshalling tests for awasu-core
//!
//! Drives `ApiArgs` and `build_post_body` together, the way the HTTP
//! client does, and checks the documents that actually go on the wire.

use awasu_core::*;
use xmltree::Element;

mod post_body {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_args_no_body_sends_nothing() {
        let body = build_post_body(&ApiArgs::new(), None).unwrap();
        assert_eq!(body, None);
    }

    #[test]
    fn test_no_args_passes_body_through_verbatim() {
        let body = build_post_body(&ApiArgs::new(), Some("<channel/>")).unwrap();
        assert_eq!(body.as_deref(), Some("<channel/>"));
    }

    #[test]
    fn test_args_only_become_the_whole_body() {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.set("verbose", true);
        let body = build_post_body(&args, None).unwrap().unwrap();

        let root = Element::parse(body.as_bytes()).unwrap();
        assert_eq!(root.name, "apiArgs");
        assert_eq!(root.attributes.get("format").map(String::as_str), Some("json"));
        assert_eq!(root.attributes.get("verbose").map(String::as_str), Some("true"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_args_land_as_first_child_of_supplied_body() {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let body = build_post_body(
            &args,
            Some("<channel><name>News</name><url>http://x</url></channel>"),
        )
        .unwrap()
        .unwrap();

        let root = Element::parse(body.as_bytes()).unwrap();
        assert_eq!(root.name, "channel");
        let children: Vec<&str> = root
            .children
            .iter()
            .filter_map(|n| n.as_element())
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(children, vec!["apiArgs", "name", "url"]);
    }

    #[test]
    fn test_attribute_values_survive_the_emitter() {
        let mut args = ApiArgs::new();
        args.set("title", r#"Tom & Jerry's "best" <hits>"#);
        let body = build_post_body(&args, None).unwrap().unwrap();

        let root = Element::parse(body.as_bytes()).unwrap();
        assert_eq!(
            root.attributes.get("title").map(String::as_str),
            Some(r#"Tom & Jerry's "best" <hits>"#)
        );
    }

    #[test]
    fn test_id_lists_are_escaped_before_the_emitter() {
        // `add_ids` escapes the joined value itself, so after the emitter's
        // own escaping a parse-back yields the entity-escaped form.
        let mut args = ApiArgs::new();
        args.add_ids(Some(&Ids::from(vec!["a&b", "c"])));
        let body = build_post_body(&args, None).unwrap().unwrap();

        let root = Element::parse(body.as_bytes()).unwrap();
        assert_eq!(
            root.attributes.get("id").map(String::as_str),
            Some("a&amp;b,c")
        );
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let err = build_post_body(&args, Some("<channel>")).unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }
}
