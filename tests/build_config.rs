//! End-to-end normalization of authored trees.

use route_config::element::{Element, ElementType};
use route_config::routing::{
    build_config, ChildRoutes, Params, RedirectDescriptor, RenderContext, RenderOutcome,
    RouteDescriptor, RouteNode,
};
use serde_json::json;

mod common;

use common::{component, redirect, route, Verbatim};

fn descriptor(path: Option<&str>, component_name: &str) -> RouteDescriptor {
    RouteDescriptor::new(path.map(str::to_string), Some(component(component_name)))
}

#[test]
fn test_single_route() {
    let config = build_config(&route("/", "AppPage")).unwrap();
    assert_eq!(config, vec![RouteNode::Route(descriptor(Some("/"), "AppPage"))]);
}

#[test]
fn test_nested_routes_mirror_input() {
    let tree = route("/", "AppPage").children([
        Element::new("Route").component(component("MainPage")),
        route("foo", "FooPage").child(route("bar", "BarPage")),
    ]);

    let expected = vec![RouteNode::Route(descriptor(Some("/"), "AppPage").with_children(
        ChildRoutes::Ordered(vec![
            descriptor(None, "MainPage").into(),
            descriptor(Some("foo"), "FooPage")
                .with_children(ChildRoutes::Ordered(vec![
                    descriptor(Some("bar"), "BarPage").into()
                ]))
                .into(),
        ]),
    ))];

    assert_eq!(build_config(&tree).unwrap(), expected);
}

#[test]
fn test_nested_redirect() {
    let tree = route("/", "AppPage").child(redirect("widget/:widgetId", "/widgets/:widgetId"));

    let expected = vec![RouteNode::Route(descriptor(Some("/"), "AppPage").with_children(
        ChildRoutes::Ordered(vec![RedirectDescriptor::new(
            "widget/:widgetId",
            "/widgets/:widgetId",
        )
        .unwrap()
        .into()]),
    ))];

    let config = build_config(&tree).unwrap();
    assert_eq!(config, expected);

    let child = &config[0].children().unwrap().as_ordered().unwrap()[0];
    let redirect = child.as_redirect().unwrap();
    assert_eq!(redirect.path(), "widget/:widgetId");
    assert_eq!(redirect.to(), "/widgets/:widgetId");
}

#[test]
fn test_named_child_routes() {
    let tree = route("/", "AppPage").children([
        Element::new("Route")
            .path("foo")
            .outlet("nav", route("(.*)?", "FooNav"))
            .outlet("main", vec![route("a", "FooA"), route("b", "FooB")]),
        Element::new("Route")
            .path("bar")
            .outlet("nav", route("(.*)?", "BarNav"))
            .outlet("main", Element::new("Route").component(component("BarMain"))),
    ]);

    let config = build_config(&tree).unwrap();
    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!([{
            "path": "/",
            "Component": "AppPage",
            "children": [
                {
                    "path": "foo",
                    "children": {
                        "nav": [{ "path": "(.*)?", "Component": "FooNav" }],
                        "main": [
                            { "path": "a", "Component": "FooA" },
                            { "path": "b", "Component": "FooB" }
                        ]
                    }
                },
                {
                    "path": "bar",
                    "children": {
                        "nav": [{ "path": "(.*)?", "Component": "BarNav" }],
                        "main": [{ "Component": "BarMain" }]
                    }
                }
            ]
        }])
    );

    let outlets = config[0].children().unwrap().as_ordered().unwrap()[0]
        .children()
        .unwrap()
        .as_named()
        .unwrap();
    assert_eq!(outlets.keys().collect::<Vec<_>>(), vec!["nav", "main"]);
}

#[test]
fn test_proxied_redirect() {
    for depth in 1..=3 {
        let mut ty = ElementType::from("Redirect");
        for _ in 0..depth {
            ty = ElementType::proxied(ty);
        }
        let proxied = Element::new(ty).prop("from", "/foo").prop("to", "/bar");

        let config = build_config(&proxied).unwrap();
        let RouteNode::Redirect(redirect) = &config[0] else {
            panic!("expected a redirect at depth {}, got {:?}", depth, config[0]);
        };
        assert_eq!(redirect.path(), "/foo");
        assert_eq!(redirect.to(), "/bar");

        let params = Params::new();
        let outcome = config[0].render(&RenderContext::new(&params, &Verbatim)).unwrap();
        match outcome {
            RenderOutcome::Redirect(signal) => assert_eq!(signal.location, "/bar"),
            other => panic!("expected redirect signal, got {:?}", other),
        }
    }
}

#[test]
fn test_build_is_idempotent() {
    let tree = route("/", "AppPage")
        .child(route("foo", "FooPage").outlet("main", route("a", "FooA")))
        .child(redirect("/old", "/new"));

    let first = build_config(&tree).unwrap();
    let second = build_config(&tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unrecognized_elements_are_omitted() {
    let tree = vec![
        Element::new("header"),
        route("/", "AppPage").children([
            Element::new("div"),
            route("a", "A"),
            Element::new(ElementType::proxied("aside")),
            route("b", "B"),
        ]),
        Element::new("footer"),
    ];

    let config = build_config(&tree).unwrap();
    assert_eq!(config.len(), 1);
    let paths: Vec<_> = config[0]
        .children()
        .unwrap()
        .as_ordered()
        .unwrap()
        .iter()
        .filter_map(RouteNode::path)
        .collect();
    assert_eq!(paths, vec!["a", "b"]);
}
