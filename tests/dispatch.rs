//! Dispatch behaviour: suppression, flags, fallback and presenter wiring.

use std::collections::HashMap;

use uri_router::dispatch::{DispatchError, DispatchFlag, DispatchFlags, DispatchOutcome, Dispatcher};
use uri_router::routing::{RouteKind, WildcardValue};

mod common;

use common::RecordingPresenter;

fn dispatcher() -> (Dispatcher<String>, RecordingPresenter) {
    let presenter = RecordingPresenter::default();
    let dispatcher = Dispatcher::new(common::app_registry()).with_presenter(presenter.clone());
    (dispatcher, presenter)
}

#[test]
fn test_same_route_dispatched_once() {
    let (mut dispatcher, presenter) = dispatcher();
    let route = "app://www.app.com/articles/13746/related?page=1";

    dispatcher.dispatch(route, HashMap::new(), &DispatchFlags::new()).unwrap();
    let second = dispatcher.dispatch(route, HashMap::new(), &DispatchFlags::new()).unwrap();

    assert_eq!(second, DispatchOutcome::SuppressedSameRoute);
    assert_eq!(presenter.calls().len(), 1);
}

#[test]
fn test_different_route_clears_suppression() {
    let (mut dispatcher, presenter) = dispatcher();
    let flags = DispatchFlags::new();

    dispatcher.dispatch("app://www.app.com/files/1", HashMap::new(), &flags).unwrap();
    dispatcher.dispatch("app://www.app.com/files/2", HashMap::new(), &flags).unwrap();
    dispatcher.dispatch("app://www.app.com/files/1", HashMap::new(), &flags).unwrap();

    assert_eq!(presenter.calls().len(), 3);
    assert_eq!(dispatcher.current_route(), Some("app://www.app.com/files/1"));
}

#[test]
fn test_presenter_receives_full_payload() {
    let (mut dispatcher, presenter) = dispatcher();
    let flags = DispatchFlags::new()
        .with(DispatchFlag::AddToHistory)
        .with(DispatchFlag::ReplaceTarget);
    let extra = HashMap::from([("origin".to_string(), "push".to_string())]);

    let outcome = dispatcher
        .dispatch("app://www.app.com/laws/1981/articles/14563?order=desc", extra, &flags)
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Presented(RouteKind::Composite));

    let calls = presenter.calls();
    let call = &calls[0];
    assert_eq!(call.route, "app://www.app.com/laws/1981/articles/14563?order=desc");
    assert_eq!(call.kind, RouteKind::Composite);
    assert_eq!(call.target, "ArticleView");
    assert_eq!(call.arguments.len(), 3);
    assert_eq!(call.arguments["lawId"], WildcardValue::Integer(1981));
    assert_eq!(call.arguments["origin"], WildcardValue::String("push".into()));
    assert_eq!(call.query_params["order"], "desc");
    assert_eq!(call.flags, flags);
}

#[test]
fn test_not_found_without_fallback() {
    let (mut dispatcher, presenter) = dispatcher();
    let err = dispatcher
        .dispatch("app://www.app.com/unknown/123", HashMap::new(), &DispatchFlags::new())
        .unwrap_err();

    assert!(matches!(err, DispatchError::RouteNotFound(_)));
    assert!(presenter.calls().is_empty());
}

#[test]
fn test_fallback_carries_no_wildcards() {
    let (mut dispatcher, presenter) = dispatcher();
    dispatcher.set_fallback(RouteKind::Composite, "NotFound".to_string());

    let outcome = dispatcher
        .dispatch("app://www.app.com/unknown/123", HashMap::new(), &DispatchFlags::new())
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::PresentedFallback(RouteKind::Composite));

    let calls = presenter.calls();
    assert_eq!(calls[0].target, "NotFound");
    assert!(calls[0].arguments.is_empty());
}

#[test]
fn test_malformed_query_leaves_state_untouched() {
    let (mut dispatcher, presenter) = dispatcher();
    let err = dispatcher
        .dispatch("app://www.app.com/files/1?broken", HashMap::new(), &DispatchFlags::new())
        .unwrap_err();

    assert!(matches!(err, DispatchError::Route(_)));
    assert_eq!(dispatcher.current_route(), None);
    assert!(presenter.calls().is_empty());
}

#[test]
fn test_replace_registry_clears_current_route() {
    let (mut dispatcher, _presenter) = dispatcher();
    dispatcher
        .dispatch("app://www.app.com/files/1", HashMap::new(), &DispatchFlags::new())
        .unwrap();

    let old = dispatcher.replace_registry(Default::default());
    assert!(!old.is_empty());
    assert_eq!(dispatcher.current_route(), None);
    assert!(!dispatcher.is_valid_route("app://www.app.com/files/1"));
}
