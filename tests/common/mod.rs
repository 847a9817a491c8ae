//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use uri_router::dispatch::{DispatchFlags, Presentation};
use uri_router::routing::{RouteKind, RouteRegistry, WildcardValue};

/// A registry shaped like a real app's route table.
///
/// A single note (`.../i:{id}/s:{noteNumber}`) and its note list
/// (`.../i:{id}`) would both accept a slug-shaped note number, so the single
/// note lives in the Direct table and wins by precedence.
pub fn app_registry() -> RouteRegistry<String> {
    let routes = [
        (RouteKind::Action, "app://www.app.com/profile/settings/me/s:{slug}", "OpenSettings"),
        (RouteKind::Action, "app://www.app.com/files/i:{fileId}", "DownloadFile"),
        (RouteKind::Composite, "app://www.app.com/laws/i:{lawId}/articles/i:{articleId}", "ArticleView"),
        (RouteKind::Composite, "app://www.app.com/pdfViewer/s:{filename}", "PdfViewer"),
        (RouteKind::Direct, "app://www.app.com/articles/i:{articleId}/related", "RelatedScreen"),
        (RouteKind::Composite, "app://www.app.com/webview", "WebView"),
        (
            RouteKind::Direct,
            "app://www.app.com/laws/notes/article/i:{articleRevisionId}/s:{noteNumber}",
            "ArticleNote",
        ),
        (
            RouteKind::Direct,
            "app://www.app.com/laws/notes/paragraph/i:{paragraphRevisionId}/s:{noteNumber}",
            "ParagraphNote",
        ),
        (RouteKind::Composite, "app://www.app.com/laws/notes/article/i:{articleRevisionId}", "ArticleNotes"),
        (
            RouteKind::Composite,
            "app://www.app.com/laws/notes/paragraph/i:{paragraphRevisionId}",
            "ParagraphNotes",
        ),
    ];

    let mut registry = RouteRegistry::new();
    for (kind, pattern, target) in routes {
        registry.register(kind, pattern, target.to_string()).unwrap();
    }
    registry
}

/// What a presenter saw for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Presented {
    pub route: String,
    pub kind: RouteKind,
    pub target: String,
    pub arguments: std::collections::HashMap<String, WildcardValue>,
    pub query_params: std::collections::HashMap<String, String>,
    pub flags: DispatchFlags,
}

/// Presenter that records every call.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    calls: Arc<Mutex<Vec<Presented>>>,
}

impl RecordingPresenter {
    pub fn calls(&self) -> Vec<Presented> {
        self.calls.lock().unwrap().clone()
    }
}

impl uri_router::Presenter<String> for RecordingPresenter {
    fn present(&self, p: &Presentation<'_, String>) {
        self.calls.lock().unwrap().push(Presented {
            route: p.route.to_string(),
            kind: p.kind,
            target: p.binding.clone(),
            arguments: p.arguments.clone(),
            query_params: p.query_params.clone(),
            flags: p.flags.clone(),
        });
    }
}
