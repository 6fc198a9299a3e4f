//! The fixed probe catalog
//!
//! Each operation carries its action as a typed variant; the category is
//! derived from the variant, so an operation can never be filed under the
//! wrong section.

use std::fmt;

/// Probe category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Fetch,
    HttpClient,
    GraphQl,
    BinaryTransfer,
    Logging,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Fetch,
        Category::HttpClient,
        Category::GraphQl,
        Category::BinaryTransfer,
        Category::Logging,
    ];

    /// Section heading used by `list`
    pub fn title(&self) -> &'static str {
        match self {
            Category::Fetch => "Fetch Tests",
            Category::HttpClient => "HTTP Client Tests",
            Category::GraphQl => "GraphQL Tests",
            Category::BinaryTransfer => "Binary Transfer Tests",
            Category::Logging => "Console Tests",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Fetch => "fetch",
            Category::HttpClient => "http-client",
            Category::GraphQl => "graphql",
            Category::BinaryTransfer => "binary-transfer",
            Category::Logging => "logging",
        };
        f.write_str(name)
    }
}

/// Bare fetch-style requests; status codes are only checked where noted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchProbe {
    /// GET a post and render its JSON, without a status guard
    Get,
    /// POST a new post and render the echoed JSON, without a status guard
    Post,
    /// GET a missing post and fail on the non-2xx status
    NotFound,
    /// Ask for `text/plain` from a JSON API, plus a real text file
    PlainText,
    /// GET a response whose content type is forced to `text/plain`
    CustomPlainText,
}

/// Promise-style client calls that reject on non-2xx
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientProbe {
    Get,
    Post,
    /// GET a nonexistent endpoint; the rejection is the expected outcome
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphQlProbe {
    /// Parameterless character list
    Query,
    /// Single character with `id = "1"`
    WithVariables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferProbe {
    /// Callback-driven GET of an image as a blob
    ImageBlob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogProbe {
    Basic,
    ObjectsAndArrays,
    Errors,
    Performance,
}

/// What an operation does when run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch(FetchProbe),
    HttpClient(ClientProbe),
    GraphQl(GraphQlProbe),
    BinaryTransfer(TransferProbe),
    Logging(LogProbe),
}

impl Action {
    pub fn category(&self) -> Category {
        match self {
            Action::Fetch(_) => Category::Fetch,
            Action::HttpClient(_) => Category::HttpClient,
            Action::GraphQl(_) => Category::GraphQl,
            Action::BinaryTransfer(_) => Category::BinaryTransfer,
            Action::Logging(_) => Category::Logging,
        }
    }
}

/// A named, runnable probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub title: &'static str,
    pub action: Action,
}

impl Operation {
    const fn new(name: &'static str, title: &'static str, action: Action) -> Self {
        Self { name, title, action }
    }

    pub fn category(&self) -> Category {
        self.action.category()
    }
}

/// Every operation, grouped by category in display order
pub static CATALOG: &[Operation] = &[
    Operation::new("fetch-get", "Fetch GET", Action::Fetch(FetchProbe::Get)),
    Operation::new("fetch-post", "Fetch POST", Action::Fetch(FetchProbe::Post)),
    Operation::new("fetch-404", "Fetch 404 Error", Action::Fetch(FetchProbe::NotFound)),
    Operation::new(
        "plaintext-request-1",
        "Plain Text Request",
        Action::Fetch(FetchProbe::PlainText),
    ),
    Operation::new(
        "plaintext-request-2",
        "Custom Plain Text Request",
        Action::Fetch(FetchProbe::CustomPlainText),
    ),
    Operation::new("client-get", "Client GET", Action::HttpClient(ClientProbe::Get)),
    Operation::new("client-post", "Client POST", Action::HttpClient(ClientProbe::Post)),
    Operation::new("client-error", "Client Error", Action::HttpClient(ClientProbe::Error)),
    Operation::new("graphql-query", "GraphQL Query", Action::GraphQl(GraphQlProbe::Query)),
    Operation::new(
        "graphql-variables",
        "GraphQL with Variables",
        Action::GraphQl(GraphQlProbe::WithVariables),
    ),
    Operation::new(
        "image-blob",
        "Fetch Image as Blob",
        Action::BinaryTransfer(TransferProbe::ImageBlob),
    ),
    Operation::new("console-basic", "Basic Console Logs", Action::Logging(LogProbe::Basic)),
    Operation::new(
        "console-objects",
        "Objects & Arrays",
        Action::Logging(LogProbe::ObjectsAndArrays),
    ),
    Operation::new("console-errors", "Error Messages", Action::Logging(LogProbe::Errors)),
    Operation::new(
        "console-performance",
        "Performance Logs",
        Action::Logging(LogProbe::Performance),
    ),
];

/// Look up an operation by name
pub fn find(name: &str) -> Option<&'static Operation> {
    CATALOG.iter().find(|op| op.name == name)
}

/// Operations of one category, in catalog order
pub fn in_category(category: Category) -> impl Iterator<Item = &'static Operation> {
    CATALOG.iter().filter(move |op| op.category() == category)
}
