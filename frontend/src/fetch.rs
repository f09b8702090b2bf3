//! Backend transport
//!
//! Thin `fetch()` wrappers behind traits so the domain actors stay testable
//! without a browser. The HTTP implementations wrap their JS futures in
//! `SendWrapper`: the futures only ever run on the single-threaded wasm
//! executor, but actor processors require `Send`.

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use shared::{NodeKey, TreeNode, TreePage, TreePageRequest};
use std::fmt;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use zoon::SendWrapper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No browser window object; nothing can be fetched.
    NoWindow,
    /// The request itself failed (network down, CORS, aborted).
    Network(String),
    /// The server answered with a non-success status code.
    Status(u16),
    /// The response body was not the expected JSON shape.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NoWindow => write!(f, "no window object available"),
            FetchError::Network(error) => write!(f, "request failed: {error}"),
            FetchError::Status(code) => write!(f, "server returned status {code}"),
            FetchError::Decode(error) => write!(f, "unexpected response body: {error}"),
        }
    }
}

/// Page loader for the tree picker dropdown.
pub trait TreeFetch: Send + Sync + 'static {
    fn fetch_page(&self, request: TreePageRequest)
    -> BoxFuture<'static, Result<TreePage, FetchError>>;
}

/// Loader for the admin changelist: lazy children of one row plus
/// whole-subtree search.
pub trait AdminListFetch: Send + Sync + 'static {
    fn children(&self, parent: NodeKey) -> BoxFuture<'static, Result<Vec<TreeNode>, FetchError>>;
    fn search(&self, term: String) -> BoxFuture<'static, Result<Vec<TreeNode>, FetchError>>;
}

/// Autocomplete endpoint client. `url` comes from the widget's `data-url`
/// attribute and already points at the page-serving view.
pub struct HttpTreeFetch {
    url: String,
}

impl HttpTreeFetch {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

impl TreeFetch for HttpTreeFetch {
    fn fetch_page(
        &self,
        request: TreePageRequest,
    ) -> BoxFuture<'static, Result<TreePage, FetchError>> {
        let url = self.url.clone();
        Box::pin(SendWrapper::new(async move {
            let url = with_query(&url, request.query_pairs())?;
            fetch_json(&url).await
        }))
    }
}

/// Admin changelist client. Endpoints are resolved relative to the current
/// changelist page, matching the URLs the admin backend registers.
pub struct HttpAdminListFetch;

impl AdminListFetch for HttpAdminListFetch {
    fn children(&self, parent: NodeKey) -> BoxFuture<'static, Result<Vec<TreeNode>, FetchError>> {
        Box::pin(SendWrapper::new(async move {
            let url = with_query("change_list/", vec![("parent_id", parent.to_string())])?;
            let page: TreePage = fetch_json(&url).await?;
            Ok(page.results)
        }))
    }

    fn search(&self, term: String) -> BoxFuture<'static, Result<Vec<TreeNode>, FetchError>> {
        Box::pin(SendWrapper::new(async move {
            let url = with_query("search/", vec![("q", term)])?;
            let page: TreePage = fetch_json(&url).await?;
            Ok(page.results)
        }))
    }
}

fn with_query(url: &str, pairs: Vec<(&'static str, String)>) -> Result<String, FetchError> {
    let params = web_sys::UrlSearchParams::new()
        .map_err(|error| FetchError::Network(format!("{error:?}")))?;
    for (name, value) in pairs {
        params.append(name, &value);
    }
    Ok(format!("{url}?{}", String::from(params.to_string())))
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|error| FetchError::Network(format!("{error:?}")))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|error| FetchError::Network(format!("{error:?}")))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let body = response
        .json()
        .map_err(|error| FetchError::Decode(format!("{error:?}")))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|error| FetchError::Decode(format!("{error:?}")))?;

    serde_wasm_bindgen::from_value(body).map_err(|error| FetchError::Decode(error.to_string()))
}
