// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Traverse OData paginated collections.
//!
//! Azure Resource Manager list operations return one page of results at a
//! time, using the OData envelope:
//!
//! ```json
//! { "value": [ ... ], "nextLink": "https://management.azure.com/...&$skiptoken=..." }
//! ```
//!
//! The `nextLink` is an opaque, fully-qualified URL. The next page is obtained
//! by issuing a GET against that URL, verbatim. A missing, `null`, or empty
//! `nextLink` indicates the last page.

use crate::Result;
use crate::context::CallContext;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One page of a collection, as returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Page<T> {
    /// The items in this page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    /// The URL of the next page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page with the given items and no next page.
    pub fn new<V: IntoIterator<Item = T>>(value: V) -> Self {
        Self {
            value: value.into_iter().collect(),
            next_link: None,
        }
    }

    /// Sets the [next_link][Page::next_link] field.
    pub fn set_next_link<V: Into<String>>(mut self, v: V) -> Self {
        self.next_link = Some(v.into());
        self
    }

    /// The URL of the next page, treating an empty link as absent.
    pub fn next_page_link(&self) -> Option<&str> {
        self.next_link.as_deref().filter(|s| !s.is_empty())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
        }
    }
}

/// Selects items after a collection is fully retrieved.
///
/// Predicates are applied client-side. Any `Fn(&T) -> bool` closure is a
/// predicate. Generated clients also provide field-equality predicates for
/// each collection type.
pub trait Predicate<T> {
    /// Returns true if the item should be kept.
    fn matches(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// A cursor over the pages of a collection.
///
/// The cursor starts with the first page, which is already loaded. Call
/// [load_more][PageCursor::load_more] to replace the current page with the
/// next one, or [complete][PageCursor::complete] to collect all the items in
/// all the pages.
///
/// # Example
/// ```
/// # use azure_rm_gax::paginator::{Page, PageCursor};
/// # use azure_rm_gax::context::CallContext;
/// # tokio_test::block_on(async {
/// let first = Page::new(["a", "b"]).set_next_link("https://example.com/page2");
/// let fetch = |link: String| async move {
///     assert_eq!(link, "https://example.com/page2");
///     Ok(Page::new(["c"]))
/// };
/// let cursor = PageCursor::new(first, fetch);
/// let items = cursor.complete(&CallContext::new()).await?;
/// assert_eq!(items, vec!["a", "b", "c"]);
/// # azure_rm_gax::Result::<()>::Ok(()) });
/// ```
pub struct PageCursor<T, F> {
    items: Vec<T>,
    next_link: Option<String>,
    fetch: F,
}

impl<T, F, Fut> PageCursor<T, F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    /// Creates a cursor from the first page and a function to fetch the
    /// following pages.
    ///
    /// The function receives the `nextLink` URL, and should issue a GET
    /// request against it, without modifications.
    pub fn new(first: Page<T>, fetch: F) -> Self {
        let next_link = first.next_page_link().map(str::to_string);
        Self {
            items: first.value,
            next_link,
            fetch,
        }
    }

    /// Returns true if there are more pages to load.
    pub fn has_more(&self) -> bool {
        self.next_link.is_some()
    }

    /// The items in the current page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the cursor, returning the items in the current page.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Loads the next page, replacing the current items.
    ///
    /// Returns a [pagination][Error::is_pagination] error if there are no
    /// more pages. On any other error the cursor is unchanged and the call may
    /// be repeated.
    pub async fn load_more(&mut self) -> Result<()> {
        let Some(link) = self.next_link.clone() else {
            return Err(Error::pagination("load_more() called after the last page"));
        };
        let page = (self.fetch)(link).await?;
        self.next_link = page.next_page_link().map(str::to_string);
        self.items = page.value;
        Ok(())
    }

    /// Collects the items in the current and all following pages.
    ///
    /// The items are returned in the order returned by the service, without
    /// any de-duplication. The context is checked before each page is
    /// requested, and bounds each request.
    pub async fn complete(self, ctx: &CallContext) -> Result<Vec<T>> {
        self.complete_matching(ctx, |_: &T| true).await
    }

    /// Collects the items matching `predicate` in the current and all
    /// following pages.
    ///
    /// All the pages are retrieved, the predicate is applied client-side.
    pub async fn complete_matching<P>(mut self, ctx: &CallContext, predicate: P) -> Result<Vec<T>>
    where
        P: Predicate<T>,
    {
        let mut items: Vec<T> = std::mem::take(&mut self.items)
            .into_iter()
            .filter(|i| predicate.matches(i))
            .collect();
        while let Some(link) = self.next_link.take() {
            let page = ctx.run((self.fetch)(link)).await?;
            self.next_link = page.next_page_link().map(str::to_string);
            items.extend(page.value.into_iter().filter(|i| predicate.matches(i)));
        }
        Ok(items)
    }

    /// Converts the cursor into a stream of pages.
    ///
    /// The first item is the current page. The stream stops after the last
    /// page, or after the first error.
    #[cfg(feature = "unstable-stream")]
    pub fn into_stream(self) -> PageStream<T>
    where
        T: 'static,
        F: 'static,
        Fut: 'static,
    {
        PageStream::new(self)
    }
}

#[cfg(feature = "unstable-stream")]
pub use stream::PageStream;

#[cfg(feature = "unstable-stream")]
mod stream {
    use super::*;
    use futures::Stream;
    use futures::stream::unfold;
    use pin_project::pin_project;
    use std::pin::Pin;

    /// A [futures::Stream] over the pages of a collection.
    #[pin_project]
    pub struct PageStream<T> {
        #[pin]
        stream: Pin<Box<dyn Stream<Item = Result<Page<T>>>>>,
    }

    enum State<T, F> {
        First(PageCursor<T, F>),
        Next(String, F),
        Done,
    }

    impl<T: 'static> PageStream<T> {
        pub(super) fn new<F, Fut>(cursor: PageCursor<T, F>) -> Self
        where
            F: Fn(String) -> Fut + 'static,
            Fut: Future<Output = Result<Page<T>>> + 'static,
        {
            let stream = unfold(State::First(cursor), |state| async move {
                match state {
                    State::Done => None,
                    State::First(cursor) => {
                        let page = Page {
                            value: cursor.items,
                            next_link: cursor.next_link.clone(),
                        };
                        let next = match cursor.next_link {
                            Some(link) => State::Next(link, cursor.fetch),
                            None => State::Done,
                        };
                        Some((Ok(page), next))
                    }
                    State::Next(link, fetch) => match fetch(link).await {
                        Ok(page) => {
                            let next = match page.next_page_link() {
                                Some(link) => State::Next(link.to_string(), fetch),
                                None => State::Done,
                            };
                            Some((Ok(page), next))
                        }
                        Err(e) => Some((Err(e), State::Done)),
                    },
                }
            });
            Self {
                stream: Box::pin(stream),
            }
        }

        /// Returns the next page.
        pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
            futures::StreamExt::next(self)
        }
    }

    impl<T> Stream for PageStream<T> {
        type Item = Result<Page<T>>;

        fn poll_next(
            self: Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Option<Self::Item>> {
            self.project().stream.poll_next(cx)
        }
    }
}
