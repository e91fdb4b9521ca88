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

// Verify `PageCursor` works with closures capturing shared state, as the
// generated clients use it.
#[cfg(test)]
mod test {
    use azure_rm_gax as gax;
    use gax::context::CallContext;
    use gax::paginator::{Page, PageCursor};
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
        location: String,
    }

    type Pages = Arc<Mutex<HashMap<String, serde_json::Value>>>;

    fn fake_pages() -> Pages {
        let mut pages = HashMap::new();
        pages.insert(
            "https://management.azure.com/list?page=2".to_string(),
            serde_json::json!({
                "value": [{"name": "c", "location": "westus"}],
                "nextLink": "https://management.azure.com/list?page=3",
            }),
        );
        pages.insert(
            "https://management.azure.com/list?page=3".to_string(),
            serde_json::json!({
                "value": [{"name": "d", "location": "eastus"}],
                "nextLink": "",
            }),
        );
        Arc::new(Mutex::new(pages))
    }

    fn first_page() -> anyhow::Result<Page<Item>> {
        let page = serde_json::from_value(serde_json::json!({
            "value": [
                {"name": "a", "location": "eastus"},
                {"name": "b", "location": "westus"},
            ],
            "nextLink": "https://management.azure.com/list?page=2",
        }))?;
        Ok(page)
    }

    fn fetcher(
        pages: Pages,
    ) -> impl Fn(String) -> std::pin::Pin<Box<dyn Future<Output = gax::Result<Page<Item>>>>> {
        move |link: String| {
            let pages = pages.clone();
            Box::pin(async move {
                let value = pages
                    .lock()
                    .expect("pages mutex is not poisoned")
                    .remove(&link)
                    .ok_or_else(|| gax::error::Error::other(format!("unexpected link {link}")))?;
                serde_json::from_value(value).map_err(gax::error::Error::deser)
            })
        }
    }

    #[tokio::test]
    async fn complete() -> anyhow::Result<()> {
        let pages = fake_pages();
        let cursor = PageCursor::new(first_page()?, fetcher(pages.clone()));
        let items = cursor.complete(&CallContext::new()).await?;
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert!(pages.lock().expect("not poisoned").is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn complete_matching() -> anyhow::Result<()> {
        let cursor = PageCursor::new(first_page()?, fetcher(fake_pages()));
        let items = cursor
            .complete_matching(&CallContext::new(), |i: &Item| i.location == "westus")
            .await?;
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn manual() -> anyhow::Result<()> {
        let mut cursor = PageCursor::new(first_page()?, fetcher(fake_pages()));
        let mut names = Vec::new();
        loop {
            names.extend(cursor.items().iter().map(|i| i.name.clone()));
            if !cursor.has_more() {
                break;
            }
            cursor.load_more().await?;
        }
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        let err = cursor.load_more().await.unwrap_err();
        assert!(err.is_pagination(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_error() -> anyhow::Result<()> {
        let pages = fake_pages();
        pages
            .lock()
            .expect("not poisoned")
            .remove("https://management.azure.com/list?page=3");
        let cursor = PageCursor::new(first_page()?, fetcher(pages));
        let err = cursor.complete(&CallContext::new()).await.unwrap_err();
        assert!(err.to_string().contains("page=3"), "{err}");
        Ok(())
    }
}
