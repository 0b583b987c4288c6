use serde::{Deserialize, Serialize};

/// One page of a paged list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl<T> Page<T> {
    /// A single page holding a whole, unpaged collection.
    pub fn complete(content: Vec<T>) -> Self {
        let len = content.len();
        Page {
            content,
            total_elements: len as u64,
            total_pages: Some(1),
            number: Some(0),
            size: Some(len as u32),
        }
    }

    /// Position of this page; fields the service left out are derived from
    /// the request and the content.
    pub fn info(&self, requested: u32) -> PageInfo {
        let len = self.content.len();
        let number = self.number.unwrap_or(requested);
        let size = self.size.unwrap_or(len as u32);
        // services that omit the total still tell us what they sent
        let seen = u64::from(number) * u64::from(size) + len as u64;
        let total_elements = self.total_elements.max(seen);
        let total_pages = self.total_pages.unwrap_or_else(|| match size {
            0 => 1,
            size => total_elements.div_ceil(u64::from(size)).max(1) as u32,
        });

        PageInfo {
            number,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

/// Where a loaded page sits in the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}

/// Search and paging parameters shared by the paged list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub q: String,
    pub page: u32,
    pub size: u32,
}

impl PageQuery {
    pub fn first(size: u32) -> Self {
        PageQuery::nth(crate::constants::FIRST_PAGE, size)
    }

    pub fn nth(page: u32, size: u32) -> Self {
        PageQuery {
            q: String::new(),
            page,
            size,
        }
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = q.into();
        self
    }
}

/// Paged query narrowed to one transformer, as taken by the inspection and
/// maintenance-record list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerPageQuery {
    pub q: String,
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer_id: Option<String>,
}

impl TransformerPageQuery {
    pub fn new(page: PageQuery, transformer_id: Option<String>) -> Self {
        TransformerPageQuery {
            q: page.q,
            page: page.page,
            size: page.size,
            transformer_id,
        }
    }
}
