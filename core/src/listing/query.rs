// farmacart/src/listing/query.rs
use std::collections::BTreeMap;

/// Dashboard tables backed by a paginated endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminResource {
  Products,
  Categories,
  PriceLists,
  SalesGroups,
  Users,
  Orders,
}

impl AdminResource {
  pub fn path(self) -> &'static str {
    match self {
      AdminResource::Products => "/products",
      AdminResource::Categories => "/categories",
      AdminResource::PriceLists => "/price-lists",
      AdminResource::SalesGroups => "/sales-groups",
      AdminResource::Users => "/users",
      AdminResource::Orders => "/orders",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
  Ascending,
  Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
  search: String,
  page: u32,
  page_size: u32,
  sort: Option<(String, SortOrder)>,
  filters: BTreeMap<String, String>,
}

impl ListQuery {
  pub fn new(page_size: u32) -> Self {
    Self {
      search: String::new(),
      page: 1,
      page_size: page_size.max(1),
      sort: None,
      filters: BTreeMap::new(),
    }
  }

  pub fn search(&self) -> &str {
    &self.search
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn page_size(&self) -> u32 {
    self.page_size
  }

  pub fn filters(&self) -> &BTreeMap<String, String> {
    &self.filters
  }

  /// A new search term always starts again from the first page.
  pub fn set_search(&mut self, term: impl Into<String>) -> &mut Self {
    let term = term.into();
    if term.trim() != self.search {
      self.search = term.trim().to_string();
      self.page = 1;
    }
    self
  }

  /// Setting a filter to an empty value removes it. Any change resets to page 1.
  pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
    let key = key.into();
    let value = value.into();
    let changed = if value.trim().is_empty() {
      self.filters.remove(&key).is_some()
    } else {
      self.filters.insert(key, value.trim().to_string()).as_deref() != Some(value.trim())
    };
    if changed {
      self.page = 1;
    }
    self
  }

  pub fn clear_filters(&mut self) -> &mut Self {
    if !self.filters.is_empty() {
      self.filters.clear();
      self.page = 1;
    }
    self
  }

  pub fn set_sort(&mut self, field: impl Into<String>, order: SortOrder) -> &mut Self {
    self.sort = Some((field.into(), order));
    self
  }

  pub fn set_page(&mut self, page: u32) -> &mut Self {
    self.page = page.max(1);
    self
  }

  pub fn set_page_size(&mut self, page_size: u32) -> &mut Self {
    let page_size = page_size.max(1);
    if page_size != self.page_size {
      self.page_size = page_size;
      self.page = 1;
    }
    self
  }

  /// Query-string pairs: `search` (omitted when blank), `page`, `pageSize`, `sort`, then filters by key.
  pub fn to_query_pairs(&self) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(4 + self.filters.len());
    if !self.search.is_empty() {
      pairs.push(("search".to_string(), self.search.clone()));
    }
    pairs.push(("page".to_string(), self.page.to_string()));
    pairs.push(("pageSize".to_string(), self.page_size.to_string()));
    if let Some((field, order)) = &self.sort {
      let rendered = match order {
        SortOrder::Ascending => field.clone(),
        SortOrder::Descending => format!("-{}", field),
      };
      pairs.push(("sort".to_string(), rendered));
    }
    pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
    pairs
  }
}
