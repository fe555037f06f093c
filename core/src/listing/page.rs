// farmacart/src/listing/page.rs

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub total: u64,
  pub page: u32,
  pub page_size: u32,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
    Self {
      items,
      total,
      page: page.max(1),
      page_size: page_size.max(1),
    }
  }

  pub fn total_pages(&self) -> u32 {
    let size = u64::from(self.page_size);
    ((self.total + size - 1) / size) as u32
  }

  pub fn has_next(&self) -> bool {
    self.page < self.total_pages()
  }

  pub fn has_previous(&self) -> bool {
    self.page > 1
  }

  pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
    let items = self.items.into_iter().map(f).collect::<Result<Vec<U>, E>>()?;
    Ok(Page {
      items,
      total: self.total,
      page: self.page,
      page_size: self.page_size,
    })
  }
}
