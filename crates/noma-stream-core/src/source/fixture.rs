use async_trait::async_trait;

use super::ContentSource;
use crate::moment::Moment;
use crate::Result;

/// In-memory content source over a fixed pool.
///
/// Pages through the pool slice by slice; `refresh` hands the whole pool
/// back. Backs the bundled demo stream and the session tests.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    pool: Vec<Moment>,
    page_size: usize,
}

impl FixtureSource {
    pub fn new(pool: Vec<Moment>, page_size: usize) -> Self {
        Self {
            pool,
            page_size: page_size.max(1),
        }
    }

    fn page(&self, offset: usize) -> Vec<Moment> {
        if offset >= self.pool.len() {
            return Vec::new();
        }
        let end = (offset + self.page_size).min(self.pool.len());
        self.pool[offset..end].to_vec()
    }
}

#[async_trait]
impl ContentSource for FixtureSource {
    async fn fetch_initial(&self) -> Result<Vec<Moment>> {
        Ok(self.page(0))
    }

    async fn fetch_more(&self, offset: usize) -> Result<Vec<Moment>> {
        Ok(self.page(offset))
    }

    async fn refresh(&self) -> Result<Vec<Moment>> {
        Ok(self.pool.clone())
    }
}
