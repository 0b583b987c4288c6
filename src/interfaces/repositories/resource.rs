use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{entities::page::Page, errors::AppError};

/// Narrows a remote collection to the records owned by one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The whole collection.
    All,
    /// Records owned by the entity with this identity.
    Owner(String),
}

impl Scope {
    pub fn owner(id: impl Into<String>) -> Self {
        Scope::Owner(id.into())
    }

    /// An owner scope with a blank identity is not ready to be fetched.
    pub fn is_defined(&self) -> bool {
        match self {
            Scope::All => true,
            Scope::Owner(id) => !id.trim().is_empty(),
        }
    }

    pub fn owner_id(&self) -> Option<&str> {
        match self {
            Scope::Owner(id) if !id.trim().is_empty() => Some(id.trim()),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Owner(id) => write!(f, "owner:{}", id),
        }
    }
}

/// A remote collection that can be listed.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    type Record: Clone + Send + Sync + 'static;

    /// Fetches the collection for `scope`, in server order.
    async fn list(&self, scope: &Scope) -> Result<Vec<Self::Record>, AppError>;

    /// Fetches page `page` of the collection. Unpaged collections return
    /// everything as page 0.
    async fn list_page(&self, scope: &Scope, page: u32) -> Result<Page<Self::Record>, AppError> {
        let _ = page;
        Ok(Page::complete(self.list(scope).await?))
    }
}

/// A remote collection that also accepts new records.
#[async_trait]
pub trait CreateResource: ResourceRepository {
    type Payload: Send + Sync + 'static;

    /// Creates a record; the server assigns identity and timestamps.
    async fn create(&self, payload: &Self::Payload) -> Result<Self::Record, AppError>;
}

#[async_trait]
impl<R> ResourceRepository for Arc<R>
where
    R: ResourceRepository + ?Sized,
{
    type Record = R::Record;

    async fn list(&self, scope: &Scope) -> Result<Vec<Self::Record>, AppError> {
        (**self).list(scope).await
    }

    async fn list_page(&self, scope: &Scope, page: u32) -> Result<Page<Self::Record>, AppError> {
        (**self).list_page(scope, page).await
    }
}

#[async_trait]
impl<R> CreateResource for Arc<R>
where
    R: CreateResource + ?Sized,
{
    type Payload = R::Payload;

    async fn create(&self, payload: &Self::Payload) -> Result<Self::Record, AppError> {
        (**self).create(payload).await
    }
}
