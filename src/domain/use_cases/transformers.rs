use std::collections::BTreeMap;

use validator::Validate;

use crate::{
    entities::transformer::{NewTransformer, Transformer, TransformerDraft, TransformerType},
    errors::AppError,
    repositories::resource::{CreateResource, ResourceRepository, Scope},
    use_cases::resource_view::{Draft, ResourceKind, ResourceView},
};

pub type TransformersView<R> = ResourceView<R, TransformerDraft>;

impl Draft for TransformerDraft {
    type Payload = NewTransformer;

    fn to_payload(&self, _scope: &Scope) -> Result<NewTransformer, AppError> {
        self.validate()?;
        Ok(NewTransformer::from(self.clone()))
    }

    fn reset(&mut self) {
        *self = TransformerDraft::default();
    }
}

pub fn transformers_view<R>(repo: R) -> TransformersView<R>
where
    R: CreateResource<Record = Transformer, Payload = NewTransformer>,
{
    ResourceView::with_draft(repo, ResourceKind::Transformers, TransformerDraft::default())
        .scoped(Scope::All)
}

/// Read-only transformer list, e.g. for pickers.
pub fn transformer_picker<R>(repo: R) -> ResourceView<R>
where
    R: ResourceRepository<Record = Transformer>,
{
    ResourceView::new(repo, ResourceKind::Transformers).scoped(Scope::All)
}

/// Client-side filter over an already fetched transformer list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformerFilter {
    pub search: String,
    pub region: Option<String>,
    pub transformer_type: Option<TransformerType>,
    pub starred_only: bool,
}

impl TransformerFilter {
    pub fn search(term: impl Into<String>) -> Self {
        TransformerFilter {
            search: term.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, transformer: &Transformer) -> bool {
        let term = self.search.trim().to_lowercase();
        let text_match = term.is_empty()
            || [
                &transformer.transformer_no,
                &transformer.pole_no,
                &transformer.region,
                &transformer.location_details,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));

        let region_match = self
            .region
            .as_deref()
            .is_none_or(|region| transformer.region.eq_ignore_ascii_case(region.trim()));

        let type_match = self
            .transformer_type
            .is_none_or(|t| transformer.transformer_type == t);

        text_match && region_match && type_match && (!self.starred_only || transformer.starred())
    }

    pub fn apply<'a>(&self, transformers: &'a [Transformer]) -> Vec<&'a Transformer> {
        transformers.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Dashboard counters over a fetched transformer list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformerStats {
    pub total: usize,
    pub by_region: BTreeMap<String, usize>,
    pub by_type: BTreeMap<TransformerType, usize>,
}

impl TransformerStats {
    pub fn from_transformers(transformers: &[Transformer]) -> Self {
        let mut stats = TransformerStats {
            total: transformers.len(),
            ..Default::default()
        };
        for transformer in transformers {
            let region = match transformer.region.trim() {
                "" => "Unassigned".to_string(),
                region => region.to_string(),
            };
            *stats.by_region.entry(region).or_default() += 1;
            *stats.by_type.entry(transformer.transformer_type).or_default() += 1;
        }
        stats
    }
}
