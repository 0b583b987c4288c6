use crate::{
    entities::thermal_image::{ImageType, ThermalImage},
    repositories::resource::{ResourceRepository, Scope},
    use_cases::resource_view::{ResourceKind, ResourceView},
};

/// Read-only gallery of one transformer's thermal images.
pub fn thermal_images_view<R>(repo: R, transformer_id: &str) -> ResourceView<R>
where
    R: ResourceRepository<Record = ThermalImage>,
{
    ResourceView::new(repo, ResourceKind::ThermalImages).scoped(Scope::owner(transformer_id))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermalImageFilter {
    pub search: String,
    pub image_type: Option<ImageType>,
}

impl ThermalImageFilter {
    pub fn matches(&self, image: &ThermalImage) -> bool {
        let term = self.search.trim().to_lowercase();
        let text_match = term.is_empty()
            || image.uploader.to_lowercase().contains(&term)
            || image.image_type.to_string().to_lowercase().contains(&term);

        text_match && self.image_type.is_none_or(|t| image.image_type == t)
    }

    pub fn apply<'a>(&self, images: &'a [ThermalImage]) -> Vec<&'a ThermalImage> {
        images.iter().filter(|i| self.matches(i)).collect()
    }
}

/// Most recent baseline and maintenance images, for side-by-side comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestPair<'a> {
    pub baseline: Option<&'a ThermalImage>,
    pub maintenance: Option<&'a ThermalImage>,
}

impl<'a> LatestPair<'a> {
    /// Both sides, reusing whichever image exists when only one does.
    pub fn comparison(&self) -> Option<(&'a ThermalImage, &'a ThermalImage)> {
        match (self.baseline, self.maintenance) {
            (Some(b), Some(m)) => Some((b, m)),
            (Some(only), None) | (None, Some(only)) => Some((only, only)),
            (None, None) => None,
        }
    }
}

pub fn latest_pair(images: &[ThermalImage]) -> LatestPair<'_> {
    let latest = |image_type: ImageType| {
        images
            .iter()
            .filter(|i| i.image_type == image_type)
            .max_by_key(|i| i.upload_date)
    };

    LatestPair {
        baseline: latest(ImageType::Baseline),
        maintenance: latest(ImageType::Maintenance),
    }
}
