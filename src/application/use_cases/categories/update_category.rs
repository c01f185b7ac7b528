use crate::application::errors::ActionError;
use crate::application::ports::category_repository::{CategoryPatch, CategoryRepository};
use crate::application::validation::{validate_slug, validate_title};
use crate::domain::tree::node::Category;

pub struct UpdateCategory<'a, C: CategoryRepository + ?Sized> {
    pub categories: &'a C,
}

impl<'a, C: CategoryRepository + ?Sized> UpdateCategory<'a, C> {
    pub async fn execute(&self, id: i32, patch: CategoryPatch) -> Result<Category, ActionError> {
        if let Some(name) = patch.name.as_deref() {
            validate_title(name)?;
        }
        if let Some(slug) = patch.slug.as_deref() {
            validate_slug(slug)?;
            if self.categories.slug_in_use(slug, Some(id)).await? {
                return Err(ActionError::conflict("slug is already in use"));
            }
        }

        self.categories
            .apply_patch(id, patch)
            .await?
            .ok_or_else(|| ActionError::not_found("category not found"))
    }
}
