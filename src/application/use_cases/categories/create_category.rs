use crate::application::errors::ActionError;
use crate::application::ports::category_repository::{CategoryRepository, NewCategory};
use crate::application::validation::{validate_slug, validate_title};
use crate::domain::tree::node::Category;

pub struct CreateCategory<'a, C: CategoryRepository + ?Sized> {
    pub categories: &'a C,
}

impl<'a, C: CategoryRepository + ?Sized> CreateCategory<'a, C> {
    pub async fn execute(&self, new: NewCategory) -> Result<Category, ActionError> {
        validate_title(&new.name)?;
        validate_slug(&new.slug)?;

        if self.categories.slug_in_use(&new.slug, None).await? {
            return Err(ActionError::conflict("slug is already in use"));
        }

        Ok(self.categories.insert(new).await?)
    }
}
