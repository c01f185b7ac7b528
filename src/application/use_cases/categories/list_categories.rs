use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::tree::node::Category;

pub struct ListCategories<'a, C: CategoryRepository + ?Sized> {
    pub categories: &'a C,
}

impl<'a, C: CategoryRepository + ?Sized> ListCategories<'a, C> {
    pub async fn execute(&self) -> Result<Vec<Category>, ActionError> {
        Ok(self.categories.list().await?)
    }
}
