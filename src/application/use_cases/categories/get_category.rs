use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::domain::tree::node::Category;

pub struct GetCategory<'a, C: CategoryRepository + ?Sized> {
    pub categories: &'a C,
}

impl<'a, C: CategoryRepository + ?Sized> GetCategory<'a, C> {
    pub async fn execute(&self, id: i32) -> Result<Category, ActionError> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| ActionError::not_found("category not found"))
    }
}
