use crate::query::ListScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    // Products
    CreateProduct,
    RetrieveProduct,
    UpdateProduct,
    DeleteProduct,
    LikeProduct,
    ListProducts(ListScope),

    // Pets
    RetrievePet,
    UpdatePet,
    SearchPets,

    // Local
    Clear,
}

impl ConsoleAction {
    pub fn description(&self) -> &'static str {
        match self {
            ConsoleAction::CreateProduct => "Creating product",
            ConsoleAction::RetrieveProduct => "Retrieving product",
            ConsoleAction::UpdateProduct => "Updating product",
            ConsoleAction::DeleteProduct => "Deleting product",
            ConsoleAction::LikeProduct => "Liking product",
            ConsoleAction::ListProducts(ListScope::All) => "Listing products",
            ConsoleAction::ListProducts(ListScope::Name) => "Listing products by name",
            ConsoleAction::ListProducts(ListScope::Category) => "Listing products by category",
            ConsoleAction::ListProducts(ListScope::Price) => "Listing products by price range",
            ConsoleAction::RetrievePet => "Retrieving pet",
            ConsoleAction::UpdatePet => "Updating pet",
            ConsoleAction::SearchPets => "Searching pets",
            ConsoleAction::Clear => "Clearing all forms",
        }
    }

    pub fn requires_network(&self) -> bool {
        !matches!(self, ConsoleAction::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_clear_is_local() {
        assert!(!ConsoleAction::Clear.requires_network());
        assert!(ConsoleAction::ListProducts(ListScope::Price).requires_network());
        assert!(ConsoleAction::UpdatePet.requires_network());
    }
}
