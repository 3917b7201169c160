//! Query builder for list and search requests.

use crate::binding::BindingSet;
use crate::error::Result;
use crate::field::FieldAccessor;

/// Recognized filter keys, in the order they appear in a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Name,
    Category,
    Available,
    PriceRange,
}

impl FilterKey {
    pub const ORDER: [FilterKey; 4] = [
        FilterKey::Name,
        FilterKey::Category,
        FilterKey::Available,
        FilterKey::PriceRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Name => "name",
            FilterKey::Category => "category",
            FilterKey::Available => "available",
            FilterKey::PriceRange => "price_range",
        }
    }
}

/// Which criteria a list action sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    #[default]
    All,
    Name,
    Category,
    Price,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<String>,
    pub price_lower: Option<String>,
    pub price_upper: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn available(mut self, value: impl Into<String>) -> Self {
        self.available = Some(value.into());
        self
    }

    pub fn price_lower(mut self, value: impl Into<String>) -> Self {
        self.price_lower = Some(value.into());
        self
    }

    pub fn price_upper(mut self, value: impl Into<String>) -> Self {
        self.price_upper = Some(value.into());
        self
    }

    /// Read the filter elements bound in `set`. Elements for fields that are
    /// not filter criteria are ignored.
    pub fn read<F: FieldAccessor + ?Sized>(ui: &F, set: &BindingSet) -> Result<Self> {
        let mut filter = Filter::new();
        for binding in set.bindings {
            let slot = match binding.field {
                "name" => &mut filter.name,
                "category" => &mut filter.category,
                "available" => &mut filter.available,
                "price_lower" => &mut filter.price_lower,
                "price_upper" => &mut filter.price_upper,
                _ => continue,
            };
            *slot = Some(ui.read(binding.element)?);
        }
        Ok(filter)
    }

    /// Keep only the criteria a scoped list action uses.
    pub fn restrict(self, scope: ListScope) -> Self {
        match scope {
            ListScope::All => self,
            ListScope::Name => Filter {
                name: self.name,
                ..Filter::default()
            },
            ListScope::Category => Filter {
                category: self.category,
                ..Filter::default()
            },
            ListScope::Price => Filter {
                price_lower: self.price_lower,
                price_upper: self.price_upper,
                ..Filter::default()
            },
        }
    }

    /// Value sent for `key`, or `None` when the criterion is absent. The
    /// price range needs both bounds and is encoded as `lower_upper`.
    pub fn value(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Name => present(&self.name).map(str::to_string),
            FilterKey::Category => present(&self.category).map(str::to_string),
            FilterKey::Available => present(&self.available).map(str::to_string),
            FilterKey::PriceRange => {
                match (present(&self.price_lower), present(&self.price_upper)) {
                    (Some(lower), Some(upper)) => Some(format!("{}_{}", lower, upper)),
                    _ => None,
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::ORDER.iter().all(|key| self.value(*key).is_none())
    }
}

/// Join every present criterion as `key=value` with `&`, in `FilterKey::ORDER`.
/// Values are percent-encoded so that `&`, `#` or spaces stay inside their
/// own parameter.
pub fn build(filter: &Filter) -> String {
    FilterKey::ORDER
        .iter()
        .filter_map(|key| {
            filter
                .value(*key)
                .map(|v| format!("{}={}", key.as_str(), urlencoding::encode(&v)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{pet, product};
    use crate::field::InMemoryUi;

    #[test]
    fn test_empty_filter_builds_empty_query() {
        assert_eq!(build(&Filter::new()), "");
        assert!(Filter::new().name("").is_empty());
    }

    #[test]
    fn test_single_and_combined_filters() {
        assert_eq!(build(&Filter::new().name("cat")), "name=cat");
        assert_eq!(
            build(&Filter::new().category("c").name("n")),
            "name=n&category=c"
        );
    }

    #[test]
    fn test_price_range_needs_both_bounds() {
        assert_eq!(build(&Filter::new().price_lower("1")), "");
        assert_eq!(build(&Filter::new().price_upper("9")), "");
        assert_eq!(
            build(&Filter::new().price_lower("1").price_upper("")),
            ""
        );
        assert_eq!(
            build(&Filter::new().price_lower("1").price_upper("9")),
            "price_range=1_9"
        );
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let filter = Filter::new().name("").category("toys").available("");
        assert_eq!(build(&filter), "category=toys");
    }

    #[test]
    fn test_full_key_order() {
        let filter = Filter::new()
            .price_lower("5")
            .price_upper("50")
            .available("true")
            .category("dog")
            .name("rex");
        assert_eq!(
            build(&filter),
            "name=rex&category=dog&available=true&price_range=5_50"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        assert_eq!(
            build(&Filter::new().name("Tom & Jerry").category("a#b")),
            "name=Tom%20%26%20Jerry&category=a%23b"
        );
        assert_eq!(
            build(&Filter::new().price_lower("1.5").price_upper("20")),
            "price_range=1.5_20"
        );
    }

    #[test]
    fn test_restrict_keeps_only_scope() {
        let filter = Filter::new()
            .name("n")
            .category("c")
            .price_lower("1")
            .price_upper("2");
        assert_eq!(build(&filter.clone().restrict(ListScope::Name)), "name=n");
        assert_eq!(
            build(&filter.clone().restrict(ListScope::Category)),
            "category=c"
        );
        assert_eq!(
            build(&filter.clone().restrict(ListScope::Price)),
            "price_range=1_2"
        );
        assert_eq!(
            build(&filter.restrict(ListScope::All)),
            "name=n&category=c&price_range=1_2"
        );
    }

    #[test]
    fn test_read_from_bound_elements() {
        let ui = InMemoryUi::console()
            .set("product_category_for_list", "media")
            .unwrap()
            .set("product_price_lower_bound", "1")
            .unwrap()
            .set("product_price_upper_bound", "9")
            .unwrap();
        let filter = Filter::read(&ui, &product::LIST).unwrap();
        assert_eq!(build(&filter), "category=media&price_range=1_9");

        let ui = InMemoryUi::console()
            .set("pet_name", "rex")
            .unwrap()
            .set("pet_available", "false")
            .unwrap()
            .set("pet_gender", "MALE")
            .unwrap();
        let filter = Filter::read(&ui, &pet::SEARCH).unwrap();
        assert_eq!(build(&filter), "name=rex&available=false");
    }
}
