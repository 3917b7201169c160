//! Static associations between record fields and UI element ids.
//!
//! The same record field binds to different elements depending on the
//! interaction context, so that the fields a user is composing never collide
//! with the fields showing a previously fetched record.

use crate::record::{ResourceKind, ID_FIELD};

/// How a bound element's string value becomes a payload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `true` iff the element value is exactly `"true"`.
    Boolean,
}

/// Coercion applied when a record value is written back for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Verbatim,
    /// Project a boolean "liked" flag onto a 0/1 count; numbers pass through.
    LikeCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub field: &'static str,
    pub element: &'static str,
    pub kind: FieldKind,
    pub transform: Transform,
}

impl Binding {
    pub const fn text(field: &'static str, element: &'static str) -> Self {
        Self {
            field,
            element,
            kind: FieldKind::Text,
            transform: Transform::Verbatim,
        }
    }

    pub const fn boolean(field: &'static str, element: &'static str) -> Self {
        Self {
            field,
            element,
            kind: FieldKind::Boolean,
            transform: Transform::Verbatim,
        }
    }

    pub const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionContext {
    Create,
    Retrieve,
    Update,
    Delete,
    List,
    Like,
}

/// A named group of bindings for one resource in one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingSet {
    pub resource: ResourceKind,
    pub context: InteractionContext,
    /// Identifier element. Read for the request path, never sent in a body.
    pub key: Option<Binding>,
    pub bindings: &'static [Binding],
}

impl BindingSet {
    pub fn binding_for(&self, field: &str) -> Option<&Binding> {
        self.key
            .iter()
            .chain(self.bindings.iter())
            .find(|b| b.field == field)
    }

    /// Every element id in the set, key first.
    pub fn elements(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.key
            .iter()
            .chain(self.bindings.iter())
            .map(|b| b.element)
    }
}

pub mod product {
    use super::*;

    const DISPLAY_FIELDS: &[Binding] = &[
        Binding::text("name", "product_name"),
        Binding::text("category", "product_category"),
        Binding::text("description", "product_description"),
        Binding::text("price", "product_price"),
        Binding::text("like", "product_like").with_transform(Transform::LikeCount),
    ];

    /// Form that mirrors the last fetched product.
    pub const DISPLAY: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::Retrieve,
        key: Some(Binding::text(ID_FIELD, "product_id")),
        bindings: DISPLAY_FIELDS,
    };

    pub const CREATE: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::Create,
        key: None,
        bindings: &[
            Binding::text("name", "product_name_for_create"),
            Binding::text("category", "product_category_for_create"),
            Binding::text("description", "product_description_for_create"),
            Binding::text("price", "product_price_for_create"),
            Binding::boolean("like", "product_like_for_create"),
        ],
    };

    /// Where the identifier assigned by a successful create is shown.
    pub const CREATED: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::Create,
        key: Some(Binding::text(ID_FIELD, "product_id_created")),
        bindings: &[],
    };

    pub const UPDATE: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::Update,
        key: Some(Binding::text(ID_FIELD, "product_id_for_update")),
        bindings: &[
            Binding::text("name", "product_name_for_update"),
            Binding::text("category", "product_category_for_update"),
            Binding::text("description", "product_description_for_update"),
            Binding::text("price", "product_price_for_update"),
        ],
    };

    pub const DELETE: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::Delete,
        key: Some(Binding::text(ID_FIELD, "product_id_for_delete")),
        bindings: &[],
    };

    pub const LIST: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::List,
        key: Some(Binding::text(ID_FIELD, "product_id_for_list")),
        bindings: &[
            Binding::text("name", "product_name_for_list"),
            Binding::text("category", "product_category_for_list"),
            Binding::text("price_lower", "product_price_lower_bound"),
            Binding::text("price_upper", "product_price_upper_bound"),
        ],
    };

    pub const LIKE: BindingSet = BindingSet {
        resource: ResourceKind::Product,
        context: InteractionContext::Like,
        key: Some(Binding::text(ID_FIELD, "product_id_for_like")),
        bindings: &[],
    };
}

pub mod pet {
    use super::*;

    // Retrieve, update and search all work on the one pet form.
    const FORM_KEY: Option<Binding> = Some(Binding::text(ID_FIELD, "pet_id"));

    const FORM_FIELDS: &[Binding] = &[
        Binding::text("name", "pet_name"),
        Binding::text("category", "pet_category"),
        Binding::boolean("available", "pet_available"),
        Binding::text("gender", "pet_gender"),
        Binding::text("birthday", "pet_birthday"),
    ];

    pub const RETRIEVE: BindingSet = BindingSet {
        resource: ResourceKind::Pet,
        context: InteractionContext::Retrieve,
        key: FORM_KEY,
        bindings: FORM_FIELDS,
    };

    pub const UPDATE: BindingSet = BindingSet {
        resource: ResourceKind::Pet,
        context: InteractionContext::Update,
        key: FORM_KEY,
        bindings: FORM_FIELDS,
    };

    /// Search reads the same form retrieve fills, so a search right after a
    /// retrieve filters on the fetched pet's fields.
    pub const SEARCH: BindingSet = BindingSet {
        resource: ResourceKind::Pet,
        context: InteractionContext::List,
        key: FORM_KEY,
        bindings: FORM_FIELDS,
    };
}

/// Every binding set in the console. The clear action resets all of them.
pub const ALL_SETS: &[&BindingSet] = &[
    &product::DISPLAY,
    &product::CREATE,
    &product::CREATED,
    &product::UPDATE,
    &product::DELETE,
    &product::LIST,
    &product::LIKE,
    &pet::RETRIEVE,
];

/// Distinct element ids across `ALL_SETS`, in first-seen order.
pub fn all_elements() -> Vec<&'static str> {
    let mut elements: Vec<&'static str> = Vec::new();
    for set in ALL_SETS {
        for element in set.elements() {
            if !elements.contains(&element) {
                elements.push(element);
            }
        }
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_are_unique_within_each_set() {
        for set in ALL_SETS {
            let elements: Vec<_> = set.elements().collect();
            let mut deduped = elements.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(elements.len(), deduped.len(), "{:?}", set.context);
        }
    }

    #[test]
    fn test_contexts_do_not_share_product_elements() {
        let create: Vec<_> = product::CREATE.elements().collect();
        for element in product::UPDATE.elements().chain(product::DISPLAY.elements()) {
            assert!(!create.contains(&element), "{} is shared", element);
        }
    }

    #[test]
    fn test_pet_update_reads_pet_fields() {
        assert_eq!(pet::UPDATE.resource, ResourceKind::Pet);
        assert!(pet::UPDATE.elements().all(|e| e.starts_with("pet_")));
        assert_eq!(product::UPDATE.resource, ResourceKind::Product);
        assert!(product::UPDATE.elements().all(|e| e.starts_with("product_")));
    }

    #[test]
    fn test_all_elements_covers_search_and_form_sets() {
        let elements = all_elements();
        for element in pet::SEARCH.elements().chain(product::LIST.elements()) {
            assert!(elements.contains(&element));
        }
        assert!(elements.contains(&"product_id_created"));
    }

    #[test]
    fn test_binding_for_finds_key_and_fields() {
        assert_eq!(
            product::LIST.binding_for("price_upper").map(|b| b.element),
            Some("product_price_upper_bound")
        );
        assert_eq!(
            product::DELETE.binding_for("id").map(|b| b.element),
            Some("product_id_for_delete")
        );
        assert!(product::DELETE.binding_for("name").is_none());
    }
}
