//! Pure mapping from actions to document writes and backend requests.
//!
//! `plan` runs before the request and only reads the document; `settle` runs
//! after it and only describes writes. The manager is the one place that
//! applies either.

use crate::binding::{pet, product, BindingSet, ALL_SETS};
use crate::error::Result;
use crate::field::{DomWrite, FieldAccessor};
use crate::form;
use crate::http_client::Request;
use crate::outcome::{Expect, Failure, Outcome, Payload};
use crate::query::{self, Filter};
use crate::record::{Record, ResourceKind};
use crate::render::ResultRenderer;

use super::actions::ConsoleAction;

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    /// Applied before the request is sent.
    pub writes: Vec<DomWrite>,
    pub request: Option<Request>,
}

impl Effect {
    fn local(writes: Vec<DomWrite>) -> Self {
        Self {
            writes,
            request: None,
        }
    }

    fn send(request: Request) -> Self {
        Self {
            writes: vec![DomWrite::clear_flash()],
            request: Some(request),
        }
    }
}

pub fn plan<F: FieldAccessor + ?Sized>(ui: &F, action: ConsoleAction) -> Result<Effect> {
    let effect = match action {
        ConsoleAction::CreateProduct => {
            let body = form::to_payload(ui, &product::CREATE)?;
            Effect::send(Request::post(ResourceKind::Product.collection_path(), body))
        }
        ConsoleAction::RetrieveProduct => {
            let id = form::read_key(ui, &product::DISPLAY)?;
            Effect::send(Request::get(
                ResourceKind::Product.item_path(&id),
                Expect::Record,
            ))
        }
        ConsoleAction::UpdateProduct => update(ui, &product::UPDATE)?,
        ConsoleAction::DeleteProduct => {
            let id = form::read_key(ui, &product::DELETE)?;
            Effect::send(Request::delete(ResourceKind::Product.item_path(&id)))
        }
        ConsoleAction::LikeProduct => {
            let id = form::read_key(ui, &product::LIKE)?;
            Effect::send(Request::put(ResourceKind::Product.like_path(&id), None))
        }
        ConsoleAction::ListProducts(scope) => {
            let filter = Filter::read(ui, &product::LIST)?.restrict(scope);
            list(ResourceKind::Product, &filter)
        }
        ConsoleAction::RetrievePet => {
            let id = form::read_key(ui, &pet::RETRIEVE)?;
            Effect::send(Request::get(ResourceKind::Pet.item_path(&id), Expect::Record))
        }
        ConsoleAction::UpdatePet => update(ui, &pet::UPDATE)?,
        ConsoleAction::SearchPets => {
            let filter = Filter::read(ui, &pet::SEARCH)?;
            list(ResourceKind::Pet, &filter)
        }
        ConsoleAction::Clear => {
            let mut writes = vec![DomWrite::clear_flash()];
            writes.extend(form::reset_writes(ALL_SETS));
            Effect::local(writes)
        }
    };

    if let Some(request) = &effect.request {
        log::debug!(
            "planned {} {} for '{}'",
            request.method.as_str(),
            request.path,
            action.description()
        );
    }
    Ok(effect)
}

fn update<F: FieldAccessor + ?Sized>(ui: &F, set: &BindingSet) -> Result<Effect> {
    let id = form::read_key(ui, set)?;
    let body = form::to_payload(ui, set)?;
    Ok(Effect::send(Request::put(set.resource.item_path(&id), Some(body))))
}

fn list(kind: ResourceKind, filter: &Filter) -> Effect {
    let query = query::build(filter);
    Effect::send(Request::get(kind.query_path(&query), Expect::Collection))
}

/// Writes that present `outcome` for `action`.
pub fn settle(renderer: &ResultRenderer, action: ConsoleAction, outcome: &Outcome) -> Vec<DomWrite> {
    let payload = match outcome {
        Outcome::Success(payload) => payload,
        Outcome::Failure(failure) => return settle_failure(renderer, action, failure),
    };

    let messages = renderer.messages();
    let mut writes = Vec::new();

    match (action, payload) {
        (ConsoleAction::CreateProduct, Payload::Record(record)) => {
            writes.extend(renderer.render_record(&product::CREATED, record));
            writes.push(renderer.render_message(&messages.success));
        }
        (ConsoleAction::RetrieveProduct | ConsoleAction::UpdateProduct, Payload::Record(record)) => {
            writes.extend(renderer.render_record(&product::DISPLAY, record));
            writes.push(renderer.render_message(&messages.success));
        }
        (ConsoleAction::RetrievePet | ConsoleAction::UpdatePet, Payload::Record(record)) => {
            writes.extend(renderer.render_record(&pet::RETRIEVE, record));
            writes.push(renderer.render_message(&messages.success));
        }
        (ConsoleAction::DeleteProduct, _) => {
            writes.extend(form::reset_writes(ALL_SETS));
            writes.push(renderer.render_message(&messages.deleted));
        }
        (ConsoleAction::LikeProduct, Payload::Record(record)) => {
            writes.push(renderer.render_collection(
                ResourceKind::Product,
                std::slice::from_ref::<Record>(record),
            ));
            writes.push(renderer.render_message(&messages.liked));
        }
        (ConsoleAction::ListProducts(_), Payload::Collection(records)) => {
            writes.push(renderer.render_collection(ResourceKind::Product, records));
            writes.push(renderer.render_message(&messages.success));
        }
        (ConsoleAction::SearchPets, Payload::Collection(records)) => {
            writes.push(renderer.render_collection(ResourceKind::Pet, records));
            writes.push(renderer.render_message(&messages.success));
        }
        (ConsoleAction::Clear, _) => {}
        (action, payload) => {
            log::error!(
                "'{}' received an unexpected payload: {:?}",
                action.description(),
                payload
            );
            return settle_failure(renderer, action, &Failure::malformed(None));
        }
    }

    writes
}

fn settle_failure(
    renderer: &ResultRenderer,
    action: ConsoleAction,
    failure: &Failure,
) -> Vec<DomWrite> {
    log::warn!(
        "'{}' failed ({:?}, status {:?})",
        action.description(),
        failure.cause,
        failure.status
    );

    let mut writes = Vec::new();
    if matches!(action, ConsoleAction::RetrieveProduct | ConsoleAction::RetrievePet) {
        writes.extend(form::reset_writes(ALL_SETS));
    }
    writes.push(renderer.render_failure(failure));
    writes
}
