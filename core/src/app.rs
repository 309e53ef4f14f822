/// Screen-level state: the contact list, per-card dispatchers and the open form
///
/// This is the caller that binds a form session to the contact it edits and
/// turns card effects into store mutations or dial requests.
use crate::contact_store::{Contact, ContactId, ContactStore};
use crate::dialer::{place_call, Dialer};
use crate::dispatcher::{CardDispatcher, CardInput, CardState, Effect};
use crate::error::Result;
use crate::form::FormSession;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ContactList,
    Form,
}

/// Where a committed form goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    New,
    Edit(ContactId),
}

struct OpenForm {
    session: FormSession,
    target: FormTarget,
}

pub struct SosApp<D: Dialer> {
    store: ContactStore,
    dialer: D,
    cards: HashMap<ContactId, CardDispatcher>,
    form: Option<OpenForm>,
}

impl<D: Dialer> SosApp<D> {
    pub fn new(store: ContactStore, dialer: D) -> Self {
        Self {
            store,
            dialer,
            cards: HashMap::new(),
            form: None,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn dialer(&self) -> &D {
        &self.dialer
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.store.list()
    }

    pub fn screen(&self) -> Screen {
        if self.form.is_some() {
            Screen::Form
        } else {
            Screen::ContactList
        }
    }

    /// Whether card `id` is showing the delete prompt
    pub fn card_state(&self, id: ContactId) -> CardState {
        self.cards.get(&id).map(|c| c.state()).unwrap_or_default()
    }

    pub fn open_new_form(&mut self) {
        self.open_form(FormSession::new(None), FormTarget::New);
    }

    pub fn form_target(&self) -> Option<FormTarget> {
        self.form.as_ref().map(|f| f.target)
    }

    pub fn form(&self) -> Option<&FormSession> {
        self.form.as_ref().map(|f| &f.session)
    }

    pub fn form_mut(&mut self) -> Option<&mut FormSession> {
        self.form.as_mut().map(|f| &mut f.session)
    }

    /// Route a card input and apply its effect.
    ///
    /// Inputs for contacts that no longer exist, or that arrive while the form
    /// covers the list, are dropped.
    pub fn gesture(&mut self, id: ContactId, input: CardInput) -> Option<Effect> {
        if self.form.is_some() {
            debug!("Ignoring {:?} on card {} while the form is open", input, id);
            return None;
        }
        let Some(contact) = self.store.get(id) else {
            debug!("Ignoring {:?} on unknown card {}", input, id);
            self.cards.remove(&id);
            return None;
        };

        let card = self
            .cards
            .entry(id)
            .or_insert_with(|| CardDispatcher::new(contact.clone()));
        if card.contact() != &contact {
            // Changed or replaced since the card last saw it: no prompt carries over
            *card = CardDispatcher::new(contact);
        }
        let effect = card.handle(input)?;
        self.apply(&effect);
        Some(effect)
    }

    /// Commit the open form into the store and close it.
    ///
    /// An invalid draft keeps the form open and returns the error; a refused
    /// add (no id left) closes it and returns the error. Returns the
    /// saved contact, or `None` when there was nothing to save (no form, or
    /// the edited contact is gone).
    pub fn submit_form(&mut self) -> Result<Option<Contact>> {
        let Some(open) = self.form.as_ref() else {
            return Ok(None);
        };
        let output = open.session.commit()?;
        let target = open.target;
        self.form = None;

        let saved = match target {
            FormTarget::New => {
                let contact = self.store.add(output.name, output.phone, output.icon)?;
                // A new contact may take the id of one removed earlier
                self.cards.remove(&contact.id);
                Some(contact)
            }
            FormTarget::Edit(id) => {
                if self.store.update(id, output.name, output.phone, output.icon) {
                    self.store.get(id)
                } else {
                    None
                }
            }
        };
        Ok(saved)
    }

    pub fn cancel_form(&mut self) {
        if let Some(open) = self.form.take() {
            debug!("Form for {:?} cancelled", open.target);
            open.session.cancel();
        }
    }

    fn open_form(&mut self, session: FormSession, target: FormTarget) {
        debug!("Opening form for {:?}", target);
        self.form = Some(OpenForm { session, target });
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::BeginEdit { contact } => {
                self.open_form(FormSession::new(Some(contact)), FormTarget::Edit(contact.id));
            }
            Effect::PlaceCall { phone } => {
                let outcome = place_call(&self.dialer, phone);
                info!("Call to {}: {:?}", phone, outcome);
            }
            Effect::ConfirmDelete { contact_id } => {
                self.store.remove(*contact_id);
                self.cards.remove(contact_id);
            }
            Effect::RequestDeleteConfirmation { .. } | Effect::Cancel => {}
        }
    }
}
