/// Gesture dispatch for one contact card
///
/// Swipes look like dismissals to the gesture recognizer, but here they only
/// classify the input: the dismissal is always rejected and the card settles
/// back into the list. Deletion goes through a long press and an explicit
/// confirmation.
use crate::contact_store::{Contact, ContactId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Direction of a swipe relative to the reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leading edge toward trailing edge
    StartToEnd,
    /// Trailing edge toward leading edge
    EndToStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardInput {
    Swipe(SwipeDirection),
    LongPress,
    Tap,
    /// "Yes" on the delete prompt
    Confirm,
    /// "No" on the delete prompt
    Decline,
    /// Prompt dismissed by tapping outside it
    DismissOutside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Idle,
    AwaitingConfirmation,
}

/// What a card input asks the rest of the system to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    BeginEdit { contact: Contact },
    PlaceCall { phone: String },
    RequestDeleteConfirmation { contact_id: ContactId },
    ConfirmDelete { contact_id: ContactId },
    Cancel,
}

/// Result of offering a swipe to the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub effect: Option<Effect>,
    /// Answer to the recognizer's "dismiss this item?" question. Always false.
    pub accept_dismiss: bool,
}

fn swipe_effect(direction: SwipeDirection, contact: &Contact) -> Effect {
    match direction {
        SwipeDirection::StartToEnd => Effect::BeginEdit {
            contact: contact.clone(),
        },
        SwipeDirection::EndToStart => Effect::PlaceCall {
            phone: contact.phone.clone(),
        },
    }
}

#[derive(Debug, Clone)]
pub struct CardDispatcher {
    contact: Contact,
    state: CardState,
}

impl CardDispatcher {
    pub fn new(contact: Contact) -> Self {
        Self {
            contact,
            state: CardState::Idle,
        }
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Recognizer callback for a completed swipe
    pub fn on_swipe(&mut self, direction: SwipeDirection) -> SwipeOutcome {
        let effect = match self.state {
            CardState::Idle => Some(swipe_effect(direction, &self.contact)),
            // The delete prompt is modal
            CardState::AwaitingConfirmation => None,
        };
        SwipeOutcome {
            effect,
            accept_dismiss: false,
        }
    }

    pub fn handle(&mut self, input: CardInput) -> Option<Effect> {
        let effect = match (self.state, input) {
            (_, CardInput::Swipe(direction)) => self.on_swipe(direction).effect,
            (CardState::Idle, CardInput::LongPress) => {
                self.state = CardState::AwaitingConfirmation;
                Some(Effect::RequestDeleteConfirmation {
                    contact_id: self.contact.id,
                })
            }
            (CardState::AwaitingConfirmation, CardInput::Confirm) => {
                self.state = CardState::Idle;
                Some(Effect::ConfirmDelete {
                    contact_id: self.contact.id,
                })
            }
            (CardState::AwaitingConfirmation, CardInput::Decline | CardInput::DismissOutside) => {
                self.state = CardState::Idle;
                Some(Effect::Cancel)
            }
            // Tap is reserved; prompt answers without a prompt mean nothing
            _ => None,
        };
        debug!(
            "Card {}: {:?} -> {:?} ({:?})",
            self.contact.id, input, effect, self.state
        );
        effect
    }
}
