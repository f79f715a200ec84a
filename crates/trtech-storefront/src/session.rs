//! One open checkout, driven step by step.

use tracing::{debug, info, instrument, warn};
use trtech_auth::{AuthError, Registration};
use trtech_commerce::checkout::{
    render_order_message, CheckoutFlow, CheckoutStep, DeliveryDetails, DeliveryField, NewOrder,
    Order, StepMarker,
};
use trtech_commerce::notify::Notice;
use trtech_commerce::CommerceError;

use crate::handoff::PendingHandoff;
use crate::storefront::Storefront;
use crate::StorefrontError;

pub const ORDER_SUBMITTED_NOTICE: &str = "Order submitted! Redirecting to WhatsApp...";
pub const ORDER_FAILED_NOTICE: &str = "Failed to submit order. Please try again.";
pub const HANDOFF_FAILED_NOTICE: &str =
    "Your order was saved, but WhatsApp could not be opened. Please try again.";
pub const ORDER_LOCKED_NOTICE: &str =
    "Your order is already saved. Send it on WhatsApp before making changes.";

/// What a completed submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order: Order,
    pub handoff_url: String,
}

/// A checkout opened by [`Storefront::open_checkout`].
///
/// Holds the step, the delivery details and the busy flag for this one
/// checkout. Dropping the session discards anything not submitted.
pub struct CheckoutSession {
    store: Storefront,
    flow: CheckoutFlow,
    pending: Option<PendingHandoff>,
    closed: bool,
}

impl CheckoutSession {
    pub(crate) fn new(store: Storefront, flow: CheckoutFlow) -> Self {
        Self {
            store,
            flow,
            pending: None,
            closed: false,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.flow.step()
    }

    pub fn details(&self) -> &DeliveryDetails {
        self.flow.details()
    }

    /// Edit a delivery field. Rejected once an order has been recorded,
    /// since the hand-off message is already built from the old values.
    pub fn set_field(
        &mut self,
        field: DeliveryField,
        value: impl Into<String>,
    ) -> Result<(), StorefrontError> {
        self.ensure_open()?;
        self.ensure_not_pending()?;
        self.flow.set_field(field, value);
        Ok(())
    }

    pub fn progress(&self) -> Vec<StepMarker> {
        self.flow.progress()
    }

    pub fn is_submitting(&self) -> bool {
        self.flow.is_submitting()
    }

    /// The recorded order still waiting for its hand-off, if any.
    pub fn pending_handoff(&self) -> Option<&PendingHandoff> {
        self.pending.as_ref()
    }

    /// True once the order went out and checkout closed itself.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sign in from the `Auth` step.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<CheckoutStep, StorefrontError> {
        self.ready_for_auth()?;
        let result = self.store.auth().login(email, password).await;
        self.finish_auth(result)
    }

    /// Register from the `Auth` step.
    ///
    /// The form is checked before the gate is called, so a password
    /// mismatch never reaches it.
    #[instrument(skip_all)]
    pub async fn register(&mut self, registration: Registration) -> Result<CheckoutStep, StorefrontError> {
        self.ready_for_auth()?;
        if let Err(err) = registration.validate() {
            self.store.notify(Notice::error(err.to_string()));
            return Err(err.into());
        }
        let result = self.store.auth().register(registration).await;
        self.finish_auth(result)
    }

    pub fn continue_as_guest(&mut self) -> Result<CheckoutStep, StorefrontError> {
        self.ensure_open()?;
        let result = self.flow.continue_as_guest();
        self.surface(result)
    }

    /// `Details` to `Confirmation`, once every required field is filled.
    pub fn continue_to_confirmation(&mut self) -> Result<CheckoutStep, StorefrontError> {
        self.ensure_open()?;
        let result = self.flow.continue_to_confirmation();
        self.surface(result)
    }

    pub fn back(&mut self) -> Result<CheckoutStep, StorefrontError> {
        self.ensure_open()?;
        self.ensure_not_pending()?;
        let result = self.flow.back();
        self.surface(result)
    }

    /// Record the order with the backend, then hand it off.
    ///
    /// When a previous attempt already recorded the order and only the
    /// hand-off failed, this retries the hand-off alone.
    pub async fn place_order(&mut self) -> Result<OrderReceipt, StorefrontError> {
        self.ensure_open()?;
        if self.pending.is_some() {
            return self.retry_handoff().await;
        }

        let begun = self.flow.begin_submission();
        self.surface(begun)?;
        let result = self.submit().await;
        self.flow.finish_submission();
        result
    }

    /// Retry the hand-off of an order that is already recorded.
    pub async fn retry_handoff(&mut self) -> Result<OrderReceipt, StorefrontError> {
        self.ensure_open()?;
        if self.pending.is_none() {
            return Err(StorefrontError::NothingToRetry);
        }

        let begun = self.flow.begin_submission();
        self.surface(begun)?;
        let result = self.deliver().await;
        self.flow.finish_submission();
        result
    }

    #[instrument(skip(self), fields(step = %self.flow.step()))]
    async fn submit(&mut self) -> Result<OrderReceipt, StorefrontError> {
        let items = self.store.cart().items();
        let built = NewOrder::from_checkout(&items, self.flow.details());
        let new_order = self.surface(built)?;

        let order = match self.store.orders().create_order(&new_order).await {
            Ok(order) => order,
            Err(err) => {
                warn!(error = %err, "order creation failed");
                self.store.notify(Notice::error(ORDER_FAILED_NOTICE));
                return Err(err.into());
            }
        };
        info!(order_id = %order.id, items = new_order.item_count(), "order recorded");

        let text = render_order_message(&items, new_order.total_amount, self.flow.details());
        let url = self.store.link().url_for(&text);
        self.pending = Some(PendingHandoff {
            order,
            url,
            items,
            rounds: 0,
        });
        self.deliver().await
    }

    async fn deliver(&mut self) -> Result<OrderReceipt, StorefrontError> {
        let Some(pending) = self.pending.as_mut() else {
            return Err(StorefrontError::NothingToRetry);
        };
        pending.rounds += 1;
        let round = pending.rounds;
        let url = pending.url.clone();

        if let Err(err) = self.store.open_link(&url).await {
            warn!(round, error = %err, "hand-off failed, order kept");
            self.store.notify(Notice::error(HANDOFF_FAILED_NOTICE));
            return Err(err.into());
        }

        let Some(pending) = self.pending.take() else {
            return Err(StorefrontError::NothingToRetry);
        };
        // Only what was ordered leaves the cart.
        self.store.cart().settle_order(&pending.items);
        self.closed = true;
        info!(order_id = %pending.order.id, round, "hand-off opened, checkout closed");
        self.store.notify(Notice::success(ORDER_SUBMITTED_NOTICE));

        Ok(OrderReceipt {
            order: pending.order,
            handoff_url: pending.url,
        })
    }

    fn ready_for_auth(&self) -> Result<(), StorefrontError> {
        self.ensure_open()?;
        if self.flow.is_submitting() {
            return Err(CommerceError::SubmissionInProgress.into());
        }
        if self.flow.step() != CheckoutStep::Auth {
            return Err(CommerceError::InvalidTransition {
                from: self.flow.step().as_str(),
                event: "sign in",
            }
            .into());
        }
        Ok(())
    }

    fn finish_auth(
        &mut self,
        result: Result<trtech_auth::User, AuthError>,
    ) -> Result<CheckoutStep, StorefrontError> {
        match result {
            Ok(user) => {
                debug!(user = user.display_name(), "signed in during checkout");
                let step = match user.profile() {
                    Some(profile) => self.flow.authenticated(profile),
                    None => self.flow.continue_as_guest(),
                };
                self.surface(step)
            }
            Err(err) => {
                // Stays on `Auth`; the transition cannot fail from there.
                let _ = self.flow.auth_failed();
                self.store.notify(Notice::error(err.to_string()));
                Err(err.into())
            }
        }
    }

    fn ensure_open(&self) -> Result<(), StorefrontError> {
        if self.closed {
            return Err(StorefrontError::Closed);
        }
        Ok(())
    }

    fn ensure_not_pending(&self) -> Result<(), StorefrontError> {
        if self.pending.is_some() {
            self.store.notify(Notice::error(ORDER_LOCKED_NOTICE));
            return Err(StorefrontError::HandoffPending);
        }
        Ok(())
    }

    fn surface<T>(&self, result: Result<T, CommerceError>) -> Result<T, StorefrontError> {
        result.map_err(|err| {
            self.store.notify(Notice::error(err.to_string()));
            err.into()
        })
    }
}
