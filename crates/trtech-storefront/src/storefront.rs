//! The storefront context: one cart and its collaborators for a session.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use trtech_api::{BackoffStrategy, OrderBackend, RetryPolicy};
use trtech_auth::{AuthGate, InMemoryAuthGate};
use trtech_commerce::cart::{CartHandle, SharedCart};
use trtech_commerce::checkout::{CheckoutFlow, HandoffLink};
use trtech_commerce::contact::ContactForm;
use trtech_commerce::notify::{Notice, NotificationSink, NullSink};
use trtech_commerce::repair::RepairBooking;
use trtech_commerce::CommerceError;

use crate::handoff::{HandoffError, HandoffOpener};
use crate::session::CheckoutSession;
use crate::StorefrontError;

pub const REDIRECT_NOTICE: &str = "Redirecting to WhatsApp...";

/// Shared handles for one shopping session.
///
/// Cheap to clone; every clone talks to the same cart and gate.
#[derive(Clone)]
pub struct Storefront {
    cart: Arc<dyn CartHandle>,
    auth: Arc<dyn AuthGate>,
    orders: Arc<dyn OrderBackend>,
    opener: Arc<dyn HandoffOpener>,
    notifier: Arc<dyn NotificationSink>,
    link: HandoffLink,
    handoff_retry: RetryPolicy,
}

impl Storefront {
    /// Start a builder from the two collaborators with no default.
    pub fn builder(
        orders: Arc<dyn OrderBackend>,
        opener: Arc<dyn HandoffOpener>,
    ) -> StorefrontBuilder {
        StorefrontBuilder::new(orders, opener)
    }

    /// The session cart shared by every view.
    pub fn cart(&self) -> &Arc<dyn CartHandle> {
        &self.cart
    }

    /// The auth gate checkout signs in through.
    pub fn auth(&self) -> &Arc<dyn AuthGate> {
        &self.auth
    }

    pub(crate) fn orders(&self) -> &dyn OrderBackend {
        self.orders.as_ref()
    }

    /// Where hand-off messages are addressed.
    pub fn link(&self) -> &HandoffLink {
        &self.link
    }

    /// Retry policy applied to every hand-off.
    pub fn handoff_retry(&self) -> &RetryPolicy {
        &self.handoff_retry
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Open checkout over the current cart.
    ///
    /// An empty cart never opens checkout. The first step comes from the
    /// live auth state: signed-in customers start on `Details` with their
    /// profile filled in, everyone else on `Auth`.
    pub async fn open_checkout(&self) -> Result<CheckoutSession, StorefrontError> {
        if self.cart.is_empty() {
            self.notify(Notice::error(CommerceError::EmptyCart.to_string()));
            return Err(CommerceError::EmptyCart.into());
        }

        let profile = self.auth.current_profile().await;
        let flow = CheckoutFlow::open(profile.as_ref());
        Ok(CheckoutSession::new(self.clone(), flow))
    }

    /// Sign out of the gate. The cart is left alone.
    pub async fn logout(&self) -> Result<(), StorefrontError> {
        self.auth.logout().await?;
        info!("signed out");
        Ok(())
    }

    /// Validate a repair booking and hand it off. Returns the opened URL.
    #[instrument(skip_all)]
    pub async fn book_repair(&self, booking: &RepairBooking) -> Result<String, StorefrontError> {
        if let Err(err) = booking.validate() {
            self.notify(Notice::error(err.to_string()));
            return Err(err.into());
        }
        self.hand_off("repair", &booking.message()).await
    }

    /// Validate a contact form and hand it off. Returns the opened URL.
    #[instrument(skip_all)]
    pub async fn send_contact(&self, form: &ContactForm) -> Result<String, StorefrontError> {
        if let Err(err) = form.validate() {
            self.notify(Notice::error(err.to_string()));
            return Err(err.into());
        }
        self.hand_off("contact", &form.message_text()).await
    }

    async fn hand_off(&self, kind: &str, text: &str) -> Result<String, StorefrontError> {
        let url = self.link.url_for(text);
        match self.open_link(&url).await {
            Ok(()) => {
                info!(kind, "hand-off opened");
                self.notify(Notice::success(REDIRECT_NOTICE));
                Ok(url)
            }
            Err(err) => {
                warn!(kind, error = %err, "hand-off failed");
                self.notify(Notice::error(format!("Could not open WhatsApp: {err}")));
                Err(err.into())
            }
        }
    }

    /// Open `url` under the hand-off retry policy.
    pub(crate) async fn open_link(&self, url: &str) -> Result<(), HandoffError> {
        let opener: &dyn HandoffOpener = self.opener.as_ref();
        self.handoff_retry
            .run("handoff", move |_attempt| opener.open(url))
            .await
    }
}

/// Builder for [`Storefront`].
///
/// Only the order backend and the opener are required. The cart defaults
/// to a fresh [`SharedCart`] reporting to the builder's notifier, the gate
/// to an empty [`InMemoryAuthGate`].
pub struct StorefrontBuilder {
    orders: Arc<dyn OrderBackend>,
    opener: Arc<dyn HandoffOpener>,
    cart: Option<Arc<dyn CartHandle>>,
    auth: Option<Arc<dyn AuthGate>>,
    notifier: Arc<dyn NotificationSink>,
    link: HandoffLink,
    handoff_retry: RetryPolicy,
}

impl StorefrontBuilder {
    pub fn new(orders: Arc<dyn OrderBackend>, opener: Arc<dyn HandoffOpener>) -> Self {
        Self {
            orders,
            opener,
            cart: None,
            auth: None,
            notifier: Arc::new(NullSink),
            link: HandoffLink::default(),
            handoff_retry: RetryPolicy::new(2),
        }
    }

    /// Share an existing cart instead of creating one.
    pub fn cart(mut self, cart: Arc<dyn CartHandle>) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn auth(mut self, auth: Arc<dyn AuthGate>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Where notices go. Also used by the default cart.
    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Override the WhatsApp endpoint and handle.
    pub fn link(mut self, link: HandoffLink) -> Self {
        self.link = link;
        self
    }

    /// Replace the hand-off retry policy.
    pub fn handoff_retry(mut self, policy: RetryPolicy) -> Self {
        self.handoff_retry = policy;
        self
    }

    /// Hand-off attempts in total, with the default backoff between them.
    pub fn handoff_attempts(self, attempts: u32) -> Self {
        let policy = RetryPolicy::new(attempts.saturating_sub(1))
            .with_backoff(BackoffStrategy::default());
        self.handoff_retry(policy)
    }

    pub fn build(self) -> Storefront {
        let notifier = self.notifier;
        let cart = self
            .cart
            .unwrap_or_else(|| Arc::new(SharedCart::new(notifier.clone())));
        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(InMemoryAuthGate::new()));

        Storefront {
            cart,
            auth,
            orders: self.orders,
            opener: self.opener,
            notifier,
            link: self.link,
            handoff_retry: self.handoff_retry,
        }
    }
}
