//! End-to-end checkout against in-memory collaborators.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use trtech_api::{ApiError, BackoffStrategy, OrderBackend, RetryPolicy};
use trtech_auth::{AuthGate, InMemoryAuthGate, PasswordHasher, Registration};
use trtech_commerce::cart::{CartHandle, SharedCart};
use trtech_commerce::catalog::{Condition, Product};
use trtech_commerce::checkout::{CheckoutStep, DeliveryField, NewOrder, Order, OrderStatus};
use trtech_commerce::contact::ContactForm;
use trtech_commerce::customer::PostalAddress;
use trtech_commerce::notify::{NoticeKind, RecordingSink};
use trtech_commerce::repair::{DeviceType, RepairBooking};
use trtech_commerce::{CommerceError, Money};
use trtech_observability::TracingNotifier;
use trtech_storefront::{
    HandoffError, HandoffOpener, Storefront, StorefrontError, HANDOFF_FAILED_NOTICE,
    ORDER_FAILED_NOTICE, ORDER_LOCKED_NOTICE, ORDER_SUBMITTED_NOTICE, REDIRECT_NOTICE,
};

#[derive(Default)]
struct FakeBackend {
    created: Mutex<Vec<NewOrder>>,
    fail: AtomicBool,
}

impl FakeBackend {
    fn created(&self) -> Vec<NewOrder> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderBackend for FakeBackend {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 500,
                message: "database unavailable".into(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(order.clone());

        let mut record = serde_json::to_value(order)?;
        record["_id"] = serde_json::json!(format!("ord00000{}", created.len()));
        Ok(serde_json::from_value(record)?)
    }
}

#[derive(Default)]
struct FakeOpener {
    opened: Mutex<Vec<String>>,
    failures_left: AtomicU32,
    calls: AtomicU32,
}

impl FakeOpener {
    fn failing(times: u32) -> Self {
        let opener = Self::default();
        opener.failures_left.store(times, Ordering::SeqCst);
        opener
    }

    fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl HandoffOpener for FakeOpener {
    async fn open(&self, url: &str) -> Result<(), HandoffError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(HandoffError::Unavailable("no browser".into()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

struct Harness {
    store: Storefront,
    cart: Arc<SharedCart>,
    backend: Arc<FakeBackend>,
    opener: Arc<FakeOpener>,
    gate: Arc<InMemoryAuthGate>,
    sink: Arc<RecordingSink>,
}

fn harness_with(opener: FakeOpener) -> Harness {
    let sink = Arc::new(RecordingSink::new());
    let cart = Arc::new(SharedCart::new(sink.clone()));
    let backend = Arc::new(FakeBackend::default());
    let opener = Arc::new(opener);
    let gate = Arc::new(InMemoryAuthGate::with_hasher(
        PasswordHasher::with_costs(1024, 1).unwrap(),
    ));

    let store = Storefront::builder(backend.clone(), opener.clone())
        .cart(cart.clone())
        .auth(gate.clone())
        .notifier(sink.clone())
        .handoff_retry(RetryPolicy::new(2).with_backoff(BackoffStrategy::None))
        .build();

    Harness {
        store,
        cart,
        backend,
        opener,
        gate,
        sink,
    }
}

fn harness() -> Harness {
    harness_with(FakeOpener::default())
}

fn cable() -> Product {
    Product::new(1u64, "Cable", Money::rand(14900), Condition::New)
}

fn ssd() -> Product {
    Product::new(3u64, "SSD", Money::rand(89900), Condition::PreOwned)
}

fn registration() -> Registration {
    Registration {
        first_name: "John".into(),
        last_name: "Doe".into(),
        email: "john@x.com".into(),
        password: "Secret123".into(),
        confirm_password: "Secret123".into(),
        phone: "0820000000".into(),
        address: PostalAddress::new("1 Main St", "Joburg", "2000", "Gauteng"),
    }
}

fn fill_details(session: &mut trtech_storefront::CheckoutSession) {
    session.set_field(DeliveryField::Name, "John Doe").unwrap();
    session.set_field(DeliveryField::Email, "john@x.com").unwrap();
    session.set_field(DeliveryField::Phone, "0820000000").unwrap();
    session.set_field(DeliveryField::Street, "1 Main St").unwrap();
    session.set_field(DeliveryField::City, "Joburg").unwrap();
    session.set_field(DeliveryField::Province, "Gauteng").unwrap();
    session.set_field(DeliveryField::PostalCode, "2000").unwrap();
    session.set_field(DeliveryField::Notes, "").unwrap();
}

fn decoded_text(url: &str) -> String {
    let (_, encoded) = url.split_once("?text=").unwrap();
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
            out.push(u8::from_str_radix(hex, 16).unwrap());
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_guest_checkout_end_to_end() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    h.cart.add_to_cart(&cable());
    assert_eq!(h.cart.total_price().display(), "R298.00");

    let mut session = h.store.open_checkout().await.unwrap();
    assert_eq!(session.step(), CheckoutStep::Auth);
    session.continue_as_guest().unwrap();
    fill_details(&mut session);
    assert_eq!(
        session.continue_to_confirmation().unwrap(),
        CheckoutStep::Confirmation
    );

    let receipt = session.place_order().await.unwrap();

    let text = decoded_text(&receipt.handoff_url);
    assert!(receipt.handoff_url.starts_with("https://wa.me/27791002552?text="));
    assert!(text.starts_with("Hi! I'd like to place an order:\n\nCustomer: John Doe\n"));
    assert!(text.contains("Address: 1 Main St, Joburg, Gauteng 2000\n"));
    assert!(text.contains("ORDER DETAILS:\nCable (new) x2 - R298.00\n\n"));
    assert!(text.contains("Total: R298.00\n"));
    assert!(text.ends_with("Notes: None"));

    assert!(h.cart.is_empty());
    assert!(session.is_closed());
    assert!(!session.is_submitting());
    assert_eq!(h.opener.opened(), vec![receipt.handoff_url.clone()]);
    assert_eq!(h.sink.last().unwrap().message, ORDER_SUBMITTED_NOTICE);

    let created = h.backend.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].total_amount, Money::rand(29800));
    assert_eq!(created[0].status, OrderStatus::Pending);
    assert_eq!(receipt.order.amount(), Money::rand(29800));
}

#[tokio::test]
async fn test_empty_cart_never_opens_checkout() {
    let h = harness();
    let err = h.store.open_checkout().await.err().unwrap();
    assert!(matches!(err, StorefrontError::Commerce(CommerceError::EmptyCart)));
    assert_eq!(h.sink.last().unwrap().message, "Your cart is empty");
}

#[tokio::test]
async fn test_signed_in_customer_starts_on_prefilled_details() {
    let h = harness();
    h.gate.register(registration()).await.unwrap();
    h.cart.add_to_cart(&cable());

    let session = h.store.open_checkout().await.unwrap();
    assert_eq!(session.step(), CheckoutStep::Details);
    assert_eq!(session.details().name, "John Doe");
    assert_eq!(session.details().city, "Joburg");
    assert!(session.details().notes.is_empty());
}

#[tokio::test]
async fn test_login_from_auth_step_prefills() {
    let h = harness();
    h.gate.create_account(&registration()).unwrap();
    h.cart.add_to_cart(&cable());

    let mut session = h.store.open_checkout().await.unwrap();
    let err = session.login("john@x.com", "Wrong1234").await.unwrap_err();
    assert!(matches!(err, StorefrontError::Auth(_)));
    assert_eq!(session.step(), CheckoutStep::Auth);
    assert_eq!(h.sink.last().unwrap().kind, NoticeKind::Error);

    let step = session.login("john@x.com", "Secret123").await.unwrap();
    assert_eq!(step, CheckoutStep::Details);
    assert_eq!(session.details().email, "john@x.com");
    assert_eq!(session.details().phone, "0820000000");
}

#[tokio::test]
async fn test_register_mismatch_stays_on_auth() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();

    let mut form = registration();
    form.confirm_password = "Secret124".into();
    session.register(form).await.unwrap_err();

    assert_eq!(session.step(), CheckoutStep::Auth);
    assert_eq!(h.gate.account_count(), 0);
    assert_eq!(h.sink.last().unwrap().message, "Passwords do not match");

    assert_eq!(session.register(registration()).await.unwrap(), CheckoutStep::Details);
    assert!(h.gate.is_authenticated().await);
}

#[tokio::test]
async fn test_missing_fields_keep_details() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    session.set_field(DeliveryField::Name, "John Doe").unwrap();
    session.set_field(DeliveryField::City, "   ").unwrap();

    let err = session.continue_to_confirmation().unwrap_err();
    assert!(err.is_validation());
    assert_eq!(session.step(), CheckoutStep::Details);
    assert_eq!(session.details().name, "John Doe");
    assert!(h
        .sink
        .last()
        .unwrap()
        .message
        .starts_with("Please fill in all required fields"));
}

#[tokio::test]
async fn test_back_keeps_details() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    fill_details(&mut session);
    session.continue_to_confirmation().unwrap();

    assert_eq!(session.back().unwrap(), CheckoutStep::Details);
    assert_eq!(session.details().street, "1 Main St");
    assert!(session.back().is_err());
}

#[tokio::test]
async fn test_backend_failure_keeps_cart() {
    let h = harness();
    h.backend.fail.store(true, Ordering::SeqCst);
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    fill_details(&mut session);
    session.continue_to_confirmation().unwrap();

    let err = session.place_order().await.unwrap_err();
    assert!(matches!(err, StorefrontError::Api(_)));
    assert_eq!(session.step(), CheckoutStep::Confirmation);
    assert!(!session.is_submitting());
    assert!(session.pending_handoff().is_none());
    assert_eq!(h.cart.total_items(), 1);
    assert!(h.opener.opened().is_empty());
    assert_eq!(h.sink.last().unwrap().message, ORDER_FAILED_NOTICE);
}

#[tokio::test]
async fn test_handoff_retries_then_succeeds() {
    let h = harness_with(FakeOpener::failing(2));
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    fill_details(&mut session);
    session.continue_to_confirmation().unwrap();

    session.place_order().await.unwrap();
    assert_eq!(h.opener.calls.load(Ordering::SeqCst), 3);
    assert!(h.cart.is_empty());
}

#[tokio::test]
async fn test_failed_handoff_keeps_order_and_cart() {
    let h = harness_with(FakeOpener::failing(3));
    h.cart.add_to_cart(&cable());
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    fill_details(&mut session);
    session.continue_to_confirmation().unwrap();

    let err = session.place_order().await.unwrap_err();
    assert!(matches!(err, StorefrontError::Handoff(_)));
    assert!(err.is_retryable());
    assert_eq!(h.cart.total_items(), 2);
    assert_eq!(session.step(), CheckoutStep::Confirmation);
    assert!(!session.is_closed());
    assert_eq!(session.pending_handoff().unwrap().rounds, 1);
    assert_eq!(h.sink.last().unwrap().message, HANDOFF_FAILED_NOTICE);

    // The opener works again; only the hand-off is repeated.
    let receipt = session.retry_handoff().await.unwrap();
    assert_eq!(h.backend.created().len(), 1);
    assert_eq!(receipt.order.id.as_str(), "ord000001");
    assert!(h.cart.is_empty());
    assert!(session.is_closed());
    assert!(session.place_order().await.is_err());
}

#[tokio::test]
async fn test_cart_added_after_failed_handoff_is_kept() {
    let h = harness_with(FakeOpener::failing(3));
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    fill_details(&mut session);
    session.continue_to_confirmation().unwrap();
    session.place_order().await.unwrap_err();
    let recorded_url = session.pending_handoff().unwrap().url.clone();

    h.cart.add_to_cart(&ssd());
    let err = session
        .set_field(DeliveryField::Notes, "Ring twice")
        .unwrap_err();
    assert!(matches!(err, StorefrontError::HandoffPending));
    assert_eq!(h.sink.last().unwrap().message, ORDER_LOCKED_NOTICE);
    assert!(session.details().notes.is_empty());
    assert!(matches!(
        session.back().unwrap_err(),
        StorefrontError::HandoffPending
    ));
    assert_eq!(session.step(), CheckoutStep::Confirmation);

    let receipt = session.place_order().await.unwrap();
    assert_eq!(receipt.handoff_url, recorded_url);
    assert!(!decoded_text(&receipt.handoff_url).contains("SSD"));

    let created = h.backend.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].items.len(), 1);
    assert_eq!(created[0].total_amount, Money::rand(14900));

    // The SSD was never ordered, so it is still waiting in the cart.
    let left: Vec<_> = h.cart.items().into_iter().map(|i| i.name).collect();
    assert_eq!(left, vec!["SSD"]);
    assert_eq!(h.cart.total_items(), 1);
    assert!(session.is_closed());
}

#[tokio::test]
async fn test_retry_without_pending_handoff() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    let err = session.retry_handoff().await.unwrap_err();
    assert!(matches!(err, StorefrontError::NothingToRetry));
}

#[tokio::test]
async fn test_place_order_from_details_is_rejected() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();
    fill_details(&mut session);

    let err = session.place_order().await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::InvalidTransition { .. })
    ));
    assert!(h.backend.created().is_empty());
}

#[tokio::test]
async fn test_progress_follows_step() {
    let h = harness();
    h.cart.add_to_cart(&cable());
    let mut session = h.store.open_checkout().await.unwrap();
    session.continue_as_guest().unwrap();

    let labels: Vec<_> = session.progress().iter().map(|m| m.label).collect();
    assert_eq!(labels, vec!["Auth", "Details", "Confirm"]);
    let current: Vec<_> = session.progress().iter().map(|m| m.current).collect();
    assert_eq!(current, vec![false, true, false]);
}

#[tokio::test]
async fn test_repair_and_contact_handoff() {
    let h = harness();

    let mut booking = RepairBooking {
        name: "Thandi".into(),
        phone: "0821234567".into(),
        device_type: Some(DeviceType::Laptop),
        brand: "Dell".into(),
        issue: "Cracked screen".into(),
        ..Default::default()
    };
    let url = h.store.book_repair(&booking).await.unwrap();
    let text = decoded_text(&url);
    assert!(text.starts_with("Hi! I'd like to book a repair:\n\nName: Thandi\n"));
    assert!(text.ends_with("Additional Info: N/A"));
    assert_eq!(h.sink.last().unwrap().message, REDIRECT_NOTICE);

    booking.issue.clear();
    assert!(h.store.book_repair(&booking).await.unwrap_err().is_validation());

    let form = ContactForm {
        name: "Piet".into(),
        message: "Do you sell chargers?".into(),
        ..Default::default()
    };
    let url = h.store.send_contact(&form).await.unwrap();
    assert!(decoded_text(&url).ends_with("Message:\nDo you sell chargers?"));
    assert_eq!(h.opener.opened().len(), 2);
}

#[tokio::test]
async fn test_logout_keeps_cart() {
    let h = harness();
    h.gate.register(registration()).await.unwrap();
    h.cart.add_to_cart(&cable());

    h.store.logout().await.unwrap();
    assert!(!h.gate.is_authenticated().await);
    assert_eq!(h.cart.total_items(), 1);

    let session = h.store.open_checkout().await.unwrap();
    assert_eq!(session.step(), CheckoutStep::Auth);
}

#[tokio::test]
async fn test_default_builder_uses_fresh_cart() {
    let store = Storefront::builder(
        Arc::new(FakeBackend::default()),
        Arc::new(FakeOpener::default()),
    )
    .notifier(Arc::new(TracingNotifier::new()))
    .build();

    store.cart().add_to_cart(&cable());
    assert_eq!(store.cart().total_items(), 1);
    assert_eq!(store.handoff_retry().max_attempts(), 3);
    assert!(store.link().url_for("Hi").starts_with("https://wa.me/27791002552"));
    assert!(!store.auth().is_authenticated().await);
}
