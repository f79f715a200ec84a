//! Checkout flow state machine.

use super::details::{DeliveryDetails, DeliveryField};
use crate::customer::CustomerProfile;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Sign in, register, or continue as a guest.
    Auth,
    /// Delivery details form.
    Details,
    /// Order review before submission.
    Confirmation,
}

impl CheckoutStep {
    /// Every step, in checkout order.
    pub const ALL: [CheckoutStep; 3] = [
        CheckoutStep::Auth,
        CheckoutStep::Details,
        CheckoutStep::Confirmation,
    ];

    /// Lowercase name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Auth => "auth",
            CheckoutStep::Details => "details",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    /// Label on the progress strip.
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Auth => "Auth",
            CheckoutStep::Details => "Details",
            CheckoutStep::Confirmation => "Confirm",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Auth => 1,
            CheckoutStep::Details => 2,
            CheckoutStep::Confirmation => 3,
        }
    }

    /// Initial step for a flow opened with the given auth state.
    pub fn initial(authenticated: bool) -> Self {
        if authenticated {
            CheckoutStep::Details
        } else {
            CheckoutStep::Auth
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs that move the flow between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// The auth sub-flow succeeded for this customer.
    Authenticated(CustomerProfile),
    /// The auth sub-flow was rejected.
    AuthFailed,
    ContinueAsGuest,
    /// Submit the details form.
    Continue,
    Back,
    PlaceOrder,
}

impl CheckoutEvent {
    /// Verb phrase used in transition errors.
    pub fn describe(&self) -> &'static str {
        match self {
            CheckoutEvent::Authenticated(_) => "sign in",
            CheckoutEvent::AuthFailed => "report a sign-in failure",
            CheckoutEvent::ContinueAsGuest => "continue as guest",
            CheckoutEvent::Continue => "continue",
            CheckoutEvent::Back => "go back",
            CheckoutEvent::PlaceOrder => "place an order",
        }
    }
}

/// Next step for `event` taken at `step`.
///
/// Pure: the caller owns every side effect. `PlaceOrder` stays on
/// `Confirmation`; it only confirms that submission may start.
pub fn transition(
    step: CheckoutStep,
    event: &CheckoutEvent,
    details: &DeliveryDetails,
) -> Result<CheckoutStep, CommerceError> {
    use CheckoutEvent as E;
    use CheckoutStep as S;

    match (step, event) {
        (S::Auth, E::Authenticated(_)) | (S::Auth, E::ContinueAsGuest) => Ok(S::Details),
        (S::Auth, E::AuthFailed) => Ok(S::Auth),
        (S::Details, E::Continue) => {
            details.validate()?;
            Ok(S::Confirmation)
        }
        (S::Confirmation, E::Back) => Ok(S::Details),
        (S::Confirmation, E::PlaceOrder) => {
            details.validate()?;
            Ok(S::Confirmation)
        }
        (from, event) => Err(CommerceError::InvalidTransition {
            from: from.as_str(),
            event: event.describe(),
        }),
    }
}

/// One dot on the progress strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepMarker {
    pub step: CheckoutStep,
    pub label: &'static str,
    pub number: u8,
    /// The flow is at or past this step.
    pub reached: bool,
    pub current: bool,
}

/// State of one open checkout.
///
/// Created fresh each time checkout is opened; nothing carries over from
/// an earlier flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    details: DeliveryDetails,
    submitting: bool,
}

impl CheckoutFlow {
    /// Open checkout for the signed-in customer, if any.
    pub fn open(profile: Option<&CustomerProfile>) -> Self {
        let (step, details) = match profile {
            Some(profile) => (CheckoutStep::Details, DeliveryDetails::from_profile(profile)),
            None => (CheckoutStep::Auth, DeliveryDetails::new()),
        };
        debug!(%step, "checkout opened");
        Self {
            step,
            details,
            submitting: false,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn details(&self) -> &DeliveryDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut DeliveryDetails {
        &mut self.details
    }

    pub fn set_field(&mut self, field: DeliveryField, value: impl Into<String>) {
        self.details.set(field, value);
    }

    /// Check if a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Apply an event. On error nothing changes.
    pub fn apply(&mut self, event: CheckoutEvent) -> Result<CheckoutStep, CommerceError> {
        if self.submitting {
            return Err(CommerceError::SubmissionInProgress);
        }

        let next = transition(self.step, &event, &self.details)?;
        match &event {
            CheckoutEvent::Authenticated(profile) => {
                self.details = DeliveryDetails::from_profile(profile);
            }
            CheckoutEvent::ContinueAsGuest => {
                self.details = DeliveryDetails::new();
            }
            _ => {}
        }

        debug!(from = %self.step, to = %next, event = event.describe(), "checkout transition");
        self.step = next;
        Ok(next)
    }

    pub fn authenticated(&mut self, profile: &CustomerProfile) -> Result<CheckoutStep, CommerceError> {
        self.apply(CheckoutEvent::Authenticated(profile.clone()))
    }

    pub fn auth_failed(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.apply(CheckoutEvent::AuthFailed)
    }

    pub fn continue_as_guest(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.apply(CheckoutEvent::ContinueAsGuest)
    }

    pub fn continue_to_confirmation(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.apply(CheckoutEvent::Continue)
    }

    pub fn back(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.apply(CheckoutEvent::Back)
    }

    /// Mark the flow busy for a submission.
    ///
    /// Fails with [`CommerceError::SubmissionInProgress`] while another
    /// submission holds the flow.
    pub fn begin_submission(&mut self) -> Result<(), CommerceError> {
        self.apply(CheckoutEvent::PlaceOrder)?;
        self.submitting = true;
        Ok(())
    }

    /// Release the busy flag.
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    /// Markers for the progress strip.
    pub fn progress(&self) -> Vec<StepMarker> {
        CheckoutStep::ALL
            .into_iter()
            .map(|step| StepMarker {
                step,
                label: step.label(),
                number: step.number(),
                reached: self.step.number() >= step.number(),
                current: self.step == step,
            })
            .collect()
    }
}
