//! Session state owned by the UI.
//!
//! [`AppSession`] is created once at launch and handed down to every screen.
//! It owns the auth provider, the signed-in user and the cart; the methods
//! here are the only way to change any of them.

use tracing::{debug, info, instrument, warn};

use quickbite_core::{Cart, CartCustomization, CartItem, ProductId};

use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::models::AuthenticatedUser;
use crate::services::auth::{AuthError, AuthProvider, SignInForm};

/// Where the signed-in state currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Startup check has not finished.
    Loading,
    SignedIn(AuthenticatedUser),
    SignedOut,
}

/// Top-level screen the app should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Splash,
    SignIn,
    Home,
}

/// Explicitly owned session store.
pub struct AppSession<A> {
    auth: A,
    status: AuthStatus,
    cart: Cart,
}

impl<A: AuthProvider> AppSession<A> {
    /// Create a session in the `Loading` state with an empty cart.
    #[must_use]
    pub const fn new(auth: A) -> Self {
        Self {
            auth,
            status: AuthStatus::Loading,
            cart: Cart::new(),
        }
    }

    /// The auth provider.
    #[must_use]
    pub const fn auth(&self) -> &A {
        &self.auth
    }

    /// Drop the session and hand back the auth provider.
    #[must_use]
    pub fn into_auth(self) -> A {
        self.auth
    }

    #[must_use]
    pub const fn status(&self) -> &AuthStatus {
        &self.status
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&AuthenticatedUser> {
        match &self.status {
            AuthStatus::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::SignedIn(_))
    }

    /// Screen to route to once startup work is done.
    #[must_use]
    pub const fn landing_route(&self) -> Route {
        match self.status {
            AuthStatus::Loading => Route::Splash,
            AuthStatus::SignedIn(_) => Route::Home,
            AuthStatus::SignedOut => Route::SignIn,
        }
    }

    /// Resolve the startup auth check.
    ///
    /// A provider failure is logged and treated as signed out so the app can
    /// still reach the sign-in screen.
    #[instrument(skip(self))]
    pub async fn bootstrap(&mut self) -> &AuthStatus {
        self.status = match self.auth.current_user().await {
            Ok(Some(user)) => {
                set_sentry_user(&user.id, Some(user.email.as_str()));
                AuthStatus::SignedIn(user)
            }
            Ok(None) => AuthStatus::SignedOut,
            Err(e) => {
                warn!(error = %e, "Failed to fetch current user, treating as signed out");
                AuthStatus::SignedOut
            }
        };
        &self.status
    }

    /// Validate `form`, sign in and load the user.
    ///
    /// # Errors
    ///
    /// Returns the validation or provider error; the session is then signed
    /// out.
    #[instrument(skip_all)]
    pub async fn sign_in(&mut self, form: &SignInForm) -> Result<&AuthenticatedUser, AuthError> {
        let credentials = form.validate()?;

        let user = match self.fetch_user_after_sign_in(&credentials).await {
            Ok(user) => user,
            Err(e) => {
                self.status = AuthStatus::SignedOut;
                return Err(e);
            }
        };

        info!(user_id = %user.id, "Signed in");
        set_sentry_user(&user.id, Some(user.email.as_str()));
        self.status = AuthStatus::SignedIn(user);
        self.user().ok_or(AuthError::NotSignedIn)
    }

    async fn fetch_user_after_sign_in(
        &self,
        credentials: &crate::services::auth::Credentials,
    ) -> Result<AuthenticatedUser, AuthError> {
        self.auth.sign_in(credentials).await?;

        let err = match self.auth.current_user().await {
            Ok(Some(user)) => return Ok(user),
            Ok(None) => AuthError::NotSignedIn,
            Err(e) => e,
        };

        // The backend session is open but unusable; close it.
        if let Err(logout_err) = self.auth.logout().await {
            warn!(error = %logout_err, "Failed to close session after sign-in error");
        }
        Err(err)
    }

    /// End the session and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns the provider error; the user and cart are then left as they
    /// were.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.auth.logout().await?;

        self.status = AuthStatus::SignedOut;
        self.cart.clear();
        clear_sentry_user();
        info!("Signed out");
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Read-only view of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, item: CartItem) {
        debug!(product_id = %item.id, quantity = item.quantity, "Adding to cart");
        add_breadcrumb("cart", "Added item", &[("product_id", item.id.as_str())]);
        self.cart.add_item(item);
    }

    /// See [`Cart::increase_qty`].
    pub fn increase_qty(&mut self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        let found = self.cart.increase_qty(product_id, customizations);
        debug!(product_id = %product_id, found, "Increase quantity");
        found
    }

    /// See [`Cart::decrease_qty`].
    pub fn decrease_qty(&mut self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        let found = self.cart.decrease_qty(product_id, customizations);
        debug!(product_id = %product_id, found, "Decrease quantity");
        found
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, product_id: &ProductId, customizations: &[CartCustomization]) -> bool {
        let found = self.cart.remove_item(product_id, customizations);
        debug!(product_id = %product_id, found, "Remove from cart");
        if found {
            add_breadcrumb("cart", "Removed item", &[("product_id", product_id.as_str())]);
        }
        found
    }
}
