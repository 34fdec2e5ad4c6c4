mod auth_action;
mod context;
mod errors;
mod reconciler;
mod sign_in;
mod sign_out;
mod sign_up;

pub use auth_action::AuthActionHandler;
pub use context::ReconcileContext;
pub use errors::AuthError;
pub use reconciler::SessionReconciler;
pub use sign_in::SignIn;
pub use sign_out::SignOut;
pub use sign_up::SignUp;
