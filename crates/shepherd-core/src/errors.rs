//! Application error types.
//!
//! The error surface is split in two layers:
//!
//! - Closed taxonomies for the security-relevant failures:
//!   [`AuthError`] for authentication (surfaced as "unauthorized") and
//!   [`DenyReason`] for authorization (surfaced as "forbidden").
//! - [`AppError`], the error type every service returns. It carries the
//!   taxonomy variants plus the usual not-found/conflict/validation/internal
//!   cases.
//!
//! Authorization failures are distinguishable internally (for logs and
//! audit), but [`AppError::public_message`] flattens every `Forbidden`
//! variant to the same opaque string so callers cannot probe the scope
//! structure of other accounts.

use thiserror::Error;

/// Authentication failures raised while resolving a credential into a
/// principal. All of these surface to callers as "unauthorized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The bearer token is malformed, expired, or carries a bad signature.
    #[error("invalid credential")]
    InvalidCredential,
    /// The token verified but its subject no longer exists.
    #[error("unknown principal")]
    UnknownPrincipal,
    /// The account exists but has been deactivated.
    #[error("inactive account")]
    InactiveAccount,
}

/// Why an authorization decision came back as deny.
///
/// The variants matter internally: `DepartmentScopeViolation` means the
/// caller's role would have sufficed but the named departments were not a
/// valid subset of their own, which is worth telling apart from a plain
/// role failure in audit logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenyReason {
    /// The caller's role does not permit this action at all.
    #[error("insufficient role")]
    InsufficientRole,
    /// The target sits in a department outside the caller's assignment set.
    #[error("out of scope")]
    OutOfScope,
    /// The requested department set is empty or not a subset of the
    /// caller's own departments.
    #[error("department scope violation")]
    DepartmentScopeViolation,
}

/// The application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("forbidden: {0}")]
    Forbidden(DenyReason),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn forbidden(reason: DenyReason) -> Self {
        Self::Forbidden(reason)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::Internal(anyhow::anyhow!(msg.into()))
    }

    /// The message safe to show callers.
    ///
    /// Authentication and authorization failures collapse to fixed strings:
    /// the internal variant stays available for logging, but a client must
    /// not be able to tell `OutOfScope` from `InsufficientRole`, or an
    /// invisible row from an absent one.
    pub fn public_message(&self) -> &str {
        match self {
            Self::Unauthorized(_) => "Could not validate credentials",
            Self::Forbidden(_) => "Not enough permissions",
            Self::NotFound(msg) | Self::Conflict(msg) | Self::Validation(msg) => msg,
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Whether this error came out of the authorization layer.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Rewrites a `Forbidden` error as `NotFound`.
    ///
    /// Read paths use this so an out-of-scope row and an absent row are
    /// indistinguishable to the caller. Mutations never conceal: they
    /// surface the (already opaque) forbidden message instead.
    pub fn conceal(self, msg: impl Into<String>) -> Self {
        if self.is_forbidden() {
            Self::NotFound(msg.into())
        } else {
            self
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
