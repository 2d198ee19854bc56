// ============================================================
// Layer 3 — Session Domain Type
// ============================================================
// Who is using the classifier. Created once onboarding has a
// non-empty name and a chosen role, then handed to the
// classifier stage for the rest of the run. Never persisted.
//
// Reference: Rust Book §5 (Structs), §9 (Recoverable Errors)

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Reasons onboarding cannot produce a session yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnboardingError {
    #[error("Please enter your name to continue.")]
    EmptyName,

    #[error("Please choose whether you are an Investor or a Startup Founder.")]
    RoleNotSelected,

    #[error("unknown role '{0}' (expected Investor or Startup Founder)")]
    UnknownRole(String),
}

/// The two kinds of user the app greets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Investor,
    Founder,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Investor, Role::Founder];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Investor => write!(f, "Investor"),
            Role::Founder  => write!(f, "Startup Founder"),
        }
    }
}

/// Accepts the display names, a few short forms, and the 1-based menu index.
impl FromStr for Role {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err(OnboardingError::RoleNotSelected),
            "1" | "investor" => Ok(Role::Investor),
            "2" | "founder" | "startup founder" | "startup-founder" | "startup_founder" => Ok(Role::Founder),
            _ => Err(OnboardingError::UnknownRole(s.trim().to_string())),
        }
    }
}

/// An onboarded user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    name: String,
    role: Role,
}

impl Session {
    /// The name is trimmed and must not be empty.
    pub fn new(name: &str, role: Role) -> Result<Self, OnboardingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OnboardingError::EmptyName);
        }
        Ok(Self { name: name.to_string(), role })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
