// ============================================================
// Layer 2 — Onboarding Use Case
// ============================================================
// Walks a new user through the landing stage:
//
//   AwaitingName ──(non-empty name)──▶ AwaitingRole
//   AwaitingRole ──(role chosen)─────▶ Ready
//   Ready        ──(proceed)─────────▶ Session
//
// An empty name at any point drops back to AwaitingName, just
// like the role picker disappearing when the name box is
// cleared. Proceeding is only possible from Ready.
//
// Reference: Rust Book §6 (Enums), §17 (State Pattern)

use crate::domain::session::{OnboardingError, Role, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingState {
    AwaitingName,
    AwaitingRole { name: String },
    Ready { name: String, role: Role },
}

#[derive(Debug)]
pub struct Onboarding {
    state: OnboardingState,
}

impl Onboarding {
    pub fn new() -> Self {
        Self { state: OnboardingState::AwaitingName }
    }

    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    /// Record the user's name. Returns the greeting to show on success.
    /// Changing the name keeps an already chosen role.
    pub fn submit_name(&mut self, input: &str) -> Result<String, OnboardingError> {
        let name = input.trim();
        if name.is_empty() {
            self.state = OnboardingState::AwaitingName;
            return Err(OnboardingError::EmptyName);
        }

        self.state = match &self.state {
            OnboardingState::Ready { role, .. } => OnboardingState::Ready {
                name: name.to_string(),
                role: *role,
            },
            _ => OnboardingState::AwaitingRole { name: name.to_string() },
        };
        tracing::debug!("Onboarding name accepted: {}", name);
        Ok(greeting(name))
    }

    /// Choose a role. Only possible once a name is in.
    pub fn select_role(&mut self, role: Role) -> Result<(), OnboardingError> {
        let name = match &self.state {
            OnboardingState::AwaitingName => return Err(OnboardingError::EmptyName),
            OnboardingState::AwaitingRole { name } | OnboardingState::Ready { name, .. } => name.clone(),
        };
        self.state = OnboardingState::Ready { name, role };
        Ok(())
    }

    /// The proceed action is only offered once a role is chosen.
    pub fn can_proceed(&self) -> bool {
        matches!(self.state, OnboardingState::Ready { .. })
    }

    /// Finish onboarding and hand out the session.
    pub fn proceed(self) -> Result<Session, OnboardingError> {
        match self.state {
            OnboardingState::AwaitingName => Err(OnboardingError::EmptyName),
            OnboardingState::AwaitingRole { .. } => Err(OnboardingError::RoleNotSelected),
            OnboardingState::Ready { name, role } => {
                let session = Session::new(&name, role)?;
                tracing::info!("Session started for {} ({})", session.name(), session.role());
                Ok(session)
            }
        }
    }

    /// Run the whole flow from already-known answers (one-shot commands).
    pub fn complete(name: &str, role: &str) -> Result<Session, OnboardingError> {
        let mut onboarding = Self::new();
        onboarding.submit_name(name)?;
        onboarding.select_role(role.parse()?)?;
        onboarding.proceed()
    }
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new()
    }
}

pub fn greeting(name: &str) -> String {
    format!("Welcome to the tank, {name}!")
}
