//! Component lifecycle: `Uninitialized → Active → Destroyed`.
//!
//! A destroyed component stays destroyed; build a fresh one instead.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Active,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    AlreadyStarted,
    NotStarted,
    Destroyed,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::AlreadyStarted => write!(f, "component already started"),
            LifecycleError::NotStarted => write!(f, "component was never started"),
            LifecycleError::Destroyed => write!(f, "component already destroyed"),
        }
    }
}

impl std::error::Error for LifecycleError {}

impl LifecycleState {
    pub fn activate(&mut self) -> Result<(), LifecycleError> {
        match self {
            LifecycleState::Uninitialized => {
                *self = LifecycleState::Active;
                Ok(())
            }
            LifecycleState::Active => Err(LifecycleError::AlreadyStarted),
            LifecycleState::Destroyed => Err(LifecycleError::Destroyed),
        }
    }

    pub fn deactivate(&mut self) -> Result<(), LifecycleError> {
        match self {
            LifecycleState::Active => {
                *self = LifecycleState::Destroyed;
                Ok(())
            }
            LifecycleState::Uninitialized => Err(LifecycleError::NotStarted),
            LifecycleState::Destroyed => Err(LifecycleError::Destroyed),
        }
    }

    pub fn is_active(self) -> bool {
        self == LifecycleState::Active
    }
}
