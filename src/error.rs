//! Error types for the containers and the transfer actions
//!
//! Nothing here is fatal: every error is handed back to the menu loop, which
//! reports it and carries on.

use std::fmt;

/// Raw capacity violation on a bounded container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// Insert into a container that is at capacity
    Full,
    /// Remove from a container with nothing in it
    Empty,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::Full => f.write_str("container is full"),
            ContainerError::Empty => f.write_str("container is empty"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Why a transfer action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// Reserve with a full reserve stack
    StackFull,
    /// Use-reserved with an empty reserve stack
    StackEmpty,
    /// Front/top swap with the queue or the stack empty
    EmptyContainer,
    /// Block swap without exactly a full reserve stack
    StackNotFull,
    /// A raw container call failed outside the refill discipline
    Container(ContainerError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::StackFull => f.write_str("Reserve stack is full!"),
            TransferError::StackEmpty => f.write_str("Reserve stack is empty!"),
            TransferError::EmptyContainer => f.write_str("Queue or reserve stack is empty!"),
            TransferError::StackNotFull => {
                f.write_str("Reserve stack must be full (3 pieces) to swap a block!")
            }
            TransferError::Container(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Container(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContainerError> for TransferError {
    fn from(e: ContainerError) -> Self {
        TransferError::Container(e)
    }
}
