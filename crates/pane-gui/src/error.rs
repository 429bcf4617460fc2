//! Error types for the GUI core
//!
//! Nothing here is fatal to a running session. Operations that fail return
//! one of these so the host can react, and the core itself logs and degrades.

use std::fmt;
use crate::object::ObjectId;

/// Errors reported by registry, window and widget operations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuiError {
    /// An object with this name is already registered
    DuplicateName(String),

    /// No live object has this id
    UnknownObject(ObjectId),

    /// The object exists but is not a window
    NotAWindow(ObjectId),

    /// Referenced animation frame does not exist
    InvalidFrame {
        name: String,
        frame: usize,
        frames: usize,
    },

    /// Anchor name or code is not recognised, or is reserved for controls
    InvalidAnchor(String),

    /// `child` cannot be attached under `parent` (cycle or composite member)
    InvalidParent {
        parent: ObjectId,
        child: ObjectId,
    },

    /// A collaborator failed to produce a resource
    Resource(ResourceError),
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuiError::DuplicateName(name) => write!(f, "Duplicate object name: {}", name),
            GuiError::UnknownObject(id) => write!(f, "Unknown object: {}", id),
            GuiError::NotAWindow(id) => write!(f, "Object {} is not a window", id),
            GuiError::InvalidFrame { name, frame, frames } => write!(
                f,
                "Invalid frame {} for {} ({} frames)",
                frame, name, frames
            ),
            GuiError::InvalidAnchor(anchor) => write!(f, "Invalid anchor: {}", anchor),
            GuiError::InvalidParent { parent, child } => {
                write!(f, "Object {} cannot be attached to {}", child, parent)
            }
            GuiError::Resource(e) => write!(f, "Resource error: {}", e),
        }
    }
}

impl std::error::Error for GuiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuiError::Resource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResourceError> for GuiError {
    fn from(e: ResourceError) -> Self {
        GuiError::Resource(e)
    }
}

/// Errors surfaced by image and text collaborators
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceError {
    /// No resource at this path
    NotFound(String),

    /// Resource exists but could not be decoded
    Decode {
        path: String,
        reason: String,
    },

    /// Font could not be loaded or used
    Font(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(path) => write!(f, "Resource not found: {}", path),
            ResourceError::Decode { path, reason } => {
                write!(f, "Failed to decode {}: {}", path, reason)
            }
            ResourceError::Font(msg) => write!(f, "Font error: {}", msg),
        }
    }
}

impl std::error::Error for ResourceError {}
