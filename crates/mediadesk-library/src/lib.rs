//! # mediadesk-library
//!
//! The media library component of the MediaDesk admin panel. It keeps the
//! client-side view of the media hierarchy and drives every change through
//! a [`MediaApi`] collaborator:
//!
//! - [`FolderTreeStore`] holds folders and answers navigation queries.
//! - [`FileRegistry`] holds the files of the active folder and filters them.
//! - [`UploadCoordinator`] runs one all-or-nothing upload batch at a time.
//! - [`SelectionManager`] tracks selected files for best-effort bulk delete.
//! - [`MediaLibrary`] ties them together and reports outcomes through the
//!   [`LibraryContext`] it was constructed with.

pub mod api;
pub mod confirm;
pub mod context;
pub mod file_registry;
pub mod folder_tree;
pub mod library;
pub mod notification;
pub mod selection;
pub mod upload;

pub use api::{LocalMediaApi, MediaApi, ProgressReporter};
pub use confirm::{AutoConfirm, Confirmer};
pub use context::LibraryContext;
pub use file_registry::FileRegistry;
pub use folder_tree::{Crumb, FolderTreeStore};
pub use library::MediaLibrary;
pub use notification::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use selection::{BulkDeleteSummary, BulkFailure, SelectionManager};
pub use upload::UploadCoordinator;
