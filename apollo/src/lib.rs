//! Apollo film camera support.
//!
//! Identifies Apollo cameras from cube labels and removes the reseau marks
//! exposed onto the film from scanned frames:
//!
//! - [`instrument`]: mission and camera identity, reseau window size
//! - [`reseau`]: reseau positions and status stored in the label
//! - [`patch`]: nulling or patching the band under each mark
//! - [`remove`]: a full removal run from input to output cube

pub mod instrument;
pub mod patch;
pub mod remove;
pub mod reseau;

pub use instrument::{Apollo, ApolloError, Camera, Mission};
pub use patch::{PatchAction, PatchError, ReseauPatcher, ValidityFilter};
pub use remove::{remove_reseaus, RemovalError, RemovalParams, RemovalReport};
pub use reseau::{Reseau, ReseauError, ReseauStatus};
