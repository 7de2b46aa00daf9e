//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod handle_resolution;
mod user_directory;

#[cfg(test)]
pub use handle_resolution::MockHandleResolution;
pub use handle_resolution::HandleResolution;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{
    DirectoryUser, FixtureUserDirectory, UserDirectory, UserDirectoryError, UserField,
    UsernameLookupRequest,
};
