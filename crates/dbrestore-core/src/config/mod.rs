//! Connection profiles

mod profiles;

pub use profiles::{
    ConnectionSettings, Profile, ProfileStore, ProviderKind, ServerSettings, PROFILE_EXTENSION,
};
